use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;

use fillgrid::{render_grid, save_image, Crossword, CrosswordCreator};

/// Fill a crossword grid from a word list.
#[derive(Debug, Parser)]
#[command(name = "fillgrid")]
struct Cli {
    /// Grid structure file: `_` for open cells, anything else for blocks.
    structure: PathBuf,

    /// Word list file, one word per line.
    words: PathBuf,

    /// Where to save an image of the filled grid. The image is always written in binary PPM
    /// (P6) format whatever the file extension, so use a `.ppm` path.
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Cli::parse();

    let crossword = Crossword::load(&args.structure, &args.words)
        .context("Failed to load crossword")?;

    match CrosswordCreator::new(&crossword).solve() {
        Ok(result) => {
            info!("{:?}", result.statistics);
            println!("{}", render_grid(&crossword, &result.assignment));

            if let Some(output) = &args.output {
                save_image(&crossword, &result.assignment, output)
                    .with_context(|| format!("Failed to save image to {}", output.display()))?;
            }
        }
        Err(failure) => {
            info!("{:?}", failure);
            println!("No solution.");
        }
    }

    Ok(())
}
