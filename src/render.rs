use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::warn;

use crate::grid::Crossword;
use crate::search::Assignment;

/// Glyph drawn for blocked cells in text output.
pub const BLOCK: char = '█';

/// Side length of a cell in the rendered image, in pixels.
pub const CELL_SIZE: usize = 100;

/// Width of the dark border around each cell, in pixels.
pub const CELL_BORDER: usize = 2;

const FONT_WIDTH: usize = 5;
const FONT_HEIGHT: usize = 7;
const FONT_SCALE: usize = 10;

const WHITE: [u8; 3] = [255, 255, 255];
const BLACK: [u8; 3] = [0, 0, 0];

/// The letter in each cell, if any, indexed `[row][col]`.
pub fn letter_grid(crossword: &Crossword, assignment: &Assignment) -> Vec<Vec<Option<char>>> {
    let mut letters = vec![vec![None; crossword.width]; crossword.height];

    for choice in assignment.iter() {
        let variable = crossword.variable(choice.variable_id);
        for (cell_idx, &letter) in crossword.word(choice.word_id).chars.iter().enumerate() {
            let (row, col) = variable.cell(cell_idx);
            letters[row][col] = Some(letter);
        }
    }

    letters
}

/// Turn the given assignment into a rendered string, one line per row.
pub fn render_grid(crossword: &Crossword, assignment: &Assignment) -> String {
    let letters = letter_grid(crossword, assignment);

    (0..crossword.height).map(|row| {
        (0..crossword.width).map(|col| {
            if crossword.is_open(row, col) {
                letters[row][col].unwrap_or(' ')
            } else {
                BLOCK
            }
        }).collect::<String>()
    }).collect::<Vec<_>>().join("\n")
}

/// Save the given assignment as a PPM image.
pub fn save_image(crossword: &Crossword, assignment: &Assignment, path: &Path) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_image(crossword, assignment, &mut writer)?;
    writer.flush()
}

/// Write the given assignment as a binary PPM: a black canvas with a white square per open cell
/// and each letter drawn centered in its square.
pub fn write_image<W: Write>(
    crossword: &Crossword,
    assignment: &Assignment,
    writer: &mut W,
) -> io::Result<()> {
    let letters = letter_grid(crossword, assignment);
    let mut canvas = Canvas::new(crossword.width * CELL_SIZE, crossword.height * CELL_SIZE);

    let interior_size = CELL_SIZE - 2 * CELL_BORDER;
    let glyph_x_offset = (interior_size - FONT_WIDTH * FONT_SCALE) / 2;
    let glyph_y_offset = (interior_size - FONT_HEIGHT * FONT_SCALE) / 2;

    for row in 0..crossword.height {
        for col in 0..crossword.width {
            if !crossword.is_open(row, col) {
                continue;
            }

            let x = col * CELL_SIZE + CELL_BORDER;
            let y = row * CELL_SIZE + CELL_BORDER;
            canvas.fill_rect(x, y, interior_size, interior_size, WHITE);

            if let Some(letter) = letters[row][col] {
                match glyph(letter) {
                    Some(bitmap) => {
                        canvas.draw_glyph(x + glyph_x_offset, y + glyph_y_offset, &bitmap, BLACK)
                    }
                    None => warn!("no glyph for {:?}, leaving cell ({}, {}) blank", letter, row, col),
                }
            }
        }
    }

    canvas.write_ppm(writer)
}

/// An RGB pixel buffer.
struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    fn new(width: usize, height: usize) -> Canvas {
        Canvas { width, height, pixels: vec![0; width * height * 3] }
    }

    fn fill_rect(&mut self, x: usize, y: usize, width: usize, height: usize, color: [u8; 3]) {
        for py in y..(y + height).min(self.height) {
            for px in x..(x + width).min(self.width) {
                let offset = (py * self.width + px) * 3;
                self.pixels[offset..offset + 3].copy_from_slice(&color);
            }
        }
    }

    fn draw_glyph(&mut self, x: usize, y: usize, bitmap: &[u8; FONT_HEIGHT], color: [u8; 3]) {
        for (glyph_row, bits) in bitmap.iter().enumerate() {
            for glyph_col in 0..FONT_WIDTH {
                if bits & (1 << (FONT_WIDTH - 1 - glyph_col)) != 0 {
                    self.fill_rect(
                        x + glyph_col * FONT_SCALE,
                        y + glyph_row * FONT_SCALE,
                        FONT_SCALE,
                        FONT_SCALE,
                        color,
                    );
                }
            }
        }
    }

    fn write_ppm<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        write!(writer, "P6\n{} {}\n255\n", self.width, self.height)?;
        writer.write_all(&self.pixels)
    }
}

/// 5x7 bitmap for a letter, one byte per row with the leftmost pixel in bit 4.
fn glyph(letter: char) -> Option<[u8; FONT_HEIGHT]> {
    let bitmap = match letter.to_ascii_uppercase() {
        'A' => [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'B' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110],
        'C' => [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110],
        'D' => [0b11100, 0b10010, 0b10001, 0b10001, 0b10001, 0b10010, 0b11100],
        'E' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111],
        'F' => [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000],
        'G' => [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111],
        'H' => [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001],
        'I' => [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110],
        'J' => [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100],
        'K' => [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001],
        'L' => [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111],
        'M' => [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001],
        'N' => [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001],
        'O' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'P' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000],
        'Q' => [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101],
        'R' => [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001],
        'S' => [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110],
        'T' => [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100],
        'U' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110],
        'V' => [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100],
        'W' => [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010],
        'X' => [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001],
        'Y' => [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100],
        'Z' => [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111],
        _ => return None,
    };
    Some(bitmap)
}
