//! Crossword filling as a constraint satisfaction problem.
//!
//! Each slot in the grid is a variable whose domain starts as the word list. Node consistency
//! drops words of the wrong length, AC-3 prunes words that can't agree with any crossing word,
//! and a backtracking search (MRV + degree variable selection, least-constraining-value
//! ordering) finds a fill where crossings agree and no word is used twice.
//!
//! ```
//! use fillgrid::{render_grid, Crossword, CrosswordCreator};
//!
//! let crossword = Crossword::parse("___\n_##\n_##", "car\ncat\ndog").unwrap();
//! let result = CrosswordCreator::new(&crossword).solve().unwrap();
//! assert_eq!(render_grid(&crossword, &result.assignment), "CAT\nA██\nR██");
//! ```

pub mod config;
pub mod domains;
pub mod grid;
pub mod propagation;
pub mod render;
pub mod search;

pub use config::{SolverConfig, ValueOrdering};
pub use domains::{Domains, Trial};
pub use grid::{Crossword, Direction, GridError, Overlap, Variable, VariableId, Word, WordId};
pub use propagation::{ArcConsistencyFailure, ArcConsistencyResult, ArcConsistencySuccess};
pub use render::{letter_grid, render_grid, save_image};
pub use search::{
    is_consistent, Assignment, Choice, CrosswordCreator, FillFailure, FillSuccess, SearchState,
    Statistics,
};
