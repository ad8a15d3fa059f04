use std::collections::{HashMap, HashSet};
use std::fmt::{Debug, Formatter};
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use smallvec::{smallvec, SmallVec};
use thiserror::Error;

/// The expected maximum length for a single slot.
pub const MAX_SLOT_LENGTH: usize = 21;

/// The expected maximum number of slots crossing a single slot. Only slots facing the other way
/// can cross, and each of them crosses at most one cell, so this is bounded by the slot length.
pub const MAX_CROSSING_COUNT: usize = MAX_SLOT_LENGTH;

/// An identifier for a given variable, based on its index in the Crossword's `variables` field.
pub type VariableId = usize;

/// An identifier for a given word, based on its index in the Crossword's `words` field.
pub type WordId = usize;

/// Zero-indexed (row, col) coords for a cell in the grid, where row = 0 is the top row.
pub type GridCoord = (usize, usize);

/// Direction that a slot is facing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Across,
    Down,
}

/// A slot in the grid. Two variables are the same slot if they start in the same cell and face
/// the same way; the length is implied by the grid.
#[derive(Debug, Clone, Copy)]
pub struct Variable {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Variable {
    pub fn new(row: usize, col: usize, direction: Direction, length: usize) -> Variable {
        Variable { row, col, direction, length }
    }

    /// The coords of the cell at `cell_idx` within this slot.
    pub fn cell(&self, cell_idx: usize) -> GridCoord {
        match self.direction {
            Direction::Across => (self.row, self.col + cell_idx),
            Direction::Down => (self.row + cell_idx, self.col),
        }
    }

    /// Generate the coords for each cell of this slot.
    pub fn cell_coords(&self) -> impl Iterator<Item = GridCoord> + '_ {
        (0..self.length).map(move |cell_idx| self.cell(cell_idx))
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.row == other.row && self.col == other.col && self.direction == other.direction
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.row.hash(state);
        self.col.hash(state);
        self.direction.hash(state);
    }
}

/// A crossing between two slots: the index of the shared cell within this slot's word and within
/// the other slot's word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub this_cell: usize,
    pub other_cell: usize,
}

impl Overlap {
    fn flipped(self) -> Overlap {
        Overlap { this_cell: self.other_cell, other_cell: self.this_cell }
    }
}

/// A struct representing a word that can be chosen for a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub string: String,
    pub chars: SmallVec<[char; MAX_SLOT_LENGTH]>,
}

impl Word {
    fn new(string: String) -> Word {
        let chars = string.chars().collect();
        Word { string, chars }
    }

    /// Length in characters, which is what slot lengths are measured in.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum GridError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("grid structure has no cells")]
    EmptyStructure,

    #[error("grid structure row {row} has {found} cells, expected {expected}")]
    NotRectangular { row: usize, found: usize, expected: usize },
}

/// The static constraint model of a grid: its slots, which of them cross and where, and the
/// universe of words they can be filled with. Nothing here changes while solving.
pub struct Crossword {
    pub height: usize,
    pub width: usize,
    structure: Vec<Vec<bool>>,
    words: Vec<Word>,
    word_ids_by_string: HashMap<String, WordId>,
    variables: Vec<Variable>,
    overlaps: Vec<Vec<Option<Overlap>>>,
    neighbors: Vec<SmallVec<[VariableId; MAX_CROSSING_COUNT]>>,
}

impl Debug for Crossword {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crossword")
            .field("height", &self.height)
            .field("width", &self.width)
            .field("variables", &self.variables)
            .field("words", &(["(", &self.words.len().to_string(), " entries)"].join("")))
            .finish()
    }
}

impl Crossword {
    /// Build the model for a grid where `structure[row][col]` is true for open cells. Duplicate
    /// words are dropped, keeping the first occurrence.
    pub fn new<I, S>(structure: Vec<Vec<bool>>, words: I) -> Result<Crossword, GridError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let height = structure.len();
        let width = structure.first().map(|row| row.len()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(GridError::EmptyStructure);
        }
        if let Some((row, cells)) = structure.iter().enumerate().find(|(_, r)| r.len() != width) {
            return Err(GridError::NotRectangular { row, found: cells.len(), expected: width });
        }

        let mut seen: HashSet<String> = HashSet::new();
        let mut word_list: Vec<Word> = vec![];
        for word in words {
            let word: String = word.into();
            if seen.insert(word.clone()) {
                word_list.push(Word::new(word));
            }
        }
        let word_ids_by_string: HashMap<String, WordId> =
            word_list.iter().enumerate().map(|(id, word)| (word.string.clone(), id)).collect();

        let variables = extract_variables(&structure, height, width);
        let overlaps = find_overlaps(&variables);
        let neighbors: Vec<SmallVec<[VariableId; MAX_CROSSING_COUNT]>> = overlaps.iter().map(|row| {
            row.iter().enumerate()
                .filter(|(_, overlap)| overlap.is_some())
                .map(|(other, _)| other)
                .collect()
        }).collect();

        Ok(Crossword {
            height,
            width,
            structure,
            words: word_list,
            word_ids_by_string,
            variables,
            overlaps,
            neighbors,
        })
    }

    /// Parse a grid from the text formats used on disk. In the structure, `_` marks an open cell
    /// and anything else is a block; short rows are padded with blocks. The word list has one
    /// word per line, trimmed and upper-cased, with blank lines skipped.
    pub fn parse(structure: &str, words: &str) -> Result<Crossword, GridError> {
        let lines: Vec<&str> = structure.lines().collect();
        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);

        let structure: Vec<Vec<bool>> = lines.iter().map(|line| {
            let mut row: Vec<bool> = line.chars().map(|c| c == '_').collect();
            row.resize(width, false);
            row
        }).collect();

        let words = words.lines().filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                None
            } else {
                Some(line.to_uppercase())
            }
        });

        Crossword::new(structure, words)
    }

    /// Read and parse a structure file and a word list file.
    pub fn load(structure_path: &Path, words_path: &Path) -> Result<Crossword, GridError> {
        let read = |path: &Path| {
            fs::read_to_string(path).map_err(|source| GridError::Io { path: path.to_path_buf(), source })
        };

        Crossword::parse(&read(structure_path)?, &read(words_path)?)
    }

    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.structure[row][col]
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, variable_id: VariableId) -> &Variable {
        &self.variables[variable_id]
    }

    pub fn variable_id(&self, variable: &Variable) -> Option<VariableId> {
        self.variables.iter().position(|v| v == variable)
    }

    pub fn words(&self) -> &[Word] {
        &self.words
    }

    pub fn word(&self, word_id: WordId) -> &Word {
        &self.words[word_id]
    }

    pub fn word_id(&self, word: &str) -> Option<WordId> {
        self.word_ids_by_string.get(word).copied()
    }

    /// Where `x` and `y` cross, as indexes into `x`'s word and `y`'s word respectively.
    pub fn overlap(&self, x: VariableId, y: VariableId) -> Option<Overlap> {
        self.overlaps[x][y]
    }

    /// The variables crossing `variable_id`, in variable order.
    pub fn neighbors(&self, variable_id: VariableId) -> &[VariableId] {
        &self.neighbors[variable_id]
    }
}

/// Find every run of two or more open cells. Cells are visited in row-major order, and at each
/// cell a down slot starting there comes before an across slot starting there.
fn extract_variables(structure: &[Vec<bool>], height: usize, width: usize) -> Vec<Variable> {
    let open = |row: usize, col: usize| structure[row][col];
    let mut variables = vec![];

    for row in 0..height {
        for col in 0..width {
            if !open(row, col) {
                continue;
            }

            if row == 0 || !open(row - 1, col) {
                let length = (row..height).take_while(|&r| open(r, col)).count();
                if length > 1 {
                    variables.push(Variable::new(row, col, Direction::Down, length));
                }
            }

            if col == 0 || !open(row, col - 1) {
                let length = (col..width).take_while(|&c| open(row, c)).count();
                if length > 1 {
                    variables.push(Variable::new(row, col, Direction::Across, length));
                }
            }
        }
    }

    variables
}

/// Build the dense overlap table. Each cell belongs to at most one across and one down slot, so
/// any cell shared by two slots is their only crossing.
fn find_overlaps(variables: &[Variable]) -> Vec<Vec<Option<Overlap>>> {
    // (variable id, cell index within variable)
    let mut entries_by_cell: HashMap<GridCoord, SmallVec<[(VariableId, usize); 2]>> =
        HashMap::new();

    for (variable_id, variable) in variables.iter().enumerate() {
        for (cell_idx, loc) in variable.cell_coords().enumerate() {
            entries_by_cell.entry(loc).or_insert_with(|| smallvec![]).push((variable_id, cell_idx));
        }
    }

    let mut overlaps = vec![vec![None; variables.len()]; variables.len()];

    for entries in entries_by_cell.values() {
        if let [(x, x_cell), (y, y_cell)] = entries[..] {
            let overlap = Overlap { this_cell: x_cell, other_cell: y_cell };
            overlaps[x][y] = Some(overlap);
            overlaps[y][x] = Some(overlap.flipped());
        }
    }

    overlaps
}
