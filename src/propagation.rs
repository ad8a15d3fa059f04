use std::collections::{HashMap, VecDeque};

use log::trace;

use crate::domains::Domains;
use crate::grid::{Crossword, VariableId, WordId};

/// A directed arc `(x, y)`: make `x` consistent with `y`.
pub type Arc = (VariableId, VariableId);

/// Results from a call to `ac3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcConsistencySuccess {
    /// How many arcs were revised.
    pub revisions: u64,
    /// How many words were removed across all domains.
    pub removals: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcConsistencyFailure {
    /// The variable whose domain was emptied.
    pub variable_id: VariableId,
}

pub type ArcConsistencyResult = Result<ArcConsistencySuccess, ArcConsistencyFailure>;

/// Remove from each variable's domain every word whose length differs from the slot's length.
/// An emptied domain is left for the later stages to notice.
pub fn enforce_node_consistency(crossword: &Crossword, domains: &mut Domains) {
    for (variable_id, variable) in crossword.variables().iter().enumerate() {
        let wrong_length: Vec<WordId> = domains
            .iter(variable_id)
            .filter(|&word_id| crossword.word(word_id).len() != variable.length)
            .collect();

        for &word_id in &wrong_length {
            domains.remove(variable_id, word_id);
        }

        trace!(
            "node consistency removed {} of {} words for {:?}",
            wrong_length.len(),
            wrong_length.len() + domains.len(variable_id),
            variable,
        );
    }
}

/// Make `x` arc consistent with `y`: remove each word in `x`'s domain that has no word in `y`'s
/// domain with the same letter at their crossing. Returns whether anything was removed. If the
/// two slots don't cross, nothing changes.
///
/// With `distinct_word_support`, a word in `y` identical to the word in `x` doesn't count as
/// support for it.
pub fn revise(
    crossword: &Crossword,
    domains: &mut Domains,
    x: VariableId,
    y: VariableId,
    distinct_word_support: bool,
) -> bool {
    let overlap = match crossword.overlap(x, y) {
        Some(overlap) => overlap,
        None => return false,
    };

    // How many of `y`'s options place each letter in the shared cell.
    let mut support_by_letter: HashMap<char, usize> = HashMap::new();
    for word_id in domains.iter(y) {
        if let Some(&letter) = crossword.word(word_id).chars.get(overlap.other_cell) {
            *support_by_letter.entry(letter).or_insert(0) += 1;
        }
    }

    let unsupported: Vec<WordId> = domains.iter(x).filter(|&word_id| {
        let word = crossword.word(word_id);
        let letter = match word.chars.get(overlap.this_cell) {
            Some(letter) => letter,
            None => return true,
        };

        let mut support = support_by_letter.get(letter).copied().unwrap_or(0);
        let self_support = distinct_word_support &&
            domains.contains(y, word_id) &&
            word.chars.get(overlap.other_cell) == Some(letter);
        if self_support {
            support -= 1;
        }

        support == 0
    }).collect();

    for &word_id in &unsupported {
        domains.remove(x, word_id);
    }

    if !unsupported.is_empty() {
        trace!("revising {} against {} removed {} words", x, y, unsupported.len());
    }

    !unsupported.is_empty()
}

/// Enforce arc consistency with AC-3. If `arcs` is `None`, start from every arc in the constraint
/// graph; otherwise start from just the given arcs.
///
/// The worklist is FIFO. Whenever revising `(x, y)` shrinks `x`, every arc `(n, x)` into `x` is
/// queued again, including `(y, x)`. Fails as soon as any revised domain becomes empty.
pub fn ac3(
    crossword: &Crossword,
    domains: &mut Domains,
    arcs: Option<Vec<Arc>>,
    distinct_word_support: bool,
) -> ArcConsistencyResult {
    let mut queue: VecDeque<Arc> = match arcs {
        Some(arcs) => arcs.into(),
        None => (0..crossword.variables().len())
            .flat_map(|x| crossword.neighbors(x).iter().map(move |&y| (x, y)))
            .collect(),
    };

    let size_before: usize = (0..domains.variable_count()).map(|v| domains.len(v)).sum();
    let mut revisions = 0;

    while let Some((x, y)) = queue.pop_front() {
        revisions += 1;

        if revise(crossword, domains, x, y, distinct_word_support) {
            if domains.is_empty(x) {
                return Err(ArcConsistencyFailure { variable_id: x });
            }

            for &neighbor in crossword.neighbors(x) {
                queue.push_back((neighbor, x));
            }
        }
    }

    let size_after: usize = (0..domains.variable_count()).map(|v| domains.len(v)).sum();

    Ok(ArcConsistencySuccess { revisions, removals: size_before - size_after })
}
