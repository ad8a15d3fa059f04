//! Solver configuration.

/// How the candidates for the chosen variable are ordered before they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueOrdering {
    /// Least-constraining value first: candidates that eliminate the fewest words from unassigned
    /// neighbors are tried first. Ties keep domain order.
    #[default]
    LeastConstraining,

    /// Candidates are tried in domain (word list) order, without scoring.
    DomainOrder,
}

/// Configuration for `CrosswordCreator`.
///
/// # Examples
///
/// ```
/// use fillgrid::{SolverConfig, ValueOrdering};
///
/// let config = SolverConfig::default()
///     .with_value_ordering(ValueOrdering::DomainOrder)
///     .with_backtrack_limit(10_000);
/// assert_eq!(config.backtrack_limit, Some(10_000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolverConfig {
    /// Value ordering used at each search step.
    pub value_ordering: ValueOrdering,

    /// When set, arc revision refuses to count a word as support for itself, so two crossing
    /// slots can't prop each other up with the same word. Uniqueness is always enforced by the
    /// consistency check regardless; this only prunes earlier (and occasionally more than the
    /// overlap constraint alone would).
    pub distinct_word_support: bool,

    /// Give up once the search has backtracked this many times. `None` means no limit.
    pub backtrack_limit: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            value_ordering: ValueOrdering::default(),
            distinct_word_support: false,
            backtrack_limit: None,
        }
    }
}

impl SolverConfig {
    pub fn with_value_ordering(mut self, value_ordering: ValueOrdering) -> Self {
        self.value_ordering = value_ordering;
        self
    }

    pub fn with_distinct_word_support(mut self, distinct_word_support: bool) -> Self {
        self.distinct_word_support = distinct_word_support;
        self
    }

    pub fn with_backtrack_limit(mut self, backtrack_limit: u64) -> Self {
        self.backtrack_limit = Some(backtrack_limit);
        self
    }
}
