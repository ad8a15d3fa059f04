use std::cmp::Reverse;

use instant::{Duration, Instant};
use log::{debug, info};
use smallvec::SmallVec;

use crate::config::{SolverConfig, ValueOrdering};
use crate::domains::Domains;
use crate::grid::{Crossword, VariableId, WordId, MAX_CROSSING_COUNT};
use crate::propagation::{ac3, enforce_node_consistency, revise, Arc, ArcConsistencyResult};

/// A struct recording a slot assignment made during the filling process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Choice {
    pub variable_id: VariableId,
    pub word_id: WordId,
}

/// A partial or complete mapping from variables to words. Choices are pushed as the search
/// descends and popped as it backtracks, so there is only ever one of these per search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    word_ids: Vec<Option<WordId>>,
    choices: Vec<Choice>,
}

impl Assignment {
    pub fn new(variable_count: usize) -> Assignment {
        Assignment { word_ids: vec![None; variable_count], choices: vec![] }
    }

    /// Number of assigned variables.
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Whether every variable has a word.
    pub fn is_complete(&self) -> bool {
        self.choices.len() == self.word_ids.len()
    }

    pub fn contains(&self, variable_id: VariableId) -> bool {
        self.word_ids[variable_id].is_some()
    }

    pub fn get(&self, variable_id: VariableId) -> Option<WordId> {
        self.word_ids[variable_id]
    }

    /// Record a choice for an unassigned variable.
    pub fn push(&mut self, choice: Choice) {
        debug_assert!(!self.contains(choice.variable_id), "variable assigned twice");
        self.word_ids[choice.variable_id] = Some(choice.word_id);
        self.choices.push(choice);
    }

    /// Undo the most recent choice.
    pub fn pop(&mut self) -> Option<Choice> {
        let choice = self.choices.pop()?;
        self.word_ids[choice.variable_id] = None;
        Some(choice)
    }

    /// The choices made so far, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = Choice> + '_ {
        self.choices.iter().copied()
    }
}

/// Can these two choices coexist? They must use different words, and if their slots cross, the
/// words must agree on the shared letter.
fn choices_compatible(crossword: &Crossword, a: &Choice, b: &Choice) -> bool {
    if a.word_id == b.word_id {
        return false;
    }

    match crossword.overlap(a.variable_id, b.variable_id) {
        Some(overlap) => {
            let a_letter = crossword.word(a.word_id).chars.get(overlap.this_cell);
            let b_letter = crossword.word(b.word_id).chars.get(overlap.other_cell);
            a_letter.is_some() && a_letter == b_letter
        }
        None => true,
    }
}

fn choice_fits(crossword: &Crossword, choice: &Choice) -> bool {
    crossword.word(choice.word_id).len() == crossword.variable(choice.variable_id).length
}

/// Check a partial or complete assignment: every word fits its slot, crossing slots agree on the
/// shared letter, and no word is used twice.
pub fn is_consistent(crossword: &Crossword, assignment: &Assignment) -> bool {
    let choices: Vec<Choice> = assignment.iter().collect();

    choices.iter().enumerate().all(|(idx, a)| {
        choice_fits(crossword, a) &&
            choices[idx + 1..].iter().all(|b| choices_compatible(crossword, a, b))
    })
}

/// Check whether adding `choice` to an assignment that is already consistent keeps it consistent.
/// This is the same check as `is_consistent`, restricted to the pairs involving the new choice.
pub fn is_consistent_extension(
    crossword: &Crossword,
    assignment: &Assignment,
    choice: &Choice,
) -> bool {
    !assignment.contains(choice.variable_id) &&
        choice_fits(crossword, choice) &&
        assignment.iter().all(|other| choices_compatible(crossword, choice, &other))
}

/// A struct tracking statistics about the filling process.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    /// How many search states were expanded.
    pub states: u64,
    /// How many choices were undone after their subtree failed.
    pub backtracks: u64,
    /// How many arcs were revised, during preprocessing and during value ordering.
    pub revisions: u64,
    pub duration: Duration,
}

/// A struct representing the results of a fill operation.
#[derive(Debug)]
pub struct FillSuccess {
    pub statistics: Statistics,
    pub assignment: Assignment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillFailure {
    /// Arc consistency emptied the domain of this variable before any search.
    Inconsistent(VariableId),
    /// The search tried every candidate without finding a fill.
    Exhausted,
    /// The search hit the configured backtrack limit.
    BacktrackLimit,
}

/// Where a call to `CrosswordCreator::backtrack` ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    /// The assignment is complete and consistent.
    Complete,
    /// No extension of the assignment works; it is as it was before the call.
    Failed,
    /// The backtrack limit was hit; the assignment is as it was before the call.
    LimitReached,
}

/// Fills a crossword by constraint propagation followed by backtracking search.
#[derive(Debug)]
pub struct CrosswordCreator<'a> {
    crossword: &'a Crossword,
    domains: Domains,
    config: SolverConfig,
    statistics: Statistics,
}

impl<'a> CrosswordCreator<'a> {
    /// Every variable starts with the whole word list as candidates.
    pub fn new(crossword: &'a Crossword) -> CrosswordCreator<'a> {
        let domains = Domains::full(crossword.variables().len(), crossword.words().len());
        CrosswordCreator::with_domains(crossword, domains)
    }

    /// Variables start with the given candidates. There must be one domain per variable.
    pub fn with_domains(crossword: &'a Crossword, domains: Domains) -> CrosswordCreator<'a> {
        assert_eq!(
            domains.variable_count(),
            crossword.variables().len(),
            "one domain is needed per variable",
        );

        CrosswordCreator {
            crossword,
            domains,
            config: SolverConfig::default(),
            statistics: Statistics::default(),
        }
    }

    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn domains(&self) -> &Domains {
        &self.domains
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Remove words of the wrong length from every domain.
    pub fn enforce_node_consistency(&mut self) {
        enforce_node_consistency(self.crossword, &mut self.domains);
    }

    /// Make `x` arc consistent with `y`. See `propagation::revise`.
    pub fn revise(&mut self, x: VariableId, y: VariableId) -> bool {
        self.statistics.revisions += 1;
        revise(self.crossword, &mut self.domains, x, y, self.config.distinct_word_support)
    }

    /// Run AC-3 over the given arcs, or every arc if `arcs` is `None`. See `propagation::ac3`.
    pub fn ac3(&mut self, arcs: Option<Vec<Arc>>) -> ArcConsistencyResult {
        let result = ac3(
            self.crossword,
            &mut self.domains,
            arcs,
            self.config.distinct_word_support,
        );
        if let Ok(success) = &result {
            self.statistics.revisions += success.revisions;
        }
        result
    }

    /// Pick the next variable to fill: fewest remaining candidates, then most crossings, then
    /// lowest id. Returns `None` if everything is assigned.
    pub fn select_unassigned_variable(&self, assignment: &Assignment) -> Option<VariableId> {
        (0..self.crossword.variables().len())
            .filter(|&variable_id| !assignment.contains(variable_id))
            .min_by_key(|&variable_id| {
                (
                    self.domains.len(variable_id),
                    Reverse(self.crossword.neighbors(variable_id).len()),
                )
            })
    }

    /// The candidates for `variable_id`, least constraining first. Each candidate is scored by
    /// tentatively restricting the variable to it and counting how many words that removes from
    /// its unassigned neighbors; every such trial is rolled back before the next one.
    pub fn order_domain_values(
        &mut self,
        variable_id: VariableId,
        assignment: &Assignment,
    ) -> Vec<WordId> {
        let candidates: Vec<WordId> = self.domains.iter(variable_id).collect();

        if self.config.value_ordering == ValueOrdering::DomainOrder || candidates.len() < 2 {
            return candidates;
        }

        let unassigned_neighbors: SmallVec<[VariableId; MAX_CROSSING_COUNT]> = self
            .crossword
            .neighbors(variable_id)
            .iter()
            .copied()
            .filter(|&neighbor| !assignment.contains(neighbor))
            .collect();

        if unassigned_neighbors.is_empty() {
            return candidates;
        }

        let crossword = self.crossword;
        let distinct_word_support = self.config.distinct_word_support;
        let mut scored: Vec<(usize, WordId)> = Vec::with_capacity(candidates.len());

        for word_id in candidates {
            let mut trial = self.domains.trial();
            trial.restrict_to(variable_id, word_id);

            let mut eliminated = 0;
            for &neighbor in &unassigned_neighbors {
                let before = trial.len(neighbor);
                revise(crossword, &mut trial, neighbor, variable_id, distinct_word_support);
                eliminated += before - trial.len(neighbor);
            }
            drop(trial);

            self.statistics.revisions += unassigned_neighbors.len() as u64;
            scored.push((eliminated, word_id));
        }

        scored.sort_by_key(|&(eliminated, _)| eliminated);
        scored.into_iter().map(|(_, word_id)| word_id).collect()
    }

    /// Extend `assignment` to a complete, consistent assignment by depth-first search. On
    /// `Complete` the assignment holds the fill; otherwise it is left exactly as it was passed in.
    /// Domains are not propagated during the search; each extension is only checked against the
    /// choices already made.
    pub fn backtrack(&mut self, assignment: &mut Assignment) -> SearchState {
        if assignment.is_complete() {
            return SearchState::Complete;
        }

        self.statistics.states += 1;

        let variable_id = match self.select_unassigned_variable(assignment) {
            Some(variable_id) => variable_id,
            None => return SearchState::Complete,
        };

        let values = self.order_domain_values(variable_id, assignment);
        debug!(
            "depth {}: trying {} candidates for {:?}",
            assignment.len(),
            values.len(),
            self.crossword.variable(variable_id),
        );

        for word_id in values {
            let choice = Choice { variable_id, word_id };
            if !is_consistent_extension(self.crossword, assignment, &choice) {
                continue;
            }

            assignment.push(choice);

            match self.backtrack(assignment) {
                SearchState::Complete => return SearchState::Complete,
                SearchState::LimitReached => {
                    assignment.pop();
                    return SearchState::LimitReached;
                }
                SearchState::Failed => {
                    assignment.pop();
                    self.statistics.backtracks += 1;

                    if let Some(limit) = self.config.backtrack_limit {
                        if self.statistics.backtracks >= limit {
                            return SearchState::LimitReached;
                        }
                    }
                }
            }
        }

        SearchState::Failed
    }

    /// Enforce node and arc consistency, then search for a fill.
    pub fn solve(&mut self) -> Result<FillSuccess, FillFailure> {
        let start = Instant::now();

        self.enforce_node_consistency();

        match self.ac3(None) {
            Ok(success) => info!(
                "arc consistency removed {} words in {} revisions",
                success.removals, success.revisions,
            ),
            Err(failure) => {
                self.statistics.duration = start.elapsed();
                info!(
                    "arc consistency emptied the domain of {:?}",
                    self.crossword.variable(failure.variable_id),
                );
                return Err(FillFailure::Inconsistent(failure.variable_id));
            }
        }

        let mut assignment = Assignment::new(self.crossword.variables().len());
        let state = self.backtrack(&mut assignment);

        self.statistics.duration = start.elapsed();
        info!("{:?} after {:?}", state, self.statistics);

        match state {
            SearchState::Complete => {
                debug_assert!(is_consistent(self.crossword, &assignment));
                Ok(FillSuccess { statistics: self.statistics.clone(), assignment })
            }
            SearchState::Failed => Err(FillFailure::Exhausted),
            SearchState::LimitReached => Err(FillFailure::BacktrackLimit),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use proptest::prelude::*;

    use super::{
        is_consistent, is_consistent_extension, Assignment, Choice, CrosswordCreator, FillFailure,
        SearchState,
    };
    use crate::config::{SolverConfig, ValueOrdering};
    use crate::domains::Domains;
    use crate::grid::Crossword;
    use crate::render::render_grid;

    fn words_of(crossword: &Crossword, assignment: &Assignment) -> Vec<String> {
        (0..crossword.variables().len())
            .map(|v| {
                assignment.get(v).map(|w| crossword.word(w).string.clone()).unwrap_or_default()
            })
            .collect()
    }

    fn assignment_of(crossword: &Crossword, words: &[&str]) -> Assignment {
        let mut assignment = Assignment::new(crossword.variables().len());
        for (variable_id, word) in words.iter().enumerate() {
            if let Some(word_id) = crossword.word_id(word) {
                assignment.push(Choice { variable_id, word_id });
            }
        }
        assignment
    }

    /// ___
    #[test]
    fn test_single_slot() {
        let crossword = Crossword::parse("___", "cat\ndog").unwrap();

        let result = CrosswordCreator::new(&crossword).solve().expect("Failed to find a fill");

        assert_eq!(words_of(&crossword, &result.assignment), vec!["CAT"]);
        assert!(result.assignment.is_complete());
    }

    #[test]
    fn test_single_slot_with_wrong_length_words() {
        let crossword = Crossword::parse("___", "ab").unwrap();

        let result = CrosswordCreator::new(&crossword).solve();

        assert_eq!(result.unwrap_err(), FillFailure::Exhausted);
    }

    /// ___
    /// _##
    /// _##
    #[test]
    fn test_crossing_slots_must_share_letter() {
        let crossword = Crossword::parse("___\n_##\n_##", "cat\nbat\ncar\ndog").unwrap();
        let id = |word: &str| crossword.word_id(word).unwrap();
        // variable 0 is the down slot, variable 1 the across slot
        let domains = Domains::from_word_ids([
            vec![id("CAR"), id("DOG")],
            vec![id("CAT"), id("BAT")],
        ]);

        let result = CrosswordCreator::with_domains(&crossword, domains)
            .solve()
            .expect("Failed to find a fill");

        assert_eq!(words_of(&crossword, &result.assignment), vec!["CAR", "CAT"]);
        assert!(!is_consistent(&crossword, &assignment_of(&crossword, &["DOG", "BAT"])));
    }

    /// ___
    /// ###
    /// ___
    #[test]
    fn test_duplicate_words_are_rejected() {
        let crossword = Crossword::parse("___\n###\n___", "cat").unwrap();

        let result = CrosswordCreator::new(&crossword).solve();

        assert_eq!(result.unwrap_err(), FillFailure::Exhausted);
    }

    #[test]
    fn test_duplicate_words_rejected_by_propagation_when_enabled() {
        let crossword = Crossword::parse("___\n_##\n_##", "cat").unwrap();
        let config = SolverConfig::default().with_distinct_word_support(true);

        let result = CrosswordCreator::new(&crossword).with_config(config).solve();

        assert!(matches!(result.unwrap_err(), FillFailure::Inconsistent(_)));
    }

    #[test]
    fn test_validator() {
        let crossword = Crossword::parse("___\n_##\n_##", "cat\ncar\nbat\nca").unwrap();

        assert!(is_consistent(&crossword, &assignment_of(&crossword, &["CAR", "CAT"])));
        assert!(is_consistent(&crossword, &assignment_of(&crossword, &["CAR"])));
        assert!(is_consistent(&crossword, &Assignment::new(2)));

        // mismatched crossing letter
        assert!(!is_consistent(&crossword, &assignment_of(&crossword, &["CAR", "BAT"])));
        // same word twice
        assert!(!is_consistent(&crossword, &assignment_of(&crossword, &["CAT", "CAT"])));
        // wrong length
        assert!(!is_consistent(&crossword, &assignment_of(&crossword, &["CA"])));
    }

    #[test]
    fn test_consistent_extension_matches_full_check() {
        let crossword = Crossword::parse("___\n_##\n_##", "cat\ncar\nbat").unwrap();
        let assignment = assignment_of(&crossword, &["CAR"]);

        for word in ["CAT", "CAR", "BAT"] {
            let choice = Choice { variable_id: 1, word_id: crossword.word_id(word).unwrap() };
            let mut extended = assignment.clone();
            extended.push(choice);

            assert_eq!(
                is_consistent_extension(&crossword, &assignment, &choice),
                is_consistent(&crossword, &extended),
            );
        }
    }

    #[test]
    fn test_assignment_push_pop() {
        let mut assignment = Assignment::new(3);
        assignment.push(Choice { variable_id: 2, word_id: 7 });
        assignment.push(Choice { variable_id: 0, word_id: 1 });

        assert_eq!(assignment.len(), 2);
        assert_eq!(assignment.get(2), Some(7));
        assert!(!assignment.is_complete());

        assert_eq!(assignment.pop(), Some(Choice { variable_id: 0, word_id: 1 }));
        assert!(!assignment.contains(0));
        assert_eq!(assignment.iter().collect::<Vec<_>>(), vec![Choice { variable_id: 2, word_id: 7 }]);
    }

    /// _____
    /// _####
    /// _####
    /// _####
    /// _####
    #[test]
    fn test_select_prefers_fewest_candidates_then_most_neighbors() {
        let crossword = Crossword::parse("_____\n_####\n_####\n_####\n_####", "").unwrap();

        let creator = CrosswordCreator::with_domains(
            &crossword,
            Domains::from_word_ids([vec![0, 1], vec![2, 3]]),
        );
        // equal sizes and degrees: first one wins
        assert_eq!(creator.select_unassigned_variable(&Assignment::new(2)), Some(0));

        let creator = CrosswordCreator::with_domains(
            &crossword,
            Domains::from_word_ids([vec![0, 1, 4], vec![2, 3]]),
        );
        assert_eq!(creator.select_unassigned_variable(&Assignment::new(2)), Some(1));

        let mut assignment = Assignment::new(2);
        assignment.push(Choice { variable_id: 1, word_id: 2 });
        assert_eq!(creator.select_unassigned_variable(&assignment), Some(0));

        assignment.push(Choice { variable_id: 0, word_id: 0 });
        assert_eq!(creator.select_unassigned_variable(&assignment), None);
    }

    /// ___
    /// ###
    /// ___
    /// _##
    #[test]
    fn test_select_breaks_ties_by_degree() {
        let crossword = Crossword::parse("___\n###\n___\n_##", "").unwrap();
        // variable 0 is the isolated across slot at the top; 1 (down) and 2 (across) cross at (2, 0)
        assert_eq!(crossword.neighbors(0).len(), 0);
        assert_eq!(crossword.neighbors(1).len(), 1);

        let creator = CrosswordCreator::with_domains(
            &crossword,
            Domains::from_word_ids([vec![0, 1], vec![2, 3], vec![4, 5]]),
        );

        assert_eq!(creator.select_unassigned_variable(&Assignment::new(3)), Some(1));
    }

    /// ___
    /// _##
    /// _##
    #[test]
    fn test_order_domain_values_least_constraining_first() {
        let crossword =
            Crossword::parse("___\n_##\n_##", "bee\ncat\ncar\ncow\nbat\ntoe").unwrap();
        let id = |word: &str| crossword.word_id(word).unwrap();
        let domains = Domains::from_word_ids([
            vec![id("BEE"), id("CAT")],
            vec![id("CAR"), id("COW"), id("BAT"), id("TOE")],
        ]);
        let mut creator = CrosswordCreator::with_domains(&crossword, domains);
        let before = creator.domains().clone();

        // BEE leaves only BAT for the across slot; CAT leaves CAR and COW
        let ordered = creator.order_domain_values(0, &Assignment::new(2));

        assert_eq!(ordered, vec![id("CAT"), id("BEE")]);
        assert_eq!(creator.domains(), &before);
    }

    #[test]
    fn test_order_domain_values_in_domain_order() {
        let crossword =
            Crossword::parse("___\n_##\n_##", "bee\ncat\ncar\ncow\nbat\ntoe").unwrap();
        let id = |word: &str| crossword.word_id(word).unwrap();
        let domains = Domains::from_word_ids([
            vec![id("BEE"), id("CAT")],
            vec![id("CAR"), id("COW"), id("BAT"), id("TOE")],
        ]);
        let config = SolverConfig::default().with_value_ordering(ValueOrdering::DomainOrder);
        let mut creator = CrosswordCreator::with_domains(&crossword, domains).with_config(config);

        assert_eq!(creator.order_domain_values(0, &Assignment::new(2)), vec![id("BEE"), id("CAT")]);
    }

    #[test]
    fn test_order_domain_values_ignores_assigned_neighbors() {
        let crossword =
            Crossword::parse("___\n_##\n_##", "bee\ncat\ncar\ncow\nbat\ntoe").unwrap();
        let id = |word: &str| crossword.word_id(word).unwrap();
        let domains = Domains::from_word_ids([
            vec![id("CAT"), id("BEE")],
            vec![id("CAR"), id("COW"), id("BAT"), id("TOE")],
        ]);
        let mut creator = CrosswordCreator::with_domains(&crossword, domains);
        let mut assignment = Assignment::new(2);
        assignment.push(Choice { variable_id: 1, word_id: id("TOE") });

        // with nothing left to constrain, candidates stay in domain order
        assert_eq!(creator.order_domain_values(0, &assignment), vec![id("BEE"), id("CAT")]);
    }

    /// ___
    /// _#_
    /// ___
    #[test]
    fn test_fill_ring() {
        let crossword = Crossword::parse(
            "___\n_#_\n___",
            "ant\nbee\ncat\ncot\ntea\ntan\nnab\ntub\nbat\nnet",
        ).unwrap();

        let result = CrosswordCreator::new(&crossword).solve().expect("Failed to find a fill");

        assert!(result.assignment.is_complete());
        assert!(is_consistent(&crossword, &result.assignment));
        println!("{:?}", result.statistics);
    }

    /// #___#
    /// #_##_
    /// #_##_
    /// #_##_
    /// #____
    #[test]
    fn test_fill_sample_grid() {
        let data = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let crossword =
            Crossword::load(&data.join("structure0.txt"), &data.join("words0.txt")).unwrap();

        let result = CrosswordCreator::new(&crossword).solve().expect("Failed to find a fill");

        assert_eq!(words_of(&crossword, &result.assignment), vec!["SEVEN", "SIX", "FIVE", "NINE"]);
        println!("{:?}", result.statistics);
        println!("{}", render_grid(&crossword, &result.assignment));
    }

    #[test]
    fn test_backtrack_leaves_assignment_untouched_on_failure() {
        let crossword = Crossword::parse("___\n_#_\n___", "cat\ncar\ntar\nrat").unwrap();
        let mut creator = CrosswordCreator::new(&crossword);
        creator.enforce_node_consistency();

        let mut assignment = Assignment::new(4);
        assignment.push(Choice { variable_id: 1, word_id: crossword.word_id("CAT").unwrap() });
        let before = assignment.clone();

        assert_eq!(creator.backtrack(&mut assignment), SearchState::Failed);
        assert_eq!(assignment, before);
        assert!(creator.statistics().backtracks > 0);
    }

    #[test]
    fn test_backtrack_limit() {
        let crossword = Crossword::parse("___\n_#_\n___", "cat\ncar\ntar\nrat").unwrap();
        let config = SolverConfig::default().with_backtrack_limit(1);
        let mut creator = CrosswordCreator::new(&crossword).with_config(config);
        creator.enforce_node_consistency();

        let mut assignment = Assignment::new(4);
        assert_eq!(creator.backtrack(&mut assignment), SearchState::LimitReached);
        assert!(assignment.is_empty());
        assert_eq!(creator.statistics().backtracks, 1);
    }

    /// A limit of n allows exactly n backtracks.
    #[test]
    fn test_backtrack_limit_counts_backtracks_when_solving() {
        let crossword = Crossword::parse("___\n_#_\n___", "cat\ncar\ntar\nrat").unwrap();
        let config = SolverConfig::default().with_backtrack_limit(2);
        let mut creator = CrosswordCreator::new(&crossword).with_config(config);

        assert_eq!(creator.solve().unwrap_err(), FillFailure::BacktrackLimit);
        assert_eq!(creator.statistics().backtracks, 2);
    }

    /// ___
    /// _##
    /// _##
    #[test]
    fn test_solve_reports_emptied_domain() {
        let crossword = Crossword::parse("___\n_##\n_##", "cat\ndog").unwrap();
        let id = |word: &str| crossword.word_id(word).unwrap();
        let domains = Domains::from_word_ids([vec![id("CAT")], vec![id("DOG")]]);

        let result = CrosswordCreator::with_domains(&crossword, domains).solve();

        assert_eq!(result.unwrap_err(), FillFailure::Inconsistent(0));
    }

    #[test]
    fn test_solve_with_empty_word_list() {
        let crossword = Crossword::parse("___\n_#_\n___", "").unwrap();

        let result = CrosswordCreator::new(&crossword).solve();

        assert_eq!(result.unwrap_err(), FillFailure::Exhausted);
    }

    #[test]
    fn test_solve_is_deterministic() {
        let crossword = Crossword::parse(
            "___\n_#_\n___",
            "ant\nbee\ncat\ncot\ntea\ntan\nnab\ntub\nbat\nnet",
        ).unwrap();

        let first = CrosswordCreator::new(&crossword).solve().expect("Failed to find a fill");
        let second = CrosswordCreator::new(&crossword).solve().expect("Failed to find a fill");

        assert_eq!(first.assignment, second.assignment);
        assert_eq!(first.statistics.states, second.statistics.states);
        assert_eq!(first.statistics.backtracks, second.statistics.backtracks);
    }

    proptest! {
        #[test]
        fn prop_solve_returns_complete_consistent_fill_or_failure(
            words in prop::collection::vec("[a-d]{2,3}", 0..12),
            distinct_word_support in any::<bool>(),
        ) {
            let crossword = Crossword::parse("___\n_#_\n___", &words.join("\n")).unwrap();
            let config = SolverConfig::default().with_distinct_word_support(distinct_word_support);

            match CrosswordCreator::new(&crossword).with_config(config).solve() {
                Ok(result) => {
                    prop_assert!(result.assignment.is_complete());
                    prop_assert_eq!(result.assignment.len(), crossword.variables().len());
                    prop_assert!(is_consistent(&crossword, &result.assignment));
                }
                Err(failure) => {
                    prop_assert_ne!(failure, FillFailure::BacktrackLimit);
                }
            }
        }

        #[test]
        fn prop_value_ordering_does_not_change_satisfiability(
            words in prop::collection::vec("[a-c]{3}", 0..10),
        ) {
            let crossword = Crossword::parse("___\n_#_\n___", &words.join("\n")).unwrap();
            let config = SolverConfig::default().with_value_ordering(ValueOrdering::DomainOrder);

            let ranked = CrosswordCreator::new(&crossword).solve();
            let unranked = CrosswordCreator::new(&crossword).with_config(config).solve();

            prop_assert_eq!(ranked.is_ok(), unranked.is_ok());
        }

        #[test]
        fn prop_node_and_arc_consistency(
            words in prop::collection::vec("[a-c]{2,4}", 0..12),
        ) {
            let crossword = Crossword::parse("____\n_#_#\n____", &words.join("\n")).unwrap();
            let mut creator = CrosswordCreator::new(&crossword);
            creator.enforce_node_consistency();

            for (variable_id, variable) in crossword.variables().iter().enumerate() {
                for word_id in creator.domains().iter(variable_id) {
                    prop_assert_eq!(crossword.word(word_id).len(), variable.length);
                }
            }

            match creator.ac3(None) {
                Ok(_) => {
                    let settled = creator.domains().clone();
                    let again = creator.ac3(None).unwrap();
                    prop_assert_eq!(again.removals, 0);
                    prop_assert_eq!(creator.domains(), &settled);
                }
                Err(failure) => {
                    prop_assert!(creator.domains().is_empty(failure.variable_id));
                }
            }
        }
    }
}
