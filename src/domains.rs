use std::ops::{Deref, DerefMut};

use bit_set::BitSet;

use crate::grid::{VariableId, WordId};

/// A word removed from a variable's domain while a trial was open, recorded so that the trial can
/// put it back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Removal {
    variable_id: VariableId,
    word_id: WordId,
}

/// The live candidate words for each variable. Domains only shrink, except that removals made
/// inside a `Trial` are undone when the trial ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Domains {
    candidates: Vec<BitSet>,

    /// Cached `candidates[variable_id].len()`, since `BitSet::len` has to count bits.
    sizes: Vec<usize>,

    /// Removals made since the outermost open trial began, oldest first.
    trail: Vec<Removal>,

    /// How many trials are open. Removals are only recorded on the trail when this is nonzero.
    open_trials: usize,
}

impl Domains {
    /// Every word is a candidate for every variable.
    pub fn full(variable_count: usize, word_count: usize) -> Domains {
        let mut all_words = BitSet::with_capacity(word_count);
        for word_id in 0..word_count {
            all_words.insert(word_id);
        }

        Domains {
            candidates: vec![all_words; variable_count],
            sizes: vec![word_count; variable_count],
            trail: vec![],
            open_trials: 0,
        }
    }

    /// Each variable starts with its own list of candidates. Repeated ids are collapsed.
    pub fn from_word_ids<I, W>(word_ids_by_variable: I) -> Domains
    where
        I: IntoIterator<Item = W>,
        W: IntoIterator<Item = WordId>,
    {
        let candidates: Vec<BitSet> = word_ids_by_variable
            .into_iter()
            .map(|word_ids| word_ids.into_iter().collect())
            .collect();
        let sizes = candidates.iter().map(|words| words.len()).collect();

        Domains { candidates, sizes, trail: vec![], open_trials: 0 }
    }

    pub fn variable_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn len(&self, variable_id: VariableId) -> usize {
        self.sizes[variable_id]
    }

    pub fn is_empty(&self, variable_id: VariableId) -> bool {
        self.sizes[variable_id] == 0
    }

    pub fn contains(&self, variable_id: VariableId, word_id: WordId) -> bool {
        self.candidates[variable_id].contains(word_id)
    }

    /// The remaining candidates for a variable, in ascending word id order.
    pub fn iter(&self, variable_id: VariableId) -> impl Iterator<Item = WordId> + '_ {
        self.candidates[variable_id].iter()
    }

    /// Remove a word from a variable's domain, returning whether it was there.
    pub fn remove(&mut self, variable_id: VariableId, word_id: WordId) -> bool {
        if !self.candidates[variable_id].remove(word_id) {
            return false;
        }

        self.sizes[variable_id] -= 1;
        if self.open_trials > 0 {
            self.trail.push(Removal { variable_id, word_id });
        }
        true
    }

    /// Remove every candidate for a variable except `word_id`.
    pub fn restrict_to(&mut self, variable_id: VariableId, word_id: WordId) {
        let others: Vec<WordId> =
            self.candidates[variable_id].iter().filter(|&other| other != word_id).collect();

        for other in others {
            self.remove(variable_id, other);
        }
    }

    /// Open a trial. Everything removed through the returned guard is restored, newest first,
    /// when the guard is dropped. Trials nest.
    pub fn trial(&mut self) -> Trial<'_> {
        self.open_trials += 1;
        Trial { mark: self.trail.len(), domains: self }
    }

    fn rollback_to(&mut self, mark: usize) {
        while self.trail.len() > mark {
            if let Some(Removal { variable_id, word_id }) = self.trail.pop() {
                self.candidates[variable_id].insert(word_id);
                self.sizes[variable_id] += 1;
            }
        }
    }
}

/// Scope guard for a set of tentative domain removals. See `Domains::trial`.
#[derive(Debug)]
pub struct Trial<'a> {
    domains: &'a mut Domains,
    mark: usize,
}

impl Deref for Trial<'_> {
    type Target = Domains;

    fn deref(&self) -> &Domains {
        self.domains
    }
}

impl DerefMut for Trial<'_> {
    fn deref_mut(&mut self) -> &mut Domains {
        self.domains
    }
}

impl Drop for Trial<'_> {
    fn drop(&mut self) {
        self.domains.rollback_to(self.mark);
        self.domains.open_trials -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::Domains;

    #[test]
    fn test_full_domains() {
        let domains = Domains::full(2, 3);

        assert_eq!(domains.variable_count(), 2);
        assert_eq!(domains.len(1), 3);
        assert_eq!(domains.iter(0).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_from_word_ids_collapses_repeats() {
        let domains = Domains::from_word_ids([vec![4, 1, 4], vec![]]);

        assert_eq!(domains.iter(0).collect::<Vec<_>>(), vec![1, 4]);
        assert_eq!(domains.len(0), 2);
        assert!(domains.is_empty(1));
    }

    #[test]
    fn test_removals_outside_trials_are_permanent() {
        let mut domains = Domains::full(1, 3);

        assert!(domains.remove(0, 1));
        assert!(!domains.remove(0, 1));
        {
            let _trial = domains.trial();
        }

        assert_eq!(domains.iter(0).collect::<Vec<_>>(), vec![0, 2]);
        assert!(domains.trail.is_empty());
    }

    #[test]
    fn test_trial_restores_exactly() {
        let mut domains = Domains::full(2, 5);
        domains.remove(1, 3);
        let before = domains.clone();

        {
            let mut trial = domains.trial();
            trial.restrict_to(0, 2);
            trial.remove(1, 0);

            assert_eq!(trial.iter(0).collect::<Vec<_>>(), vec![2]);
            assert_eq!(trial.len(1), 3);
        }

        assert_eq!(domains, before);
    }

    #[test]
    fn test_nested_trials() {
        let mut domains = Domains::full(1, 4);

        let mut outer = domains.trial();
        outer.remove(0, 0);
        {
            let mut inner = outer.trial();
            inner.remove(0, 1);
            assert_eq!(inner.len(0), 2);
        }
        assert_eq!(outer.iter(0).collect::<Vec<_>>(), vec![1, 2, 3]);
        drop(outer);

        assert_eq!(domains.len(0), 4);
        assert_eq!(domains.open_trials, 0);
    }
}
