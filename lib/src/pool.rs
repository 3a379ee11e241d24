use crate::constraints::GuessFeedback;
use crate::results::WordleError;
use crate::word::CandidateWord;
use log::debug;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::collections::HashSet;
use std::mem;
use std::result::Result;

/// Pools at least this large are filtered in parallel.
const PARALLEL_FILTER_THRESHOLD: usize = 2048;

/// The shrinking set of words that could still be the objective word.
///
/// Words only ever leave the pool: either because feedback ruled them out, or because they were
/// picked.
///
/// ```
/// use rs_wordle_filter::CandidatePool;
/// use rs_wordle_filter::GuessFeedback;
/// use rs_wordle_filter::TileEvaluation::*;
///
/// let mut pool = CandidatePool::new(["crane", "slate", "plane"]).unwrap();
/// let feedback =
///     GuessFeedback::from_evaluations("plane", &[Absent, Correct, Correct, Absent, Correct])
///         .unwrap();
///
/// assert_eq!(pool.apply_feedback(&feedback).unwrap(), 2);
/// assert!(pool.contains("slate"));
/// ```
#[derive(Debug, Clone)]
pub struct CandidatePool<R = StdRng> {
    word_length: usize,
    remaining: Vec<CandidateWord>,
    rng: R,
}

impl CandidatePool<StdRng> {
    /// Constructs a pool from the given words, choosing guesses with an entropy-seeded generator.
    ///
    /// See [`CandidatePool::with_rng`].
    pub fn new<I, S>(words: I) -> Result<Self, WordleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        CandidatePool::with_rng(words, StdRng::from_entropy())
    }
}

impl<R: Rng> CandidatePool<R> {
    /// Constructs a pool from the given words, choosing guesses with the given random number
    /// generator.
    ///
    /// Words are converted to lower case, and repeated words are kept once. Blank words are
    /// ignored. All words must have the same length as the first word.
    pub fn with_rng<I, S>(words: I, rng: R) -> Result<Self, WordleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut maybe_word_length: Option<usize> = None;
        let mut seen: HashSet<String> = HashSet::new();
        let mut remaining: Vec<CandidateWord> = Vec::new();
        for word in words {
            let word = word.as_ref().to_ascii_lowercase();
            if word.trim().is_empty() {
                continue;
            }
            let length = word.chars().count();
            match maybe_word_length {
                None => maybe_word_length = Some(length),
                Some(expected) if expected != length => {
                    return Err(WordleError::WordLength(expected));
                }
                _ => {}
            }
            if seen.contains(&word) {
                continue;
            }
            remaining.push(CandidateWord::new(&word));
            seen.insert(word);
        }
        let word_length = maybe_word_length.ok_or(WordleError::EmptyInitialPool)?;
        debug!(
            "Created a pool of {} candidates with {} letters",
            remaining.len(),
            word_length
        );
        Ok(CandidatePool {
            word_length,
            remaining,
            rng,
        })
    }

    /// Removes a uniformly random candidate from the pool and returns it.
    ///
    /// Returns [`WordleError::ExhaustedPool`] if no candidates remain.
    pub fn pick(&mut self) -> Result<CandidateWord, WordleError> {
        if self.remaining.is_empty() {
            return Err(WordleError::ExhaustedPool);
        }
        let index = self.rng.gen_range(0..self.remaining.len());
        Ok(self.remaining.swap_remove(index))
    }
}

impl<R> CandidatePool<R> {
    /// Removes every candidate that is inconsistent with the given feedback, and returns how many
    /// were removed.
    ///
    /// If the feedback is malformed, or describes words of a different length, this returns
    /// [`WordleError::MalformedFeedback`] and leaves the pool unchanged.
    pub fn apply_feedback(&mut self, feedback: &GuessFeedback) -> Result<usize, WordleError> {
        feedback.validate(self.word_length)?;
        let num_before = self.remaining.len();
        let candidates = mem::take(&mut self.remaining);
        self.remaining = if candidates.len() >= PARALLEL_FILTER_THRESHOLD {
            candidates
                .into_par_iter()
                .filter(|word| word.satisfies(feedback))
                .collect()
        } else {
            candidates
                .into_iter()
                .filter(|word| word.satisfies(feedback))
                .collect()
        };
        let num_eliminated = num_before - self.remaining.len();
        debug!(
            "Feedback eliminated {} of {} candidates",
            num_eliminated, num_before
        );
        Ok(num_eliminated)
    }

    /// Removes the given word from the pool. Returns `true` iff it was still a candidate.
    pub fn discard(&mut self, word: &str) -> bool {
        let word = word.to_ascii_lowercase();
        match self
            .remaining
            .iter()
            .position(|candidate| candidate.as_str() == word)
        {
            Some(index) => {
                self.remaining.swap_remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns `true` iff the given word is still a candidate.
    pub fn contains(&self, word: &str) -> bool {
        let word = word.to_ascii_lowercase();
        self.remaining
            .iter()
            .any(|candidate| candidate.as_str() == word)
    }

    /// Iterates over the remaining candidates, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &CandidateWord> {
        self.remaining.iter()
    }

    /// The number of remaining candidates.
    pub fn len(&self) -> usize {
        self.remaining.len()
    }

    /// Returns `true` iff no candidates remain.
    pub fn is_empty(&self) -> bool {
        self.remaining.is_empty()
    }

    /// The length of every word in this pool.
    pub fn word_length(&self) -> usize {
        self.word_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::TileEvaluation::*;
    use assert_matches::assert_matches;

    fn seeded_pool(words: &[&str]) -> CandidatePool {
        CandidatePool::with_rng(words.iter(), StdRng::seed_from_u64(7)).unwrap()
    }

    #[test]
    fn with_rng_removes_duplicates() {
        let pool = seeded_pool(&["abc", "ABC", "abd", "abc"]);

        assert_eq!(pool.len(), 2);
        assert_eq!(pool.word_length(), 3);
    }

    #[test]
    fn with_rng_empty_fails() {
        let words: Vec<&str> = Vec::new();

        assert_matches!(
            CandidatePool::with_rng(words, StdRng::seed_from_u64(7)),
            Err(WordleError::EmptyInitialPool)
        );
        assert_matches!(
            CandidatePool::new(["", "  "]),
            Err(WordleError::EmptyInitialPool)
        );
    }

    #[test]
    fn with_rng_mixed_lengths_fails() {
        assert_matches!(
            CandidatePool::new(["abc", "abcd"]),
            Err(WordleError::WordLength(3))
        );
    }

    #[test]
    fn apply_feedback_parallel_matches_sequential() -> Result<(), WordleError> {
        let letters: Vec<char> = ('a'..='h').collect();
        let mut words: Vec<String> = Vec::new();
        for a in &letters {
            for b in &letters {
                for c in &letters {
                    for d in &letters {
                        words.push([*a, *b, *c, *d].iter().collect());
                    }
                }
            }
        }
        assert!(words.len() >= PARALLEL_FILTER_THRESHOLD);
        let feedback =
            GuessFeedback::from_evaluations("bead", &[Present, Absent, Correct, Unknown])?;

        let mut pool = CandidatePool::with_rng(&words, StdRng::seed_from_u64(1))?;
        pool.apply_feedback(&feedback)?;

        let expected: HashSet<&str> = words
            .iter()
            .filter(|word| CandidateWord::new(word).satisfies(&feedback))
            .map(|word| word.as_str())
            .collect();
        let actual: HashSet<&str> = pool.iter().map(|word| word.as_str()).collect();
        assert_eq!(actual, expected);
        assert!(!actual.is_empty());
        Ok(())
    }

    fn filter_without_rng_bound<R>(
        pool: &mut CandidatePool<R>,
        feedback: &GuessFeedback,
    ) -> Result<usize, WordleError> {
        pool.apply_feedback(feedback)
    }

    #[test]
    fn apply_feedback_needs_no_rng() -> Result<(), WordleError> {
        let mut pool = seeded_pool(&["abc", "abd", "xyz"]);
        let feedback = GuessFeedback::from_evaluations("abq", &[Correct, Correct, Absent])?;

        assert_eq!(filter_without_rng_bound(&mut pool, &feedback)?, 1);
        assert!(!pool.contains("xyz"));
        Ok(())
    }

    #[test]
    fn apply_feedback_malformed_leaves_pool_unchanged() {
        let mut pool = seeded_pool(&["abc", "abd", "xyz"]);

        assert_matches!(
            pool.apply_feedback(&GuessFeedback::unknown(4)),
            Err(WordleError::MalformedFeedback(_))
        );
        assert_eq!(pool.len(), 3);
    }

    #[test]
    fn pick_is_deterministic_for_a_seed() {
        let mut pool_a = seeded_pool(&["abc", "abd", "xyz", "pqr"]);
        let mut pool_b = seeded_pool(&["abc", "abd", "xyz", "pqr"]);

        for _ in 0..4 {
            assert_eq!(pool_a.pick().unwrap(), pool_b.pick().unwrap());
        }
    }

    #[test]
    fn discard_removes_word() {
        let mut pool = seeded_pool(&["abc", "abd"]);

        assert!(pool.discard("ABC"));
        assert!(!pool.discard("abc"));
        assert!(!pool.contains("abc"));
        assert!(pool.contains("abd"));
        assert_eq!(pool.len(), 1);
    }
}
