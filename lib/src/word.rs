use crate::constraints::GuessFeedback;
use crate::constraints::LetterConstraint;
use log::trace;
use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::sync::Arc;

/// A word from the candidate pool, along with the locations of each of its letters.
///
/// Candidate words are immutable; equality and hashing only consider the word's text.
#[derive(Debug, Clone)]
pub struct CandidateWord {
    text: Arc<str>,
    letters: Box<[char]>,
    positions: BTreeMap<char, BTreeSet<usize>>,
}

impl CandidateWord {
    /// Constructs a candidate from the given word. The word is converted to lower case.
    pub fn new(word: &str) -> CandidateWord {
        let text: Arc<str> = Arc::from(word.to_ascii_lowercase().as_str());
        let letters: Box<[char]> = text.chars().collect();
        let mut positions: BTreeMap<char, BTreeSet<usize>> = BTreeMap::new();
        for (index, letter) in letters.iter().enumerate() {
            if positions.contains_key(letter) {
                continue;
            }
            if let Some(constraint) = LetterConstraint::from_word_position(&letters, index) {
                positions.insert(*letter, constraint.known_correct_positions().clone());
            }
        }
        CandidateWord {
            text,
            letters,
            positions,
        }
    }

    /// The word, in lower case.
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Returns a shared handle to the word's text.
    pub fn text(&self) -> Arc<str> {
        Arc::clone(&self.text)
    }

    /// The letters of the word, in order.
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// The number of letters in the word.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Returns `true` iff the word has no letters.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// The locations of `letter` in this word, if it appears at all.
    pub fn positions_of(&self, letter: char) -> Option<&BTreeSet<usize>> {
        self.positions.get(&letter)
    }

    /// Returns `true` iff `letter` appears anywhere in the word.
    pub fn contains_char(&self, letter: char) -> bool {
        self.positions.contains_key(&letter)
    }

    /// Returns `true` iff this word could still be the objective word given `feedback`.
    ///
    /// A word is rejected if it contains any globally absent character, or if for any known
    /// letter of the feedback it:
    ///
    /// * does not contain the letter at all,
    /// * has confirmed-correct locations for the letter, but the word doesn't use any of them, or
    /// * contains the letter at a location confirmed to be wrong.
    pub fn satisfies(&self, feedback: &GuessFeedback) -> bool {
        if let Some(absent) = self
            .positions
            .keys()
            .find(|letter| feedback.globally_absent().contains(*letter))
        {
            trace!("Rejecting {}: contains absent letter '{}'", self.text, absent);
            return false;
        }
        feedback
            .letters()
            .iter()
            .all(|constraint| self.satisfies_letter(constraint))
    }

    fn satisfies_letter(&self, constraint: &LetterConstraint) -> bool {
        let letter = match constraint.character() {
            Some(letter) => letter,
            None => return true,
        };
        let positions = match self.positions.get(&letter) {
            Some(positions) => positions,
            None => {
                trace!("Rejecting {}: missing letter '{}'", self.text, letter);
                return false;
            }
        };
        let known_correct = constraint.known_correct_positions();
        if !known_correct.is_empty() && positions.is_disjoint(known_correct) {
            trace!(
                "Rejecting {}: '{}' is not at any of {:?}",
                self.text,
                letter,
                known_correct
            );
            return false;
        }
        if let Some(wrong) = positions
            .iter()
            .find(|position| constraint.is_known_wrong_at(**position))
        {
            trace!(
                "Rejecting {}: '{}' can't be at location {}",
                self.text,
                letter,
                wrong
            );
            return false;
        }
        true
    }
}

impl PartialEq for CandidateWord {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for CandidateWord {}

impl Hash for CandidateWord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

impl fmt::Display for CandidateWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl AsRef<str> for CandidateWord {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::TileEvaluation::*;
    use crate::results::WordleError;

    #[test]
    fn candidate_word_positions() {
        let word = CandidateWord::new("Hello");

        assert_eq!(word.as_str(), "hello");
        assert_eq!(word.len(), 5);
        assert_eq!(word.positions_of('l'), Some(&BTreeSet::from([2usize, 3])));
        assert_eq!(word.positions_of('h'), Some(&BTreeSet::from([0usize])));
        assert_eq!(word.positions_of('z'), None);
        assert!(word.contains_char('o'));
        assert!(!word.contains_char('a'));
    }

    #[test]
    fn candidate_word_equality_ignores_case() {
        assert_eq!(CandidateWord::new("ABBEY"), CandidateWord::new("abbey"));
        assert!(CandidateWord::new("abbey") != CandidateWord::new("abbot"));
    }

    #[test]
    fn satisfies_unknown_feedback() {
        let feedback = GuessFeedback::unknown(5);

        assert!(CandidateWord::new("zzzzz").satisfies(&feedback));
        assert!(CandidateWord::new("crane").satisfies(&feedback));
    }

    #[test]
    fn satisfies_globally_absent() -> Result<(), WordleError> {
        let mut feedback = GuessFeedback::unknown(5);
        feedback.add_globally_absent(['q']);

        assert!(CandidateWord::new("crane").satisfies(&feedback));
        assert!(!CandidateWord::new("quite").satisfies(&feedback));
        assert!(!CandidateWord::new("squad").satisfies(&feedback));
        Ok(())
    }

    #[test]
    fn satisfies_correct_letter() -> Result<(), WordleError> {
        let feedback =
            GuessFeedback::from_evaluations("abcde", &[Unknown, Correct, Unknown, Unknown, Unknown])?;

        assert!(CandidateWord::new("ebbzz").satisfies(&feedback));
        assert!(CandidateWord::new("zbzzz").satisfies(&feedback));
        assert!(!CandidateWord::new("bzzzz").satisfies(&feedback));
        assert!(!CandidateWord::new("zzzzz").satisfies(&feedback));
        Ok(())
    }

    #[test]
    fn satisfies_present_letter() -> Result<(), WordleError> {
        let feedback =
            GuessFeedback::from_evaluations("abcde", &[Unknown, Present, Unknown, Unknown, Unknown])?;

        assert!(CandidateWord::new("bzzzz").satisfies(&feedback));
        assert!(CandidateWord::new("zzzzb").satisfies(&feedback));
        assert!(!CandidateWord::new("zbzzz").satisfies(&feedback));
        // Present elsewhere doesn't excuse the wrong location.
        assert!(!CandidateWord::new("bbzzz").satisfies(&feedback));
        assert!(!CandidateWord::new("zzzzz").satisfies(&feedback));
        Ok(())
    }

    #[test]
    fn satisfies_word_feedback_only_matches_same_letter_layout() {
        let feedback = GuessFeedback::from_word("abbey");

        assert!(CandidateWord::new("abbey").satisfies(&feedback));
        assert!(!CandidateWord::new("abyes").satisfies(&feedback));
        assert!(!CandidateWord::new("babey").satisfies(&feedback));
    }
}
