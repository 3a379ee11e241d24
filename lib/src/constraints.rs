use crate::results::TileEvaluation;
use crate::results::WordleError;
use log::debug;
use std::collections::BTreeSet;
use std::iter::zip;
use std::result::Result;

/// What is known about one letter of a guess.
///
/// A constraint with no character carries no information. Its position data is ignored when
/// filtering.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LetterConstraint {
    character: Option<char>,
    /// Locations in a candidate word where this character is confirmed to be.
    known_correct_positions: BTreeSet<usize>,
    /// For each location, whether this character is confirmed not to be there.
    known_wrong_positions: Vec<bool>,
}

impl LetterConstraint {
    /// Constructs a constraint that knows nothing, for words of the given length.
    pub fn unknown(word_length: usize) -> LetterConstraint {
        LetterConstraint {
            character: None,
            known_correct_positions: BTreeSet::new(),
            known_wrong_positions: vec![false; word_length],
        }
    }

    /// Constructs a constraint from raw parts, e.g. a feedback record produced elsewhere.
    ///
    /// No consistency checks happen here; see [`GuessFeedback::validate`].
    pub fn new<I>(
        character: char,
        known_correct_positions: I,
        known_wrong_positions: Vec<bool>,
    ) -> LetterConstraint
    where
        I: IntoIterator<Item = usize>,
    {
        LetterConstraint {
            character: Some(character.to_ascii_lowercase()),
            known_correct_positions: known_correct_positions.into_iter().collect(),
            known_wrong_positions,
        }
    }

    /// The letter is confirmed to be at `index`.
    pub fn correct(character: char, index: usize, word_length: usize) -> LetterConstraint {
        LetterConstraint::new(character, [index], vec![false; word_length])
    }

    /// The letter is in the word, but confirmed not to be at `index`.
    pub fn present(character: char, index: usize, word_length: usize) -> LetterConstraint {
        let mut known_wrong_positions = vec![false; word_length];
        if let Some(wrong) = known_wrong_positions.get_mut(index) {
            *wrong = true;
        }
        LetterConstraint::new(character, [], known_wrong_positions)
    }

    /// Derives the constraint describing the letter at `index` of a concrete word: the letter is
    /// at every location it occupies in the word, and nowhere else.
    ///
    /// Returns `None` if `index` is outside the word.
    pub fn from_word_position(letters: &[char], index: usize) -> Option<LetterConstraint> {
        let character = *letters.get(index)?;
        let known_correct_positions: BTreeSet<usize> = letters
            .iter()
            .enumerate()
            .filter(|(_, letter)| **letter == character)
            .map(|(position, _)| position)
            .collect();
        let known_wrong_positions = (0..letters.len())
            .map(|position| !known_correct_positions.contains(&position))
            .collect();
        Some(LetterConstraint {
            character: Some(character),
            known_correct_positions,
            known_wrong_positions,
        })
    }

    /// The letter this constraint is about, or `None` if nothing is known.
    pub fn character(&self) -> Option<char> {
        self.character
    }

    /// Returns `true` iff this constraint carries no information.
    pub fn is_unknown(&self) -> bool {
        self.character.is_none()
    }

    /// Locations where the letter is confirmed to be.
    pub fn known_correct_positions(&self) -> &BTreeSet<usize> {
        &self.known_correct_positions
    }

    /// For each location, whether the letter is confirmed not to be there.
    pub fn known_wrong_positions(&self) -> &[bool] {
        &self.known_wrong_positions
    }

    /// Returns `true` iff this letter is confirmed not to be at `index`.
    pub fn is_known_wrong_at(&self, index: usize) -> bool {
        self.known_wrong_positions
            .get(index)
            .copied()
            .unwrap_or(false)
    }
}

/// Everything learned from a single guess: one constraint per letter of the guess, plus the
/// characters known not to appear anywhere in the objective word.
#[derive(Debug, PartialEq, Eq, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GuessFeedback {
    letters: Vec<LetterConstraint>,
    globally_absent: BTreeSet<char>,
}

impl GuessFeedback {
    /// Creates feedback for the given word length with every letter unknown.
    pub fn unknown(word_length: usize) -> GuessFeedback {
        GuessFeedback {
            letters: vec![LetterConstraint::unknown(word_length); word_length],
            globally_absent: BTreeSet::new(),
        }
    }

    /// Creates feedback from already-built letter constraints, with nothing globally absent.
    pub fn new(letters: Vec<LetterConstraint>) -> GuessFeedback {
        GuessFeedback {
            letters,
            globally_absent: BTreeSet::new(),
        }
    }

    /// Builds the feedback for a guess from the game's evaluation of each of its letters.
    ///
    /// Letters evaluated as [`TileEvaluation::Absent`] become globally absent, unless another
    /// occurrence of the same letter in this guess was `Correct` or `Present`.
    ///
    /// ```
    /// use rs_wordle_filter::GuessFeedback;
    /// use rs_wordle_filter::TileEvaluation::*;
    ///
    /// let feedback =
    ///     GuessFeedback::from_evaluations("speed", &[Absent, Absent, Present, Absent, Correct])
    ///         .unwrap();
    ///
    /// assert!(feedback.globally_absent().contains(&'s'));
    /// assert!(!feedback.globally_absent().contains(&'e'));
    /// ```
    pub fn from_evaluations(
        guess: &str,
        evaluations: &[TileEvaluation],
    ) -> Result<GuessFeedback, WordleError> {
        let letters: Vec<char> = guess.chars().map(|c| c.to_ascii_lowercase()).collect();
        let word_length = letters.len();
        if evaluations.len() != word_length {
            return Err(WordleError::WordLength(word_length));
        }
        let mut feedback = GuessFeedback::unknown(word_length);
        let mut absent_here: Vec<char> = Vec::new();
        for (index, (letter, evaluation)) in zip(letters.iter(), evaluations.iter()).enumerate() {
            match evaluation {
                TileEvaluation::Correct => {
                    feedback.letters[index] = LetterConstraint::correct(*letter, index, word_length);
                }
                TileEvaluation::Present => {
                    feedback.letters[index] = LetterConstraint::present(*letter, index, word_length);
                }
                TileEvaluation::Absent => absent_here.push(*letter),
                TileEvaluation::Unknown => {}
            }
        }
        feedback.add_globally_absent(absent_here);
        Ok(feedback)
    }

    /// Creates the feedback that describes a concrete word exactly: each letter is at all of its
    /// locations in `word`, and at no others.
    pub fn from_word(word: &str) -> GuessFeedback {
        let letters: Vec<char> = word.chars().map(|c| c.to_ascii_lowercase()).collect();
        GuessFeedback::new(
            (0..letters.len())
                .filter_map(|index| LetterConstraint::from_word_position(&letters, index))
                .collect(),
        )
    }

    /// Adds characters known not to be in the objective word. This only ever grows the set.
    ///
    /// Characters that this feedback confirms are in the word are skipped.
    pub fn add_globally_absent<I>(&mut self, characters: I)
    where
        I: IntoIterator<Item = char>,
    {
        for character in characters {
            let character = character.to_ascii_lowercase();
            if self.confirms_present(character) {
                debug!(
                    "Not marking '{}' as absent, since this guess confirms it is present",
                    character
                );
                continue;
            }
            self.globally_absent.insert(character);
        }
    }

    /// One constraint per letter of the guess, in order.
    pub fn letters(&self) -> &[LetterConstraint] {
        &self.letters
    }

    /// Characters known not to appear anywhere in the objective word.
    pub fn globally_absent(&self) -> &BTreeSet<char> {
        &self.globally_absent
    }

    /// The number of letters in the guess this feedback describes.
    pub fn len(&self) -> usize {
        self.letters.len()
    }

    /// Returns `true` iff the feedback describes a zero-length guess.
    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Returns `true` iff every letter was confirmed correct at its own location.
    pub fn is_solved(&self) -> bool {
        !self.letters.is_empty()
            && self.letters.iter().enumerate().all(|(index, constraint)| {
                !constraint.is_unknown() && constraint.known_correct_positions.contains(&index)
            })
    }

    /// Checks that this feedback is internally consistent and describes words of the given
    /// length.
    pub fn validate(&self, word_length: usize) -> Result<(), WordleError> {
        if self.letters.len() != word_length {
            return Err(WordleError::MalformedFeedback(format!(
                "expected {} letters, found {}",
                word_length,
                self.letters.len()
            )));
        }
        let mut claimed: Vec<Option<char>> = vec![None; word_length];
        for (index, constraint) in self.letters.iter().enumerate() {
            let letter = match constraint.character {
                Some(letter) => letter,
                None => continue,
            };
            if constraint.known_wrong_positions.len() != word_length {
                return Err(WordleError::MalformedFeedback(format!(
                    "letter {} ('{}') has {} wrong-position entries, expected {}",
                    index,
                    letter,
                    constraint.known_wrong_positions.len(),
                    word_length
                )));
            }
            if self.globally_absent.contains(&letter) {
                return Err(WordleError::MalformedFeedback(format!(
                    "'{}' is required at letter {} but also marked absent",
                    letter, index
                )));
            }
            for &position in &constraint.known_correct_positions {
                if position >= word_length {
                    return Err(WordleError::MalformedFeedback(format!(
                        "'{}' is marked correct at out-of-range location {}",
                        letter, position
                    )));
                }
                if constraint.known_wrong_positions[position] {
                    return Err(WordleError::MalformedFeedback(format!(
                        "'{}' is marked both correct and wrong at location {}",
                        letter, position
                    )));
                }
                match claimed[position] {
                    Some(other) if other != letter => {
                        return Err(WordleError::MalformedFeedback(format!(
                            "'{}' and '{}' are both marked correct at location {}",
                            other, letter, position
                        )));
                    }
                    _ => claimed[position] = Some(letter),
                }
            }
        }
        Ok(())
    }

    fn confirms_present(&self, character: char) -> bool {
        self.letters
            .iter()
            .any(|constraint| constraint.character == Some(character))
    }
}
