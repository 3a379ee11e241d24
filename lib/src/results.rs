use std::io;
use thiserror::Error;

/// The evaluation the game gave a single letter of a guess.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileEvaluation {
    /// The letter is in the word at this location (green).
    Correct,
    /// The letter is in the word, but not at this location (yellow).
    Present,
    /// The letter is not in the word, or not as many times as it was guessed (gray).
    Absent,
    /// No evaluation could be read for this location.
    Unknown,
}

/// Indicates that an error occurred while narrowing the candidate words.
#[derive(Debug, Error)]
pub enum WordleError {
    /// A guess was requested but no candidate words remain.
    #[error("no candidate words remain")]
    ExhaustedPool,
    /// The given feedback is inconsistent with itself or with the pool it was applied to.
    #[error("malformed feedback: {0}")]
    MalformedFeedback(String),
    /// A pool was constructed without any words.
    #[error("cannot build a candidate pool from zero words")]
    EmptyInitialPool,
    /// A word or evaluation had the wrong length. Contains the expected length.
    #[error("words must have length {0}")]
    WordLength(usize),
    /// Reading a word list failed.
    #[error("failed to read words: {0}")]
    IoError(#[from] io::Error),
}

/// How a game session ended.
#[derive(Debug, Eq, PartialEq)]
pub enum SessionOutcome {
    /// The objective word was guessed. Provides the accepted guesses in order, ending with the
    /// winning one.
    Won(Vec<Box<str>>),
    /// The session ran out of rounds or candidates. Provides the accepted guesses in order.
    Exhausted(Vec<Box<str>>),
}

impl SessionOutcome {
    /// The guesses the game accepted during the session.
    pub fn guesses(&self) -> &[Box<str>] {
        match self {
            SessionOutcome::Won(guesses) | SessionOutcome::Exhausted(guesses) => guesses,
        }
    }
}
