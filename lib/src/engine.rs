use crate::constraints::GuessFeedback;
use crate::data::WordBank;
use crate::pool::CandidatePool;
use crate::results::SessionOutcome;
use crate::results::TileEvaluation;
use crate::results::WordleError;
use crate::word::CandidateWord;
use log::debug;
use log::info;
use rand::Rng;
use std::collections::BTreeSet;
use std::collections::HashMap;
use std::iter::zip;
use std::mem;
use std::result::Result;

/// The number of rounds in a standard game.
pub const MAX_ROUNDS: u32 = 6;

/// What the game said about a submitted guess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The game didn't recognize the guess as a word. No feedback is available.
    NotAWord,
    /// The game evaluated the guess.
    Evaluated(GuessFeedback),
}

/// Submits guesses to a game and reports the game's feedback.
pub trait FeedbackSource {
    /// Enters `guess` into the game. Returns [`Submission::NotAWord`] if the game refused it,
    /// otherwise everything the game revealed about it.
    fn submit(&mut self, guess: &str) -> Result<Submission, WordleError>;
}

/// Tracks the letters shown as absent on a game's keyboard over a whole session.
///
/// A letter is absent once it has been guessed and never shown as correct or present. Letters
/// only ever join the absent set.
#[derive(Debug, Clone, Default)]
pub struct Keyboard {
    absent: BTreeSet<char>,
    present: BTreeSet<char>,
}

impl Keyboard {
    /// Creates a keyboard with no letters marked.
    pub fn new() -> Keyboard {
        Keyboard::default()
    }

    /// Records the evaluation of one guess.
    ///
    /// Returns [`WordleError::MalformedFeedback`] and records nothing if a letter already marked
    /// absent is now shown as correct or present.
    pub fn record(
        &mut self,
        guess: &str,
        evaluations: &[TileEvaluation],
    ) -> Result<(), WordleError> {
        let letters: Vec<char> = guess.chars().map(|c| c.to_ascii_lowercase()).collect();
        if let Some(letter) = zip(letters.iter(), evaluations.iter())
            .filter(|(_, evaluation)| {
                matches!(evaluation, TileEvaluation::Correct | TileEvaluation::Present)
            })
            .map(|(letter, _)| letter)
            .find(|letter| self.absent.contains(letter))
        {
            return Err(WordleError::MalformedFeedback(format!(
                "'{}' was already shown as absent",
                letter
            )));
        }
        let mut maybe_absent: Vec<char> = Vec::new();
        for (letter, evaluation) in zip(letters, evaluations.iter()) {
            match evaluation {
                TileEvaluation::Correct | TileEvaluation::Present => {
                    self.present.insert(letter);
                }
                TileEvaluation::Absent => maybe_absent.push(letter),
                TileEvaluation::Unknown => {}
            }
        }
        for letter in maybe_absent {
            if !self.present.contains(&letter) {
                self.absent.insert(letter);
            }
        }
        Ok(())
    }

    /// The letters known not to be in the objective word.
    pub fn absent_letters(&self) -> &BTreeSet<char> {
        &self.absent
    }
}

/// Determines how the game evaluates `guess` when the objective word is `answer`.
///
/// Repeated letters are marked `Correct` first, then `Present` from left to right for as many
/// times as the letter remains unmatched in the answer. Any further repeats are `Absent`.
///
/// ```
/// use rs_wordle_filter::evaluate_guess;
/// use rs_wordle_filter::TileEvaluation::*;
///
/// assert_eq!(
///     evaluate_guess("abide", "speed").unwrap(),
///     vec![Absent, Absent, Present, Absent, Present]
/// );
/// ```
pub fn evaluate_guess(answer: &str, guess: &str) -> Result<Vec<TileEvaluation>, WordleError> {
    let answer: Vec<char> = answer.chars().map(|c| c.to_ascii_lowercase()).collect();
    let guess: Vec<char> = guess.chars().map(|c| c.to_ascii_lowercase()).collect();
    if answer.len() != guess.len() {
        return Err(WordleError::WordLength(answer.len()));
    }
    let mut evaluations = vec![TileEvaluation::Absent; guess.len()];
    let mut unmatched: HashMap<char, usize> = HashMap::new();
    for (index, (guess_letter, answer_letter)) in guess.iter().zip(answer.iter()).enumerate() {
        if guess_letter == answer_letter {
            evaluations[index] = TileEvaluation::Correct;
        } else {
            *unmatched.entry(*answer_letter).or_insert(0) += 1;
        }
    }
    for (index, guess_letter) in guess.iter().enumerate() {
        if evaluations[index] == TileEvaluation::Correct {
            continue;
        }
        if let Some(count) = unmatched.get_mut(guess_letter) {
            if *count > 0 {
                *count -= 1;
                evaluations[index] = TileEvaluation::Present;
            }
        }
    }
    Ok(evaluations)
}

/// A game played against a known objective word, e.g. for benchmarking.
///
/// Only words in the word bank (and the objective word itself) are accepted as guesses.
pub struct SimulatedGame<'a> {
    answer: Box<str>,
    bank: &'a WordBank,
    keyboard: Keyboard,
}

impl<'a> SimulatedGame<'a> {
    /// Creates a game whose objective word is `answer`, accepting guesses from `bank`.
    pub fn new(answer: &str, bank: &'a WordBank) -> SimulatedGame<'a> {
        SimulatedGame {
            answer: Box::from(answer.to_ascii_lowercase().as_str()),
            bank,
            keyboard: Keyboard::new(),
        }
    }

    /// The keyboard as the game would currently show it.
    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }
}

impl<'a> FeedbackSource for SimulatedGame<'a> {
    fn submit(&mut self, guess: &str) -> Result<Submission, WordleError> {
        let guess = guess.to_ascii_lowercase();
        if guess != *self.answer && !self.bank.contains(&guess) {
            return Ok(Submission::NotAWord);
        }
        let evaluations = evaluate_guess(&self.answer, &guess)?;
        self.keyboard.record(&guess, &evaluations)?;
        let mut feedback = GuessFeedback::from_evaluations(&guess, &evaluations)?;
        feedback.add_globally_absent(self.keyboard.absent_letters().iter().copied());
        Ok(Submission::Evaluated(feedback))
    }
}

/// Settings for a game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// The number of evaluated guesses allowed before the session is lost.
    pub max_rounds: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            max_rounds: MAX_ROUNDS,
        }
    }
}

/// Where a session is in the guess, submit, filter cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundState {
    /// The next guess must be picked from the pool.
    AwaitingGuess,
    /// The picked guess must be submitted to the game.
    AwaitingFeedback(CandidateWord),
    /// The game's feedback must be applied to the pool.
    Filtering(GuessFeedback),
    /// The objective word was guessed.
    Won,
    /// No rounds or candidates remain.
    Exhausted,
}

impl RoundState {
    /// Returns `true` iff the session has been won or exhausted.
    pub fn is_finished(&self) -> bool {
        matches!(self, RoundState::Won | RoundState::Exhausted)
    }
}

/// Drives one game session over a candidate pool, one state transition at a time.
pub struct Session<'p, R> {
    pool: &'p mut CandidatePool<R>,
    config: SessionConfig,
    state: RoundState,
    guesses: Vec<Box<str>>,
}

impl<'p, R: Rng> Session<'p, R> {
    /// Starts a session that guesses from `pool`.
    pub fn new(pool: &'p mut CandidatePool<R>, config: SessionConfig) -> Session<'p, R> {
        Session {
            pool,
            config,
            state: RoundState::AwaitingGuess,
            guesses: Vec::new(),
        }
    }

    /// Where the session currently is in the round cycle.
    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// The guesses the game has evaluated so far.
    pub fn guesses(&self) -> &[Box<str>] {
        &self.guesses
    }

    /// The number of rounds used so far. Rejected guesses don't count.
    pub fn rounds_played(&self) -> u32 {
        self.guesses.len() as u32
    }

    /// The candidates still in play.
    pub fn pool(&self) -> &CandidatePool<R> {
        self.pool
    }

    /// Advances the session by one transition.
    ///
    /// On error the session stays in the state it was in, so the step can be retried.
    pub fn step<F>(&mut self, source: &mut F) -> Result<&RoundState, WordleError>
    where
        F: FeedbackSource + ?Sized,
    {
        let state = mem::replace(&mut self.state, RoundState::AwaitingGuess);
        self.state = match state {
            RoundState::AwaitingGuess => {
                if self.rounds_played() >= self.config.max_rounds {
                    info!("Out of rounds after {} guesses", self.rounds_played());
                    RoundState::Exhausted
                } else {
                    match self.pool.pick() {
                        Ok(guess) => RoundState::AwaitingFeedback(guess),
                        Err(WordleError::ExhaustedPool) => {
                            info!("No candidate words remain");
                            RoundState::Exhausted
                        }
                        Err(error) => return Err(error),
                    }
                }
            }
            RoundState::AwaitingFeedback(guess) => match source.submit(guess.as_str()) {
                Ok(Submission::NotAWord) => {
                    debug!("{} was rejected by the game, discarding it", guess);
                    RoundState::AwaitingGuess
                }
                Ok(Submission::Evaluated(feedback)) => {
                    self.guesses.push(Box::from(guess.as_str()));
                    RoundState::Filtering(feedback)
                }
                Err(error) => {
                    self.state = RoundState::AwaitingFeedback(guess);
                    return Err(error);
                }
            },
            RoundState::Filtering(feedback) => {
                let num_before = self.pool.len();
                if let Err(error) = self.pool.apply_feedback(&feedback) {
                    self.state = RoundState::Filtering(feedback);
                    return Err(error);
                }
                info!(
                    "Round {}: {} words were eliminated, {} remain",
                    self.rounds_played(),
                    num_before - self.pool.len(),
                    self.pool.len()
                );
                if feedback.is_solved() {
                    RoundState::Won
                } else if self.rounds_played() >= self.config.max_rounds {
                    RoundState::Exhausted
                } else {
                    RoundState::AwaitingGuess
                }
            }
            finished => finished,
        };
        Ok(&self.state)
    }

    /// Consumes the session, returning how it ended. A session that hasn't been won counts as
    /// exhausted.
    pub fn into_outcome(self) -> SessionOutcome {
        match self.state {
            RoundState::Won => SessionOutcome::Won(self.guesses),
            _ => SessionOutcome::Exhausted(self.guesses),
        }
    }
}

/// Plays a full session, guessing from `pool` and submitting to `source` until the game is won,
/// or there are no rounds or candidates left.
pub fn play_session<R, F>(
    pool: &mut CandidatePool<R>,
    source: &mut F,
    config: &SessionConfig,
) -> Result<SessionOutcome, WordleError>
where
    R: Rng,
    F: FeedbackSource + ?Sized,
{
    let mut session = Session::new(pool, config.clone());
    while !session.step(&mut *source)?.is_finished() {}
    Ok(session.into_outcome())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results::TileEvaluation::*;
    use assert_matches::assert_matches;

    #[test]
    fn keyboard_accumulates_absent_letters() -> Result<(), WordleError> {
        let mut keyboard = Keyboard::new();

        keyboard.record("crane", &[Absent, Absent, Correct, Absent, Present])?;
        keyboard.record("lotus", &[Absent, Absent, Absent, Absent, Absent])?;

        assert_eq!(
            keyboard.absent_letters(),
            &BTreeSet::from(['c', 'r', 'n', 'l', 'o', 't', 'u', 's'])
        );
        Ok(())
    }

    #[test]
    fn keyboard_never_marks_present_letter_absent() -> Result<(), WordleError> {
        let mut keyboard = Keyboard::new();

        keyboard.record("eerie", &[Absent, Correct, Absent, Absent, Absent])?;
        keyboard.record("ebbed", &[Absent, Absent, Absent, Absent, Absent])?;

        assert!(!keyboard.absent_letters().contains(&'e'));
        assert!(keyboard.absent_letters().contains(&'b'));
        Ok(())
    }

    #[test]
    fn keyboard_rejects_absent_letter_found_later() -> Result<(), WordleError> {
        let mut keyboard = Keyboard::new();
        keyboard.record("ab", &[Absent, Absent])?;

        assert_matches!(
            keyboard.record("ba", &[Present, Unknown]),
            Err(WordleError::MalformedFeedback(_))
        );
        assert_matches!(
            keyboard.record("ca", &[Absent, Correct]),
            Err(WordleError::MalformedFeedback(_))
        );

        // Nothing from the rejected rounds was recorded.
        assert_eq!(keyboard.absent_letters(), &BTreeSet::from(['a', 'b']));
        Ok(())
    }

    #[test]
    fn round_state_is_finished() {
        assert!(RoundState::Won.is_finished());
        assert!(RoundState::Exhausted.is_finished());
        assert!(!RoundState::AwaitingGuess.is_finished());
        assert!(!RoundState::Filtering(GuessFeedback::unknown(5)).is_finished());
    }
}
