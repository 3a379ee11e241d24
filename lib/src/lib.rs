//! Narrows a list of candidate words down to those consistent with the feedback from a
//! Wordle-style game.
//!
//! Build a [`CandidatePool`] from the words the game may use, [`pick`](CandidatePool::pick) a
//! guess, and [`apply_feedback`](CandidatePool::apply_feedback) with the game's evaluation of it.
//! [`play_session`] runs that loop against any [`FeedbackSource`].
//!
//! ```
//! use rs_wordle_filter::*;
//!
//! let bank = WordBank::from_iterator(["crane", "slate", "plane", "place"], 5);
//! let mut pool = CandidatePool::new(bank.iter()).unwrap();
//! let mut game = SimulatedGame::new("place", &bank);
//!
//! let outcome = play_session(&mut pool, &mut game, &SessionConfig::default()).unwrap();
//!
//! assert_eq!(outcome.guesses().last().map(|guess| &**guess), Some("place"));
//! ```

mod constraints;
mod data;
mod engine;
mod pool;
mod results;
mod word;

pub use constraints::*;
pub use data::WordBank;
pub use engine::*;
pub use pool::CandidatePool;
pub use results::*;
pub use word::CandidateWord;
