//! Core of quizterm: the quiz session state machine and the storage it needs.
//!
//! Nothing in this crate touches the terminal or the network. The binary
//! feeds it questions and one-second ticks and renders what it exposes.

pub mod db;
pub mod handoff;
pub mod schema;
pub mod scores;
pub mod session;
pub mod store;
pub mod types;

pub use handoff::{ResultsBundle, ResultsHandoff};
pub use session::{QuizSession, Submission, TickOutcome, DEFAULT_TIMER_SECS};
pub use store::{KeyValueStore, MemoryStore, StoreError};
pub use types::{Difficulty, Question, QuizResult};
