//! Transient handoff of a finished quiz to the results screen.
//!
//! The quiz screen writes one [`ResultsBundle`] as JSON under
//! [`HANDOFF_KEY`]; the results screen reads it back. A missing or unreadable
//! bundle means the results screen was reached without finishing a quiz.

use serde::{Deserialize, Serialize};

use crate::store::{KeyValueStore, StoreError};
use crate::types::{Difficulty, QuizResult};

/// Key the bundle is stored under.
pub const HANDOFF_KEY: &str = "quiz-results";

/// Everything the results screen needs about a finished quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultsBundle {
    pub results: Vec<QuizResult>,
    pub score: u32,
    pub total: u32,
    pub difficulty: Difficulty,
    /// Whether this run replaced the stored high score.
    #[serde(default)]
    pub new_high_score: bool,
}

impl ResultsBundle {
    /// Rounded percentage of correct answers; 0 for an empty quiz.
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((f64::from(self.score) / f64::from(self.total)) * 100.0).round() as u32
    }

    /// Best score to display given the stored high score.
    pub fn best_score(&self, stored_high: u32) -> u32 {
        self.score.max(stored_high)
    }
}

/// Single-slot handoff over any [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct ResultsHandoff<S> {
    store: S,
}

impl<S: KeyValueStore> ResultsHandoff<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Replaces the stored bundle.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if serialisation or the write fails.
    pub fn store(&self, bundle: &ResultsBundle) -> Result<(), StoreError> {
        let json = serde_json::to_string(bundle).map_err(|e| StoreError::InvalidValue {
            key: HANDOFF_KEY.to_owned(),
            reason: e.to_string(),
        })?;
        self.store.set(HANDOFF_KEY, &json)
    }

    /// The stored bundle, or `None` when absent or unreadable.
    pub fn load(&self) -> Option<ResultsBundle> {
        let raw = match self.store.get(HANDOFF_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                log::warn!("results handoff unreadable: {}", e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(bundle) => Some(bundle),
            Err(e) => {
                log::warn!("results handoff is not a valid bundle: {}", e);
                None
            }
        }
    }

    /// Drops the stored bundle.
    pub fn clear(&self) {
        if let Err(e) = self.store.remove(HANDOFF_KEY) {
            log::warn!("failed to clear results handoff: {}", e);
        }
    }
}
