//! Per-difficulty high scores on top of a [`KeyValueStore`].
//!
//! Values are stored as decimal text under `quiz-high-score-<difficulty>`.

use crate::store::{KeyValueStore, StoreError};
use crate::types::Difficulty;

/// Store key holding the high score for `difficulty`.
pub fn high_score_key(difficulty: Difficulty) -> String {
    format!("quiz-high-score-{}", difficulty.as_str())
}

/// Reads the stored high score, `Ok(0)` when nothing is stored.
///
/// # Errors
///
/// Returns `StoreError` if the backend fails or the stored text is not a
/// non-negative integer.
pub fn try_read_high_score<S: KeyValueStore + ?Sized>(
    store: &S,
    difficulty: Difficulty,
) -> Result<u32, StoreError> {
    let key = high_score_key(difficulty);
    match store.get(&key)? {
        None => Ok(0),
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|e| StoreError::InvalidValue { key, reason: e.to_string() }),
    }
}

/// Reads the stored high score. Any failure is logged and reads as 0.
pub fn read_high_score<S: KeyValueStore + ?Sized>(store: &S, difficulty: Difficulty) -> u32 {
    match try_read_high_score(store, difficulty) {
        Ok(score) => score,
        Err(e) => {
            log::warn!("high score for {} unreadable, treating as 0: {}", difficulty, e);
            0
        }
    }
}

/// Writes `score` iff it is strictly greater than the stored high score.
///
/// Returns `Ok(true)` when the store was updated. Ties leave it unchanged.
///
/// # Errors
///
/// Returns `StoreError` if the write fails. An unreadable previous value is
/// treated as 0 so a corrupt entry gets replaced by the next real score.
pub fn record_high_score<S: KeyValueStore + ?Sized>(
    store: &S,
    difficulty: Difficulty,
    score: u32,
) -> Result<bool, StoreError> {
    let current = read_high_score(store, difficulty);
    if score <= current {
        return Ok(false);
    }
    store.set(&high_score_key(difficulty), &score.to_string())?;
    log::info!("new {} high score: {} (was {})", difficulty, score, current);
    Ok(true)
}

/// High scores for every difficulty, in [`Difficulty::ALL`] order.
pub fn high_score_table<S: KeyValueStore + ?Sized>(store: &S) -> [(Difficulty, u32); 3] {
    Difficulty::ALL.map(|d| (d, read_high_score(store, d)))
}
