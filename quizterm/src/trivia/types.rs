//! Owned request/result types for the trivia worker thread, plus the wire
//! shape of the Open Trivia Database response.
//!
//! Everything here is `Send` so it can cross from the worker thread to the
//! event loop.

use quizterm_core::{Difficulty, Question};
use serde::Deserialize;
use thiserror::Error;

/// A request for one quiz worth of questions.
///
/// `request_id` lets the event loop drop answers to requests it no longer
/// cares about (the user backed out while loading).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub request_id: u64,
    pub difficulty: Difficulty,
    pub amount: u32,
}

/// Answer to a [`FetchRequest`], carried inside `AppEvent::Trivia`.
#[derive(Debug)]
pub struct FetchOutcome {
    pub request_id: u64,
    pub difficulty: Difficulty,
    pub result: Result<Vec<Question>, FetchError>,
}

/// Why a question fetch produced no quiz.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    #[error("HTTP client unavailable: {0}")]
    ClientUnavailable(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("trivia API returned status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("trivia API response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("trivia API refused the request: {}", api_code_message(.0))]
    Api(u8),
    #[error("trivia API returned no usable questions")]
    Empty,
}

/// Human-readable meaning of an Open Trivia DB `response_code`.
pub fn api_code_message(code: &u8) -> &'static str {
    match *code {
        1 => "not enough questions for this query",
        2 => "invalid parameter",
        3 => "session token not found",
        4 => "session token exhausted",
        5 => "rate limited, try again in a few seconds",
        _ => "unknown response code",
    }
}

/// Top-level JSON body.
#[derive(Debug, Deserialize)]
pub struct ApiResponse {
    pub response_code: u8,
    #[serde(default)]
    pub results: Vec<ApiQuestion>,
}

/// One question as sent by the API. Text fields are HTML-entity encoded.
#[derive(Debug, Deserialize)]
pub struct ApiQuestion {
    pub category: String,
    pub difficulty: String,
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}
