use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Question pool and high-score namespace.
///
/// The lowercase text form (`easy`, `medium`, `hard`) is used in the trivia API
/// query, in store keys, and on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// All difficulties in display order.
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Lowercase tag, e.g. `"medium"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Capitalised label for headings, e.g. `"Medium"`.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a difficulty tag is not one of `easy`, `medium`, `hard`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty '{0}'")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_owned())),
        }
    }
}

/// One multiple-choice question, already decoded and shuffled.
///
/// Built by the question source and never mutated afterwards. `correct_index`
/// always points into `options`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,           // "q1".."qN", unique within a session
    pub category: String,
    pub difficulty: Difficulty,
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
}

impl Question {
    /// Text of the correct option, if `correct_index` is in range.
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_index).map(String::as_str)
    }
}

/// Per-question outcome produced by `QuizSession::results`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    pub question: Question,
    pub selected_answer: Option<usize>,
    pub is_correct: bool,
}

impl QuizResult {
    /// Text of the selected option, `None` when unanswered.
    pub fn selected_option(&self) -> Option<&str> {
        self.selected_answer
            .and_then(|i| self.question.options.get(i))
            .map(String::as_str)
    }
}
