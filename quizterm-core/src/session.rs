//! Quiz progression state machine.
//!
//! A [`QuizSession`] owns one attempt at a fixed list of questions: which
//! question is showing, the answer chosen for each, the per-question countdown
//! and, once submitted, the final score. It performs no I/O of its own apart
//! from reading and writing the high score through the injected store.
//!
//! Every guard is a silent no-op. Callers are expected to check
//! [`QuizSession::can_proceed`] before calling `next_question` or
//! `submit_quiz` and to tell the user why nothing happened.

use crate::scores;
use crate::store::KeyValueStore;
use crate::types::{Difficulty, Question, QuizResult};

/// Seconds allowed per question when the caller has no preference.
pub const DEFAULT_TIMER_SECS: u32 = 30;

/// What a call to [`QuizSession::tick`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Timer inactive or quiz already completed; nothing changed.
    Ignored,
    /// One second was taken off the clock.
    Counted,
    /// Time ran out and the next question is now showing.
    Advanced,
    /// Time ran out on the last question and the quiz is now completed.
    Expired,
}

/// Result of [`QuizSession::submit_quiz`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    pub score: u32,
    /// True when this score replaced the stored high score.
    pub new_high_score: bool,
}

/// State of a single quiz attempt.
///
/// `S` is the high-score store. Sessions only need `&self` access to it, so
/// an `Rc<dyn KeyValueStore>` lets many sessions share one database.
#[derive(Debug)]
pub struct QuizSession<S> {
    questions: Vec<Question>,
    current_question_index: usize,
    selected_answers: Vec<Option<usize>>,
    is_completed: bool,
    score: u32,
    time_remaining: u32,
    is_timer_active: bool,

    timer_duration: u32,
    difficulty: Difficulty,
    store: S,
}

impl<S: KeyValueStore> QuizSession<S> {
    /// Creates a session in its initial configuration.
    ///
    /// All answers unset, first question showing, full time on the clock,
    /// timer stopped.
    pub fn new(questions: Vec<Question>, timer_duration: u32, difficulty: Difficulty, store: S) -> Self {
        let selected_answers = vec![None; questions.len()];
        Self {
            questions,
            current_question_index: 0,
            selected_answers,
            is_completed: false,
            score: 0,
            time_remaining: timer_duration,
            is_timer_active: false,
            timer_duration,
            difficulty,
            store,
        }
    }

    /// Replaces the question list and returns to the initial configuration.
    ///
    /// Any in-progress answers are discarded.
    pub fn reset(&mut self, questions: Vec<Question>) {
        self.questions = questions;
        self.restart_quiz();
    }

    /// Returns to the initial configuration with the current questions.
    pub fn restart_quiz(&mut self) {
        self.current_question_index = 0;
        self.selected_answers = vec![None; self.questions.len()];
        self.is_completed = false;
        self.score = 0;
        self.time_remaining = self.timer_duration;
        self.is_timer_active = false;
    }

    pub fn start_timer(&mut self) {
        self.is_timer_active = true;
    }

    pub fn stop_timer(&mut self) {
        self.is_timer_active = false;
    }

    /// Applies one second of elapsed time.
    ///
    /// Ignored unless the timer is active and the quiz is not completed, so a
    /// tick that was already queued when the quiz ended has no effect. When the
    /// clock runs out the question is left as answered (or unanswered) and the
    /// quiz moves on without confirmation.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_timer_active || self.is_completed {
            return TickOutcome::Ignored;
        }

        if self.time_remaining > 1 {
            self.time_remaining -= 1;
            return TickOutcome::Counted;
        }

        self.time_remaining = self.timer_duration;
        if self.current_question_index >= self.last_index() {
            self.is_completed = true;
            TickOutcome::Expired
        } else {
            self.current_question_index += 1;
            TickOutcome::Advanced
        }
    }

    /// Records `index` as the answer to the current question.
    ///
    /// Overwrites any earlier choice for this question only. Ignored once the
    /// quiz is completed.
    pub fn select_answer(&mut self, index: usize) {
        if self.is_completed {
            return;
        }
        if let Some(slot) = self.selected_answers.get_mut(self.current_question_index) {
            *slot = Some(index);
        }
    }

    /// True when the current question has an answer.
    pub fn can_proceed(&self) -> bool {
        matches!(self.selected_answers.get(self.current_question_index), Some(Some(_)))
    }

    /// Moves to the next question and refills the clock. No-op on the last
    /// one and once the quiz is completed.
    pub fn next_question(&mut self) {
        if self.is_completed || self.current_question_index >= self.last_index() {
            return;
        }
        self.current_question_index += 1;
        self.time_remaining = self.timer_duration;
    }

    /// Moves to the previous question and refills the clock. No-op on the
    /// first and once the quiz is completed.
    pub fn previous_question(&mut self) {
        if self.is_completed || self.current_question_index == 0 {
            return;
        }
        self.current_question_index -= 1;
        self.time_remaining = self.timer_duration;
    }

    /// Scores every answer, updates the high score, and completes the quiz.
    ///
    /// The high score is written only when strictly beaten. A store failure is
    /// logged and does not stop the quiz from completing.
    pub fn submit_quiz(&mut self) -> Submission {
        let score = self.count_correct(self.questions.len());

        let new_high_score = match scores::record_high_score(&self.store, self.difficulty, score) {
            Ok(written) => written,
            Err(e) => {
                log::warn!("could not save {} high score {}: {}", self.difficulty, score, e);
                false
            }
        };

        self.is_completed = true;
        self.is_timer_active = false;
        self.score = score;

        Submission { score, new_high_score }
    }

    /// One entry per question, in order, with the recorded answer.
    pub fn results(&self) -> Vec<QuizResult> {
        self.questions
            .iter()
            .zip(&self.selected_answers)
            .map(|(question, &selected_answer)| QuizResult {
                question: question.clone(),
                selected_answer,
                is_correct: selected_answer == Some(question.correct_index),
            })
            .collect()
    }

    /// Correct answers among questions `0..=current_question_index`.
    pub fn current_score(&self) -> u32 {
        self.count_correct(self.current_question_index + 1)
    }

    /// Stored high score for this session's difficulty, 0 when none.
    pub fn high_score(&self) -> u32 {
        scores::read_high_score(&self.store, self.difficulty)
    }

    fn count_correct(&self, upto: usize) -> u32 {
        self.questions
            .iter()
            .zip(&self.selected_answers)
            .take(upto)
            .filter(|(q, a)| **a == Some(q.correct_index))
            .count() as u32
    }

    fn last_index(&self) -> usize {
        self.questions.len().saturating_sub(1)
    }
}

impl<S> QuizSession<S> {
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn selected_answers(&self) -> &[Option<usize>] {
        &self.selected_answers
    }

    /// Answer recorded for the current question.
    pub fn current_selection(&self) -> Option<usize> {
        self.selected_answers
            .get(self.current_question_index)
            .copied()
            .flatten()
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    /// Final score. Only meaningful once [`Self::is_completed`] is true.
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    pub fn is_timer_active(&self) -> bool {
        self.is_timer_active
    }

    pub fn timer_duration(&self) -> u32 {
        self.timer_duration
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// The question on screen, `None` for an empty quiz.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_question_index)
    }

    pub fn is_last_question(&self) -> bool {
        !self.questions.is_empty() && self.current_question_index == self.questions.len() - 1
    }

    /// Position through the quiz as a percentage, counting the current question.
    pub fn progress(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        (self.current_question_index + 1) as f64 / self.questions.len() as f64 * 100.0
    }
}
