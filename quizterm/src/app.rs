//! Central application state for quizterm.
//!
//! `AppState` owns everything the screens show: which screen is up, the live
//! `QuizSession`, the results handed off from the last quiz, and the current
//! notification. No rendering lives here. The key dispatcher and the event
//! loop call the methods below; the render module only reads.

use std::rc::Rc;
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;
use quizterm_core::scores;
use quizterm_core::{
    Difficulty, KeyValueStore, MemoryStore, QuizSession, ResultsBundle, ResultsHandoff, TickOutcome,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::config::Config;
use crate::event::AppEvent;
use crate::timer::QuizTimer;
use crate::trivia::types::{FetchOutcome, FetchRequest};

/// High-score store shared by the start screen and every session.
pub type SharedStore = Rc<dyn KeyValueStore>;

/// How long a notification stays up unless dismissed.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

/// Which screen is showing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Pick easy / medium / hard (default).
    #[default]
    SelectDifficulty,
    /// Questions are being fetched.
    Loading,
    /// Questions are in; summary before the clock starts.
    Ready,
    /// Answering questions.
    Quiz,
    /// Breakdown of the finished quiz.
    Results,
}

impl Screen {
    pub fn label(self) -> &'static str {
        match self {
            Screen::SelectDifficulty => "START",
            Screen::Loading => "LOADING",
            Screen::Ready => "READY",
            Screen::Quiz => "QUIZ",
            Screen::Results => "RESULTS",
        }
    }
}

/// Modal layer above the current screen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    HelpOverlay,
    /// Quit requested while a quiz is running.
    ConfirmQuit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A dismissible notification.
#[derive(Debug, Clone)]
pub struct Toast {
    pub severity: Severity,
    pub title: String,
    pub message: String,
    pub shown_at: Instant,
}

/// All mutable UI state passed through every render cycle.
pub struct AppState {
    pub screen: Screen,
    pub mode: Mode,

    /// Highlighted card on the difficulty screen (index into `Difficulty::ALL`).
    pub difficulty_cursor: usize,
    /// Difficulty chosen for the current quiz, if any.
    pub selected_difficulty: Option<Difficulty>,
    /// Cached high scores for the start screen.
    pub high_scores: [(Difficulty, u32); 3],

    /// The live quiz, present from the moment questions arrive.
    pub session: Option<QuizSession<SharedStore>>,
    /// Highlighted option on the quiz screen.
    pub option_cursor: usize,

    /// Bundle read back from the handoff when the results screen opens.
    pub results: Option<ResultsBundle>,
    /// High score as stored when the results screen opened.
    pub results_high_score: u32,
    pub results_scroll: u16,
    pub help_scroll: u16,

    pub toast: Option<Toast>,

    pub timer_duration: u32,
    pub question_count: u32,

    store: SharedStore,
    handoff: ResultsHandoff<MemoryStore>,

    /// Request channel to the trivia worker thread.
    pub trivia_tx: Option<Sender<FetchRequest>>,
    /// Event channel used to start quiz timers.
    event_tx: Option<UnboundedSender<AppEvent>>,
    pending_request: Option<u64>,
    next_request_id: u64,

    quiz_timer: Option<QuizTimer>,
    next_timer_generation: u64,
}

impl AppState {
    /// Builds the start-screen state.
    ///
    /// `trivia_tx` and `event_tx` are optional so tests can drive the state
    /// without a worker thread or a runtime.
    pub fn new(
        config: &Config,
        store: SharedStore,
        trivia_tx: Option<Sender<FetchRequest>>,
        event_tx: Option<UnboundedSender<AppEvent>>,
    ) -> Self {
        let high_scores = scores::high_score_table(&*store);
        Self {
            screen: Screen::default(),
            mode: Mode::default(),
            difficulty_cursor: 1,
            selected_difficulty: None,
            high_scores,
            session: None,
            option_cursor: 0,
            results: None,
            results_high_score: 0,
            results_scroll: 0,
            help_scroll: 0,
            toast: None,
            timer_duration: config.timer_secs,
            question_count: config.question_count,
            store,
            handoff: ResultsHandoff::new(MemoryStore::new()),
            trivia_tx,
            event_tx,
            pending_request: None,
            next_request_id: 1,
            quiz_timer: None,
            next_timer_generation: 1,
        }
    }

    /// True while answers are being given; quitting asks first.
    pub fn quiz_in_progress(&self) -> bool {
        self.screen == Screen::Quiz
            && self.session.as_ref().is_some_and(|s| !s.is_completed())
    }

    pub fn refresh_high_scores(&mut self) {
        self.high_scores = scores::high_score_table(&*self.store);
    }

    // -----------------------------------------------------------------------
    // Notifications
    // -----------------------------------------------------------------------

    pub fn notify(&mut self, severity: Severity, title: &str, message: &str) {
        self.toast = Some(Toast {
            severity,
            title: title.to_owned(),
            message: message.to_owned(),
            shown_at: Instant::now(),
        });
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }

    /// Drops the notification once it has been up for [`TOAST_TTL`].
    pub fn expire_toast(&mut self, now: Instant) {
        if self
            .toast
            .as_ref()
            .is_some_and(|t| now.duration_since(t.shown_at) >= TOAST_TTL)
        {
            self.toast = None;
        }
    }

    // -----------------------------------------------------------------------
    // Difficulty selection and loading
    // -----------------------------------------------------------------------

    pub fn cursor_difficulty(&self) -> Difficulty {
        Difficulty::ALL[self.difficulty_cursor.min(Difficulty::ALL.len() - 1)]
    }

    pub fn move_difficulty_cursor(&mut self, delta: isize) {
        let len = Difficulty::ALL.len() as isize;
        self.difficulty_cursor = (self.difficulty_cursor as isize + delta).rem_euclid(len) as usize;
    }

    /// Picks a difficulty and asks the worker for questions.
    pub fn choose_difficulty(&mut self, difficulty: Difficulty) {
        if let Some(i) = Difficulty::ALL.iter().position(|d| *d == difficulty) {
            self.difficulty_cursor = i;
        }
        self.selected_difficulty = Some(difficulty);

        let request = FetchRequest {
            request_id: self.next_request_id,
            difficulty,
            amount: self.question_count,
        };
        self.next_request_id += 1;

        let sent = self
            .trivia_tx
            .as_ref()
            .is_some_and(|tx| tx.send(request.clone()).is_ok());
        if sent {
            self.pending_request = Some(request.request_id);
            self.screen = Screen::Loading;
        } else {
            log::error!("trivia worker is not running; cannot fetch questions");
            self.fetch_failed();
        }
    }

    /// Abandons an in-flight fetch; its answer will be ignored.
    pub fn cancel_loading(&mut self) {
        self.pending_request = None;
        self.back_to_difficulty();
    }

    /// Applies an answer from the trivia worker.
    ///
    /// Answers to anything but the latest request are dropped.
    pub fn apply_fetch_outcome(&mut self, outcome: FetchOutcome) {
        if self.pending_request != Some(outcome.request_id) {
            log::debug!("ignoring stale trivia response {}", outcome.request_id);
            return;
        }
        self.pending_request = None;

        match outcome.result {
            Ok(questions) => {
                match self.session.as_mut() {
                    Some(session) if session.difficulty() == outcome.difficulty => {
                        session.reset(questions);
                    }
                    _ => {
                        self.session = Some(QuizSession::new(
                            questions,
                            self.timer_duration,
                            outcome.difficulty,
                            Rc::clone(&self.store),
                        ));
                    }
                }
                self.option_cursor = 0;
                self.screen = Screen::Ready;
            }
            Err(e) => {
                log::error!("failed to load {} questions: {}", outcome.difficulty, e);
                self.fetch_failed();
            }
        }
    }

    fn fetch_failed(&mut self) {
        self.notify(
            Severity::Error,
            "Error",
            "Failed to load quiz questions. Please try again.",
        );
        self.back_to_difficulty();
    }

    /// Returns to the difficulty screen from Loading or Ready.
    pub fn back_to_difficulty(&mut self) {
        self.quiz_timer = None;
        self.selected_difficulty = None;
        self.screen = Screen::SelectDifficulty;
        self.refresh_high_scores();
    }

    // -----------------------------------------------------------------------
    // Quiz
    // -----------------------------------------------------------------------

    /// Starts answering: shows the first question and starts the clock.
    pub fn start_quiz(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.current_question().is_none() {
            return;
        }
        session.start_timer();
        self.option_cursor = session.current_selection().unwrap_or(0);
        self.screen = Screen::Quiz;

        let generation = self.next_timer_generation;
        self.next_timer_generation += 1;
        self.quiz_timer = self
            .event_tx
            .as_ref()
            .map(|tx| QuizTimer::start(tx.clone(), generation));
        log::info!("quiz started ({})", session.difficulty());
    }

    /// Generation of the running quiz timer, if any.
    pub fn timer_generation(&self) -> Option<u64> {
        self.quiz_timer.as_ref().map(QuizTimer::generation)
    }

    /// Applies one second from the quiz timer with the given generation.
    ///
    /// Ticks from a timer that has since been dropped are ignored.
    pub fn on_quiz_tick(&mut self, generation: u64) {
        if self.timer_generation() != Some(generation) {
            return;
        }
        self.advance_clock();
    }

    /// Applies one second to the session and reacts to expiry.
    pub fn advance_clock(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.tick() {
            TickOutcome::Ignored | TickOutcome::Counted => {}
            TickOutcome::Advanced => {
                self.option_cursor = session.current_selection().unwrap_or(0);
                self.notify(Severity::Info, "Time's up", "Moved on to the next question.");
            }
            TickOutcome::Expired => {
                log::info!("quiz timer expired on the last question");
                self.finish_quiz();
            }
        }
    }

    pub fn move_option_cursor(&mut self, delta: isize) {
        let Some(len) = self
            .session
            .as_ref()
            .and_then(|s| s.current_question())
            .map(|q| q.options.len())
        else {
            return;
        };
        if len == 0 {
            return;
        }
        self.option_cursor = (self.option_cursor as isize + delta).rem_euclid(len as isize) as usize;
    }

    /// Records option `index` for the current question if it exists.
    pub fn select_option(&mut self, index: usize) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let in_range = session
            .current_question()
            .is_some_and(|q| index < q.options.len());
        if in_range {
            session.select_answer(index);
            self.option_cursor = index;
        }
    }

    /// Advances to the next question once the current one is answered.
    pub fn next_question(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !session.can_proceed() {
            self.notify(
                Severity::Warning,
                "Please select an answer",
                "You must select an answer before proceeding to the next question.",
            );
            return;
        }
        session.next_question();
        self.option_cursor = session.current_selection().unwrap_or(0);
    }

    pub fn previous_question(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.previous_question();
        self.option_cursor = session.current_selection().unwrap_or(0);
    }

    /// Submits the quiz once the last question is answered.
    pub fn submit_quiz(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if !session.can_proceed() {
            self.notify(
                Severity::Warning,
                "Please select an answer",
                "You must select an answer before submitting the quiz.",
            );
            return;
        }
        self.finish_quiz();
    }

    /// Scores the session, hands the results off, and opens the results screen.
    ///
    /// Also used when the clock runs out on the last question: the session is
    /// then completed but unscored, and submitting fills in the score and the
    /// high score.
    fn finish_quiz(&mut self) {
        self.quiz_timer = None;
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let submission = session.submit_quiz();
        let bundle = ResultsBundle {
            results: session.results(),
            score: submission.score,
            total: session.total() as u32,
            difficulty: session.difficulty(),
            new_high_score: submission.new_high_score,
        };
        log::info!(
            "quiz complete: {} {}/{}",
            bundle.difficulty,
            bundle.score,
            bundle.total
        );
        if let Err(e) = self.handoff.store(&bundle) {
            log::error!("could not hand off results: {}", e);
        }
        self.show_results();
    }

    /// Opens the results screen from the handoff.
    ///
    /// Without a bundle there is nothing to show, so this falls back to the
    /// start screen.
    pub fn show_results(&mut self) {
        match self.handoff.load() {
            Some(bundle) => {
                self.results_high_score = scores::read_high_score(&*self.store, bundle.difficulty);
                self.results = Some(bundle);
                self.results_scroll = 0;
                self.screen = Screen::Results;
            }
            None => {
                log::warn!("results screen opened without a finished quiz");
                self.results = None;
                self.back_to_difficulty();
            }
        }
        self.refresh_high_scores();
    }

    /// "Try again": clears the handoff and returns to the start screen.
    pub fn restart(&mut self) {
        self.handoff.clear();
        self.results = None;
        self.session = None;
        self.dismiss_toast();
        self.back_to_difficulty();
    }

    pub fn scroll_results(&mut self, delta: i32) {
        self.results_scroll = if delta < 0 {
            self.results_scroll.saturating_sub(delta.unsigned_abs() as u16)
        } else {
            self.results_scroll.saturating_add(delta as u16)
        };
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use quizterm_core::Question;

    pub(crate) fn question(n: usize, correct_index: usize) -> Question {
        Question {
            id: format!("q{}", n),
            category: "History".to_owned(),
            difficulty: Difficulty::Easy,
            question: format!("Question {}?", n),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_index,
        }
    }

    /// State with a fake worker channel; returns the request receiver too.
    pub(crate) fn state() -> (AppState, crossbeam_channel::Receiver<FetchRequest>, Rc<MemoryStore>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        let store = Rc::new(MemoryStore::new());
        let shared: SharedStore = store.clone();
        let state = AppState::new(&Config::default(), shared, Some(tx), None);
        (state, rx, store)
    }

    /// Drives the state to the Ready screen with the given correct indices.
    pub(crate) fn ready(correct: &[usize]) -> (AppState, Rc<MemoryStore>) {
        let (mut state, rx, store) = state();
        state.choose_difficulty(Difficulty::Easy);
        let request = rx.try_recv().unwrap();
        let questions = correct
            .iter()
            .enumerate()
            .map(|(i, &c)| question(i + 1, c))
            .collect();
        state.apply_fetch_outcome(FetchOutcome {
            request_id: request.request_id,
            difficulty: request.difficulty,
            result: Ok(questions),
        });
        (state, store)
    }

    #[test]
    fn choosing_difficulty_sends_request_and_shows_loading() {
        let (mut state, rx, _) = state();
        state.choose_difficulty(Difficulty::Hard);
        let request = rx.try_recv().unwrap();
        assert_eq!(request.difficulty, Difficulty::Hard);
        assert_eq!(request.amount, 10);
        assert_eq!(state.screen, Screen::Loading);
        assert_eq!(state.selected_difficulty, Some(Difficulty::Hard));
    }

    #[test]
    fn fetch_failure_returns_to_start_with_error() {
        let (mut state, rx, _) = state();
        state.choose_difficulty(Difficulty::Medium);
        let request = rx.try_recv().unwrap();
        state.apply_fetch_outcome(FetchOutcome {
            request_id: request.request_id,
            difficulty: request.difficulty,
            result: Err(crate::trivia::types::FetchError::Empty),
        });
        assert_eq!(state.screen, Screen::SelectDifficulty);
        assert!(state.session.is_none());
        assert_eq!(state.toast.as_ref().map(|t| t.severity), Some(Severity::Error));
    }

    #[test]
    fn missing_worker_reports_error() {
        let store: SharedStore = Rc::new(MemoryStore::new());
        let mut state = AppState::new(&Config::default(), store, None, None);
        state.choose_difficulty(Difficulty::Easy);
        assert_eq!(state.screen, Screen::SelectDifficulty);
        assert!(state.toast.is_some());
    }

    #[test]
    fn stale_fetch_is_ignored() {
        let (mut state, rx, _) = state();
        state.choose_difficulty(Difficulty::Easy);
        let stale = rx.try_recv().unwrap();
        state.cancel_loading();
        state.apply_fetch_outcome(FetchOutcome {
            request_id: stale.request_id,
            difficulty: stale.difficulty,
            result: Ok(vec![question(1, 0)]),
        });
        assert_eq!(state.screen, Screen::SelectDifficulty);
        assert!(state.session.is_none());
    }

    #[test]
    fn next_without_answer_warns_and_stays() {
        let (mut state, _) = ready(&[0, 1]);
        state.start_quiz();
        state.next_question();
        let session = state.session.as_ref().unwrap();
        assert_eq!(session.current_question_index(), 0);
        assert_eq!(state.toast.as_ref().map(|t| t.severity), Some(Severity::Warning));
    }

    #[test]
    fn submit_without_answer_warns_and_stays() {
        let (mut state, _) = ready(&[0]);
        state.start_quiz();
        state.submit_quiz();
        assert_eq!(state.screen, Screen::Quiz);
        assert!(!state.session.as_ref().unwrap().is_completed());
    }

    #[test]
    fn full_run_hands_off_results() {
        let (mut state, store) = ready(&[1, 0, 2]);
        state.start_quiz();
        assert_eq!(state.screen, Screen::Quiz);
        state.select_option(1);
        state.next_question();
        state.select_option(0);
        state.next_question();
        state.select_option(1);
        state.submit_quiz();

        assert_eq!(state.screen, Screen::Results);
        let bundle = state.results.as_ref().unwrap();
        assert_eq!(bundle.score, 2);
        assert_eq!(bundle.total, 3);
        assert!(bundle.new_high_score);
        assert!(!bundle.results[2].is_correct);
        assert_eq!(bundle.results[2].selected_answer, Some(1));
        assert_eq!(scores::read_high_score(&*store, Difficulty::Easy), 2);
        assert_eq!(state.high_scores[0], (Difficulty::Easy, 2));
    }

    #[test]
    fn out_of_range_option_is_ignored() {
        let (mut state, _) = ready(&[0]);
        state.start_quiz();
        state.select_option(9);
        assert!(!state.session.as_ref().unwrap().can_proceed());
    }

    #[test]
    fn expiry_on_last_question_scores_and_shows_results() {
        let (mut state, store) = ready(&[0, 0]);
        state.start_quiz();
        state.select_option(0);
        for _ in 0..state.timer_duration {
            state.advance_clock();
        }
        assert_eq!(state.session.as_ref().unwrap().current_question_index(), 1);
        assert_eq!(state.screen, Screen::Quiz);

        for _ in 0..state.timer_duration {
            state.advance_clock();
        }
        assert_eq!(state.screen, Screen::Results);
        let bundle = state.results.as_ref().unwrap();
        assert_eq!(bundle.score, 1, "timer completion still scores the answers given");
        assert_eq!(scores::read_high_score(&*store, Difficulty::Easy), 1);
    }

    #[test]
    fn ticks_without_live_timer_are_ignored() {
        let (mut state, _) = ready(&[0]);
        state.start_quiz();
        // No event channel in tests, so no timer generation is live.
        state.on_quiz_tick(1);
        assert_eq!(state.session.as_ref().unwrap().time_remaining(), state.timer_duration);
    }

    #[tokio::test]
    async fn live_timer_ticks_count_and_old_generations_do_not() {
        let (mut state, _) = ready(&[0, 0]);
        let (tx, _rx) = tokio::sync::mpsc::unbounded_channel();
        state.event_tx = Some(tx);

        state.start_quiz();
        let first = state.timer_generation().unwrap();
        state.on_quiz_tick(first);
        assert_eq!(state.session.as_ref().unwrap().time_remaining(), state.timer_duration - 1);

        // Starting again replaces the timer; ticks from the old one are stale.
        state.start_quiz();
        let second = state.timer_generation().unwrap();
        assert_ne!(first, second);
        state.on_quiz_tick(first);
        assert_eq!(state.session.as_ref().unwrap().time_remaining(), state.timer_duration - 1);

        state.select_option(0);
        state.next_question();
        state.select_option(0);
        state.submit_quiz();
        assert!(state.timer_generation().is_none());
    }

    #[test]
    fn restart_clears_handoff_and_returns_to_start() {
        let (mut state, _) = ready(&[0]);
        state.start_quiz();
        state.select_option(0);
        state.submit_quiz();
        assert_eq!(state.screen, Screen::Results);

        state.restart();
        assert_eq!(state.screen, Screen::SelectDifficulty);
        assert!(state.results.is_none());
        assert!(state.session.is_none());

        // Results screen without a handoff redirects to the start.
        state.show_results();
        assert_eq!(state.screen, Screen::SelectDifficulty);
    }

    #[test]
    fn refetch_for_same_difficulty_resets_session() {
        let (mut state, _) = ready(&[0, 0, 0]);
        state.start_quiz();
        state.select_option(2);
        state.back_to_difficulty();

        let (tx, rx) = crossbeam_channel::unbounded();
        state.trivia_tx = Some(tx);
        state.choose_difficulty(Difficulty::Easy);
        let request = rx.try_recv().unwrap();
        state.apply_fetch_outcome(FetchOutcome {
            request_id: request.request_id,
            difficulty: request.difficulty,
            result: Ok(vec![question(1, 1), question(2, 1)]),
        });
        let session = state.session.as_ref().unwrap();
        assert_eq!(session.total(), 2);
        assert_eq!(session.selected_answers(), &[None, None]);
        assert!(!session.is_timer_active());
    }

    #[test]
    fn toast_expires_after_ttl() {
        let (mut state, _, _) = state();
        state.notify(Severity::Info, "t", "m");
        let shown = state.toast.as_ref().unwrap().shown_at;
        state.expire_toast(shown + Duration::from_secs(1));
        assert!(state.toast.is_some());
        state.expire_toast(shown + TOAST_TTL);
        assert!(state.toast.is_none());
    }

    #[test]
    fn difficulty_cursor_wraps() {
        let (mut state, _, _) = state();
        assert_eq!(state.cursor_difficulty(), Difficulty::Medium);
        state.move_difficulty_cursor(1);
        assert_eq!(state.cursor_difficulty(), Difficulty::Hard);
        state.move_difficulty_cursor(1);
        assert_eq!(state.cursor_difficulty(), Difficulty::Easy);
        state.move_difficulty_cursor(-1);
        assert_eq!(state.cursor_difficulty(), Difficulty::Hard);
    }
}
