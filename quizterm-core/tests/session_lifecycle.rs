//! Behaviour of the quiz session state machine.

use std::rc::Rc;

use quizterm_core::scores;
use quizterm_core::{
    Difficulty, KeyValueStore, MemoryStore, Question, QuizSession, ResultsBundle, ResultsHandoff,
    StoreError, TickOutcome,
};

fn question(n: usize, correct_index: usize) -> Question {
    Question {
        id: format!("q{}", n),
        category: "General Knowledge".to_owned(),
        difficulty: Difficulty::Medium,
        question: format!("Question number {}?", n),
        options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
        correct_index,
    }
}

fn questions(correct: &[usize]) -> Vec<Question> {
    correct
        .iter()
        .enumerate()
        .map(|(i, &c)| question(i + 1, c))
        .collect()
}

fn session(correct: &[usize], timer: u32) -> (QuizSession<Rc<MemoryStore>>, Rc<MemoryStore>) {
    let store = Rc::new(MemoryStore::new());
    let s = QuizSession::new(questions(correct), timer, Difficulty::Medium, Rc::clone(&store));
    (s, store)
}

fn assert_slots_match(s: &QuizSession<Rc<MemoryStore>>) {
    assert_eq!(s.selected_answers().len(), s.questions().len());
}

#[test]
fn new_session_starts_in_initial_configuration() {
    let (s, _) = session(&[1, 0, 2], 30);
    assert_eq!(s.current_question_index(), 0);
    assert_eq!(s.selected_answers(), &[None, None, None]);
    assert!(!s.is_completed());
    assert_eq!(s.score(), 0);
    assert_eq!(s.time_remaining(), 30);
    assert!(!s.is_timer_active());
    assert_eq!(s.current_question().map(|q| q.id.as_str()), Some("q1"));
}

#[test]
fn select_answer_overwrites_only_current_slot() {
    let (mut s, _) = session(&[1, 0, 2], 30);
    s.select_answer(3);
    assert_eq!(s.current_selection(), Some(3));
    s.select_answer(1);
    assert_eq!(s.current_selection(), Some(1));
    assert_eq!(s.selected_answers(), &[Some(1), None, None]);
    assert_eq!(s.current_question_index(), 0, "selecting does not advance");
    assert_slots_match(&s);
}

#[test]
fn can_proceed_tracks_current_slot() {
    let (mut s, _) = session(&[1, 0], 30);
    assert!(!s.can_proceed());
    s.select_answer(0);
    assert!(s.can_proceed());
    s.next_question();
    assert!(!s.can_proceed());
    s.previous_question();
    assert!(s.can_proceed());
}

#[test]
fn next_question_at_last_index_is_noop() {
    let (mut s, _) = session(&[1, 0], 30);
    s.start_timer();
    s.next_question();
    assert_eq!(s.current_question_index(), 1);
    s.tick();
    s.tick();
    assert_eq!(s.time_remaining(), 28);

    s.next_question();
    assert_eq!(s.current_question_index(), 1);
    assert_eq!(s.time_remaining(), 28, "timer untouched by no-op");
}

#[test]
fn navigation_resets_clock_but_not_answers_or_timer_state() {
    let (mut s, _) = session(&[1, 0, 2], 30);
    s.start_timer();
    s.select_answer(1);
    s.tick();
    s.next_question();
    assert_eq!(s.time_remaining(), 30);
    assert!(s.is_timer_active());
    s.tick();
    s.previous_question();
    assert_eq!(s.current_question_index(), 0);
    assert_eq!(s.time_remaining(), 30);
    assert_eq!(s.current_selection(), Some(1));
}

#[test]
fn navigation_after_completion_is_noop() {
    let (mut s, _) = session(&[0, 1, 2], 30);
    s.start_timer();
    s.select_answer(0);
    s.next_question();
    s.tick();
    s.submit_quiz();
    assert!(s.is_completed());
    let remaining = s.time_remaining();

    s.previous_question();
    assert_eq!(s.current_question_index(), 1);
    s.next_question();
    s.next_question();
    assert_eq!(s.current_question_index(), 1);
    assert_eq!(s.time_remaining(), remaining, "clock not refilled");
    assert_eq!(s.selected_answers(), &[Some(0), None, None]);
}

#[test]
fn previous_question_at_first_index_is_noop() {
    let (mut s, _) = session(&[1, 0], 30);
    s.start_timer();
    s.tick();
    s.previous_question();
    assert_eq!(s.current_question_index(), 0);
    assert_eq!(s.time_remaining(), 29);
}

#[test]
fn timer_start_stop_do_not_touch_clock() {
    let (mut s, _) = session(&[0], 30);
    s.start_timer();
    s.start_timer();
    assert!(s.is_timer_active());
    s.tick();
    s.stop_timer();
    s.stop_timer();
    assert!(!s.is_timer_active());
    assert_eq!(s.time_remaining(), 29);
    s.start_timer();
    assert_eq!(s.time_remaining(), 29);
}

#[test]
fn tick_is_ignored_while_inactive() {
    let (mut s, _) = session(&[0, 1], 30);
    assert_eq!(s.tick(), TickOutcome::Ignored);
    assert_eq!(s.time_remaining(), 30);
}

#[test]
fn expiry_on_earlier_question_advances_by_one() {
    let (mut s, _) = session(&[0, 1], 30);
    s.start_timer();
    for _ in 0..29 {
        assert_eq!(s.tick(), TickOutcome::Counted);
    }
    assert_eq!(s.time_remaining(), 1);

    assert_eq!(s.tick(), TickOutcome::Advanced);
    assert_eq!(s.current_question_index(), 1);
    assert_eq!(s.time_remaining(), 30);
    assert!(!s.is_completed());
    assert_eq!(s.selected_answers(), &[None, None], "unanswered stays unset");
}

#[test]
fn expiry_on_last_question_completes_without_moving() {
    let (mut s, _) = session(&[0, 1], 3);
    s.start_timer();
    s.next_question();
    s.tick();
    s.tick();
    assert_eq!(s.tick(), TickOutcome::Expired);
    assert!(s.is_completed());
    assert_eq!(s.current_question_index(), 1);
    assert_eq!(s.time_remaining(), 3);

    // A tick already queued when the quiz ended must not change anything.
    assert_eq!(s.tick(), TickOutcome::Ignored);
    assert_eq!(s.time_remaining(), 3);
    assert_eq!(s.current_question_index(), 1);
}

#[test]
fn completed_session_ignores_answers() {
    let (mut s, _) = session(&[0], 30);
    s.select_answer(0);
    s.submit_quiz();
    s.select_answer(2);
    assert_eq!(s.selected_answers(), &[Some(0)]);
}

#[test]
fn scenario_partial_credit() {
    let (mut s, store) = session(&[1, 0, 2], 30);
    s.start_timer();
    s.select_answer(1);
    s.next_question();
    s.select_answer(0);
    s.next_question();
    s.select_answer(1);

    let submission = s.submit_quiz();
    assert_eq!(submission.score, 2);
    assert!(submission.new_high_score);
    assert_eq!(s.score(), 2);
    assert!(s.is_completed());
    assert!(!s.is_timer_active());

    let results = s.results();
    assert_eq!(results.len(), 3);
    assert!(results[0].is_correct);
    assert!(results[1].is_correct);
    assert!(!results[2].is_correct);
    assert_eq!(results[2].selected_answer, Some(1));
    assert_eq!(results[2].question.id, "q3");

    assert_eq!(scores::read_high_score(&*store, Difficulty::Medium), 2);
    assert_eq!(s.high_score(), 2);
}

#[test]
fn scenario_timeout_advances_to_second_question() {
    let (mut s, _) = session(&[0, 1], 30);
    s.start_timer();
    for _ in 0..30 {
        s.tick();
    }
    assert_eq!(s.current_question_index(), 1);
    assert_eq!(s.time_remaining(), 30);
    assert!(!s.is_completed());
}

#[test]
fn unset_answers_never_score() {
    let (mut s, _) = session(&[0, 0, 0], 30);
    s.select_answer(0);
    assert_eq!(s.submit_quiz().score, 1);
    let results = s.results();
    assert_eq!(results[1].selected_answer, None);
    assert!(!results[1].is_correct);
}

#[test]
fn high_score_requires_strict_improvement() {
    let store = Rc::new(MemoryStore::new());
    store.set("quiz-high-score-medium", "2").unwrap();

    let mut tie = QuizSession::new(questions(&[0, 0]), 30, Difficulty::Medium, Rc::clone(&store));
    tie.select_answer(0);
    tie.next_question();
    tie.select_answer(0);
    let submission = tie.submit_quiz();
    assert_eq!(submission.score, 2);
    assert!(!submission.new_high_score);

    let mut lower = QuizSession::new(questions(&[0, 0]), 30, Difficulty::Medium, Rc::clone(&store));
    assert!(!lower.submit_quiz().new_high_score);
    assert_eq!(store.get("quiz-high-score-medium").unwrap().as_deref(), Some("2"));

    let mut other = QuizSession::new(questions(&[0]), 30, Difficulty::Hard, Rc::clone(&store));
    other.select_answer(0);
    assert!(other.submit_quiz().new_high_score, "difficulties are independent");
    assert_eq!(store.get("quiz-high-score-hard").unwrap().as_deref(), Some("1"));
}

#[test]
fn resubmitting_gives_same_score() {
    let (mut s, _) = session(&[1, 1], 30);
    s.select_answer(1);
    let first = s.submit_quiz();
    let second = s.submit_quiz();
    assert_eq!(first.score, second.score);
    assert!(!second.new_high_score);
}

#[test]
fn current_score_counts_up_to_current_index() {
    let (mut s, _) = session(&[1, 0, 2], 30);
    s.select_answer(1);
    assert_eq!(s.current_score(), 1);
    s.next_question();
    s.select_answer(3);
    s.next_question();
    s.select_answer(2);
    assert_eq!(s.current_score(), 2);
    s.previous_question();
    s.previous_question();
    assert_eq!(s.current_score(), 1, "answers past the current index are not counted");
    assert_eq!(s.score(), 0, "final score untouched before submit");
}

#[test]
fn restart_restores_initial_configuration() {
    let (mut s, _) = session(&[1, 0, 2], 30);
    s.start_timer();
    s.select_answer(1);
    s.next_question();
    s.select_answer(2);
    s.tick();
    s.submit_quiz();

    s.restart_quiz();
    assert_eq!(s.current_question_index(), 0);
    assert_eq!(s.selected_answers(), &[None, None, None]);
    assert!(!s.is_completed());
    assert_eq!(s.score(), 0);
    assert_eq!(s.time_remaining(), 30);
    assert!(!s.is_timer_active());
    assert_eq!(s.questions().len(), 3, "same questions kept");
}

#[test]
fn reset_replaces_questions_and_discards_answers() {
    let (mut s, _) = session(&[1, 0, 2], 30);
    s.select_answer(1);
    s.next_question();

    s.reset(questions(&[3, 3]));
    assert_eq!(s.questions().len(), 2);
    assert_eq!(s.selected_answers(), &[None, None]);
    assert_eq!(s.current_question_index(), 0);
    assert_slots_match(&s);
}

#[test]
fn empty_session_is_inert() {
    let (mut s, _) = session(&[], 30);
    assert!(s.current_question().is_none());
    assert!(!s.can_proceed());
    assert!(!s.is_last_question());
    assert_eq!(s.progress(), 0.0);
    s.select_answer(1);
    s.next_question();
    s.previous_question();
    assert_eq!(s.current_question_index(), 0);
    assert_slots_match(&s);
    assert_eq!(s.submit_quiz().score, 0);
}

#[test]
fn progress_and_last_question() {
    let (mut s, _) = session(&[0, 0, 0, 0], 30);
    assert_eq!(s.progress(), 25.0);
    assert!(!s.is_last_question());
    s.next_question();
    s.next_question();
    s.next_question();
    assert_eq!(s.progress(), 100.0);
    assert!(s.is_last_question());
}

#[test]
fn slot_count_invariant_holds_through_a_full_run() {
    let (mut s, _) = session(&[0, 1, 2, 3], 2);
    s.start_timer();
    for step in 0..20 {
        match step % 5 {
            0 => s.select_answer(step % 4),
            1 => s.next_question(),
            2 => {
                s.tick();
            }
            3 => s.previous_question(),
            _ => {
                s.tick();
            }
        }
        assert_slots_match(&s);
        assert!(s.current_question_index() < s.questions().len());
    }
}

/// Store whose writes always fail.
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn set(&self, key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::InvalidValue {
            key: key.to_owned(),
            reason: "read-only".to_owned(),
        })
    }

    fn remove(&self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

#[test]
fn store_failure_does_not_block_completion() {
    let mut s = QuizSession::new(questions(&[0]), 30, Difficulty::Easy, BrokenStore);
    s.select_answer(0);
    let submission = s.submit_quiz();
    assert_eq!(submission.score, 1);
    assert!(!submission.new_high_score);
    assert!(s.is_completed());
}

#[test]
fn handoff_round_trip_and_clear() {
    let (mut s, _) = session(&[1, 0, 2], 30);
    s.select_answer(1);
    let submission = s.submit_quiz();

    let handoff = ResultsHandoff::new(MemoryStore::new());
    assert!(handoff.load().is_none(), "nothing handed off yet");

    let bundle = ResultsBundle {
        results: s.results(),
        score: submission.score,
        total: s.total() as u32,
        difficulty: s.difficulty(),
        new_high_score: submission.new_high_score,
    };
    handoff.store(&bundle).unwrap();
    let loaded = handoff.load().unwrap();
    assert_eq!(loaded, bundle);
    assert_eq!(loaded.percentage(), 33);
    assert_eq!(loaded.best_score(5), 5);
    assert_eq!(loaded.best_score(0), 1);

    handoff.clear();
    assert!(handoff.load().is_none());
}

#[test]
fn garbage_handoff_reads_as_missing() {
    let store = MemoryStore::new();
    store.set(quizterm_core::handoff::HANDOFF_KEY, "{not json").unwrap();
    let handoff = ResultsHandoff::new(store);
    assert!(handoff.load().is_none());
}
