//! Scoped once-per-second quiz timer.
//!
//! A [`QuizTimer`] is held by the app for exactly as long as a quiz is
//! running. It owns a tokio task that sends `AppEvent::QuizTick` every second;
//! dropping the guard aborts the task. Ticks carry the timer's generation so
//! the app can discard one that was already queued when its timer was dropped.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::event::AppEvent;

const QUIZ_TICK: Duration = Duration::from_secs(1);

/// Guard for a running quiz countdown.
#[derive(Debug)]
pub struct QuizTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

impl QuizTimer {
    /// Starts sending `AppEvent::QuizTick(generation)` once per second.
    ///
    /// The first tick arrives one full second after the call. Must be called
    /// from within the tokio runtime.
    pub fn start(tx: UnboundedSender<AppEvent>, generation: u64) -> Self {
        let handle = tokio::spawn(async move {
            let mut ticks = interval_at(Instant::now() + QUIZ_TICK, QUIZ_TICK);
            ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticks.tick().await;
                if tx.send(AppEvent::QuizTick(generation)).is_err() {
                    break;
                }
            }
        });
        Self { generation, handle }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for QuizTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
