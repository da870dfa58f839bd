//! Trivia question source for quizterm.
//!
//! The trivia module runs a plain `std::thread` that owns a blocking
//! `reqwest` client. Requests arrive over a `crossbeam_channel`; outcomes go
//! back to the event loop as `AppEvent::Trivia`.
pub mod types;
pub mod worker;

use crossbeam_channel::Sender;
use tokio::sync::mpsc::UnboundedSender;

use crate::event::AppEvent;
use types::FetchRequest;

/// Spawns the worker thread and returns the request sender.
///
/// The thread exits once every clone of the returned sender is dropped.
pub fn spawn_worker(api_url: String, event_tx: UnboundedSender<AppEvent>) -> Sender<FetchRequest> {
    let (tx, rx) = crossbeam_channel::unbounded();
    std::thread::spawn(move || worker::trivia_worker_loop(api_url, rx, event_tx));
    tx
}
