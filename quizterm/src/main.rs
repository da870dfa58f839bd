//! quizterm: a timed multiple-choice trivia quiz in the terminal.
//!
//! Entry point for the `quizterm` binary. Wires together the terminal
//! lifecycle (`tui`), the event bus (`event`), the trivia worker (`trivia`),
//! rendering (`ui`), and the SQLite-backed high scores (`quizterm-core`).
//!
//! # Startup sequence
//!
//! 1. Load config. Errors are soft: defaults are used and the error is logged.
//! 2. Start file logging in the data directory.
//! 3. Open the score database before the terminal is touched, so a failure
//!    prints a plain error.
//! 4. `install_panic_hook()`, then `register_sigterm()`, then `init_tui()`.
//! 5. Spawn the input task and the trivia worker.
//!
//! `restore_tui()` runs after the event loop exits on every path except a
//! panic, which the hook covers.

mod app;
mod config;
mod event;
mod logging;
mod theme;
mod timer;
mod trivia;
mod tui;
mod ui;

use std::rc::Rc;
use std::sync::atomic::Ordering;
use std::time::{Duration, Instant};

use quizterm_core::db::SqliteStore;
use quizterm_core::scores;

use crate::app::{AppState, SharedStore};
use crate::event::AppEvent;
use crate::ui::keybindings::{handle_key, KeyAction};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let (config, config_error) = match config::Config::load() {
        Ok(c) => (c, None),
        Err(e) => (config::Config::default(), Some(e)),
    };

    if let Err(e) = logging::init(&config.log_path()) {
        eprintln!("quizterm: logging disabled: {}", e);
    }
    if let Some(e) = config_error {
        log::warn!("{}; using defaults", e);
    }
    log::info!(
        "starting: {} questions, {}s per question",
        config.question_count,
        config.timer_secs
    );

    let theme = theme::Theme::from_name(&config.theme);

    std::fs::create_dir_all(config.data_dir())?;
    let db_path = config.db_path();
    let sqlite = SqliteStore::open(&db_path).map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("could not open {}: {}", db_path.display(), e),
        )
    })?;
    let store: SharedStore = Rc::new(sqlite);

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm();
    let mut terminal = tui::init_tui()?;

    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let trivia_tx = trivia::spawn_worker(config.api_url.clone(), handler.tx.clone());
    let mut rx = handler.rx;

    let mut state = AppState::new(
        &config,
        Rc::clone(&store),
        Some(trivia_tx),
        Some(handler.tx.clone()),
    );

    // Exits only via `break`, so `restore_tui()` below is always reached.
    // Draw errors are held until then.
    let mut loop_result = Ok(());
    'event_loop: loop {
        tokio::select! {
            // Heartbeat: SIGTERM is polled at least every 50ms.
            _ = tokio::time::sleep(Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                match maybe_event {
                    Some(AppEvent::Render) => {
                        if let Err(e) = terminal.draw(|frame| ui::render(frame, &state, &theme)) {
                            loop_result = Err(e);
                            break 'event_loop;
                        }
                    }
                    Some(AppEvent::Key(key)) => {
                        if handle_key(key, &mut state) == KeyAction::Quit {
                            break 'event_loop;
                        }
                    }
                    Some(AppEvent::Tick) => state.expire_toast(Instant::now()),
                    Some(AppEvent::QuizTick(generation)) => state.on_quiz_tick(generation),
                    Some(AppEvent::Trivia(outcome)) => state.apply_fetch_outcome(*outcome),
                    // ratatui picks up the new size on the next draw.
                    Some(AppEvent::Resize(_, _)) => {}
                    Some(AppEvent::Quit) | None => break 'event_loop,
                }
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    // Stops the quiz timer and lets the worker thread exit.
    drop(state);
    tui::restore_tui()?;
    loop_result?;

    let summary: Vec<String> = scores::high_score_table(&*store)
        .iter()
        .map(|(d, s)| format!("{} {}", d.as_str(), s))
        .collect();
    println!("quizterm high scores: {}", summary.join(", "));
    log::info!("exiting");
    Ok(())
}
