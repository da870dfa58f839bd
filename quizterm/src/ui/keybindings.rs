//! Keybinding dispatcher for quizterm.
//!
//! Translates crossterm `KeyEvent`s into `AppState` calls and returns a
//! `KeyAction` telling the event loop whether to continue or quit. Dispatch
//! branches on `state.mode` first, then on `state.screen`, so every overlay
//! and every screen has its own handler.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use quizterm_core::Difficulty;

use crate::app::{AppState, Mode, Screen};

/// Control-flow signal returned from the key dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Continue,
    Quit,
}

/// Dispatches a key event to the handler for the current mode and screen.
pub fn handle_key(key: KeyEvent, state: &mut AppState) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }
    match state.mode {
        Mode::HelpOverlay => handle_help(key, state),
        Mode::ConfirmQuit => handle_confirm_quit(key, state),
        Mode::Normal => handle_normal(key, state),
    }
}

// ---------------------------------------------------------------------------
// Normal mode
// ---------------------------------------------------------------------------

/// Keys shared by every screen, then the screen's own keys.
fn handle_normal(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('?') => {
            state.help_scroll = 0;
            state.mode = Mode::HelpOverlay;
            return KeyAction::Continue;
        }
        KeyCode::Char('q') => {
            if state.quiz_in_progress() {
                state.mode = Mode::ConfirmQuit;
                return KeyAction::Continue;
            }
            return KeyAction::Quit;
        }
        KeyCode::Esc if state.toast.is_some() => {
            state.dismiss_toast();
            return KeyAction::Continue;
        }
        _ => {}
    }

    match state.screen {
        Screen::SelectDifficulty => handle_select(key, state),
        Screen::Loading => handle_loading(key, state),
        Screen::Ready => handle_ready(key, state),
        Screen::Quiz => handle_quiz(key, state),
        Screen::Results => handle_results(key, state),
    }
    KeyAction::Continue
}

fn handle_select(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Char('1') | KeyCode::Char('e') => state.choose_difficulty(Difficulty::Easy),
        KeyCode::Char('2') | KeyCode::Char('m') => state.choose_difficulty(Difficulty::Medium),
        KeyCode::Char('3') | KeyCode::Char('h') => state.choose_difficulty(Difficulty::Hard),
        KeyCode::Left | KeyCode::Up | KeyCode::Char('k') => state.move_difficulty_cursor(-1),
        KeyCode::Right | KeyCode::Down | KeyCode::Char('j') => state.move_difficulty_cursor(1),
        KeyCode::Enter | KeyCode::Char(' ') => {
            let difficulty = state.cursor_difficulty();
            state.choose_difficulty(difficulty);
        }
        _ => {}
    }
}

fn handle_loading(key: KeyEvent, state: &mut AppState) {
    if matches!(key.code, KeyCode::Char('c') | KeyCode::Backspace | KeyCode::Esc) {
        state.cancel_loading();
    }
}

fn handle_ready(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Enter | KeyCode::Char('s') => state.start_quiz(),
        KeyCode::Char('c') | KeyCode::Backspace | KeyCode::Esc => state.back_to_difficulty(),
        _ => {}
    }
}

fn handle_quiz(key: KeyEvent, state: &mut AppState) {
    let is_last = state.session.as_ref().is_some_and(|s| s.is_last_question());

    match key.code {
        KeyCode::Char(c @ '1'..='9') => {
            // '1'..='9' maps to option 0..=8.
            let index = (c as u8 - b'1') as usize;
            state.select_option(index);
        }
        KeyCode::Up | KeyCode::Char('k') => state.move_option_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => state.move_option_cursor(1),
        KeyCode::Char(' ') => {
            let cursor = state.option_cursor;
            state.select_option(cursor);
        }
        KeyCode::Left | KeyCode::Char('p') => state.previous_question(),
        KeyCode::Enter | KeyCode::Char('s') if is_last => state.submit_quiz(),
        KeyCode::Right | KeyCode::Char('n') | KeyCode::Enter if !is_last => state.next_question(),
        _ => {}
    }
}

fn handle_results(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Char('r') | KeyCode::Enter => state.restart(),
        KeyCode::Down | KeyCode::Char('j') => state.scroll_results(1),
        KeyCode::Up | KeyCode::Char('k') => state.scroll_results(-1),
        KeyCode::PageDown => state.scroll_results(10),
        KeyCode::PageUp => state.scroll_results(-10),
        KeyCode::Char('g') => state.results_scroll = 0,
        _ => {}
    }
}

// ---------------------------------------------------------------------------
// HelpOverlay mode
// ---------------------------------------------------------------------------

fn handle_help(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => {
            state.help_scroll = state.help_scroll.saturating_add(1);
        }
        KeyCode::Char('k') | KeyCode::Up => {
            state.help_scroll = state.help_scroll.saturating_sub(1);
        }
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => {
            state.mode = Mode::Normal;
        }
        _ => {}
    }
    KeyAction::Continue
}

// ---------------------------------------------------------------------------
// ConfirmQuit mode
// ---------------------------------------------------------------------------

/// `y` quits; `n` or `Esc` goes back to the quiz. The clock keeps running.
fn handle_confirm_quit(key: KeyEvent, state: &mut AppState) -> KeyAction {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => KeyAction::Quit,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            state.mode = Mode::Normal;
            KeyAction::Continue
        }
        _ => KeyAction::Continue,
    }
}
