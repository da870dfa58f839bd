//! UI rendering module for quizterm.
//!
//! `render()` is the single entry point, called from the event loop's
//! `terminal.draw()` closure. Each screen draws itself into the content
//! column from `layout.rs`; the status bar, notification, and modals are
//! layered on top in that order.

mod layout;
pub mod help;
pub mod keybindings;
mod quiz;
mod results;
mod start;
mod toast;

use ratatui::Frame;

use crate::app::{AppState, Mode, Screen};
use crate::theme::Theme;
use layout::{compute_layout, render_status_bar};

/// Renders one complete frame. Reads `state` only.
pub fn render(frame: &mut Frame, state: &AppState, theme: &Theme) {
    let [content, status_bar] = compute_layout(frame);

    match state.screen {
        Screen::SelectDifficulty => start::render_select(frame, content, state, theme),
        Screen::Loading => start::render_loading(frame, content, state, theme),
        Screen::Ready => start::render_ready(frame, content, state, theme),
        Screen::Quiz => quiz::render_quiz(frame, content, state, theme),
        Screen::Results => results::render_results(frame, content, state, theme),
    }

    render_status_bar(frame, status_bar, state, theme);

    if let Some(toast) = state.toast.as_ref() {
        toast::render_toast(frame, frame.area(), toast, theme);
    }

    match state.mode {
        Mode::HelpOverlay => help::render_help_overlay(frame, theme, state.help_scroll),
        Mode::ConfirmQuit => help::render_confirm_quit(frame, theme),
        Mode::Normal => {}
    }
}
