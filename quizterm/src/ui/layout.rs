//! Layout helpers for quizterm.
//!
//! Pure arithmetic and block construction; no application state is mutated
//! here. Every screen is drawn into a centred content column above a 1-row
//! status bar.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph},
};

use crate::app::{AppState, Mode};
use crate::theme::Theme;

/// Widest the content column grows on large terminals.
const MAX_CONTENT_WIDTH: u16 = 90;

/// Returns `[content, status_bar]` for the current frame.
///
/// The content column is capped at [`MAX_CONTENT_WIDTH`] and centred; on
/// narrow terminals it takes the full width.
pub fn compute_layout(frame: &Frame) -> [Rect; 2] {
    let [main_area, status_bar] =
        frame.area().layout(&Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]));

    let width = main_area.width.min(MAX_CONTENT_WIDTH);
    let [content] =
        main_area.layout(&Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center));

    [content, status_bar]
}

/// Bordered block with a thick border when `is_active`.
pub fn panel_block<'a>(title: impl Into<Line<'a>>, is_active: bool, theme: &Theme) -> Block<'a> {
    let (border_type, color) = if is_active {
        (BorderType::Thick, theme.border_active)
    } else {
        (BorderType::Rounded, theme.border_inactive)
    };
    Block::bordered()
        .title(title)
        .border_type(border_type)
        .border_style(Style::default().fg(color))
}

/// Renders the status bar: screen label, difficulty, and key hints.
pub fn render_status_bar(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let screen = Span::styled(
        format!(" {} ", state.screen.label()),
        Style::default().fg(theme.status_screen).add_modifier(Modifier::BOLD),
    );

    let mut spans = vec![screen];
    if let Some(difficulty) = state.selected_difficulty {
        spans.push(Span::styled(
            format!(" {} ", difficulty.label()),
            Style::default().fg(theme.difficulty(difficulty)),
        ));
    }
    let hint = match state.mode {
        Mode::HelpOverlay => " j/k scroll · ? close",
        Mode::ConfirmQuit => " y quit · n keep playing",
        Mode::Normal => " ? help · q quit",
    };
    spans.push(Span::raw(hint));

    frame.render_widget(
        Paragraph::new(Line::from(spans))
            .style(Style::default().bg(theme.status_bar_bg).fg(theme.status_bar_fg)),
        area,
    );
}
