//! Help overlay and quit confirmation modal.
//!
//! Both are drawn last inside the same `terminal.draw()` closure, over a
//! `Clear` so the screen underneath does not bleed through.

use ratatui::{
    Frame,
    layout::Constraint,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::theme::Theme;

/// Renders the key reference as a centred, scrollable modal.
///
/// Skipped on terminals narrower than 40 columns.
pub fn render_help_overlay(frame: &mut Frame, theme: &Theme, help_scroll: u16) {
    if frame.area().width < 40 {
        return;
    }

    let area = frame
        .area()
        .centered(Constraint::Percentage(80), Constraint::Percentage(80));
    frame.render_widget(Clear, area);

    let block = Block::bordered()
        .title(" Help  (j/k scroll, ? or Esc to close) ")
        .border_style(Style::default().fg(theme.border_active));

    frame.render_widget(
        Paragraph::new(build_help_text(theme))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((help_scroll, 0)),
        area,
    );
}

fn heading(text: &'static str, theme: &Theme) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
    ))
}

fn build_help_text(theme: &Theme) -> Text<'static> {
    Text::from(vec![
        heading("Start", theme),
        Line::from("  1 / 2 / 3     Easy / Medium / Hard"),
        Line::from("  e / m / h     Easy / Medium / Hard"),
        Line::from("  arrows Enter  Move between cards and choose"),
        Line::from(""),
        heading("Loading and Ready", theme),
        Line::from("  Enter / s     Start the quiz and the clock"),
        Line::from("  c / Bksp      Change difficulty"),
        Line::from(""),
        heading("Quiz", theme),
        Line::from("  1 .. 9        Choose an answer"),
        Line::from("  j/k  Space    Move the cursor and choose"),
        Line::from("  n / Right     Next question (needs an answer)"),
        Line::from("  p / Left      Previous question"),
        Line::from("  Enter         Next, or submit on the last question"),
        Line::from("  Esc           Dismiss the notification"),
        Line::from(""),
        Line::from("  Each question has its own clock. When it runs out the"),
        Line::from("  quiz moves on, and after the last question it ends."),
        Line::from(""),
        heading("Results", theme),
        Line::from("  j / k         Scroll the breakdown"),
        Line::from("  r / Enter     Try again"),
        Line::from(""),
        heading("General", theme),
        Line::from("  ?             Open / close this help"),
        Line::from("  q             Quit (asks during a quiz)"),
        Line::from("  Ctrl-c        Quit now"),
    ])
}

/// Renders the "quit the running quiz?" dialog.
pub fn render_confirm_quit(frame: &mut Frame, theme: &Theme) {
    let area = frame
        .area()
        .centered(Constraint::Length(44), Constraint::Length(5));
    frame.render_widget(Clear, area);

    let block = Block::bordered()
        .title(" Quit ")
        .border_style(Style::default().fg(theme.toast_warning));
    let text = Text::from(vec![
        Line::from("Your quiz is still running."),
        Line::from("Quit without finishing?  (y / n)"),
    ])
    .centered();

    frame.render_widget(Paragraph::new(text).block(block), area);
}
