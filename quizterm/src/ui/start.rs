//! Start, loading, and ready screens.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::Paragraph,
};

use quizterm_core::Difficulty;

use super::layout::panel_block;
use crate::app::AppState;
use crate::theme::Theme;

/// One-line blurb shown on each difficulty card.
fn blurb(difficulty: Difficulty) -> &'static str {
    match difficulty {
        Difficulty::Easy => "Warm up with the basics",
        Difficulty::Medium => "A fair challenge",
        Difficulty::Hard => "For trivia veterans",
    }
}

/// Title, three difficulty cards with their high scores, and a hint line.
pub fn render_select(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let [title, cards, hint] = area.layout(&Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(6),
        Constraint::Fill(1),
    ]));

    let heading = Text::from(vec![
        Line::from(""),
        Line::from(Span::styled(
            "Trivia Quiz",
            Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled("Choose a difficulty", Style::default().fg(theme.muted))),
    ])
    .centered();
    frame.render_widget(Paragraph::new(heading), title);

    let card_areas: [Rect; 3] =
        cards.layout(&Layout::horizontal([Constraint::Fill(1); 3]).spacing(1));
    for (i, (difficulty, best)) in state.high_scores.iter().enumerate() {
        let active = i == state.difficulty_cursor;
        let color = theme.difficulty(*difficulty);
        let block = panel_block(
            Line::from(Span::styled(
                format!(" {} {} ", i + 1, difficulty.label()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            active,
            theme,
        );
        let body = Text::from(vec![
            Line::from(Span::styled(blurb(*difficulty), Style::default().fg(theme.text))),
            Line::from(""),
            Line::from(vec![
                Span::styled("High score: ", Style::default().fg(theme.muted)),
                Span::styled(
                    format!("{}/{}", best, state.question_count),
                    Style::default().fg(theme.accent),
                ),
            ]),
        ])
        .centered();
        frame.render_widget(Paragraph::new(body).block(block), card_areas[i]);
    }

    let hint_text = Line::from(Span::styled(
        "1/2/3 or arrows + Enter to start · ? help · q quit",
        Style::default().fg(theme.muted),
    ))
    .centered();
    frame.render_widget(Paragraph::new(hint_text), hint);
}

/// Shown while the trivia worker fetches questions.
pub fn render_loading(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let label = state
        .selected_difficulty
        .map(Difficulty::label)
        .unwrap_or("Medium");
    let text = Text::from(vec![
        Line::from(Span::styled(
            format!("Loading {} questions...", label),
            Style::default().fg(theme.text),
        )),
        Line::from(""),
        Line::from(Span::styled("c to change difficulty", Style::default().fg(theme.muted))),
    ])
    .centered();
    let [middle] = area.layout(&Layout::vertical([Constraint::Length(3)]).flex(Flex::Center));
    frame.render_widget(Paragraph::new(text), middle);
}

/// Summary before the clock starts.
pub fn render_ready(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(session) = state.session.as_ref() else {
        return;
    };
    let difficulty = session.difficulty();
    let block = panel_block(" Ready ", true, theme);

    let text = Text::from(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("Difficulty: ", Style::default().fg(theme.muted)),
            Span::styled(
                difficulty.label(),
                Style::default()
                    .fg(theme.difficulty(difficulty))
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Questions:  ", Style::default().fg(theme.muted)),
            Span::raw(session.total().to_string()),
        ]),
        Line::from(vec![
            Span::styled("Time each:  ", Style::default().fg(theme.muted)),
            Span::raw(format!("{}s", session.timer_duration())),
        ]),
        Line::from(vec![
            Span::styled("Best:       ", Style::default().fg(theme.muted)),
            Span::raw(session.high_score().to_string()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter to start · c to change difficulty",
            Style::default().fg(theme.accent),
        )),
    ])
    .centered();

    let [middle] = area.layout(&Layout::vertical([Constraint::Length(10)]).flex(Flex::Center));
    frame.render_widget(Paragraph::new(text).block(block), middle);
}
