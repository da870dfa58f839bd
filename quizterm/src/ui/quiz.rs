//! Quiz screen: header with clock and score, progress gauge, question card.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Gauge, List, ListItem, Paragraph, Wrap},
};

use super::layout::panel_block;
use crate::app::AppState;
use crate::theme::Theme;

/// Clock turns `timer_low` at or below this many seconds.
const LOW_TIME_SECS: u32 = 10;

/// Formats seconds as `m:ss`.
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

pub fn render_quiz(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(session) = state.session.as_ref() else {
        return;
    };
    let Some(question) = session.current_question() else {
        return;
    };

    let [header, gauge, card, hint] = area.layout(&Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ]));

    // Header: "Question i of n"   clock   "Score: x / i"
    let index = session.current_question_index();
    let remaining = session.time_remaining();
    let clock_color = if remaining <= LOW_TIME_SECS {
        theme.timer_low
    } else {
        theme.timer
    };
    let [left, middle, right] = header.layout(&Layout::horizontal([Constraint::Fill(1); 3]));
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("Question {} of {}", index + 1, session.total()),
            Style::default().fg(theme.text),
        ))),
        left,
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                format_clock(remaining),
                Style::default().fg(clock_color).add_modifier(Modifier::BOLD),
            ))
            .centered(),
        ),
        middle,
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(Span::styled(
                format!("Score: {} / {}", session.current_score(), index + 1),
                Style::default().fg(theme.accent),
            ))
            .right_aligned(),
        ),
        right,
    );

    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(theme.progress))
            .ratio((session.progress() / 100.0).clamp(0.0, 1.0))
            .label(""),
        gauge,
    );

    // Question card
    let difficulty = question.difficulty;
    let title = Line::from(vec![
        Span::styled(
            format!(" {} ", question.category),
            Style::default().fg(theme.title),
        ),
        Span::styled(
            format!("[{}] ", difficulty.label()),
            Style::default().fg(theme.difficulty(difficulty)),
        ),
    ]);
    let block = panel_block(title, true, theme);
    let inner = block.inner(card);
    frame.render_widget(block, card);

    let question_height = wrapped_height(&question.question, inner.width) + 1;
    let [text_area, options_area] = inner.layout(&Layout::vertical([
        Constraint::Length(question_height),
        Constraint::Fill(1),
    ]));
    frame.render_widget(
        Paragraph::new(Text::from(Line::from(Span::styled(
            question.question.clone(),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ))))
        .wrap(Wrap { trim: true }),
        text_area,
    );

    let selected = session.current_selection();
    let items: Vec<ListItem> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let chosen = selected == Some(i);
            let under_cursor = state.option_cursor == i;
            let marker = if chosen { "(•)" } else { "( )" };
            let mut style = Style::default().fg(if chosen {
                theme.option_selected
            } else {
                theme.text
            });
            if under_cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            ListItem::new(Line::from(Span::styled(
                format!(" {} {} {}", i + 1, marker, option),
                style,
            )))
        })
        .collect();
    frame.render_widget(List::new(items), options_area);

    let action = if session.is_last_question() {
        "Enter submit"
    } else {
        "n next"
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("1-{} answer · p previous · {}", question.options.len(), action),
            Style::default().fg(theme.muted),
        ))),
        hint,
    );
}

/// Rows `text` occupies when wrapped to `width` columns, counted in chars.
pub fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let chars = text.chars().count().max(1);
    chars.div_ceil(width).min(usize::from(u16::MAX)) as u16
}
