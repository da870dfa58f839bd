//! Results screen: score summary and a per-question breakdown.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};

use quizterm_core::{QuizResult, ResultsBundle};

use super::layout::panel_block;
use crate::app::AppState;
use crate::theme::Theme;

/// Verdict line for a percentage.
pub fn verdict(percentage: u32) -> &'static str {
    match percentage {
        90.. => "Outstanding!",
        70..=89 => "Great job!",
        50..=69 => "Not bad.",
        _ => "Keep practising.",
    }
}

pub fn render_results(frame: &mut Frame, area: Rect, state: &AppState, theme: &Theme) {
    let Some(bundle) = state.results.as_ref() else {
        return;
    };

    let [summary, breakdown, hint] = area.layout(&Layout::vertical([
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(1),
    ]));

    render_summary(frame, summary, bundle, state.results_high_score, theme);

    let block = panel_block(" Breakdown ", false, theme);
    let lines: Vec<Line> = bundle
        .results
        .iter()
        .enumerate()
        .flat_map(|(i, result)| result_lines(i, result, theme))
        .collect();
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((state.results_scroll, 0)),
        breakdown,
    );

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "r try again · j/k scroll · q quit",
            Style::default().fg(theme.muted),
        ))),
        hint,
    );
}

fn render_summary(
    frame: &mut Frame,
    area: Rect,
    bundle: &ResultsBundle,
    stored_high: u32,
    theme: &Theme,
) {
    let percentage = bundle.percentage();
    let difficulty = bundle.difficulty;

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                "Quiz Complete! ",
                Style::default().fg(theme.title).add_modifier(Modifier::BOLD),
            ),
            Span::styled(verdict(percentage), Style::default().fg(theme.muted)),
        ]),
        Line::from(vec![
            Span::styled(
                format!("{} / {}", bundle.score, bundle.total),
                Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {}% Correct", percentage), Style::default().fg(theme.text)),
        ]),
        Line::from(vec![
            Span::styled("Difficulty: ", Style::default().fg(theme.muted)),
            Span::styled(difficulty.label(), Style::default().fg(theme.difficulty(difficulty))),
            Span::styled("   Best: ", Style::default().fg(theme.muted)),
            Span::raw(bundle.best_score(stored_high).to_string()),
        ]),
    ];
    if bundle.new_high_score {
        lines.push(Line::from(Span::styled(
            "New high score!",
            Style::default().fg(theme.correct).add_modifier(Modifier::BOLD),
        )));
    }

    let block = panel_block(" Results ", true, theme);
    frame.render_widget(Paragraph::new(Text::from(lines).centered()).block(block), area);
}

/// Lines for one question: the prompt, the given answer, and the correct one
/// when they differ.
fn result_lines<'a>(i: usize, result: &'a QuizResult, theme: &Theme) -> Vec<Line<'a>> {
    let (mark, color) = if result.is_correct {
        ("✓", theme.correct)
    } else {
        ("✗", theme.incorrect)
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{} ", mark), Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(
            format!("{}. {}", i + 1, result.question.question),
            Style::default().fg(theme.text),
        ),
    ])];

    let given = result.selected_option().unwrap_or("No answer selected");
    lines.push(Line::from(vec![
        Span::styled("   Your answer: ", Style::default().fg(theme.muted)),
        Span::styled(given, Style::default().fg(color)),
    ]));
    if !result.is_correct {
        lines.push(Line::from(vec![
            Span::styled("   Correct:     ", Style::default().fg(theme.muted)),
            Span::styled(
                result.question.correct_option().unwrap_or("?"),
                Style::default().fg(theme.correct),
            ),
        ]));
    }
    lines.push(Line::from(""));
    lines
}
