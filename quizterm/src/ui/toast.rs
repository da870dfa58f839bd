//! Notification box in the top-right corner.

use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Clear, Paragraph, Wrap},
};

use crate::app::{Severity, Toast};
use crate::theme::Theme;

const TOAST_WIDTH: u16 = 42;
const TOAST_HEIGHT: u16 = 5;

pub fn render_toast(frame: &mut Frame, area: Rect, toast: &Toast, theme: &Theme) {
    let color = match toast.severity {
        Severity::Error => theme.toast_error,
        Severity::Warning => theme.toast_warning,
        Severity::Info => theme.toast_info,
    };

    let [row] = area.layout(&Layout::vertical([Constraint::Length(TOAST_HEIGHT)]).flex(Flex::Start));
    let [corner] = row.layout(
        &Layout::horizontal([Constraint::Length(TOAST_WIDTH.min(area.width))]).flex(Flex::End),
    );
    frame.render_widget(Clear, corner);

    let block = Block::bordered()
        .title(Line::from(Span::styled(
            format!(" {} ", toast.title),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )))
        .title_bottom(Line::from(" Esc ").right_aligned())
        .border_style(Style::default().fg(color));
    frame.render_widget(
        Paragraph::new(Text::from(toast.message.as_str()))
            .block(block)
            .wrap(Wrap { trim: true }),
        corner,
    );
}
