pub(crate) mod analytics;
pub(crate) mod categories;
pub(crate) mod dashboard;
pub(crate) mod income;
pub(crate) mod profile;
pub(crate) mod wallet;
pub(crate) mod welcome;

use ratatui::{
    style::Style,
    text::Span,
    widgets::{Block, Borders},
};

use super::theme;

/// Bordered block with a dim bold title, shared by every screen.
pub(crate) fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()))
}
