use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::panel;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "SalaryWise",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Split your salary before it splits itself.",
            theme::normal_style(),
        )),
        Line::from(Span::styled(
            "Rent, chop money, trotro, chill and susu, sorted in seconds.",
            theme::dim_style(),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to set your income",
            Style::default().fg(theme::GREEN).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(panel("Welcome"));

    f.render_widget(text, area);
}
