use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::panel;
use crate::models::BudgetState;
use crate::ui::theme;
use crate::ui::util::format_amount;

pub(crate) fn render(f: &mut Frame, area: Rect, state: &BudgetState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(4)])
        .split(area);

    let row = |label: &str, value: String| {
        Line::from(vec![
            Span::styled(format!("  {label:<22}"), theme::dim_style()),
            Span::styled(value, theme::normal_style()),
        ])
    };

    let income = Paragraph::new(vec![
        row("Monthly salary", format_amount(state.income)),
        row("Side hustle / bonus", format_amount(state.bonus)),
        row(
            "Bonus in split",
            if state.include_bonus { "yes" } else { "no" }.to_string(),
        ),
        row("Total income", format_amount(state.total_income())),
        row("Categories", state.categories.len().to_string()),
        row("Spends logged", state.transactions.len().to_string()),
    ])
    .block(panel("Profile"));
    f.render_widget(income, chunks[0]);

    let danger = Paragraph::new(vec![
        Line::from(Span::styled(
            "  Press R to erase income, allocations and every spend.",
            theme::expense_style(),
        )),
        Line::from(Span::styled(
            "  This cannot be undone; you will be asked to confirm.",
            theme::dim_style(),
        )),
    ])
    .block(panel("Reset"));
    f.render_widget(danger, chunks[1]);
}
