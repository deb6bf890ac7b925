use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use super::panel;
use crate::budget::{self, Summary};
use crate::models::BudgetState;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_percent, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, state: &BudgetState) {
    let summary = Summary::of(state);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Spend / burn rate
            Constraint::Min(7),    // Budget vs actual
            Constraint::Length(4), // Tip
        ])
        .split(area);

    render_headline(f, chunks[0], &summary);
    render_report(f, chunks[1], state);
    super::dashboard::render_tip(f, chunks[2], app);
}

fn render_headline(f: &mut Frame, area: Rect, summary: &Summary) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let spent = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(summary.total_spent),
            theme::expense_style().add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(panel("Total Spent"));
    f.render_widget(spent, halves[0]);

    let high = budget::is_high_burn(summary.burn_rate);
    let rate_style = if high {
        theme::expense_style().add_modifier(Modifier::BOLD)
    } else {
        theme::income_style().add_modifier(Modifier::BOLD)
    };
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(format_percent(summary.burn_rate), rate_style)),
    ];
    if high {
        lines.push(Line::from(Span::styled(
            format!(
                "Over {} of income spent; slow down",
                format_percent(budget::HIGH_BURN_RATE)
            ),
            theme::expense_style(),
        )));
    }
    let rate = Paragraph::new(lines).centered().block(panel("Burn Rate"));
    f.render_widget(rate, halves[1]);
}

fn render_report(f: &mut Frame, area: Rect, state: &BudgetState) {
    let report = budget::category_report(&state.categories, &state.transactions);

    let items: Vec<ListItem> = report
        .iter()
        .map(|row| {
            let ratio = if row.budget > Decimal::ZERO {
                row.actual.checked_div(row.budget).unwrap_or(Decimal::MAX)
            } else if row.actual > Decimal::ZERO {
                Decimal::ONE
            } else {
                Decimal::ZERO
            };
            let color = if row.is_over() {
                theme::RED
            } else if ratio > Decimal::new(7, 1) {
                theme::YELLOW
            } else {
                theme::GREEN
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<18}", truncate(&row.name, 17)), theme::normal_style()),
                Span::styled(
                    format!(
                        "{:>14} / {:<16}",
                        format_amount(row.actual),
                        format_amount(row.budget)
                    ),
                    Style::default().fg(color),
                ),
                Span::styled(progress_bar(ratio, 20), Style::default().fg(color)),
                Span::styled(
                    if row.is_over() { "  over" } else { "" },
                    theme::expense_style().add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(panel("Budget vs Actual")), area);
}
