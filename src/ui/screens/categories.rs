use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};
use rust_decimal::Decimal;

use super::panel;
use crate::budget;
use crate::models::BudgetState;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_percent, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, state: &BudgetState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(7), Constraint::Length(4)])
        .split(area);

    render_draft(f, chunks[0], app, state);
    render_totals(f, chunks[1], app, state);
}

fn render_draft(f: &mut Frame, area: Rect, app: &App, state: &BudgetState) {
    let total = state.total_income();

    if app.draft.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No categories",
            theme::dim_style(),
        )))
        .centered()
        .block(panel("Edit Budget"));
        f.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem> = app
        .draft
        .iter()
        .enumerate()
        .map(|(i, cat)| {
            let style = if i == app.category_index {
                theme::selected_style()
            } else if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            let share = budget::share_of_income(cat.amount, total);
            let suggested = budget::suggested_amount(total, cat.default_percentage);
            let edited = cat.amount != suggested;

            let mut spans = vec![
                Span::styled(format!(" {:<18}", truncate(&cat.name, 17)), style),
                Span::styled(format!("{:>16} ", format_amount(cat.amount)), style),
                Span::styled(
                    progress_bar(share / Decimal::ONE_HUNDRED, 16),
                    Style::default().fg(theme::hex_color(&cat.color)),
                ),
                Span::styled(
                    format!(" {:>6} of income", format_percent(share)),
                    theme::dim_style(),
                ),
            ];
            if edited {
                spans.push(Span::styled(
                    format!("  suggested {}", format_amount(suggested)),
                    theme::dim_style(),
                ));
            }
            if !cat.subtext.is_empty() {
                spans.push(Span::styled(format!("  {}", cat.subtext), theme::dim_style()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = if app.draft_is_dirty(state) {
        "Edit Budget (unsaved)"
    } else {
        "Edit Budget"
    };
    f.render_widget(List::new(items).block(panel(title)), area);
}

fn render_totals(f: &mut Frame, area: Rect, app: &App, state: &BudgetState) {
    let total = state.total_income();
    let allocated = budget::total_allocated(&app.draft);
    let left = budget::unallocated(total, &app.draft);
    let left_style = if left < Decimal::ZERO {
        theme::expense_style().add_modifier(Modifier::BOLD)
    } else {
        theme::income_style()
    };

    let text = Paragraph::new(vec![
        Line::from(vec![
            Span::styled("Allocated ", theme::dim_style()),
            Span::styled(format_amount(allocated), theme::normal_style()),
            Span::styled(" of ", theme::dim_style()),
            Span::styled(format_amount(total), theme::normal_style()),
            Span::styled("   Unallocated ", theme::dim_style()),
            Span::styled(format_amount(left), left_style),
        ]),
        Line::from(Span::styled(
            format!(
                "Suggested weights sum to {}",
                format_percent(budget::total_percentage(&app.draft))
            ),
            theme::dim_style(),
        )),
    ])
    .block(panel("Totals"));
    f.render_widget(text, area);
}
