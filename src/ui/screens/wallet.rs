use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use super::panel;
use crate::budget;
use crate::models::{BudgetState, Category};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, state: &BudgetState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    render_category_picker(f, chunks[0], app, state);
    render_ledger(f, chunks[1], app, state);
}

fn render_category_picker(f: &mut Frame, area: Rect, app: &App, state: &BudgetState) {
    let selected = app.wallet_category(state).map(|c| c.id.as_str());
    let mut spans = Vec::new();
    for cat in &state.categories {
        let style = if Some(cat.id.as_str()) == selected {
            Style::default()
                .fg(theme::HEADER_BG)
                .bg(theme::hex_color(&cat.color))
                .add_modifier(Modifier::BOLD)
        } else {
            theme::dim_style()
        };
        spans.push(Span::styled(format!(" {} ", cat.name), style));
        spans.push(Span::raw(" "));
    }
    let picker = Paragraph::new(Line::from(spans)).block(panel("Log spend in (h/l, a to add)"));
    f.render_widget(picker, area);
}

fn render_ledger(f: &mut Frame, area: Rect, app: &App, state: &BudgetState) {
    let spent = budget::total_spent(&state.transactions);
    let title = format!("Spends ({}), total {}", state.transactions.len(), format_amount(spent));

    if state.transactions.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No spends logged yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Press a, or use :spend <amount> <category> [note]",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(panel(&title));
        f.render_widget(msg, area);
        return;
    }

    let page = area.height.saturating_sub(2) as usize;
    let items: Vec<ListItem> = state
        .transactions
        .iter()
        .enumerate()
        .skip(app.wallet_scroll)
        .take(page)
        .map(|(i, txn)| {
            let style = if i == app.wallet_index {
                theme::selected_style()
            } else if i % 2 == 0 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            let cat_name = Category::resolve(&state.categories, &txn.category_id)
                .map(|c| c.name.as_str())
                .unwrap_or("Unknown");
            ListItem::new(Line::from(vec![
                Span::styled(format!(" {:<11}", txn.day()), style),
                Span::styled(format!("{:<18}", truncate(cat_name, 17)), style),
                Span::styled(format!("{:<28}", truncate(&txn.note, 27)), style),
                Span::styled(format!("{:>16}", format_amount(txn.amount)), theme::expense_style()),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(panel(&title)), area);
}
