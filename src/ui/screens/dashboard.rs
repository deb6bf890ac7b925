use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};
use rust_decimal::Decimal;

use super::panel;
use crate::budget::{self, BudgetStatus, Summary};
use crate::models::{BudgetState, Category};
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_percent, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App, state: &BudgetState) {
    let summary = Summary::of(state);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Min(7),    // Allocations
            Constraint::Length(4), // Tip
        ])
        .split(area);

    render_summary_cards(f, chunks[0], &summary);
    render_allocations(f, chunks[1], state, &summary);
    render_tip(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, summary: &Summary) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let status_color = match summary.status {
        BudgetStatus::Safe => theme::GREEN,
        BudgetStatus::WatchOut => theme::RED,
    };

    render_card(f, cards[0], "Remaining", format_amount(summary.remaining), status_color);
    render_card(f, cards[1], "Status", summary.status.to_string(), status_color);
    render_card(
        f,
        cards[2],
        "Total Income",
        format_amount(summary.total_income),
        theme::ACCENT,
    );
    render_card(
        f,
        cards[3],
        "Allocated",
        format_amount(summary.total_allocated),
        if summary.is_over_allocated() {
            theme::RED
        } else {
            theme::TEXT
        },
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, value: String, color: Color) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(panel(title));

    f.render_widget(text, area);
}

fn render_allocations(f: &mut Frame, area: Rect, state: &BudgetState, summary: &Summary) {
    let total = summary.total_income;
    let mut items: Vec<ListItem> = state
        .categories
        .iter()
        .map(|cat| {
            let share = budget::share_of_income(cat.amount, total);
            let color = theme::hex_color(&cat.color);
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<18}", truncate(&cat.name, 17)), theme::normal_style()),
                Span::styled(format!("{:>16} ", format_amount(cat.amount)), theme::normal_style()),
                Span::styled(
                    progress_bar(share / Decimal::ONE_HUNDRED, 20),
                    Style::default().fg(color),
                ),
                Span::styled(format!(" {:>6}", format_percent(share)), theme::dim_style()),
            ]))
        })
        .collect();

    if summary.is_over_allocated() {
        items.push(ListItem::new(Line::from(Span::styled(
            format!(
                "Over budget by {}; trim a category or add income",
                format_amount(summary.unallocated.abs())
            ),
            theme::expense_style(),
        ))));
    }

    if let Some(last) = state.transactions.latest() {
        let category = Category::resolve(&state.categories, &last.category_id)
            .map(|c| c.name.as_str())
            .unwrap_or("Unknown");
        items.push(ListItem::new(""));
        items.push(ListItem::new(Line::from(vec![
            Span::styled("Last spend: ", theme::dim_style()),
            Span::styled(format_amount(last.amount), theme::expense_style()),
            Span::styled(
                format!(" on {} ({})", truncate(category, 17), last.day()),
                theme::dim_style(),
            ),
        ])));
    }

    let list = List::new(items).block(panel("Allocations"));
    f.render_widget(list, area);
}

pub(crate) fn render_tip(f: &mut Frame, area: Rect, app: &App) {
    let style = if app.tip_loading() {
        theme::dim_style()
    } else {
        Style::default().fg(theme::YELLOW)
    };
    let tip = Paragraph::new(Line::from(Span::styled(app.tip.clone(), style)))
        .wrap(Wrap { trim: true })
        .block(panel("Money Tip"));
    f.render_widget(tip, area);
}
