use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::panel;
use crate::ui::app::{App, IncomeField};
use crate::ui::theme;
use crate::ui::util::{format_amount, CURRENCY};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Salary
            Constraint::Length(5), // Side hustle
            Constraint::Length(4), // Total preview
            Constraint::Min(0),
        ])
        .split(area);

    let form = &app.income_form;

    render_field(
        f,
        chunks[0],
        "Monthly Salary",
        &form.salary,
        form.field == IncomeField::Salary,
        None,
    );

    let toggle = if form.include_bonus {
        Span::styled("[x] included in split", theme::income_style())
    } else {
        Span::styled("[ ] not included (press b)", theme::dim_style())
    };
    render_field(
        f,
        chunks[1],
        "Side Hustle / Bonus",
        &form.bonus,
        form.field == IncomeField::Bonus,
        Some(toggle),
    );

    let preview = Paragraph::new(vec![
        Line::from(Span::styled(
            format_amount(form.total()),
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Press Enter to split this across your categories",
            theme::dim_style(),
        )),
    ])
    .centered()
    .block(panel("Total to split"));
    f.render_widget(preview, chunks[2]);
}

fn render_field(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: &str,
    active: bool,
    extra: Option<Span<'static>>,
) {
    let value_style = if active {
        Style::default()
            .fg(theme::ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        theme::normal_style()
    };
    let cursor = if active { "▏" } else { "" };

    let mut lines = vec![Line::from(vec![
        Span::styled(format!("{CURRENCY} "), theme::dim_style()),
        Span::styled(value.to_string(), value_style),
        Span::styled(cursor, Style::default().fg(theme::ACCENT)),
    ])];
    if let Some(extra) = extra {
        lines.push(Line::from(extra));
    }

    let mut block = panel(title);
    if active {
        block = block.border_style(Style::default().fg(theme::ACCENT));
    }
    f.render_widget(Paragraph::new(lines).centered().block(block), area);
}
