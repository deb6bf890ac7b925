use ratatui::style::{Color, Modifier, Style};

pub(crate) const HEADER_BG: Color = Color::Rgb(16, 34, 24);
pub(crate) const HEADER_FG: Color = Color::Rgb(226, 244, 233);
pub(crate) const ACCENT: Color = Color::Rgb(19, 236, 109);
pub(crate) const GREEN: Color = Color::Rgb(52, 211, 153);
pub(crate) const RED: Color = Color::Rgb(248, 113, 113);
pub(crate) const YELLOW: Color = Color::Rgb(250, 204, 21);
pub(crate) const SURFACE: Color = Color::Rgb(28, 48, 37);
pub(crate) const TEXT: Color = Color::Rgb(226, 244, 233);
pub(crate) const TEXT_DIM: Color = Color::Rgb(134, 163, 146);
pub(crate) const OVERLAY: Color = Color::Rgb(50, 79, 63);
pub(crate) const COMMAND_BG: Color = Color::Rgb(10, 24, 16);

/// `#rrggbb` from a category record; anything else falls back to the accent.
pub(crate) fn hex_color(hex: &str) -> Color {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 {
        return ACCENT;
    }
    let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2).unwrap_or(""), 16);
    match (channel(0), channel(2), channel(4)) {
        (Ok(r), Ok(g), Ok(b)) => Color::Rgb(r, g, b),
        _ => ACCENT,
    }
}

pub(crate) fn header_style() -> Style {
    Style::default()
        .fg(HEADER_FG)
        .bg(HEADER_BG)
        .add_modifier(Modifier::BOLD)
}

pub(crate) fn title_style() -> Style {
    Style::default().fg(TEXT_DIM).add_modifier(Modifier::BOLD)
}

pub(crate) fn selected_style() -> Style {
    Style::default().fg(HEADER_BG).bg(ACCENT)
}

pub(crate) fn normal_style() -> Style {
    Style::default().fg(TEXT)
}

pub(crate) fn dim_style() -> Style {
    Style::default().fg(TEXT_DIM)
}

pub(crate) fn income_style() -> Style {
    Style::default().fg(GREEN)
}

pub(crate) fn expense_style() -> Style {
    Style::default().fg(RED)
}

pub(crate) fn alt_row_style() -> Style {
    Style::default().fg(TEXT).bg(SURFACE)
}

pub(crate) fn command_bar_style() -> Style {
    Style::default().fg(TEXT).bg(COMMAND_BG)
}

pub(crate) fn status_bar_style() -> Style {
    Style::default().fg(TEXT_DIM).bg(SURFACE)
}
