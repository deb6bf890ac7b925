#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Roof over head", 6), "Roof …");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("Fufu & Chill 🍲🍲", 14), "Fufu & Chill …");
}

#[test]
fn test_truncate_one_char() {
    assert_eq!(truncate("hello", 1), "…");
}

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56)), "GHS 1,234.56");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0)), "GHS 0.00");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.5)), "-GHS 42.50");
}

#[test]
fn test_format_amount_large() {
    assert_eq!(format_amount(dec!(1234567.89)), "GHS 1,234,567.89");
}

#[test]
fn test_format_amount_whole() {
    assert_eq!(format_amount(dec!(1575)), "GHS 1,575.00");
}

// ── format_percent ────────────────────────────────────────────

#[test]
fn test_format_percent() {
    assert_eq!(format_percent(dec!(35)), "35.0%");
    assert_eq!(format_percent(dec!(83.333)), "83.3%");
}

// ── parse_amount ──────────────────────────────────────────────

#[test]
fn test_parse_amount_plain() {
    assert_eq!(parse_amount("120"), Some(dec!(120)));
    assert_eq!(parse_amount(" 12.75 "), Some(dec!(12.75)));
}

#[test]
fn test_parse_amount_separators_and_prefix() {
    assert_eq!(parse_amount("4,500"), Some(dec!(4500)));
    assert_eq!(parse_amount("GHS 1,000.50"), Some(dec!(1000.50)));
}

#[test]
fn test_parse_amount_trailing_dot() {
    assert_eq!(parse_amount("45."), Some(dec!(45)));
}

#[test]
fn test_parse_amount_rejects() {
    assert_eq!(parse_amount(""), None);
    assert_eq!(parse_amount("abc"), None);
    assert_eq!(parse_amount("-5"), None);
}

#[test]
fn test_parse_amount_caps_size() {
    assert_eq!(parse_amount("1,000,000,000,000,000"), Some(crate::models::MAX_AMOUNT));
    assert_eq!(parse_amount("1000000000000001"), None);
    assert_eq!(parse_amount("5000000000000000000000000000"), None);
}

// ── progress_bar ──────────────────────────────────────────────

#[test]
fn test_progress_bar_fill() {
    assert_eq!(progress_bar(dec!(0.5), 4), "[██░░]");
    assert_eq!(progress_bar(dec!(0), 3), "[░░░]");
}

#[test]
fn test_progress_bar_clamps() {
    assert_eq!(progress_bar(dec!(2.5), 3), "[███]");
    assert_eq!(progress_bar(dec!(-1), 2), "[░░]");
}

// ── scrolling ─────────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_window() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..5 {
        scroll_down(&mut index, &mut scroll, 10, 3);
    }
    assert_eq!(index, 5);
    assert_eq!(scroll, 3);
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (1, 0);
    scroll_down(&mut index, &mut scroll, 2, 5);
    assert_eq!(index, 1);
}

#[test]
fn test_scroll_up_and_jumps() {
    let (mut index, mut scroll) = (4, 4);
    scroll_up(&mut index, &mut scroll);
    assert_eq!((index, scroll), (3, 3));
    scroll_to_bottom(&mut index, &mut scroll, 10, 4);
    assert_eq!((index, scroll), (9, 6));
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));
}
