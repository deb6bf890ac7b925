#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::models::default_categories;

fn spend(category: &str, amount: Decimal) -> NewTransaction {
    NewTransaction::new(category, amount)
}

// ── append ────────────────────────────────────────────────────

#[test]
fn test_append_to_empty() {
    let ledger = Ledger::new().append(spend("food", dec!(120))).unwrap();
    assert_eq!(ledger.len(), 1);
    let txn = ledger.latest().unwrap();
    assert_eq!(txn.category_id, "food");
    assert_eq!(txn.amount, dec!(120));
    assert!(!txn.id.is_empty());
    assert!(!txn.date.is_empty());
}

#[test]
fn test_append_newest_first() {
    let mut ledger = Ledger::new();
    for (i, amt) in [dec!(10), dec!(20), dec!(30)].into_iter().enumerate() {
        ledger = ledger
            .append(spend("food", amt).with_note(format!("n{i}")))
            .unwrap();
    }
    assert_eq!(ledger.len(), 3);
    let amounts: Vec<Decimal> = ledger.iter().map(|t| t.amount).collect();
    assert_eq!(amounts, vec![dec!(30), dec!(20), dec!(10)]);
    assert_eq!(ledger.entries()[2].note, "n0");
}

#[test]
fn test_append_keeps_fields_and_notes_non_empty() {
    let mut ledger = Ledger::new();
    let inputs = [
        ("rent", dec!(500), Some("landlord")),
        ("food", dec!(12.50), None),
        ("chill", dec!(40), Some("   ")),
    ];
    for (cat, amt, note) in inputs {
        let mut new = spend(cat, amt);
        new.note = note.map(String::from);
        ledger = ledger.append(new).unwrap();
    }

    for (txn, (cat, amt, _)) in ledger.iter().rev().zip(inputs.iter()) {
        assert_eq!(txn.category_id, *cat);
        assert_eq!(txn.amount, *amt);
        assert!(!txn.note.is_empty());
    }
    assert_eq!(ledger.entries()[2].note, "landlord");
    assert_eq!(ledger.entries()[1].note, DEFAULT_NOTE);
    assert_eq!(ledger.entries()[0].note, DEFAULT_NOTE);
}

#[test]
fn test_append_generates_unique_ids() {
    let mut ledger = Ledger::new();
    for _ in 0..50 {
        ledger = ledger.append(spend("food", dec!(1))).unwrap();
    }
    let mut ids: Vec<&str> = ledger.iter().map(|t| t.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 50);
}

#[test]
fn test_append_respects_supplied_id_and_date() {
    let new = NewTransaction {
        id: Some("abc123".into()),
        category_id: "transport".into(),
        amount: dec!(8),
        date: Some("2024-03-01T08:00:00+00:00".into()),
        note: Some("trotro".into()),
    };
    let ledger = Ledger::new().append(new).unwrap();
    let txn = ledger.latest().unwrap();
    assert_eq!(txn.id, "abc123");
    assert_eq!(txn.date, "2024-03-01T08:00:00+00:00");
    assert_eq!(txn.day(), "2024-03-01");
}

#[test]
fn test_append_rejects_non_positive() {
    assert!(Ledger::new().append(spend("food", Decimal::ZERO)).is_err());
    assert!(Ledger::new().append(spend("food", dec!(-5))).is_err());
}

#[test]
fn test_append_rejects_above_max() {
    let ledger = Ledger::new()
        .append(spend("food", MAX_AMOUNT))
        .unwrap();
    assert_eq!(ledger.len(), 1);
    assert!(ledger
        .append(spend("food", MAX_AMOUNT + Decimal::ONE))
        .is_err());
}

#[test]
fn test_append_fills_empty_date() {
    let new = NewTransaction {
        date: Some(String::new()),
        ..spend("food", dec!(3))
    };
    let ledger = Ledger::new().append(new).unwrap();
    let txn = ledger.latest().unwrap();
    assert!(!txn.date.is_empty());
    assert!(chrono::DateTime::parse_from_rfc3339(&txn.date).is_ok());
}

// ── queries ───────────────────────────────────────────────────

#[test]
fn test_for_category_filters() {
    let ledger = Ledger::new()
        .append(spend("food", dec!(10)))
        .unwrap()
        .append(spend("rent", dec!(100)))
        .unwrap()
        .append(spend("food", dec!(5)))
        .unwrap();
    let food: Vec<Decimal> = ledger.for_category("food").map(|t| t.amount).collect();
    assert_eq!(food, vec![dec!(5), dec!(10)]);
    assert_eq!(ledger.for_category("savings").count(), 0);
}

#[test]
fn test_serializes_as_plain_array() {
    let ledger = Ledger::new().append(spend("food", dec!(3))).unwrap();
    let json = serde_json::to_value(&ledger).unwrap();
    assert!(json.is_array());
    let back: Ledger = serde_json::from_value(json).unwrap();
    assert_eq!(back, ledger);
}

// ── export ────────────────────────────────────────────────────

#[test]
fn test_export_csv() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spends.csv");
    let ledger = Ledger::new()
        .append(spend("food", dec!(120)).with_note("waakye"))
        .unwrap()
        .append(spend("gone", dec!(7)))
        .unwrap();

    let count = ledger.export_csv(&default_categories(), &path).unwrap();
    assert_eq!(count, 2);

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines[0], "date,category,note,amount");
    // Unknown category falls back to the first category
    assert!(lines[1].contains("Roof over head"));
    assert!(lines[1].ends_with(",Spend,7"));
    assert!(lines[2].contains("Chop Money"));
    assert!(lines[2].ends_with(",waakye,120"));
}
