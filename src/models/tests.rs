#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;

fn amounts(state: &BudgetState) -> Vec<Decimal> {
    state.categories.iter().map(|c| c.amount).collect()
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_default_categories() {
    let cats = default_categories();
    let ids: Vec<&str> = cats.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["rent", "food", "transport", "chill", "savings"]);
    let total: Decimal = cats.iter().map(|c| c.default_percentage).sum();
    assert_eq!(total, dec!(100));
    assert!(cats.iter().all(|c| c.amount.is_zero()));
}

#[test]
fn test_category_find_by_key() {
    let cats = default_categories();
    assert_eq!(Category::find_by_key(&cats, "FOOD").unwrap().id, "food");
    assert_eq!(Category::find_by_key(&cats, "susu box").unwrap().id, "savings");
    assert!(Category::find_by_key(&cats, "nope").is_none());
}

#[test]
fn test_category_resolve_falls_back_to_first() {
    let cats = default_categories();
    assert_eq!(Category::resolve(&cats, "chill").unwrap().id, "chill");
    assert_eq!(Category::resolve(&cats, "deleted").unwrap().id, "rent");
    assert!(Category::resolve(&[], "rent").is_none());
}

#[test]
fn test_category_display() {
    let cat = Category::new("gym", "Gym", dec!(5));
    assert_eq!(format!("{cat}"), "Gym");
    assert!(cat.icon.is_empty());
}

// ── Transaction ───────────────────────────────────────────────

#[test]
fn test_transaction_day_falls_back_to_raw() {
    let txn = Transaction {
        date: "yesterday".into(),
        ..Transaction::default()
    };
    assert_eq!(txn.day(), "yesterday");
}

// ── BudgetState transitions ───────────────────────────────────

#[test]
fn test_default_state() {
    let state = BudgetState::default();
    assert_eq!(state.income, Decimal::ZERO);
    assert!(!state.has_income());
    assert_eq!(state.categories.len(), 5);
    assert!(state.transactions.is_empty());
}

#[test]
fn test_income_update_allocates() {
    let state = BudgetState::default().apply_income_update(dec!(4500), Decimal::ZERO, false);
    assert_eq!(
        amounts(&state),
        vec![dec!(1575), dec!(1125), dec!(675), dec!(675), dec!(450)]
    );
    assert!(state.has_income());
}

#[test]
fn test_income_update_with_bonus() {
    let state = BudgetState::default().apply_income_update(dec!(4500), dec!(500), true);
    assert_eq!(state.total_income(), dec!(5000));
    assert_eq!(state.categories[0].amount, dec!(1750));
}

#[test]
fn test_bonus_ignored_when_switched_off() {
    let state = BudgetState::default().apply_income_update(dec!(4500), dec!(500), false);
    assert_eq!(state.total_income(), dec!(4500));
    assert_eq!(state.bonus, dec!(500));
    assert_eq!(state.categories[0].amount, dec!(1575));
}

#[test]
fn test_income_update_discards_manual_edit() {
    let state = BudgetState::default()
        .apply_income_update(dec!(3000), Decimal::ZERO, false)
        .set_manual_allocation("food", dec!(999))
        .unwrap();
    assert_eq!(state.categories[1].amount, dec!(999));

    let state = state.apply_income_update(dec!(3200), Decimal::ZERO, false);
    assert_eq!(
        amounts(&state),
        vec![dec!(1120), dec!(800), dec!(480), dec!(480), dec!(320)]
    );
}

#[test]
fn test_rebase_restores_suggested() {
    let state = BudgetState::default()
        .apply_income_update(dec!(1000), Decimal::ZERO, false)
        .set_manual_allocation("rent", dec!(10))
        .unwrap()
        .rebase_to_income();
    assert_eq!(state.categories[0].amount, dec!(350));
}

#[test]
fn test_manual_allocation_unknown_category() {
    let result = BudgetState::default().set_manual_allocation("yacht", dec!(1));
    assert!(result.is_err());
}

#[test]
fn test_negative_income_clamped() {
    let state = BudgetState::default().apply_income_update(dec!(-10), dec!(-5), true);
    assert_eq!(state.total_income(), Decimal::ZERO);
}

#[test]
fn test_income_update_clamped_to_max() {
    let huge = dec!(5000000000000000000000000000);
    let state = BudgetState::default().apply_income_update(huge, huge, true);
    assert_eq!(state.income, MAX_AMOUNT);
    assert_eq!(state.bonus, MAX_AMOUNT);
    assert_eq!(state.categories[0].amount, MAX_AMOUNT * dec!(2) * dec!(0.35));
}

#[test]
fn test_manual_allocation_above_max_rejected() {
    let state = BudgetState::default().apply_income_update(dec!(100), Decimal::ZERO, false);
    assert!(state
        .clone()
        .set_manual_allocation("rent", MAX_AMOUNT + Decimal::ONE)
        .is_err());
    assert!(state.set_manual_allocation("rent", MAX_AMOUNT).is_ok());
}

#[test]
fn test_category_update_replaces_without_touching_income() {
    let state = BudgetState::default().apply_income_update(dec!(2000), Decimal::ZERO, false);
    let mut cats = state.categories.clone();
    cats.truncate(2);
    cats[0].amount = dec!(1);
    let state = state.apply_category_update(cats).unwrap();
    assert_eq!(state.income, dec!(2000));
    assert_eq!(state.categories.len(), 2);
    assert_eq!(state.categories[0].amount, dec!(1));
    assert_eq!(state.categories[1].amount, dec!(500));
}

#[test]
fn test_category_update_rejects_duplicate_ids() {
    let mut cats = default_categories();
    cats[1].id = "rent".into();
    assert!(BudgetState::default().apply_category_update(cats).is_err());
}

#[test]
fn test_append_transaction() {
    let state = BudgetState::default()
        .append_transaction(NewTransaction::new("food", dec!(120)))
        .unwrap();
    assert_eq!(state.transactions.len(), 1);
    assert_eq!(state.transactions.latest().unwrap().note, DEFAULT_NOTE);
}

// ── Serialization ─────────────────────────────────────────────

#[test]
fn test_persisted_field_names() {
    let state = BudgetState::default().apply_income_update(dec!(100), dec!(5), true);
    let json = serde_json::to_value(&state).unwrap();
    let obj = json.as_object().unwrap();
    let mut keys: Vec<&str> = obj.keys().map(|k| k.as_str()).collect();
    keys.sort();
    assert_eq!(
        keys,
        vec!["bonus", "categories", "includeBonus", "income", "transactions"]
    );
    assert!(obj["income"].is_number());
    assert!(json["categories"][0]["defaultPercentage"].is_number());
    assert!(json["categories"][0].get("bgColor").is_some());
}

#[test]
fn test_missing_fields_default() {
    let state: BudgetState = serde_json::from_str(r#"{"income": 4500}"#).unwrap();
    assert_eq!(state.income, dec!(4500));
    assert!(!state.include_bonus);
    assert_eq!(state.categories, default_categories());
    assert!(state.transactions.is_empty());
}

#[test]
fn test_null_collections_default() {
    let state: BudgetState =
        serde_json::from_str(r#"{"income": 10, "categories": null, "transactions": null}"#).unwrap();
    assert_eq!(state.categories.len(), 5);
    assert!(state.transactions.is_empty());
}

#[test]
fn test_null_scalars_default_and_keep_ledger() {
    let json = r#"{
        "income": null, "bonus": 200, "includeBonus": null,
        "categories": [{"id": "food", "name": null, "amount": null, "defaultPercentage": 25}],
        "transactions": [
            {"id": "t1", "categoryId": "food", "amount": 12.5, "date": null, "note": null},
            {"id": null, "categoryId": "food", "amount": null, "date": "2024-01-01T00:00:00Z", "note": "kenkey"}
        ]
    }"#;
    let state: BudgetState = serde_json::from_str(json).unwrap();
    assert_eq!(state.income, Decimal::ZERO);
    assert_eq!(state.bonus, dec!(200));
    assert!(!state.include_bonus);
    assert_eq!(state.categories[0].amount, Decimal::ZERO);
    assert!(state.categories[0].name.is_empty());
    assert_eq!(state.transactions.len(), 2);

    let first = &state.transactions.entries()[0];
    assert_eq!(first.amount, dec!(12.5));
    assert_eq!(first.note, DEFAULT_NOTE);
    assert!(first.date.is_empty());
    assert_eq!(state.transactions.entries()[1].note, "kenkey");
}

#[test]
fn test_legacy_salary_key() {
    let state: BudgetState =
        serde_json::from_str(r#"{"salary": 3000, "bonus": 200, "includeBonus": true, "extra": 1}"#)
            .unwrap();
    assert_eq!(state.total_income(), dec!(3200));
}

#[test]
fn test_sparse_category_entries() {
    let json = r#"{"categories": [{"id": "rent", "name": "Rent", "amount": 10, "defaultPercentage": 50}]}"#;
    let state: BudgetState = serde_json::from_str(json).unwrap();
    assert_eq!(state.categories.len(), 1);
    assert_eq!(state.categories[0].default_percentage, dec!(50));
    assert!(state.categories[0].color.is_empty());
}
