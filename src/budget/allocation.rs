use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::Category;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Suggested allocation for one weight, rounded to a whole currency unit.
/// Saturates instead of overflowing on out-of-range saved figures.
pub fn suggested_amount(total_income: Decimal, percentage: Decimal) -> Decimal {
    (total_income.saturating_mul(percentage) / HUNDRED)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Replace every category's amount with its suggested share of `total_income`.
///
/// Manual edits are discarded. Weights are not required to sum to 100; any
/// gap or excess shows up as the unallocated remainder.
pub fn allocate(total_income: Decimal, categories: &[Category]) -> Vec<Category> {
    categories
        .iter()
        .map(|cat| Category {
            amount: suggested_amount(total_income, cat.default_percentage),
            ..cat.clone()
        })
        .collect()
}

/// Sum of the configured weights (100 for the built-in set).
pub fn total_percentage(categories: &[Category]) -> Decimal {
    categories
        .iter()
        .fold(Decimal::ZERO, |acc, c| acc.saturating_add(c.default_percentage))
}
