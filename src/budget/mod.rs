mod allocation;
mod metrics;

pub use allocation::{allocate, suggested_amount, total_percentage};
pub use metrics::{
    actual_spend, burn_rate, category_report, is_high_burn, remaining, share_of_income,
    total_allocated, total_spent, unallocated, BudgetStatus, HIGH_BURN_RATE,
};

use rust_decimal::Decimal;

use crate::models::BudgetState;

/// Every derived figure the screens show, computed in one pass over a state.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_income: Decimal,
    pub total_allocated: Decimal,
    pub unallocated: Decimal,
    pub remaining: Decimal,
    pub total_spent: Decimal,
    pub burn_rate: Decimal,
    pub status: BudgetStatus,
}

impl Summary {
    pub fn of(state: &BudgetState) -> Self {
        let total_income = state.total_income();
        let allocated = total_allocated(&state.categories);
        let left = remaining(total_income, &state.categories);
        let spent = total_spent(&state.transactions);
        Self {
            total_income,
            total_allocated: allocated,
            unallocated: total_income.saturating_sub(allocated),
            remaining: left,
            total_spent: spent,
            burn_rate: burn_rate(spent, total_income),
            status: BudgetStatus::from_remaining(left),
        }
    }

    pub fn is_over_allocated(&self) -> bool {
        self.unallocated < Decimal::ZERO
    }
}
