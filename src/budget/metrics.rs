use rust_decimal::Decimal;

use crate::ledger::Ledger;
use crate::models::Category;

/// Burn rate above this percentage is flagged on the analytics screen.
pub const HIGH_BURN_RATE: Decimal = Decimal::from_parts(80, 0, 0, false, 0);

/// Sums saturate at `Decimal::MAX`; a saved blob may hold any number.
fn saturating_sum(amounts: impl Iterator<Item = Decimal>) -> Decimal {
    amounts.fold(Decimal::ZERO, Decimal::saturating_add)
}

pub fn total_allocated(categories: &[Category]) -> Decimal {
    saturating_sum(categories.iter().map(|c| c.amount))
}

/// Income not yet assigned to a category. Negative when over-allocated.
pub fn unallocated(total_income: Decimal, categories: &[Category]) -> Decimal {
    total_income.saturating_sub(total_allocated(categories))
}

/// Money left to spend, as shown on the dashboard.
///
/// Same figure as [`unallocated`]: logged spends do not reduce it.
pub fn remaining(total_income: Decimal, categories: &[Category]) -> Decimal {
    unallocated(total_income, categories)
}

pub fn actual_spend(category_id: &str, ledger: &Ledger) -> Decimal {
    saturating_sum(ledger.for_category(category_id).map(|t| t.amount))
}

pub fn total_spent(ledger: &Ledger) -> Decimal {
    saturating_sum(ledger.iter().map(|t| t.amount))
}

/// `part` as a percentage of `total_income`; 0 when there is no income.
pub fn share_of_income(part: Decimal, total_income: Decimal) -> Decimal {
    if total_income.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(total_income)
        .map_or(Decimal::MAX, |ratio| ratio.saturating_mul(Decimal::ONE_HUNDRED))
}

/// Percentage of income consumed by logged spends; 0 when there is no income.
pub fn burn_rate(total_spent: Decimal, total_income: Decimal) -> Decimal {
    share_of_income(total_spent, total_income)
}

pub fn is_high_burn(rate: Decimal) -> bool {
    rate > HIGH_BURN_RATE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetStatus {
    Safe,
    WatchOut,
}

impl BudgetStatus {
    pub fn from_remaining(remaining: Decimal) -> Self {
        if remaining > Decimal::ZERO {
            Self::Safe
        } else {
            Self::WatchOut
        }
    }
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "Safe"),
            Self::WatchOut => write!(f, "Watch out"),
        }
    }
}

/// Budget vs. actual for one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySpend {
    pub id: String,
    pub name: String,
    pub budget: Decimal,
    pub actual: Decimal,
}

impl CategorySpend {
    pub fn is_over(&self) -> bool {
        self.actual > self.budget
    }
}

/// Budget vs. actual per category, in display order.
pub fn category_report(categories: &[Category], ledger: &Ledger) -> Vec<CategorySpend> {
    categories
        .iter()
        .map(|cat| CategorySpend {
            id: cat.id.clone(),
            name: cat.name.clone(),
            budget: cat.amount,
            actual: actual_spend(&cat.id, ledger),
        })
        .collect()
}
