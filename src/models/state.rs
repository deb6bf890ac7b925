use anyhow::Result;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::nullable::{decimal_or_zero, null_as_default};
use super::{default_categories, Category, NewTransaction};
use crate::budget;
use crate::ledger::Ledger;

/// Largest amount accepted anywhere money enters the budget (10^15).
/// Keeps every sum and split well inside `Decimal`'s range.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// The persisted aggregate: income, allocations and the spend ledger.
///
/// Transitions consume the state and hand back the next one; persisting the
/// result is the caller's job (see `store::Store`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetState {
    #[serde(
        alias = "salary",
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "decimal_or_zero"
    )]
    pub income: Decimal,
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "decimal_or_zero"
    )]
    pub bonus: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub include_bonus: bool,
    #[serde(deserialize_with = "null_as_default_categories")]
    pub categories: Vec<Category>,
    #[serde(deserialize_with = "null_as_default")]
    pub transactions: Ledger,
}

impl Default for BudgetState {
    fn default() -> Self {
        Self {
            income: Decimal::ZERO,
            bonus: Decimal::ZERO,
            include_bonus: false,
            categories: default_categories(),
            transactions: Ledger::new(),
        }
    }
}

fn null_as_default_categories<'de, D>(deserializer: D) -> std::result::Result<Vec<Category>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Category>>::deserialize(deserializer)?.unwrap_or_else(default_categories))
}

impl BudgetState {
    /// Salary plus the bonus when it is switched on.
    pub fn total_income(&self) -> Decimal {
        if self.include_bonus {
            self.income.saturating_add(self.bonus)
        } else {
            self.income
        }
    }

    pub fn has_income(&self) -> bool {
        self.income > Decimal::ZERO
    }

    /// Set income and re-split every category from its percentage.
    /// Manual allocations are overwritten. Both figures are clamped to
    /// `0..=MAX_AMOUNT`.
    pub fn apply_income_update(self, salary: Decimal, bonus: Decimal, include_bonus: bool) -> Self {
        let next = Self {
            income: salary.clamp(Decimal::ZERO, MAX_AMOUNT),
            bonus: bonus.clamp(Decimal::ZERO, MAX_AMOUNT),
            include_bonus,
            ..self
        };
        next.rebase_to_income()
    }

    /// "Reset to suggested": recompute all amounts against the current total income.
    pub fn rebase_to_income(self) -> Self {
        let categories = budget::allocate(self.total_income(), &self.categories);
        Self { categories, ..self }
    }

    /// Override one category's amount without touching the others.
    pub fn set_manual_allocation(mut self, category_id: &str, amount: Decimal) -> Result<Self> {
        anyhow::ensure!(
            amount <= MAX_AMOUNT,
            "Allocation {amount} is above the {MAX_AMOUNT} limit"
        );
        let cat = self
            .categories
            .iter_mut()
            .find(|c| c.id == category_id)
            .ok_or_else(|| anyhow::anyhow!("Unknown category: {category_id}"))?;
        cat.amount = amount;
        Ok(self)
    }

    /// Replace the category set wholesale. Income is left alone.
    pub fn apply_category_update(self, categories: Vec<Category>) -> Result<Self> {
        for (i, cat) in categories.iter().enumerate() {
            anyhow::ensure!(!cat.id.is_empty(), "Category '{}' has no id", cat.name);
            anyhow::ensure!(
                !categories[..i].iter().any(|c| c.id == cat.id),
                "Duplicate category id: {}",
                cat.id
            );
        }
        Ok(Self { categories, ..self })
    }

    pub fn append_transaction(self, new: NewTransaction) -> Result<Self> {
        let transactions = self.transactions.append(new)?;
        Ok(Self {
            transactions,
            ..self
        })
    }
}
