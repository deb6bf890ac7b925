use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::models::{Category, NewTransaction, Transaction, DEFAULT_NOTE, MAX_AMOUNT};

/// Append-only list of spends, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    entries: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a spend at the head of the ledger.
    ///
    /// Fills in a fresh id, the current time and the placeholder note when the
    /// submission leaves them out. Amounts must be positive and at most
    /// [`MAX_AMOUNT`].
    pub fn append(mut self, new: NewTransaction) -> Result<Self> {
        anyhow::ensure!(
            new.amount > Decimal::ZERO,
            "Spend amount must be positive (got {})",
            new.amount
        );
        anyhow::ensure!(
            new.amount <= MAX_AMOUNT,
            "Spend amount {} is above the {MAX_AMOUNT} limit",
            new.amount
        );

        let note = new
            .note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| DEFAULT_NOTE.to_string());

        let txn = Transaction {
            id: new
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| uuid::Uuid::new_v4().simple().to_string()),
            category_id: new.category_id,
            amount: new.amount,
            date: new
                .date
                .filter(|d| !d.is_empty())
                .unwrap_or_else(|| chrono::Utc::now().to_rfc3339()),
            note,
        };

        tracing::debug!(id = %txn.id, category = %txn.category_id, amount = %txn.amount, "Appended spend");
        self.entries.insert(0, txn);
        Ok(self)
    }

    pub fn entries(&self) -> &[Transaction] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&Transaction> {
        self.entries.first()
    }

    pub fn for_category<'a>(&'a self, category_id: &'a str) -> impl Iterator<Item = &'a Transaction> {
        self.entries
            .iter()
            .filter(move |t| t.category_id == category_id)
    }

    /// Write the ledger to CSV, newest first. Returns the number of rows written.
    pub fn export_csv(&self, categories: &[Category], path: &Path) -> Result<usize> {
        let mut wtr = csv::Writer::from_path(path)
            .with_context(|| format!("Failed to create export file: {}", path.display()))?;
        wtr.write_record(["date", "category", "note", "amount"])?;

        for txn in &self.entries {
            let category = Category::resolve(categories, &txn.category_id)
                .map(|c| c.name.as_str())
                .unwrap_or(txn.category_id.as_str());
            let amount = txn.amount.to_string();
            wtr.write_record([txn.date.as_str(), category, txn.note.as_str(), amount.as_str()])?;
        }

        wtr.flush().context("Failed to flush export file")?;
        Ok(self.entries.len())
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests;
