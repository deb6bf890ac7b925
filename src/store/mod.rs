use anyhow::{Context, Result};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::db::Database;
use crate::models::{BudgetState, Category, NewTransaction};

/// Key the whole budget snapshot is stored under.
pub(crate) const STORAGE_KEY: &str = "salarywise_state_v2";

/// Get/set/remove over opaque string blobs.
pub(crate) trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

impl BlobStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.get_blob(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_blob(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.remove_blob(key).map(|_| ())
    }
}

/// Read the persisted snapshot. Missing, unreadable or corrupt data yields the
/// default state; nothing here is fatal.
pub(crate) fn load<S: BlobStore>(blobs: &S) -> BudgetState {
    let raw = match blobs.get(STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("No saved budget found, starting fresh");
            return BudgetState::default();
        }
        Err(e) => {
            warn!("Failed to read saved budget: {e:#}");
            return BudgetState::default();
        }
    };

    match serde_json::from_str::<BudgetState>(&raw) {
        Ok(state) => {
            info!(
                categories = state.categories.len(),
                transactions = state.transactions.len(),
                "Loaded saved budget"
            );
            state
        }
        Err(e) => {
            warn!("Discarding corrupt saved budget: {e}");
            BudgetState::default()
        }
    }
}

/// Write the persisted fields of `state` as one JSON blob.
pub(crate) fn save<S: BlobStore>(blobs: &S, state: &BudgetState) -> Result<()> {
    let json = serde_json::to_string(state).context("Failed to serialize budget")?;
    blobs.set(STORAGE_KEY, &json)
}

/// Owns the live budget and writes it back after every change.
pub(crate) struct Store<S: BlobStore = Database> {
    blobs: S,
    state: BudgetState,
}

impl<S: BlobStore> Store<S> {
    pub(crate) fn open(blobs: S) -> Self {
        let state = load(&blobs);
        Self { blobs, state }
    }

    pub(crate) fn state(&self) -> &BudgetState {
        &self.state
    }

    pub(crate) fn blobs(&self) -> &S {
        &self.blobs
    }

    /// Adopt `next` and persist it. A failed write is logged and the in-memory
    /// state stays authoritative.
    fn commit(&mut self, next: BudgetState) -> &BudgetState {
        self.state = next;
        if let Err(e) = save(&self.blobs, &self.state) {
            warn!("Failed to save budget, keeping changes in memory: {e:#}");
        }
        &self.state
    }

    pub(crate) fn update_income(
        &mut self,
        salary: Decimal,
        bonus: Decimal,
        include_bonus: bool,
    ) -> &BudgetState {
        info!(%salary, %bonus, include_bonus, "Updating income");
        let next = self
            .state
            .clone()
            .apply_income_update(salary, bonus, include_bonus);
        self.commit(next)
    }

    pub(crate) fn reset_to_suggested(&mut self) -> &BudgetState {
        info!("Resetting allocations to suggested split");
        let next = self.state.clone().rebase_to_income();
        self.commit(next)
    }

    pub(crate) fn set_manual_allocation(
        &mut self,
        category_id: &str,
        amount: Decimal,
    ) -> Result<&BudgetState> {
        let next = self
            .state
            .clone()
            .set_manual_allocation(category_id, amount)?;
        Ok(self.commit(next))
    }

    pub(crate) fn update_categories(&mut self, categories: Vec<Category>) -> Result<&BudgetState> {
        let next = self.state.clone().apply_category_update(categories)?;
        Ok(self.commit(next))
    }

    pub(crate) fn append_transaction(&mut self, new: NewTransaction) -> Result<&BudgetState> {
        let next = self.state.clone().append_transaction(new)?;
        Ok(self.commit(next))
    }

    /// Wipe the saved snapshot, then return to defaults. Irreversible; callers
    /// confirm with the user first. If the wipe fails nothing changes.
    pub(crate) fn reset(&mut self) -> Result<()> {
        self.blobs
            .remove(STORAGE_KEY)
            .context("Failed to clear saved budget")?;
        self.state = BudgetState::default();
        info!("Budget reset to defaults");
        Ok(())
    }
}
