mod category;
mod nullable;
mod state;
mod transaction;

pub use category::{default_categories, Category};
pub use state::{BudgetState, MAX_AMOUNT};
pub use transaction::{NewTransaction, Transaction, DEFAULT_NOTE};

#[cfg(test)]
mod tests;
