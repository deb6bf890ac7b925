use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use super::nullable::{decimal_or_zero, null_as_default};

/// Placeholder note for spends logged without one.
pub const DEFAULT_NOTE: &str = "Spend";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Transaction {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category_id: String,
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "decimal_or_zero"
    )]
    pub amount: Decimal,
    /// RFC 3339 timestamp of creation.
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(deserialize_with = "note_or_placeholder")]
    pub note: String,
}

impl Default for Transaction {
    fn default() -> Self {
        Self {
            id: String::new(),
            category_id: String::new(),
            amount: Decimal::ZERO,
            date: String::new(),
            note: DEFAULT_NOTE.to_string(),
        }
    }
}

fn note_or_placeholder<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_NOTE.to_string()))
}

impl Transaction {
    /// Calendar day of the transaction, or the raw string if it isn't RFC 3339.
    pub fn day(&self) -> String {
        chrono::DateTime::parse_from_rfc3339(&self.date)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| self.date.clone())
    }
}

/// A spend as submitted by the user; missing pieces are filled in by the ledger.
#[derive(Debug, Clone, Default)]
pub struct NewTransaction {
    pub id: Option<String>,
    pub category_id: String,
    pub amount: Decimal,
    pub date: Option<String>,
    pub note: Option<String>,
}

impl NewTransaction {
    pub fn new(category_id: impl Into<String>, amount: Decimal) -> Self {
        Self {
            category_id: category_id.into(),
            amount,
            ..Self::default()
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}
