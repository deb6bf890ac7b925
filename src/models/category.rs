use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::nullable::{decimal_or_zero, null_as_default};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Category {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subtext: String,
    #[serde(deserialize_with = "null_as_default")]
    pub icon: String,
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "decimal_or_zero"
    )]
    pub amount: Decimal,
    #[serde(
        serialize_with = "rust_decimal::serde::float::serialize",
        deserialize_with = "decimal_or_zero"
    )]
    pub default_percentage: Decimal,
    #[serde(deserialize_with = "null_as_default")]
    pub color: String,
    #[serde(deserialize_with = "null_as_default")]
    pub bg_color: String,
    #[serde(deserialize_with = "null_as_default")]
    pub icon_color: String,
}

impl Default for Category {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            subtext: String::new(),
            icon: String::new(),
            amount: Decimal::ZERO,
            default_percentage: Decimal::ZERO,
            color: String::new(),
            bg_color: String::new(),
            icon_color: String::new(),
        }
    }
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, default_percentage: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            default_percentage,
            ..Self::default()
        }
    }

    /// Find a category by ID in a slice.
    pub fn find_by_id<'a>(categories: &'a [Category], id: &str) -> Option<&'a Category> {
        categories.iter().find(|c| c.id == id)
    }

    /// Find a category by ID or name (case-insensitive) in a slice.
    pub fn find_by_key<'a>(categories: &'a [Category], key: &str) -> Option<&'a Category> {
        let lower = key.to_lowercase();
        categories
            .iter()
            .find(|c| c.id.to_lowercase() == lower || c.name.to_lowercase() == lower)
    }

    /// Resolve a transaction's category, falling back to the first category
    /// when the referenced one no longer exists.
    pub fn resolve<'a>(categories: &'a [Category], id: &str) -> Option<&'a Category> {
        Self::find_by_id(categories, id).or_else(|| categories.first())
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[allow(clippy::too_many_arguments)]
fn seed(
    id: &str,
    name: &str,
    subtext: &str,
    icon: &str,
    pct: u32,
    color: &str,
    bg_color: &str,
    icon_color: &str,
) -> Category {
    Category {
        subtext: subtext.into(),
        icon: icon.into(),
        color: color.into(),
        bg_color: bg_color.into(),
        icon_color: icon_color.into(),
        ..Category::new(id, name, Decimal::from(pct))
    }
}

/// Built-in category set used whenever nothing has been persisted.
/// Needs (rent, food, transport) take 75%, wants 15%, savings 10%.
pub fn default_categories() -> Vec<Category> {
    vec![
        seed(
            "rent",
            "Roof over head",
            "Rent & Utilities",
            "Home",
            35,
            "#13ec6d",
            "bg-orange-100",
            "text-orange-600",
        ),
        seed(
            "food",
            "Chop Money",
            "Groceries & eating out",
            "Utensils",
            25,
            "#059669",
            "bg-yellow-100",
            "text-yellow-600",
        ),
        seed(
            "transport",
            "Trotro / Uber",
            "Daily commute",
            "Bus",
            15,
            "#10b981",
            "bg-blue-100",
            "text-blue-600",
        ),
        seed(
            "chill",
            "Fufu & Chill",
            "Weekend enjoyment",
            "PartyPopper",
            15,
            "#34d399",
            "bg-purple-100",
            "text-purple-600",
        ),
        seed(
            "savings",
            "Susu Box",
            "Rainy day funds",
            "PiggyBank",
            10,
            "#dcfce7",
            "bg-green-100",
            "text-green-600",
        ),
    ]
}
