//! Expense category vocabulary
//!
//! The set of categories is closed. Validation, menus, and the category
//! summary all read from [`Category::ALL`], so a summary always reports every
//! category even when nothing was spent in it.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{LedgerError, LedgerResult};

/// An allowed expense category
///
/// Variant order is the presentation order; `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Category {
    Groceries,
    Transportation,
    Utilities,
    #[serde(rename = "Personal Care")]
    PersonalCare,
    Savings,
    Entertainment,
}

impl Category {
    /// Every category, in presentation order
    pub const ALL: [Category; 6] = [
        Category::Groceries,
        Category::Transportation,
        Category::Utilities,
        Category::PersonalCare,
        Category::Savings,
        Category::Entertainment,
    ];

    /// Display name as stored on disk and shown to users
    pub fn name(&self) -> &'static str {
        match self {
            Self::Groceries => "Groceries",
            Self::Transportation => "Transportation",
            Self::Utilities => "Utilities",
            Self::PersonalCare => "Personal Care",
            Self::Savings => "Savings",
            Self::Entertainment => "Entertainment",
        }
    }

    /// Resolve a category name against the vocabulary
    ///
    /// Surrounding whitespace is ignored; the match itself is exact.
    pub fn parse(name: &str) -> LedgerResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::InvalidCategory(
                "Category must be a non-empty string".into(),
            ));
        }

        Self::ALL
            .iter()
            .copied()
            .find(|c| c.name() == name)
            .ok_or_else(|| {
                LedgerError::InvalidCategory(format!(
                    "Given category: {} is not in predefined categories",
                    name
                ))
            })
    }

    /// Comma-separated list of every name, for help and error text
    pub fn vocabulary() -> String {
        Self::ALL
            .iter()
            .map(|c| c.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Category {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        for category in Category::ALL {
            assert_eq!(Category::parse(category.name()).unwrap(), category);
        }
        assert_eq!(
            Category::parse("  Personal Care ").unwrap(),
            Category::PersonalCare
        );
    }

    #[test]
    fn test_parse_rejects_unknown_and_empty() {
        assert!(matches!(
            Category::parse("NotARealCategory"),
            Err(LedgerError::InvalidCategory(_))
        ));
        assert!(matches!(
            Category::parse("   "),
            Err(LedgerError::InvalidCategory(_))
        ));
        // Matching is case-sensitive
        assert!(Category::parse("groceries").is_err());
    }

    #[test]
    fn test_order_follows_vocabulary() {
        let mut shuffled = vec![
            Category::Entertainment,
            Category::Groceries,
            Category::PersonalCare,
        ];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![
                Category::Groceries,
                Category::PersonalCare,
                Category::Entertainment
            ]
        );
    }

    #[test]
    fn test_serialization_uses_display_name() {
        let json = serde_json::to_string(&Category::PersonalCare).unwrap();
        assert_eq!(json, "\"Personal Care\"");
    }
}
