//! Per-category spending totals

use std::collections::BTreeMap;

use super::category::Category;
use super::expense::Expense;
use super::money::Money;
use crate::error::{LedgerError, LedgerResult};

/// Total amount per category across a set of expenses
///
/// Every category of the vocabulary is present, at zero if unused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    totals: BTreeMap<Category, Money>,
    total: Money,
}

impl CategorySummary {
    /// Sum the given expenses by category
    ///
    /// Fails with `InvalidAmount` if a total leaves the representable range.
    pub fn from_expenses<'a>(
        expenses: impl IntoIterator<Item = &'a Expense>,
    ) -> LedgerResult<Self> {
        let mut totals: BTreeMap<Category, Money> =
            Category::ALL.iter().map(|&c| (c, Money::zero())).collect();
        let mut total = Money::zero();

        for expense in expenses {
            let slot = totals.entry(expense.category()).or_default();
            *slot = slot
                .checked_add(expense.amount())
                .ok_or_else(|| total_out_of_range(expense.category().name()))?;
            total = total
                .checked_add(expense.amount())
                .ok_or_else(|| total_out_of_range("all categories"))?;
        }

        Ok(Self { totals, total })
    }

    /// Total for one category
    pub fn get(&self, category: Category) -> Money {
        self.totals.get(&category).copied().unwrap_or_default()
    }

    /// Sum over all categories
    pub fn total(&self) -> Money {
        self.total
    }

    /// Categories and totals in vocabulary order
    pub fn iter(&self) -> impl Iterator<Item = (Category, Money)> + '_ {
        self.totals.iter().map(|(&c, &m)| (c, m))
    }
}

fn total_out_of_range(scope: &str) -> LedgerError {
    LedgerError::InvalidAmount(format!("Spending total for {} is out of range", scope))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExpenseId;

    fn expense(id: i64, cents: i64, category: Category) -> Expense {
        Expense::new(
            ExpenseId::new(id).unwrap(),
            Money::from_cents(cents),
            category,
            "test",
            None,
        )
        .unwrap()
    }

    #[test]
    fn test_empty_summary_lists_every_category() {
        let none: Vec<Expense> = Vec::new();
        let summary = CategorySummary::from_expenses(&none).unwrap();
        let categories: Vec<Category> = summary.iter().map(|(c, _)| c).collect();
        assert_eq!(categories, Category::ALL.to_vec());
        assert!(summary.total().is_zero());
    }

    #[test]
    fn test_totals_by_category() {
        let expenses = vec![
            expense(1, 1550, Category::Groceries),
            expense(2, 450, Category::Groceries),
            expense(3, 4500, Category::Transportation),
        ];
        let summary = CategorySummary::from_expenses(&expenses).unwrap();

        assert_eq!(summary.get(Category::Groceries).cents(), 2000);
        assert_eq!(summary.get(Category::Transportation).cents(), 4500);
        assert!(summary.get(Category::Savings).is_zero());
        assert_eq!(summary.total().cents(), 6500);
    }

    #[test]
    fn test_overflowing_totals_are_an_error() {
        // Enough maximal expenses to exceed i64 cents in one category
        let expenses: Vec<Expense> = (1..=1100)
            .map(|id| expense(id, Money::MAX.cents(), Category::Savings))
            .collect();

        assert!(matches!(
            CategorySummary::from_expenses(&expenses),
            Err(LedgerError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_overflowing_grand_total_is_an_error() {
        // Each category stays in range, the sum across them does not
        let per_category = 200;
        let expenses: Vec<Expense> = Category::ALL
            .iter()
            .enumerate()
            .flat_map(|(c, &category)| {
                (0..per_category).map(move |n| {
                    expense(
                        (c * per_category + n + 1) as i64,
                        Money::MAX.cents(),
                        category,
                    )
                })
            })
            .collect();

        assert!(matches!(
            CategorySummary::from_expenses(&expenses),
            Err(LedgerError::InvalidAmount(_))
        ));
    }
}
