//! Category summary and vocabulary formatting

use crate::models::{Category, CategorySummary};

/// Format per-category totals with a total row
pub fn format_summary(summary: &CategorySummary, currency_symbol: &str) -> String {
    let name_width = Category::ALL
        .iter()
        .map(|c| c.name().len())
        .max()
        .unwrap_or(8)
        .max("Category".len());

    let mut output = String::new();
    output.push_str(&format!(
        "{:<name_width$}  {:>12}\n",
        "Category", "Spent"
    ));
    output.push_str(&format!("{:-<name_width$}  {:->12}\n", "", ""));

    for (category, total) in summary.iter() {
        output.push_str(&format!(
            "{:<name_width$}  {:>12}\n",
            category.name(),
            total.format_with_symbol(currency_symbol)
        ));
    }

    output.push_str(&format!("{:-<name_width$}  {:->12}\n", "", ""));
    output.push_str(&format!(
        "{:<name_width$}  {:>12}\n",
        "TOTAL",
        summary.total().format_with_symbol(currency_symbol)
    ));

    output
}

/// One category name per line, in vocabulary order
pub fn format_category_list() -> String {
    Category::ALL
        .iter()
        .map(|c| format!("{}\n", c.name()))
        .collect()
}
