//! Helpers shared by the unit tests.

mod html;

pub(crate) use html::assert_valid_html;

use crate::transaction::Transaction;

/// A small set of transactions spread over two months.
pub(crate) fn sample_transactions() -> Vec<Transaction> {
    vec![
        Transaction::new("2025-01-01", 100.0, "Salary", "January salary"),
        Transaction::new("2025-01-02", -50.0, "Groceries", "Supermarket"),
        Transaction::new("2025-01-20", -12.75, "Food", "Lunch, with \"friends\""),
        Transaction::new("2025-02-01", 0.0, "Entertainment", "Free concert"),
    ]
}
