//! Aggregation of transactions into monthly income and expense totals.

use std::collections::BTreeMap;

use crate::{
    Error,
    transaction::{Transaction, format_month_key},
};

/// The income and expenses for a single calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    /// The month as `YYYY-MM`, e.g. "2025-01".
    pub month: String,
    /// The sum of all positive amounts in the month.
    pub income: f64,
    /// The magnitude of the sum of all negative amounts in the month.
    pub expense: f64,
}

impl MonthlySummary {
    /// Income minus expenses.
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Groups `transactions` by month and sums income and expenses separately.
///
/// Income is the sum of the strictly positive amounts and expense is the
/// negated sum of the strictly negative amounts, so both are non-negative.
/// Zero amounts count towards neither, but the month they fall in is still
/// reported.
///
/// # Returns
/// One [MonthlySummary] per month that has at least one transaction, in
/// chronological order. An empty slice gives an empty vector.
///
/// # Errors
/// Returns [Error::InvalidDate] if any transaction has a date that is not a
/// valid `YYYY-MM-DD` calendar date.
pub fn summarize_by_month(transactions: &[Transaction]) -> Result<Vec<MonthlySummary>, Error> {
    let mut totals: BTreeMap<(i32, u8), (f64, f64)> = BTreeMap::new();

    for transaction in transactions {
        let date = transaction.parsed_date()?;
        let (income, expense) = totals
            .entry((date.year(), date.month() as u8))
            .or_insert((0.0, 0.0));

        if transaction.amount > 0.0 {
            *income += transaction.amount;
        } else if transaction.amount < 0.0 {
            *expense -= transaction.amount;
        }
    }

    let summaries = totals
        .into_iter()
        .map(|((year, month), (income, expense))| MonthlySummary {
            month: format_month_key(year, month),
            income,
            expense,
        })
        .collect();

    Ok(summaries)
}

/// Sums the income and expenses over every month.
///
/// # Returns
/// Tuple of (total income, total expenses).
pub fn totals(summaries: &[MonthlySummary]) -> (f64, f64) {
    summaries.iter().fold((0.0, 0.0), |(income, expense), month| {
        (income + month.income, expense + month.expense)
    })
}

#[cfg(test)]
mod tests {
    use crate::{
        Error,
        summary::{MonthlySummary, summarize_by_month, totals},
        transaction::Transaction,
    };

    fn summary(month: &str, income: f64, expense: f64) -> MonthlySummary {
        MonthlySummary {
            month: month.to_owned(),
            income,
            expense,
        }
    }

    #[test]
    fn groups_income_and_expenses_by_month() {
        let transactions = vec![
            Transaction::new("2025-01-01", 100.0, "Salary", "Salary"),
            Transaction::new("2025-01-15", -40.0, "Food", "Dinner"),
            Transaction::new("2025-02-01", 200.0, "Salary", "Salary"),
            Transaction::new("2025-02-10", -60.0, "Groceries", "Market"),
        ];

        let result = summarize_by_month(&transactions).unwrap();

        assert_eq!(
            result,
            vec![
                summary("2025-01", 100.0, 40.0),
                summary("2025-02", 200.0, 60.0)
            ]
        );
    }

    #[test]
    fn handles_empty_input() {
        let result = summarize_by_month(&[]).unwrap();

        assert_eq!(result, vec![]);
    }

    #[test]
    fn sorts_months_chronologically_regardless_of_input_order() {
        let transactions = vec![
            Transaction::new("2025-03-15", 10.0, "Food", ""),
            Transaction::new("2024-12-20", 20.0, "Food", ""),
            Transaction::new("2025-01-10", -30.0, "Food", ""),
            Transaction::new("2024-11-25", 40.0, "Food", ""),
        ];

        let result = summarize_by_month(&transactions).unwrap();

        let months: Vec<_> = result.iter().map(|month| month.month.as_str()).collect();
        assert_eq!(months, vec!["2024-11", "2024-12", "2025-01", "2025-03"]);
    }

    #[test]
    fn zero_amounts_count_towards_neither_total() {
        let transactions = vec![
            Transaction::new("2025-01-05", 0.0, "Food", "Free sample"),
            Transaction::new("2025-01-06", -12.5, "Food", "Lunch"),
        ];

        let result = summarize_by_month(&transactions).unwrap();

        assert_eq!(result, vec![summary("2025-01", 0.0, 12.5)]);
    }

    #[test]
    fn month_with_only_zero_amounts_is_kept() {
        let transactions = vec![Transaction::new("2025-04-01", 0.0, "Food", "")];

        let result = summarize_by_month(&transactions).unwrap();

        assert_eq!(result, vec![summary("2025-04", 0.0, 0.0)]);
    }

    #[test]
    fn single_sided_months_report_zero_for_other_side() {
        let transactions = vec![
            Transaction::new("2025-01-01", 500.0, "Salary", ""),
            Transaction::new("2025-02-01", -80.0, "Rent", ""),
        ];

        let result = summarize_by_month(&transactions).unwrap();

        assert_eq!(
            result,
            vec![summary("2025-01", 500.0, 0.0), summary("2025-02", 0.0, 80.0)]
        );
    }

    #[test]
    fn same_month_in_different_years_are_separate() {
        let transactions = vec![
            Transaction::new("2024-06-01", 1.0, "Food", ""),
            Transaction::new("2025-06-01", 2.0, "Food", ""),
        ];

        let result = summarize_by_month(&transactions).unwrap();

        assert_eq!(
            result,
            vec![summary("2024-06", 1.0, 0.0), summary("2025-06", 2.0, 0.0)]
        );
    }

    #[test]
    fn fails_on_invalid_date() {
        let transactions = vec![
            Transaction::new("2025-01-01", 100.0, "Salary", ""),
            Transaction::new("01/02/2025", -40.0, "Food", ""),
        ];

        let result = summarize_by_month(&transactions);

        assert_eq!(result, Err(Error::InvalidDate("01/02/2025".to_owned())));
    }

    #[test]
    fn net_and_totals() {
        let summaries = vec![summary("2025-01", 100.0, 40.0), summary("2025-02", 200.0, 60.0)];

        assert_eq!(summaries[0].net(), 60.0);
        assert_eq!(totals(&summaries), (300.0, 100.0));
    }
}
