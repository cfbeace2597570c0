//! Defines the transaction model shared by the stores, the monthly summary
//! and the chart.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

/// The categories offered when entering a transaction.
///
/// Any other string is also accepted as a category.
pub const DEFAULT_CATEGORIES: [&str; 4] = ["Food", "Rent", "Salary", "Entertainment"];

/// The format of [Transaction::date], e.g. "2025-01-31".
pub(crate) const DATE_FORMAT: &[BorrowedFormatItem] =
    format_description!("[year]-[month]-[day]");

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// A transaction is a plain value: two transactions are equal when all four
/// fields are equal. No validation is done on construction, use
/// [Transaction::parsed_date] to check the date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// When the transaction happened, formatted as `YYYY-MM-DD`.
    pub date: String,
    /// The amount of money spent or earned in this transaction.
    ///
    /// Positive values are income, negative values are expenses.
    pub amount: f64,
    /// A label such as "Food" or "Salary".
    pub category: String,
    /// A text description of what the transaction was for.
    pub description: String,
}

impl Transaction {
    /// Create a new transaction.
    pub fn new(date: &str, amount: f64, category: &str, description: &str) -> Self {
        Self {
            date: date.to_owned(),
            amount,
            category: category.to_owned(),
            description: description.to_owned(),
        }
    }

    /// Parse [Transaction::date] as a calendar date.
    ///
    /// # Errors
    /// Returns [Error::InvalidDate] if the date is not a real calendar date in
    /// the form `YYYY-MM-DD`.
    pub fn parsed_date(&self) -> Result<Date, Error> {
        Date::parse(&self.date, DATE_FORMAT).map_err(|_| Error::InvalidDate(self.date.clone()))
    }

    /// Check that [Transaction::amount] is a finite number.
    ///
    /// The stores call this before writing, since infinite and NaN amounts
    /// cannot be read back from JSON or SQLite.
    ///
    /// # Errors
    /// Returns [Error::InvalidAmount] if the amount is infinite or NaN.
    pub fn check_amount(&self) -> Result<(), Error> {
        if self.amount.is_finite() {
            Ok(())
        } else {
            Err(Error::InvalidAmount(self.amount.to_string()))
        }
    }

    /// Convert the transaction into a plain mapping with the keys `date`,
    /// `amount`, `category` and `description`.
    pub fn to_record(&self) -> Map<String, Value> {
        let mut record = Map::new();
        record.insert("date".to_owned(), Value::from(self.date.as_str()));
        record.insert("amount".to_owned(), Value::from(self.amount));
        record.insert("category".to_owned(), Value::from(self.category.as_str()));
        record.insert(
            "description".to_owned(),
            Value::from(self.description.as_str()),
        );
        record
    }

    /// Build a transaction from a plain mapping created by [Transaction::to_record].
    ///
    /// # Errors
    /// Returns [Error::InvalidRecord] if a key is missing or holds the wrong type.
    pub fn from_record(record: &Map<String, Value>) -> Result<Self, Error> {
        let text_field = |key: &str| {
            record
                .get(key)
                .and_then(Value::as_str)
                .ok_or_else(|| Error::InvalidRecord(format!("\"{key}\" must be a string")))
        };

        let amount = record
            .get("amount")
            .and_then(Value::as_f64)
            .ok_or_else(|| Error::InvalidRecord("\"amount\" must be a number".to_owned()))?;

        Ok(Self::new(
            text_field("date")?,
            amount,
            text_field("category")?,
            text_field("description")?,
        ))
    }
}

/// Zero-pads the month so that keys sort in chronological order.
pub(crate) fn format_month_key(year: i32, month: u8) -> String {
    format!("{year:04}-{month:02}")
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};
    use time::macros::date;

    use crate::{
        Error,
        transaction::{Transaction, format_month_key},
    };

    #[test]
    fn to_record_uses_fixed_keys() {
        let transaction = Transaction::new("2025-01-15", -40.0, "Food", "Dinner");

        let record = transaction.to_record();

        assert_eq!(
            Value::Object(record),
            json!({
                "date": "2025-01-15",
                "amount": -40.0,
                "category": "Food",
                "description": "Dinner",
            })
        );
    }

    #[test]
    fn from_record_inverts_to_record() {
        let transaction = Transaction::new("2025-02-01", 200.0, "Salary", "February pay");

        let got = Transaction::from_record(&transaction.to_record());

        assert_eq!(got, Ok(transaction));
    }

    #[test]
    fn from_record_rejects_text_amount() {
        let record = json!({
            "date": "2025-02-01",
            "amount": "200",
            "category": "Salary",
            "description": "February pay",
        });

        let got = Transaction::from_record(record.as_object().unwrap());

        assert!(matches!(got, Err(Error::InvalidRecord(_))), "got {got:?}");
    }

    #[test]
    fn from_record_rejects_missing_key() {
        let record = json!({
            "date": "2025-02-01",
            "amount": 200,
            "category": "Salary",
        });

        let got = Transaction::from_record(record.as_object().unwrap());

        assert!(matches!(got, Err(Error::InvalidRecord(_))), "got {got:?}");
    }

    #[test]
    fn accepts_any_category_and_bad_dates_on_construction() {
        let transaction = Transaction::new("not a date", 0.0, "Pets", "");

        assert_eq!(transaction.category, "Pets");
        assert_eq!(
            transaction.parsed_date(),
            Err(Error::InvalidDate("not a date".to_owned()))
        );
    }

    #[test]
    fn parses_date() {
        let transaction = Transaction::new("2024-02-29", 1.0, "Food", "");

        assert_eq!(transaction.parsed_date(), Ok(date!(2024 - 02 - 29)));
    }

    #[test]
    fn rejects_impossible_calendar_date() {
        let transaction = Transaction::new("2025-02-30", 1.0, "Food", "");

        assert_eq!(
            transaction.parsed_date(),
            Err(Error::InvalidDate("2025-02-30".to_owned()))
        );
    }

    #[test]
    fn month_key_is_zero_padded() {
        assert_eq!(format_month_key(2025, 3), "2025-03");
        assert_eq!(format_month_key(987, 12), "0987-12");
    }

    #[test]
    fn check_amount_accepts_finite_numbers() {
        for amount in [0.0, -0.0, 12.5, -1e300] {
            let transaction = Transaction::new("2025-03-09", amount, "Food", "");

            assert_eq!(transaction.check_amount(), Ok(()), "amount {amount}");
        }
    }

    #[test]
    fn check_amount_rejects_infinity_and_nan() {
        for (amount, text) in [
            (f64::INFINITY, "inf"),
            (f64::NEG_INFINITY, "-inf"),
            (f64::NAN, "NaN"),
        ] {
            let transaction = Transaction::new("2025-03-09", amount, "Food", "");

            assert_eq!(
                transaction.check_amount(),
                Err(Error::InvalidAmount(text.to_owned()))
            );
        }
    }
}
