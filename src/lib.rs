//! Finance Tracker records financial transactions and summarises them as
//! monthly income and expense totals.
//!
//! Transactions can be kept in one of three interchangeable stores: a CSV
//! file, a JSON document or a SQLite database. See [stores] for the details of
//! each format and [summarize_by_month] for how the monthly totals are derived.

#![warn(missing_docs)]

mod chart;
mod config;
mod db;
mod ledger;
mod logging;
mod report;
pub mod stores;
mod summary;
mod timezone;
mod transaction;

pub use chart::income_expense_chart;
pub use config::{Backend, StoreConfig};
pub use db::initialize as initialize_db;
pub use ledger::Ledger;
pub use logging::setup_logging;
pub use report::{format_currency, render_report};
pub use stores::{
    CsvTransactionStore, JsonTransactionStore, SQLiteTransactionStore, Store, StoredTransaction,
    TransactionId, TransactionStore,
};
pub use summary::{MonthlySummary, summarize_by_month, totals};
pub use timezone::{get_local_offset, today};
pub use transaction::{DEFAULT_CATEGORIES, Transaction};

#[cfg(test)]
mod test_utils;

/// The broad class of an [Error].
///
/// Callers can use this to decide whether to retry, fall back to another
/// store or give up, without matching on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A file could not be found, read or written.
    Io,
    /// Stored content, a date or an amount could not be parsed.
    Parse,
    /// The backing store rejected the operation.
    Storage,
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A file was missing, unreadable or could not be written.
    ///
    /// Callers should pass in the path along with the underlying error message.
    #[error("an I/O error occurred: {0}")]
    Io(String),

    /// A date was not a valid calendar date in the form `YYYY-MM-DD`.
    #[error("\"{0}\" is not a valid date, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// An amount could not be parsed as a number.
    #[error("\"{0}\" is not a valid amount")]
    InvalidAmount(String),

    /// The CSV file had issues that prevented it from being parsed.
    #[error("could not parse the CSV file: {0}")]
    MalformedCsv(String),

    /// The JSON document had issues that prevented it from being parsed.
    #[error("could not parse the JSON file: {0}")]
    MalformedJson(String),

    /// A plain record was missing a field or had a field of the wrong type.
    #[error("invalid transaction record: {0}")]
    InvalidRecord(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// Tried to access a position in the ledger that does not exist.
    #[error("there is no transaction at index {0}")]
    IndexOutOfRange(usize),
}

impl Error {
    /// The broad class this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::InvalidDate(_)
            | Error::InvalidAmount(_)
            | Error::MalformedCsv(_)
            | Error::MalformedJson(_)
            | Error::InvalidRecord(_) => ErrorKind::Parse,
            Error::SqlError(_) | Error::DeleteMissingTransaction | Error::IndexOutOfRange(_) => {
                ErrorKind::Storage
            }
        }
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // SQLITE_CANTOPEN happens when the database file or its directory is missing.
            rusqlite::Error::SqliteFailure(ref sql_error, ref desc)
                if sql_error.code == rusqlite::ErrorCode::CannotOpen =>
            {
                Error::Io(desc.clone().unwrap_or_else(|| sql_error.to_string()))
            }
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}
