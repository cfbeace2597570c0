//! Implements a transaction store backed by a CSV file.
//!
//! The file starts with the header `Date,Amount,Category,Description` followed
//! by one row per transaction in the same column order.

use std::{
    fs::File,
    path::{Path, PathBuf},
};

use crate::{Error, stores::TransactionStore, transaction::Transaction};

/// The header row written at the top of every CSV file.
pub const CSV_HEADER: [&str; 4] = ["Date", "Amount", "Category", "Description"];

const DATE_COLUMN: usize = 0;
const AMOUNT_COLUMN: usize = 1;
const CATEGORY_COLUMN: usize = 2;
const DESCRIPTION_COLUMN: usize = 3;

/// Stores transactions in a CSV file.
///
/// Every call to [TransactionStore::save] rewrites the whole file.
#[derive(Debug, Clone)]
pub struct CsvTransactionStore {
    path: PathBuf,
}

impl CsvTransactionStore {
    /// Create a new store for the CSV file at `path`.
    ///
    /// The file is not touched until the store is used.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the CSV file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TransactionStore for CsvTransactionStore {
    /// Write the header and every transaction to the file, replacing its contents.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if an amount is infinite or NaN, in which case
    ///   the file is left as it was,
    /// - or [Error::Io] if the file cannot be created or written to.
    fn save(&self, transactions: &[Transaction]) -> Result<(), Error> {
        transactions.iter().try_for_each(Transaction::check_amount)?;

        let file = File::create(&self.path).map_err(|error| io_error(&self.path, error))?;
        let mut writer = csv::Writer::from_writer(file);

        writer
            .write_record(CSV_HEADER)
            .map_err(|error| csv_error(&self.path, error))?;

        for transaction in transactions {
            writer
                .write_record([
                    transaction.date.as_str(),
                    &transaction.amount.to_string(),
                    transaction.category.as_str(),
                    transaction.description.as_str(),
                ])
                .map_err(|error| csv_error(&self.path, error))?;
        }

        writer
            .flush()
            .map_err(|error| io_error(&self.path, error))?;

        tracing::debug!(
            "Saved {} transactions to {}",
            transactions.len(),
            self.path.display()
        );

        Ok(())
    }

    /// Rewrite the file with `transaction` added to the end.
    ///
    /// A missing file is treated as an empty store.
    ///
    /// # Errors
    /// Returns an error if the existing file cannot be loaded or the new file
    /// cannot be written.
    fn append(&self, transaction: &Transaction) -> Result<(), Error> {
        let mut transactions = if self.path.exists() {
            self.load()?
        } else {
            Vec::new()
        };

        transactions.push(transaction.clone());

        self.save(&transactions)
    }

    /// Read every transaction from the file.
    ///
    /// An empty file holds no transactions.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::Io] if the file is missing or cannot be read,
    /// - [Error::MalformedCsv] if the header is wrong or a row does not have four columns,
    /// - or [Error::InvalidAmount] if an amount is not a number.
    fn load(&self) -> Result<Vec<Transaction>, Error> {
        let file = File::open(&self.path).map_err(|error| io_error(&self.path, error))?;
        let mut reader = csv::Reader::from_reader(file);

        let headers = reader
            .headers()
            .map_err(|error| csv_error(&self.path, error))?;

        if headers.is_empty() {
            return Ok(Vec::new());
        }

        if headers.iter().ne(CSV_HEADER) {
            return Err(Error::MalformedCsv(format!(
                "expected the header \"{}\" in {} but got \"{}\"",
                CSV_HEADER.join(","),
                self.path.display(),
                headers.iter().collect::<Vec<_>>().join(",")
            )));
        }

        let mut transactions = Vec::new();

        for record in reader.records() {
            let record = record.map_err(|error| csv_error(&self.path, error))?;
            let amount = &record[AMOUNT_COLUMN];
            let amount = amount
                .trim()
                .parse()
                .map_err(|_| Error::InvalidAmount(amount.to_owned()))?;

            transactions.push(Transaction::new(
                &record[DATE_COLUMN],
                amount,
                &record[CATEGORY_COLUMN],
                &record[DESCRIPTION_COLUMN],
            ));
        }

        tracing::debug!(
            "Loaded {} transactions from {}",
            transactions.len(),
            self.path.display()
        );

        Ok(transactions)
    }
}

fn io_error(path: &Path, error: std::io::Error) -> Error {
    Error::Io(format!("{}: {error}", path.display()))
}

fn csv_error(path: &Path, error: csv::Error) -> Error {
    if error.is_io_error() {
        Error::Io(format!("{}: {error}", path.display()))
    } else {
        Error::MalformedCsv(format!("{}: {error}", path.display()))
    }
}
