//! Implements a transaction store backed by a JSON document.
//!
//! The document is an array of objects with the keys `date`, `amount`,
//! `category` and `description`, indented with four spaces.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::{Error, stores::TransactionStore, transaction::Transaction};

const INDENT: &[u8] = b"    ";

/// Stores transactions in a JSON file.
///
/// Every call to [TransactionStore::save] rewrites the whole file.
#[derive(Debug, Clone)]
pub struct JsonTransactionStore {
    path: PathBuf,
}

impl JsonTransactionStore {
    /// Create a new store for the JSON file at `path`.
    ///
    /// The file is not touched until the store is used.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TransactionStore for JsonTransactionStore {
    /// Write every transaction to the file, replacing its contents.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if an amount is infinite or NaN, in which case
    ///   the file is left as it was,
    /// - or [Error::Io] if the file cannot be created or written to.
    fn save(&self, transactions: &[Transaction]) -> Result<(), Error> {
        transactions.iter().try_for_each(Transaction::check_amount)?;

        let file = File::create(&self.path).map_err(|error| io_error(&self.path, error))?;
        let mut writer = BufWriter::new(file);
        let formatter = PrettyFormatter::with_indent(INDENT);
        let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);

        transactions
            .serialize(&mut serializer)
            .map_err(|error| Error::Io(format!("{}: {error}", self.path.display())))?;

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
    /// # Errors
    /// This function will return a:
    /// - [Error::Io] if the file is missing or cannot be read,
    /// - or [Error::MalformedJson] if the file is not valid JSON or is not an
    ///   array of transaction objects.
    fn load(&self) -> Result<Vec<Transaction>, Error> {
        let file = File::open(&self.path).map_err(|error| io_error(&self.path, error))?;
        let reader = BufReader::new(file);

        let transactions: Vec<Transaction> =
            serde_json::from_reader(reader).map_err(|error| {
                if error.is_io() {
                    Error::Io(format!("{}: {error}", self.path.display()))
                } else {
                    Error::MalformedJson(format!("{}: {error}", self.path.display()))
                }
            })?;

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
