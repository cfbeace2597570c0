//! Contains the [TransactionStore] trait and its CSV, JSON and SQLite implementations.
//!
//! [Store] wraps whichever of the three is selected by a
//! [StoreConfig](crate::StoreConfig), so callers do not need to know which
//! backend is in use.

mod csv;
mod json;
mod sqlite;
mod transaction;

pub use self::csv::{CSV_HEADER, CsvTransactionStore};
pub use json::JsonTransactionStore;
pub use sqlite::{
    SQLiteTransactionStore, StoredTransaction, TransactionId, count_transactions,
    create_transaction, delete_transaction, get_transactions,
};
pub use transaction::TransactionStore;

use std::path::Path;

use crate::{Error, transaction::Transaction};

/// One of the three transaction stores.
#[derive(Debug, Clone)]
pub enum Store {
    /// Transactions kept in a CSV file.
    Csv(CsvTransactionStore),
    /// Transactions kept in a JSON document.
    Json(JsonTransactionStore),
    /// Transactions kept in a SQLite database.
    Sqlite(SQLiteTransactionStore),
}

impl Store {
    /// The file the store reads from and writes to.
    pub fn path(&self) -> &Path {
        match self {
            Store::Csv(store) => store.path(),
            Store::Json(store) => store.path(),
            Store::Sqlite(store) => store.path(),
        }
    }

    /// Prepare an empty store.
    ///
    /// File stores are written with no transactions if the file does not exist
    /// yet. For SQLite the table is created if needed. Existing data is never
    /// touched.
    ///
    /// # Errors
    /// Returns an error if the file or table cannot be created.
    pub fn initialize(&self) -> Result<(), Error> {
        match self {
            Store::Sqlite(store) => store.initialize(),
            file_store if file_store.path().exists() => Ok(()),
            file_store => file_store.save(&[]),
        }
    }

    fn inner(&self) -> &dyn TransactionStore {
        match self {
            Store::Csv(store) => store,
            Store::Json(store) => store,
            Store::Sqlite(store) => store,
        }
    }
}

impl TransactionStore for Store {
    fn save(&self, transactions: &[Transaction]) -> Result<(), Error> {
        self.inner().save(transactions)
    }

    fn append(&self, transaction: &Transaction) -> Result<(), Error> {
        self.inner().append(transaction)
    }

    fn load(&self) -> Result<Vec<Transaction>, Error> {
        self.inner().load()
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use crate::{
        Error,
        stores::{
            CsvTransactionStore, JsonTransactionStore, SQLiteTransactionStore, Store,
            TransactionStore,
        },
        test_utils::sample_transactions,
        transaction::Transaction,
    };

    fn all_stores(dir: &TempDir) -> Vec<Store> {
        vec![
            Store::Csv(CsvTransactionStore::new(dir.path().join("t.csv"))),
            Store::Json(JsonTransactionStore::new(dir.path().join("t.json"))),
            Store::Sqlite(SQLiteTransactionStore::new(dir.path().join("t.db"))),
        ]
    }

    #[test]
    fn every_store_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let want = sample_transactions();

        for store in all_stores(&dir) {
            store.save(&want).unwrap();

            assert_eq!(store.load().unwrap(), want, "store {store:?}");
        }
    }

    #[test]
    fn every_store_appends_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let want = sample_transactions();

        for store in all_stores(&dir) {
            for transaction in &want {
                store.append(transaction).unwrap();
            }

            assert_eq!(store.load().unwrap(), want, "store {store:?}");
        }
    }

    #[test]
    fn initialize_creates_empty_store_and_keeps_existing_data() {
        let dir = tempfile::tempdir().unwrap();

        for store in all_stores(&dir) {
            store.initialize().unwrap();
            assert_eq!(store.load().unwrap(), vec![], "store {store:?}");

            store.save(&sample_transactions()).unwrap();
            store.initialize().unwrap();
            assert_eq!(
                store.load().unwrap(),
                sample_transactions(),
                "store {store:?}"
            );
        }
    }

    #[test]
    fn every_store_fails_to_load_missing_target_without_creating_it() {
        let dir = tempfile::tempdir().unwrap();

        for store in all_stores(&dir) {
            let result = store.load();

            assert!(matches!(result, Err(Error::Io(_))), "store {store:?} got {result:?}");
            assert!(!store.path().exists(), "store {store:?}");
        }
    }

    #[test]
    fn every_store_rejects_non_finite_amount_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let broken = Transaction::new("2025-01-01", f64::INFINITY, "Salary", "Overflow");

        for store in all_stores(&dir) {
            let appended = store.append(&broken);
            let saved = store.save(&[broken.clone()]);

            assert_eq!(appended, Err(Error::InvalidAmount("inf".to_owned())));
            assert_eq!(saved, Err(Error::InvalidAmount("inf".to_owned())));
            assert!(!store.path().exists(), "store {store:?}");
        }
    }
}
