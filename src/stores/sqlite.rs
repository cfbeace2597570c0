//! Implements a SQLite backed transaction store.
//!
//! The free functions operate on an open [Connection] and are what
//! [SQLiteTransactionStore] uses after opening the database file.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags, Row};

use crate::{Error, db::initialize, stores::TransactionStore, transaction::Transaction};

/// Alias for the integer type used for the surrogate key of a stored transaction.
pub type TransactionId = i64;

/// A transaction together with the ID the database assigned to it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredTransaction {
    /// The ID of the row. IDs increase with each insert and are never reused.
    pub id: TransactionId,
    /// The stored transaction.
    pub transaction: Transaction,
}

/// Stores transactions in a SQLite database file.
///
/// A connection is opened for each operation and closed before it returns.
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    db_path: PathBuf,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite database at `db_path`.
    ///
    /// The database is not opened until the store is used. Call
    /// [SQLiteTransactionStore::initialize] to create the table up front.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// The path of the database file.
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Create the database file and the transactions table if they do not exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or the table cannot be created.
    pub fn initialize(&self) -> Result<(), Error> {
        self.open().map(|_| ())
    }

    /// Retrieve every transaction along with its ID, ordered by ID.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::Io] if the database file does not exist,
    /// - or [Error::SqlError] if the database cannot be queried.
    pub fn load_with_ids(&self) -> Result<Vec<StoredTransaction>, Error> {
        get_transactions(&self.open_existing()?)
    }

    /// Delete the transaction with the ID `id`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::Io] if the database file does not exist,
    /// - [Error::DeleteMissingTransaction] if `id` does not refer to a stored transaction,
    /// - or [Error::SqlError] if there is some other SQL error.
    pub fn delete(&self, id: TransactionId) -> Result<(), Error> {
        delete_transaction(id, &self.open_existing()?)
    }

    /// Get the number of stored transactions.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::Io] if the database file does not exist,
    /// - or [Error::SqlError] if the database cannot be queried.
    pub fn count(&self) -> Result<u32, Error> {
        count_transactions(&self.open_existing()?)
    }

    /// Open the database, creating the file if it does not exist.
    fn open(&self) -> Result<Connection, Error> {
        let connection = Connection::open(&self.db_path)?;
        initialize(&connection)?;
        Ok(connection)
    }

    /// Open a database file that must already exist.
    ///
    /// A missing file fails with `SQLITE_CANTOPEN`, which becomes [Error::Io].
    fn open_existing(&self) -> Result<Connection, Error> {
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let connection = Connection::open_with_flags(&self.db_path, flags)?;
        initialize(&connection)?;
        Ok(connection)
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Replace every row in the table with `transactions`.
    ///
    /// The rows are replaced inside a single SQL transaction, so either all of
    /// `transactions` are stored or the table is left as it was. The new rows
    /// get fresh IDs.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if an amount is infinite or NaN,
    /// - or [Error::SqlError] if there is an SQL error.
    fn save(&self, transactions: &[Transaction]) -> Result<(), Error> {
        transactions.iter().try_for_each(Transaction::check_amount)?;

        let mut connection = self.open()?;
        let tx = connection.transaction()?;

        tx.execute("DELETE FROM transactions", ())?;

        for transaction in transactions {
            create_transaction(transaction, &tx)?;
        }

        tx.commit()?;

        tracing::debug!(
            "Saved {} transactions to {}",
            transactions.len(),
            self.db_path.display()
        );

        Ok(())
    }

    /// Insert `transaction` as a new row.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::InvalidAmount] if the amount is infinite or NaN,
    /// - or [Error::SqlError] if there is an SQL error.
    fn append(&self, transaction: &Transaction) -> Result<(), Error> {
        transaction.check_amount()?;

        let id = create_transaction(transaction, &self.open()?)?;

        tracing::debug!(
            "Inserted transaction {id} into {}",
            self.db_path.display()
        );

        Ok(())
    }

    /// Retrieve every transaction in the order they were inserted.
    ///
    /// A missing database file is an error rather than an empty store, use
    /// [SQLiteTransactionStore::initialize] to create one.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::Io] if the database file does not exist,
    /// - or [Error::SqlError] if the database cannot be queried.
    fn load(&self) -> Result<Vec<Transaction>, Error> {
        let transactions: Vec<Transaction> = self
            .load_with_ids()?
            .into_iter()
            .map(|stored| stored.transaction)
            .collect();

        tracing::debug!(
            "Loaded {} transactions from {}",
            transactions.len(),
            self.db_path.display()
        );

        Ok(transactions)
    }
}

/// Insert a transaction into the database and return its new ID.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidAmount] if the amount is infinite or NaN, since SQLite
///   would store NaN as NULL,
/// - or [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    transaction: &Transaction,
    connection: &Connection,
) -> Result<TransactionId, Error> {
    transaction.check_amount()?;

    let id = connection
        .prepare(
            "INSERT INTO transactions (date, amount, category, description)
             VALUES (?1, ?2, ?3, ?4)
             RETURNING id",
        )?
        .query_row(
            (
                &transaction.date,
                transaction.amount,
                &transaction.category,
                &transaction.description,
            ),
            |row| row.get(0),
        )?;

    Ok(id)
}

/// Retrieve every transaction in the database, ordered by ID.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn get_transactions(connection: &Connection) -> Result<Vec<StoredTransaction>, Error> {
    connection
        .prepare(
            "SELECT id, date, amount, category, description
             FROM transactions
             ORDER BY id ASC",
        )?
        .query_map([], map_transaction_row)?
        .collect::<Result<Vec<StoredTransaction>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

/// Delete a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::DeleteMissingTransaction] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM transactions WHERE id = ?1", (id,))?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingTransaction);
    }

    Ok(())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM transactions", [], |row| row.get(0))
        .map_err(|error| error.into())
}

/// Map a database row to a [StoredTransaction].
fn map_transaction_row(row: &Row) -> Result<StoredTransaction, rusqlite::Error> {
    let id = row.get(0)?;
    let date = row.get(1)?;
    let amount = row.get(2)?;
    let category = row.get(3)?;
    let description = row.get(4)?;

    Ok(StoredTransaction {
        id,
        transaction: Transaction {
            date,
            amount,
            category,
            description,
        },
    })
}
