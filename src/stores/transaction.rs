//! Defines the transaction store trait.

use crate::{Error, transaction::Transaction};

/// Handles saving and loading the full set of transactions.
///
/// Implementers perform blocking I/O and release any file handle or database
/// connection before returning, including when an error occurs.
pub trait TransactionStore {
    /// Replace everything in the store with `transactions`, keeping their order.
    fn save(&self, transactions: &[Transaction]) -> Result<(), Error>;

    /// Add a single transaction after the ones already in the store.
    fn append(&self, transaction: &Transaction) -> Result<(), Error>;

    /// Retrieve every transaction in the order they were stored.
    fn load(&self) -> Result<Vec<Transaction>, Error>;
}
