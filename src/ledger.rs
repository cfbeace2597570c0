//! The in-memory list of transactions that the front end edits.

use crate::{
    Error,
    stores::TransactionStore,
    summary::{MonthlySummary, summarize_by_month},
    transaction::Transaction,
};

/// An ordered list of transactions owned by a single caller.
///
/// Positions are zero-based and shift down when a transaction is removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a ledger holding everything in `store`.
    ///
    /// # Errors
    /// Returns any error from [TransactionStore::load].
    pub fn load(store: &impl TransactionStore) -> Result<Self, Error> {
        Ok(Self {
            transactions: store.load()?,
        })
    }

    /// Write the whole ledger to `store`, replacing what was there.
    ///
    /// # Errors
    /// Returns any error from [TransactionStore::save].
    pub fn save(&self, store: &impl TransactionStore) -> Result<(), Error> {
        store.save(&self.transactions)
    }

    /// Add a transaction to the end of the ledger.
    pub fn push(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
    }

    /// Replace the transaction at `index` and return the old one.
    ///
    /// # Errors
    /// Returns [Error::IndexOutOfRange] if there is no transaction at `index`.
    pub fn replace(
        &mut self,
        index: usize,
        transaction: Transaction,
    ) -> Result<Transaction, Error> {
        let slot = self
            .transactions
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange(index))?;

        Ok(std::mem::replace(slot, transaction))
    }

    /// Remove and return the transaction at `index`.
    ///
    /// # Errors
    /// Returns [Error::IndexOutOfRange] if there is no transaction at `index`.
    pub fn remove(&mut self, index: usize) -> Result<Transaction, Error> {
        if index >= self.transactions.len() {
            return Err(Error::IndexOutOfRange(index));
        }

        Ok(self.transactions.remove(index))
    }

    /// The transactions in order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The number of transactions.
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    /// Whether the ledger has no transactions.
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Recompute the monthly totals for every transaction in the ledger.
    ///
    /// # Errors
    /// Returns [Error::InvalidDate] if a transaction has an invalid date.
    pub fn summary(&self) -> Result<Vec<MonthlySummary>, Error> {
        summarize_by_month(&self.transactions)
    }
}

impl From<Vec<Transaction>> for Ledger {
    fn from(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }
}
