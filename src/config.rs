//! Selects and configures the transaction store.

use std::{fmt::Display, path::PathBuf};

use clap::ValueEnum;

use crate::stores::{CsvTransactionStore, JsonTransactionStore, SQLiteTransactionStore, Store};

/// The kind of file transactions are stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Backend {
    /// A comma separated values file.
    #[default]
    Csv,
    /// A JSON document.
    Json,
    /// A SQLite database.
    Sqlite,
}

impl Backend {
    /// The file used when no path is given.
    pub fn default_path(self) -> PathBuf {
        match self {
            Backend::Csv => PathBuf::from("transactions.csv"),
            Backend::Json => PathBuf::from("transactions.json"),
            Backend::Sqlite => PathBuf::from("finance.db"),
        }
    }
}

impl Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Backend::Csv => "csv",
            Backend::Json => "json",
            Backend::Sqlite => "sqlite",
        };

        write!(f, "{name}")
    }
}

/// Where and how transactions are stored.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// The kind of store.
    pub backend: Backend,
    /// The file the store uses.
    pub path: PathBuf,
}

impl StoreConfig {
    /// Create a config for `backend`, using [Backend::default_path] if `path` is `None`.
    pub fn new(backend: Backend, path: Option<PathBuf>) -> Self {
        Self {
            backend,
            path: path.unwrap_or_else(|| backend.default_path()),
        }
    }

    /// Create the store described by this config.
    pub fn open(&self) -> Store {
        tracing::debug!("Using the {} store at {}", self.backend, self.path.display());

        match self.backend {
            Backend::Csv => Store::Csv(CsvTransactionStore::new(&self.path)),
            Backend::Json => Store::Json(JsonTransactionStore::new(&self.path)),
            Backend::Sqlite => Store::Sqlite(SQLiteTransactionStore::new(&self.path)),
        }
    }
}
