//! Contains the storage contract for transactions and its interchangeable
//! backends.

use clap::ValueEnum;
use rusqlite::Connection;

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{StoredTransaction, TransactionInput},
};

mod memory;
mod sqlite;

pub use memory::MemoryTransactionStore;
pub use sqlite::SqliteTransactionStore;

/// Handles the persistence and retrieval of transactions.
///
/// Absence and failure are kept apart throughout: a missing row is `Ok(None)`
/// (or a no-op for [TransactionRepository::delete]), a storage failure is an
/// `Err`.
pub trait TransactionRepository: Send {
    /// Retrieve a transaction by its ID, or `None` if there is no such row.
    fn get_by_id(&self, id: TransactionId) -> Result<Option<StoredTransaction>, Error>;

    /// Retrieve all transactions, ordered by ID ascending.
    fn get_all(&self) -> Result<Vec<StoredTransaction>, Error>;

    /// Normalize `input` and persist the resulting transaction.
    ///
    /// An input carrying a positive ID updates the matching record; an input
    /// without an ID inserts a new record and assigns the next ID.
    ///
    /// # Errors
    /// Returns the normalizer's validation errors unchanged,
    /// [Error::UpdateMissingTransaction] when the ID matches no record, and
    /// [Error::SqlError] for storage failures.
    fn save(&mut self, input: TransactionInput) -> Result<StoredTransaction, Error>;

    /// Remove the transaction with the given ID. Deleting an absent ID is a
    /// no-op, not an error.
    fn delete(&mut self, id: TransactionId) -> Result<(), Error>;
}

/// The available storage backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// Keep transactions in process memory. Data is lost on shutdown.
    Memory,
    /// Persist transactions to a SQLite database file.
    Sqlite,
}

/// Create the repository for the configured backend.
///
/// # Errors
/// Returns [Error::MissingField] if the SQLite backend is selected without a
/// database path, or [Error::SqlError] if the database cannot be opened or
/// initialized.
pub fn create_repository(
    backend: Backend,
    db_path: Option<&str>,
) -> Result<Box<dyn TransactionRepository>, Error> {
    match backend {
        Backend::Memory => Ok(Box::new(MemoryTransactionStore::new())),
        Backend::Sqlite => {
            let db_path = db_path.ok_or(Error::MissingField("db-path"))?;
            let connection = Connection::open(db_path)?;

            Ok(Box::new(SqliteTransactionStore::new(connection)?))
        }
    }
}
