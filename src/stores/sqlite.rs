//! Implements a SQLite backed transaction store.

use std::time::Duration;

use rusqlite::{Connection, OptionalExtension, Row, params, types::Type};
use time::Date;

use crate::{
    Error, db,
    database_id::TransactionId,
    stores::TransactionRepository,
    transaction::{StoredTransaction, Transaction, TransactionInput, TransactionType},
};

/// How many times a statement is retried when SQLite reports the database as
/// busy before the error is surfaced.
const BUSY_RETRY_LIMIT: u32 = 3;

/// Stores transactions in a SQLite database.
///
/// Owns the SQL construction, parameter binding and the insert-vs-update
/// branch of [TransactionRepository::save]. Creates the `transactions` table
/// on construction if it does not exist.
#[derive(Debug)]
pub struct SqliteTransactionStore {
    connection: Connection,
}

impl SqliteTransactionStore {
    /// Create a store for the SQLite `connection`, initializing the schema.
    ///
    /// # Errors
    /// Returns an [Error::SqlError] if the schema cannot be created.
    pub fn new(connection: Connection) -> Result<Self, Error> {
        db::initialize(&connection)?;

        Ok(Self { connection })
    }

    fn insert(&self, transaction: &Transaction) -> Result<StoredTransaction, Error> {
        let stored = with_busy_retry(|| {
            self.connection
                .prepare(
                    "INSERT INTO transactions
                        (name, amount, payed, type, payment_date, due_date, description)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                     RETURNING id, name, amount, payed, type, payment_date, due_date,
                         description, created_at, updated_at",
                )?
                .query_row(
                    params![
                        transaction.name(),
                        transaction.amount(),
                        transaction.payed(),
                        transaction.kind().as_str(),
                        transaction.payment_date(),
                        transaction.due_date(),
                        transaction.description(),
                    ],
                    map_row,
                )
        })?;

        Ok(stored)
    }

    /// Update the row matching the transaction's ID.
    ///
    /// The write and the re-read run inside one explicit transaction so the
    /// returned record is exactly the committed state.
    fn update(&self, transaction: &Transaction, id: TransactionId) -> Result<StoredTransaction, Error> {
        let tx = self.connection.unchecked_transaction()?;

        let rows_affected = with_busy_retry(|| {
            tx.execute(
                "UPDATE transactions
                 SET name = ?1, amount = ?2, payed = ?3, type = ?4, payment_date = ?5,
                     due_date = ?6, description = ?7, updated_at = CURRENT_TIMESTAMP
                 WHERE id = ?8",
                params![
                    transaction.name(),
                    transaction.amount(),
                    transaction.payed(),
                    transaction.kind().as_str(),
                    transaction.payment_date(),
                    transaction.due_date(),
                    transaction.description(),
                    id,
                ],
            )
        })?;

        if rows_affected == 0 {
            // Dropping the transaction rolls it back.
            return Err(Error::UpdateMissingTransaction);
        }

        let stored = tx
            .prepare(
                "SELECT id, name, amount, payed, type, payment_date, due_date,
                     description, created_at, updated_at
                 FROM transactions WHERE id = :id",
            )?
            .query_row(&[(":id", &id)], map_row)?;

        tx.commit()?;

        Ok(stored)
    }
}

impl TransactionRepository for SqliteTransactionStore {
    fn get_by_id(&self, id: TransactionId) -> Result<Option<StoredTransaction>, Error> {
        let stored = self
            .connection
            .prepare(
                "SELECT id, name, amount, payed, type, payment_date, due_date,
                     description, created_at, updated_at
                 FROM transactions WHERE id = :id",
            )?
            .query_row(&[(":id", &id)], map_row)
            .optional()?;

        Ok(stored)
    }

    fn get_all(&self) -> Result<Vec<StoredTransaction>, Error> {
        self.connection
            .prepare(
                "SELECT id, name, amount, payed, type, payment_date, due_date,
                     description, created_at, updated_at
                 FROM transactions ORDER BY id ASC",
            )?
            .query_map([], map_row)?
            .map(|row| row.map_err(Error::from))
            .collect()
    }

    fn save(&mut self, input: TransactionInput) -> Result<StoredTransaction, Error> {
        let transaction = input.normalize()?;

        match transaction.id() {
            Some(id) => self.update(&transaction, id),
            None => self.insert(&transaction),
        }
    }

    fn delete(&mut self, id: TransactionId) -> Result<(), Error> {
        with_busy_retry(|| {
            self.connection
                .execute("DELETE FROM transactions WHERE id = :id", &[(":id", &id)])
        })?;

        Ok(())
    }
}

/// Map a database row to a [StoredTransaction].
///
/// The entity invariants are re-checked on the way out; a row that violates
/// them indicates external modification of the database and surfaces as a
/// conversion failure.
fn map_row(row: &Row) -> Result<StoredTransaction, rusqlite::Error> {
    let id: TransactionId = row.get(0)?;
    let name: String = row.get(1)?;
    let amount: f64 = row.get(2)?;
    let payed: bool = row.get(3)?;
    let kind: String = row.get(4)?;
    let payment_date: Option<Date> = row.get(5)?;
    let due_date: Option<Date> = row.get(6)?;
    let description: Option<String> = row.get(7)?;
    let created_at: Option<String> = row.get(8)?;
    let updated_at: Option<String> = row.get(9)?;

    let kind = TransactionType::parse(&kind).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(error))
    })?;

    let mut transaction = Transaction::new(
        name,
        amount,
        payed,
        kind,
        payment_date,
        due_date,
        description,
    )
    .map_err(|error| rusqlite::Error::FromSqlConversionFailure(2, Type::Real, Box::new(error)))?;

    transaction.set_id(id).map_err(|error| {
        rusqlite::Error::FromSqlConversionFailure(0, Type::Integer, Box::new(error))
    })?;

    Ok(StoredTransaction::new(transaction)
        .created_at(created_at)
        .updated_at(updated_at))
}

fn with_busy_retry<T>(
    mut operation: impl FnMut() -> Result<T, rusqlite::Error>,
) -> Result<T, rusqlite::Error> {
    let mut attempt = 0;

    loop {
        match operation() {
            Err(rusqlite::Error::SqliteFailure(error, message))
                if error.code == rusqlite::ErrorCode::DatabaseBusy
                    && attempt < BUSY_RETRY_LIMIT =>
            {
                attempt += 1;
                tracing::warn!(
                    "database busy ({message:?}), retrying ({attempt}/{BUSY_RETRY_LIMIT})"
                );
                std::thread::sleep(Duration::from_millis(50 * u64::from(attempt)));
            }
            result => return result,
        }
    }
}
