//! Database schema creation.

use rusqlite::Connection;

/// Create the application's tables in the database if they do not exist.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL
/// error.
pub fn initialize(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            amount REAL NOT NULL,
            payed INTEGER NOT NULL DEFAULT 0,
            type TEXT NOT NULL DEFAULT 'expense',
            payment_date TEXT,
            due_date TEXT,
            description TEXT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT
            )",
        (),
    )?;

    // Ensure the sequence starts at 1
    connection.execute(
        "INSERT OR IGNORE INTO sqlite_sequence (name, seq) VALUES ('transactions', 0)",
        (),
    )?;

    Ok(())
}
