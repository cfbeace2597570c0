//! Sets up the SQLite schema used by the relational transaction store.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::Error;

/// Create the transactions table in the database.
///
/// Calling this on a database that already has the table does nothing.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date TEXT,
                amount REAL,
                category TEXT,
                description TEXT
                )",
        (),
    )?;

    Ok(())
}

/// Create all the tables needed by the application.
///
/// This is idempotent, so it is safe to call every time a database is opened.
///
/// # Errors
/// Returns [Error::SqlError] if there is an SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::db::initialize;

    fn count_tables(conn: &Connection, name: &str) -> u32 {
        conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            (name,),
            |row| row.get(0),
        )
        .unwrap()
    }

    #[test]
    fn initialize_creates_transactions_table() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).unwrap();

        assert_eq!(count_tables(&conn, "transactions"), 1);
    }

    #[test]
    fn initialize_twice_is_a_no_op() {
        let conn = Connection::open_in_memory().unwrap();

        initialize(&conn).unwrap();
        let second = initialize(&conn);

        assert_eq!(second, Ok(()));
        assert_eq!(count_tables(&conn, "transactions"), 1);
    }

    #[test]
    fn table_has_expected_columns() {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();

        let columns: Vec<(String, String)> = conn
            .prepare("SELECT name, type FROM pragma_table_info('transactions') ORDER BY cid")
            .unwrap()
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();

        assert_eq!(
            columns,
            vec![
                ("id".to_owned(), "INTEGER".to_owned()),
                ("date".to_owned(), "TEXT".to_owned()),
                ("amount".to_owned(), "REAL".to_owned()),
                ("category".to_owned(), "TEXT".to_owned()),
                ("description".to_owned(), "TEXT".to_owned()),
            ]
        );
    }
}
