//! The sample data the dashboard ships with.
//!
//! [reset_and_seed] wipes both tables and inserts the sample users and
//! transactions, so every run of the app starts from the same known state.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};
use time::macros::date;

use crate::{
    Error,
    transaction::{Transaction, create_transaction},
    user::{User, create_user},
};

/// The five sample users.
pub fn sample_users() -> Vec<User> {
    vec![
        User::new(1, "Ramesh", "ramesh@example.com", date!(2024 - 01 - 01)),
        User::new(2, "Mohit", "panday@example.com", date!(2024 - 02 - 03)),
        User::new(3, "Sumit", "sumit@example.com", date!(2024 - 03 - 01)),
        User::new(4, "Kumit", "tiwari@example.com", date!(2024 - 04 - 06)),
        User::new(5, "Sohan", "yadav@example.com", date!(2024 - 05 - 03)),
    ]
}

/// The ten sample transactions. Every sample user has at least one.
pub fn sample_transactions() -> Vec<Transaction> {
    vec![
        Transaction::new(1, 1, 300.00, date!(2024 - 01 - 01)),
        Transaction::new(2, 1, 200.00, date!(2024 - 02 - 03)),
        Transaction::new(3, 2, 650.00, date!(2024 - 03 - 09)),
        Transaction::new(4, 3, 450.00, date!(2024 - 04 - 06)),
        Transaction::new(5, 4, 350.00, date!(2024 - 05 - 11)),
        Transaction::new(6, 5, 200.00, date!(2024 - 06 - 20)),
        Transaction::new(7, 1, 400.00, date!(2024 - 07 - 15)),
        Transaction::new(8, 2, 500.00, date!(2024 - 08 - 12)),
        Transaction::new(9, 3, 600.00, date!(2024 - 09 - 13)),
        Transaction::new(10, 4, 700.00, date!(2024 - 10 - 30)),
    ]
}

/// Delete every user and transaction, then insert the sample data.
///
/// Runs in a single transaction, so readers never observe a half-seeded store.
/// The schema must already exist, see [crate::initialize_db].
///
/// # Errors
/// Returns an [Error::SqlError] if any statement fails, in which case the
/// store is left unchanged.
pub fn reset_and_seed(connection: &Connection) -> Result<(), Error> {
    let transaction = SqlTransaction::new_unchecked(connection, TransactionBehavior::Immediate)?;

    transaction.execute("DELETE FROM users", ())?;
    transaction.execute("DELETE FROM transactions", ())?;

    let users = sample_users();
    let user_count = users.len();
    for user in users {
        create_user(user, &transaction)?;
    }

    let transactions = sample_transactions();
    let transaction_count = transactions.len();
    for sample in transactions {
        create_transaction(sample, &transaction)?;
    }

    transaction.commit()?;

    tracing::info!("Seeded database with {user_count} users and {transaction_count} transactions");

    Ok(())
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;

    use crate::db::initialize;

    use super::reset_and_seed;

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn count_rows(table: &str, conn: &Connection) -> i64 {
        conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
            row.get(0)
        })
        .unwrap()
    }

    #[test]
    fn inserts_sample_data() {
        let conn = get_test_connection();

        reset_and_seed(&conn).unwrap();

        assert_eq!(count_rows("users", &conn), 5);
        assert_eq!(count_rows("transactions", &conn), 10);
    }

    #[test]
    fn reseeding_does_not_duplicate_rows() {
        let conn = get_test_connection();

        reset_and_seed(&conn).unwrap();
        reset_and_seed(&conn).unwrap();

        assert_eq!(count_rows("users", &conn), 5);
        assert_eq!(count_rows("transactions", &conn), 10);
    }

    #[test]
    fn removes_rows_that_are_not_sample_data() {
        let conn = get_test_connection();
        conn.execute(
            "INSERT INTO transactions (transaction_id, user_id, amount, transaction_date)
            VALUES (99, 99, 1.0, '2024-01-01')",
            (),
        )
        .unwrap();

        reset_and_seed(&conn).unwrap();

        let orphan_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM transactions WHERE transaction_id = 99",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(orphan_count, 0);
    }

    #[test]
    fn fails_without_schema() {
        let conn = Connection::open_in_memory().unwrap();

        assert!(reset_and_seed(&conn).is_err());
    }
}
