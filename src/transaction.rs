//! Defines the transaction model and the transactions table.

use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    database_id::{TransactionId, UserId},
};

/// An event where a user spent money.
///
/// `user_id` is not checked against the users table, so a transaction may
/// refer to a user that does not exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub transaction_id: TransactionId,
    /// The ID of the user that made the transaction.
    pub user_id: UserId,
    /// The amount of money spent, never negative.
    pub amount: f64,
    /// When the transaction happened.
    pub transaction_date: Date,
}

impl Transaction {
    /// Create a new transaction.
    pub fn new(
        transaction_id: TransactionId,
        user_id: UserId,
        amount: f64,
        transaction_date: Date,
    ) -> Self {
        Self {
            transaction_id,
            user_id,
            amount,
            transaction_date,
        }
    }
}

/// Create the transactions table.
///
/// `user_id` has no foreign key constraint.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                transaction_id INTEGER PRIMARY KEY,
                user_id INTEGER NOT NULL,
                amount REAL NOT NULL CHECK (amount >= 0),
                transaction_date TEXT NOT NULL
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transactions_user_id ON transactions(user_id)",
        (),
    )?;

    Ok(())
}

/// Insert `transaction` into the database.
///
/// # Errors
/// Returns a [Error::SqlError] if the transaction ID is already taken, the
/// amount is negative, or there is some other SQL error.
pub fn create_transaction(
    transaction: Transaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    connection.execute(
        "INSERT INTO transactions (transaction_id, user_id, amount, transaction_date)
        VALUES (?1, ?2, ?3, ?4)",
        (
            transaction.transaction_id,
            transaction.user_id,
            transaction.amount,
            transaction.transaction_date,
        ),
    )?;

    Ok(transaction)
}
