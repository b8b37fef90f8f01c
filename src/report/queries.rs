//! Read-only aggregate queries over users and their transactions.
//!
//! Every function borrows a connection for the duration of one read statement
//! and never writes. Transactions whose `user_id` matches no user are ignored
//! by the user-keyed reports but still count towards
//! [average_transaction_amount] and [transaction_amounts_over_time].

use rusqlite::Connection;
use serde::Serialize;
use time::Date;

use crate::{
    Error,
    database_id::UserId,
    report::table::{Cell, ReportRow},
    user::{User, map_user_row},
};

/// How much a user has spent across all their transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSpend {
    /// The user's ID.
    pub user_id: UserId,
    /// The user's name.
    pub name: String,
    /// The sum of the user's transaction amounts.
    pub total_spent: f64,
}

impl ReportRow for UserSpend {
    const COLUMNS: &'static [&'static str] = &["user_id", "name", "total_spent"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Integer(self.user_id),
            Cell::Text(self.name.clone()),
            Cell::Float(self.total_spent),
        ]
    }
}

/// A user's contact details and total spend, zero if they have no transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserReportRow {
    /// The user's name.
    pub name: String,
    /// The user's email address.
    pub email: String,
    /// The sum of the user's transaction amounts.
    pub total_spent: f64,
}

impl ReportRow for UserReportRow {
    const COLUMNS: &'static [&'static str] = &["name", "email", "total_spent"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Text(self.name.clone()),
            Cell::Text(self.email.clone()),
            Cell::Float(self.total_spent),
        ]
    }
}

/// A user that has not made any transactions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InactiveUser {
    /// The user's ID.
    pub user_id: UserId,
    /// The user's name.
    pub name: String,
    /// The user's email address.
    pub email: String,
}

impl ReportRow for InactiveUser {
    const COLUMNS: &'static [&'static str] = &["user_id", "name", "email"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Integer(self.user_id),
            Cell::Text(self.name.clone()),
            Cell::Text(self.email.clone()),
        ]
    }
}

/// When a transaction happened and how much it was for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionPoint {
    /// The day of the transaction.
    pub transaction_date: Date,
    /// The amount spent.
    pub amount: f64,
}

impl ReportRow for TransactionPoint {
    const COLUMNS: &'static [&'static str] = &["transaction_date", "amount"];

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::Date(self.transaction_date), Cell::Float(self.amount)]
    }
}

impl ReportRow for User {
    const COLUMNS: &'static [&'static str] = &["user_id", "name", "email", "join_date"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::Integer(self.user_id),
            Cell::Text(self.name.clone()),
            Cell::Text(self.email.clone()),
            Cell::Date(self.join_date),
        ]
    }
}

/// Get the users that joined between `start` and `end`, inclusive.
///
/// An inverted range (`start > end`) matches nothing and returns an empty vector.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn users_by_join_date_range(
    start: Date,
    end: Date,
    connection: &Connection,
) -> Result<Vec<User>, Error> {
    let users = connection
        .prepare(
            "SELECT user_id, name, email, join_date
            FROM users
            WHERE join_date BETWEEN ?1 AND ?2
            ORDER BY user_id",
        )?
        .query_map((start, end), map_user_row)?
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("{} users joined between {start} and {end}", users.len());

    Ok(users)
}

/// Get the total amount spent by each user that has at least one transaction.
///
/// Users without transactions are left out, see [user_report] for a report
/// that includes them.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn total_amount_spent_per_user(connection: &Connection) -> Result<Vec<UserSpend>, Error> {
    let totals = connection
        .prepare(
            "SELECT u.user_id, u.name, SUM(t.amount) AS total_spent
            FROM users u
            INNER JOIN transactions t ON u.user_id = t.user_id
            GROUP BY u.user_id
            ORDER BY u.user_id",
        )?
        .query_map([], |row| {
            Ok(UserSpend {
                user_id: row.get(0)?,
                name: row.get(1)?,
                total_spent: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("{} users have spent money", totals.len());

    Ok(totals)
}

/// Get every user's name, email and total spend.
///
/// Users without transactions are included with a total of zero.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn user_report(connection: &Connection) -> Result<Vec<UserReportRow>, Error> {
    let rows = connection
        .prepare(
            "SELECT u.name, u.email, COALESCE(SUM(t.amount), 0.0) AS total_spent
            FROM users u
            LEFT JOIN transactions t ON u.user_id = t.user_id
            GROUP BY u.user_id
            ORDER BY u.user_id",
        )?
        .query_map([], |row| {
            Ok(UserReportRow {
                name: row.get(0)?,
                email: row.get(1)?,
                total_spent: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("user report has {} rows", rows.len());

    Ok(rows)
}

/// Get up to `limit` users with the highest total spend, highest first.
///
/// Users with equal totals are ordered by ascending user ID.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn top_users_by_spend(limit: usize, connection: &Connection) -> Result<Vec<UserSpend>, Error> {
    let mut totals = total_amount_spent_per_user(connection)?;

    totals.sort_by(|a, b| {
        b.total_spent
            .total_cmp(&a.total_spent)
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    totals.truncate(limit);

    Ok(totals)
}

/// Get the three users with the highest total spend, see [top_users_by_spend].
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn top_3_users_by_spend(connection: &Connection) -> Result<Vec<UserSpend>, Error> {
    top_users_by_spend(3, connection)
}

/// Get the mean amount over all transactions.
///
/// Returns `None` if there are no transactions.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn average_transaction_amount(connection: &Connection) -> Result<Option<f64>, Error> {
    let average: Option<f64> =
        connection.query_row("SELECT AVG(amount) FROM transactions", [], |row| row.get(0))?;

    tracing::debug!("average transaction amount is {average:?}");

    Ok(average)
}

/// Get the users that have not made any transactions.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn users_with_no_transactions(connection: &Connection) -> Result<Vec<InactiveUser>, Error> {
    let users = connection
        .prepare(
            "SELECT u.user_id, u.name, u.email
            FROM users u
            LEFT JOIN transactions t ON u.user_id = t.user_id
            WHERE t.transaction_id IS NULL
            ORDER BY u.user_id",
        )?
        .query_map([], |row| {
            Ok(InactiveUser {
                user_id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!("{} users have no transactions", users.len());

    Ok(users)
}

/// Get the date and amount of every transaction in chronological order.
///
/// # Errors
/// Returns [Error::SqlError] if the query fails.
pub fn transaction_amounts_over_time(
    connection: &Connection,
) -> Result<Vec<TransactionPoint>, Error> {
    connection
        .prepare(
            "SELECT transaction_date, amount
            FROM transactions
            ORDER BY transaction_date, transaction_id",
        )?
        .query_map([], |row| {
            Ok(TransactionPoint {
                transaction_date: row.get(0)?,
                amount: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, rusqlite::Error>>()
        .map_err(|error| error.into())
}
