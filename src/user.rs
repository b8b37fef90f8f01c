//! Code for creating the users table and inserting users into the database.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{Error, database_id::UserId};

/// A person who may have made transactions.
///
/// The caller should ensure that `user_id` is unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The user's ID in the application database.
    pub user_id: UserId,
    /// The user's display name.
    pub name: String,
    /// The user's email address.
    pub email: String,
    /// The day the user joined.
    pub join_date: Date,
}

impl User {
    /// Create a new user.
    ///
    /// The caller should ensure that `user_id` is unique.
    pub fn new(user_id: UserId, name: &str, email: &str, join_date: Date) -> Self {
        Self {
            user_id,
            name: name.to_owned(),
            email: email.to_owned(),
            join_date,
        }
    }
}

/// Create the users table.
///
/// # Errors
///
/// This function will return an error if the SQL query failed.
pub fn create_user_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS users (
                user_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                join_date TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Insert `user` into the database.
///
/// # Errors
///
/// Returns a [Error::SqlError] if an SQL related error occurred, e.g., the
/// user ID is already taken.
pub fn create_user(user: User, connection: &Connection) -> Result<User, Error> {
    connection.execute(
        "INSERT INTO users (user_id, name, email, join_date) VALUES (?1, ?2, ?3, ?4)",
        (user.user_id, &user.name, &user.email, user.join_date),
    )?;

    Ok(user)
}

/// Map a row with the columns `user_id, name, email, join_date` to a [User].
pub fn map_user_row(row: &Row) -> Result<User, rusqlite::Error> {
    Ok(User {
        user_id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        join_date: row.get(3)?,
    })
}

#[cfg(test)]
mod tests {
    use rusqlite::Connection;
    use time::macros::date;

    use crate::Error;

    use super::{User, create_user, create_user_table, map_user_row};

    fn get_test_connection() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        create_user_table(&conn).unwrap();
        conn
    }

    #[test]
    fn create_user_round_trips_through_database() {
        let conn = get_test_connection();
        let want = User::new(1, "Ramesh", "ramesh@example.com", date!(2024 - 01 - 01));

        create_user(want.clone(), &conn).unwrap();

        let got = conn
            .query_row(
                "SELECT user_id, name, email, join_date FROM users WHERE user_id = 1",
                [],
                map_user_row,
            )
            .unwrap();
        assert_eq!(want, got);
    }

    #[test]
    fn join_date_is_stored_as_iso_date() {
        let conn = get_test_connection();
        create_user(
            User::new(1, "Ramesh", "ramesh@example.com", date!(2024 - 02 - 03)),
            &conn,
        )
        .unwrap();

        let stored: String = conn
            .query_row("SELECT join_date FROM users", [], |row| row.get(0))
            .unwrap();

        assert_eq!(stored, "2024-02-03");
    }

    #[test]
    fn create_user_fails_on_duplicate_id() {
        let conn = get_test_connection();
        let user = User::new(1, "Ramesh", "ramesh@example.com", date!(2024 - 01 - 01));
        create_user(user.clone(), &conn).unwrap();

        let result = create_user(user, &conn);

        assert!(
            matches!(result, Err(Error::SqlError(_))),
            "want SQL error, got {result:?}"
        );
    }
}
