//! The reporting query layer.
//!
//! The functions in [queries] compute read-only aggregates over the users and
//! transactions tables. [Report] names each of them so that callers such as
//! the JSON API and the console printer can run a report by name and get back
//! a [ReportOutput].

mod console;
mod queries;
mod table;

use std::{fmt::Display, str::FromStr};

use rusqlite::Connection;
use serde::Serialize;
use time::{Date, macros::date};

use crate::Error;

pub use console::render_output;
pub use queries::{
    InactiveUser, TransactionPoint, UserReportRow, UserSpend, average_transaction_amount,
    top_3_users_by_spend, top_users_by_spend, total_amount_spent_per_user,
    transaction_amounts_over_time, user_report, users_by_join_date_range,
    users_with_no_transactions,
};
pub use table::{Cell, ReportRow, ReportScalar, ReportTable};

/// An inclusive range of join dates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JoinDateRange {
    /// The earliest join date to include.
    pub start: Date,
    /// The latest join date to include.
    pub end: Date,
}

impl JoinDateRange {
    /// A range that covers every date the store can hold.
    pub const ALL: Self = Self {
        start: date!(0000 - 01 - 01),
        end: date!(9999 - 12 - 31),
    };

    /// Create a new range. `start` may be after `end`, which matches no users.
    pub fn new(start: Date, end: Date) -> Self {
        Self { start, end }
    }

    /// Create a range from optional ISO 8601 date strings.
    ///
    /// A missing or blank bound leaves that side of the range open.
    ///
    /// # Errors
    /// Returns [Error::InvalidDate] if a bound is not a valid date.
    pub fn from_bounds(start: Option<&str>, end: Option<&str>) -> Result<Self, Error> {
        let start = match start {
            Some(start) if !start.trim().is_empty() => parse_date(start)?,
            _ => Self::ALL.start,
        };
        let end = match end {
            Some(end) if !end.trim().is_empty() => parse_date(end)?,
            _ => Self::ALL.end,
        };

        Ok(Self::new(start, end))
    }
}

/// Parse an ISO 8601 calendar date such as `2024-01-31`.
///
/// # Errors
/// Returns [Error::InvalidDate] if `text` is not a valid date.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    let format = time::macros::format_description!("[year]-[month]-[day]");

    Date::parse(text.trim(), &format).map_err(|error| {
        tracing::debug!("could not parse date {text:?}: {error}");
        Error::InvalidDate(text.to_owned())
    })
}

/// The reports that can be run by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    /// The users that joined within a date range.
    UsersByJoinDate,
    /// The total spend of each user with at least one transaction.
    TotalSpentPerUser,
    /// Every user with their total spend.
    UserReport,
    /// The three biggest spenders.
    TopUsers,
    /// The mean transaction amount.
    AverageTransaction,
    /// The users without any transactions.
    NoTransactions,
    /// The date and amount of every transaction.
    TransactionsOverTime,
}

impl Report {
    /// Every report, in the order the console printer lists them.
    pub const ALL: [Report; 7] = [
        Report::UsersByJoinDate,
        Report::TotalSpentPerUser,
        Report::UserReport,
        Report::TopUsers,
        Report::AverageTransaction,
        Report::NoTransactions,
        Report::TransactionsOverTime,
    ];

    /// The kebab-case name used in URLs.
    pub fn slug(&self) -> &'static str {
        match self {
            Report::UsersByJoinDate => "users-by-join-date",
            Report::TotalSpentPerUser => "total-spent-per-user",
            Report::UserReport => "user-report",
            Report::TopUsers => "top-users",
            Report::AverageTransaction => "average-transaction",
            Report::NoTransactions => "no-transactions",
            Report::TransactionsOverTime => "transactions-over-time",
        }
    }

    /// A human readable title.
    pub fn title(&self) -> &'static str {
        match self {
            Report::UsersByJoinDate => "Users who joined in the date range",
            Report::TotalSpentPerUser => "Total amount spent by each user",
            Report::UserReport => "User report with total amount spent",
            Report::TopUsers => "Top 3 users who spent the most",
            Report::AverageTransaction => "Average transaction amount",
            Report::NoTransactions => "Users with no transactions",
            Report::TransactionsOverTime => "Transaction amounts over time",
        }
    }

    /// Run the report against the store.
    ///
    /// `join_dates` is only used by [Report::UsersByJoinDate].
    ///
    /// # Errors
    /// Returns [Error::SqlError] if the underlying query fails.
    pub fn run(
        &self,
        join_dates: JoinDateRange,
        connection: &Connection,
    ) -> Result<ReportOutput, Error> {
        let output = match self {
            Report::UsersByJoinDate => ReportOutput::Table(ReportTable::from_rows(
                &users_by_join_date_range(join_dates.start, join_dates.end, connection)?,
            )),
            Report::TotalSpentPerUser => ReportOutput::Table(ReportTable::from_rows(
                &total_amount_spent_per_user(connection)?,
            )),
            Report::UserReport => {
                ReportOutput::Table(ReportTable::from_rows(&user_report(connection)?))
            }
            Report::TopUsers => {
                ReportOutput::Table(ReportTable::from_rows(&top_3_users_by_spend(connection)?))
            }
            Report::AverageTransaction => ReportOutput::Scalar(ReportScalar {
                name: "average_amount",
                value: average_transaction_amount(connection)?,
            }),
            Report::NoTransactions => ReportOutput::Table(ReportTable::from_rows(
                &users_with_no_transactions(connection)?,
            )),
            Report::TransactionsOverTime => ReportOutput::Table(ReportTable::from_rows(
                &transaction_amounts_over_time(connection)?,
            )),
        };

        Ok(output)
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Report {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Report::ALL
            .into_iter()
            .find(|report| report.slug() == s)
            .ok_or_else(|| Error::UnknownReport(s.to_owned()))
    }
}

/// The result of running a [Report].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportOutput {
    /// A list report.
    Table(ReportTable),
    /// A single value report.
    Scalar(ReportScalar),
}
