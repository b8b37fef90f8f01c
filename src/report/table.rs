//! A generic tabular shape for report results.
//!
//! Each report returns typed rows. [ReportTable] flattens any of them into an
//! ordered list of named columns plus rows of [Cell]s, which is what the JSON
//! API, the console printer and the HTML tables consume.

use std::fmt::Display;

use serde::Serialize;
use time::Date;

/// A single value in a report table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    /// An ID or count.
    Integer(i64),
    /// A money amount.
    Float(f64),
    /// Free text such as a name or email address.
    Text(String),
    /// A calendar date, serialized as `YYYY-MM-DD`.
    Date(Date),
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cell::Integer(value) => write!(f, "{value}"),
            Cell::Float(value) => write!(f, "{value:.2}"),
            Cell::Text(value) => write!(f, "{value}"),
            Cell::Date(value) => write!(f, "{value}"),
        }
    }
}

/// A typed report row with a fixed set of named columns.
pub trait ReportRow {
    /// The column names, in the order [ReportRow::cells] returns values.
    const COLUMNS: &'static [&'static str];

    /// The row's values, one per entry in [ReportRow::COLUMNS].
    fn cells(&self) -> Vec<Cell>;
}

/// The result of a list report: ordered column names and rows of values.
///
/// A report that matched nothing is a table with its columns and no rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportTable {
    /// The column names.
    pub columns: Vec<&'static str>,
    /// The rows, each with one cell per column.
    pub rows: Vec<Vec<Cell>>,
}

impl ReportTable {
    /// Build a table from typed rows.
    pub fn from_rows<R: ReportRow>(rows: &[R]) -> Self {
        Self {
            columns: R::COLUMNS.to_vec(),
            rows: rows.iter().map(ReportRow::cells).collect(),
        }
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The result of a report that computes one number.
///
/// `value` is `None` when there is no data to compute it from, which is
/// serialized as `null` rather than `0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportScalar {
    /// The name of the value.
    pub name: &'static str,
    /// The value, or `None` if there was no data.
    pub value: Option<f64>,
}
