//! Plain text rendering of report output for the terminal.

use tabled::{builder::Builder, settings::Style};

use crate::report::{ReportOutput, ReportScalar, ReportTable};

/// Placeholder printed for a table without rows.
const EMPTY_TABLE_TEXT: &str = "(no rows)";
/// Placeholder printed for a scalar without data.
const NO_DATA_TEXT: &str = "no transactions";

/// Render a report result as text for printing to a terminal.
pub fn render_output(output: &ReportOutput) -> String {
    match output {
        ReportOutput::Table(table) => render_table(table),
        ReportOutput::Scalar(scalar) => render_scalar(scalar),
    }
}

fn render_table(table: &ReportTable) -> String {
    if table.is_empty() {
        return EMPTY_TABLE_TEXT.to_owned();
    }

    let mut builder = Builder::default();
    builder.push_record(table.columns.iter().copied());

    for row in &table.rows {
        builder.push_record(row.iter().map(|cell| cell.to_string()));
    }

    builder.build().with(Style::rounded()).to_string()
}

fn render_scalar(scalar: &ReportScalar) -> String {
    match scalar.value {
        Some(value) => format!("{value:.2}"),
        None => NO_DATA_TEXT.to_owned(),
    }
}
