//! Table views for report data.

use maud::{Markup, html};

use crate::{
    endpoints::{REPORTS_API, format_endpoint},
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency, link},
    report::{Cell, Report, ReportTable},
};

/// Renders a report table with a heading and a link to the same report as JSON.
///
/// A table without rows is rendered as a "No data" message.
pub(super) fn report_table(title: &str, report: Report, table: &ReportTable) -> Markup {
    let json_url = format_endpoint(REPORTS_API, report.slug());

    html! {
        div id=(report.slug()) class="w-full mb-8" {
            div class="flex justify-between items-baseline mb-4" {
                h2 class="text-xl font-semibold" { (title) }
                span class="text-sm" { (link(&json_url, "JSON")) }
            }

            @if table.is_empty() {
                p class="text-gray-500 dark:text-gray-400" data-empty="true" { "No data" }
            } @else {
                div class="overflow-x-auto rounded-lg shadow" {
                    table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                        thead class=(TABLE_HEADER_STYLE) {
                            tr {
                                @for column in &table.columns {
                                    th scope="col" class=(TABLE_CELL_STYLE) {
                                        (column.replace('_', " "))
                                    }
                                }
                            }
                        }
                        tbody {
                            @for row in &table.rows {
                                tr class=(TABLE_ROW_STYLE) {
                                    @for cell in row {
                                        td class=(TABLE_CELL_STYLE) { (format_cell(cell)) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn format_cell(cell: &Cell) -> String {
    match cell {
        Cell::Float(amount) => format_currency(*amount),
        cell => cell.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::report::{Cell, Report, ReportTable};

    use super::report_table;

    #[test]
    fn renders_header_and_rows() {
        let table = ReportTable {
            columns: vec!["name", "email", "total_spent"],
            rows: vec![
                vec![
                    Cell::Text("Ramesh".to_owned()),
                    Cell::Text("ramesh@example.com".to_owned()),
                    Cell::Float(900.0),
                ],
                vec![
                    Cell::Text("Mohit".to_owned()),
                    Cell::Text("panday@example.com".to_owned()),
                    Cell::Float(1150.0),
                ],
            ],
        };

        let html = Html::parse_fragment(
            &report_table("User Report", Report::UserReport, &table).into_string(),
        );

        let headers: Vec<String> = html
            .select(&Selector::parse("th").unwrap())
            .map(|th| th.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(headers, vec!["name", "email", "total spent"]);

        let rows: Vec<_> = html.select(&Selector::parse("tbody tr").unwrap()).collect();
        assert_eq!(rows.len(), 2);
        let first_row: Vec<String> = rows[0]
            .select(&Selector::parse("td").unwrap())
            .map(|td| td.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(first_row, vec!["Ramesh", "ramesh@example.com", "$900.00"]);
    }

    #[test]
    fn links_to_json_report() {
        let table = ReportTable {
            columns: vec!["user_id", "name", "email"],
            rows: vec![],
        };

        let html = Html::parse_fragment(
            &report_table("Users With No Transactions", Report::NoTransactions, &table)
                .into_string(),
        );

        let link = html
            .select(&Selector::parse("a").unwrap())
            .next()
            .expect("want link to JSON report");
        assert_eq!(
            link.value().attr("href"),
            Some("/api/reports/no-transactions")
        );
    }

    #[test]
    fn empty_table_shows_placeholder() {
        let table = ReportTable {
            columns: vec!["user_id", "name", "email"],
            rows: vec![],
        };

        let markup = report_table("Users With No Transactions", Report::NoTransactions, &table)
            .into_string();

        assert!(markup.contains("No data"), "got {markup}");
        assert!(!markup.contains("<table"), "got {markup}");
    }
}
