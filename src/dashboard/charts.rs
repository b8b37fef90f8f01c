//! Chart generation and rendering for the dashboard.
//!
//! This module creates ECharts visualizations for the report data:
//! - **Top Users Chart**: Bar chart of the total spend of the three biggest spenders
//! - **Transactions Chart**: Scatter plot of every transaction amount by date
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with a corresponding HTML container and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Title},
    datatype::CompositeValue,
    element::{AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger},
    series::{Bar, Scatter},
};
use maud::{Markup, PreEscaped, html};

use crate::report::{TransactionPoint, UserSpend};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The heading shown above the chart.
    pub title: &'static str,
    /// The ECharts configuration as a JSON string, or `None` if there is no data to plot.
    pub options: Option<String>,
}

/// Renders the HTML containers for dashboard charts followed by the script
/// that draws them.
///
/// Charts without data are rendered as a "No data" placeholder.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                    {
                        h2 class="text-xl font-semibold mb-4" { (chart.title) }

                        @if chart.options.is_some() {
                            div
                                id=(chart.id)
                                class="min-h-[380px] rounded dark:bg-gray-100"
                            {}
                        } @else {
                            div
                                id=(chart.id)
                                data-empty="true"
                                class="flex items-center justify-center min-h-[380px]
                                    rounded border border-dashed border-gray-300
                                    dark:border-gray-600 text-gray-500"
                            {
                                "No data"
                            }
                        }
                    }
                }
            }

            script { (charts_script(charts)) }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// The script runs each time the dashboard content is swapped in, so chart
/// instances are tracked on `window` and disposed of before being redrawn.
fn charts_script(charts: &[DashboardChart]) -> PreEscaped<String> {
    let script_content = charts
        .iter()
        .filter_map(|chart| chart.options.as_ref().map(|options| (chart.id, options)))
        .map(|(id, options)| {
            format!(
                r#"(function() {{
                    const previous = window.dashboardCharts["{id}"];
                    if (previous) {{
                        previous.dispose();
                    }}

                    const chartDom = document.getElementById("{id}");
                    const isDarkMode = darkModeMediaQuery.matches;
                    const chart = echarts.init(chartDom, isDarkMode ? 'dark' : 'default');
                    const option = {options};
                    chart.setOption(option);

                    window.dashboardCharts["{id}"] = chart;
                }})();"#
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    PreEscaped(format!(
        r#"(function() {{
            const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');

            if (!window.dashboardCharts) {{
                window.dashboardCharts = {{}};

                window.addEventListener('resize', function() {{
                    Object.values(window.dashboardCharts).forEach((chart) => chart.resize());
                }});

                darkModeMediaQuery.addEventListener('change', function() {{
                    const theme = darkModeMediaQuery.matches ? 'dark' : 'default';
                    Object.values(window.dashboardCharts).forEach((chart) => chart.setTheme(theme));
                }});
            }}

            {script_content}
        }})();"#
    ))
}

/// A bar chart of how much each of the `top_users` spent, in the given order.
pub(super) fn top_users_chart(top_users: &[UserSpend]) -> Chart {
    let names: Vec<String> = top_users.iter().map(|user| user.name.clone()).collect();
    let totals: Vec<f64> = top_users.iter().map(|user| user.total_spent).collect();

    Chart::new()
        .title(Title::new().text("Top Spenders").subtext("All time"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(names))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Total Spent").data(totals))
}

/// A scatter plot of transaction amounts in date order.
pub(super) fn transactions_chart(points: &[TransactionPoint]) -> Chart {
    // [ISO date, amount] pairs for the time axis.
    let data: Vec<Vec<CompositeValue>> = points
        .iter()
        .map(|point| {
            vec![
                CompositeValue::from(point.transaction_date.to_string()),
                CompositeValue::from(point.amount),
            ]
        })
        .collect();

    Chart::new()
        .title(Title::new().text("Transactions").subtext("Amount by date"))
        .tooltip(transaction_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Time))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Scatter::new().name("Amount").data(data))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

/// Shows the date and amount of a single transaction point.
fn transaction_tooltip() -> Tooltip {
    Tooltip::new().trigger(Trigger::Item).formatter(JsFunction::new_with_args(
        "params",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            const [date, amount] = params.value;
            return `${date}: ${currencyFormatter.format(amount)}`;",
    ))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::date;

    use crate::report::{TransactionPoint, UserSpend};

    use super::{DashboardChart, charts_view, top_users_chart, transactions_chart};

    #[test]
    fn top_users_chart_lists_names_in_order() {
        let top_users = vec![
            UserSpend {
                user_id: 2,
                name: "Mohit".to_owned(),
                total_spent: 1150.0,
            },
            UserSpend {
                user_id: 3,
                name: "Sumit".to_owned(),
                total_spent: 1050.0,
            },
        ];

        let options = top_users_chart(&top_users).to_string();

        let mohit = options.find("Mohit").expect("chart should contain Mohit");
        let sumit = options.find("Sumit").expect("chart should contain Sumit");
        assert!(mohit < sumit, "want bars in spend order, got {options}");
        assert!(options.contains("1150"), "got {options}");
    }

    #[test]
    fn transactions_chart_plots_date_amount_pairs_on_time_axis() {
        let points = [
            TransactionPoint {
                transaction_date: date!(2024 - 01 - 01),
                amount: 300.0,
            },
            TransactionPoint {
                transaction_date: date!(2024 - 01 - 01),
                amount: 150.0,
            },
            TransactionPoint {
                transaction_date: date!(2024 - 03 - 15),
                amount: 200.0,
            },
        ];

        let options = serde_json::to_value(transactions_chart(&points))
            .expect("chart options should serialize to JSON");

        assert_eq!(options["xAxis"]["type"], "time", "got {options}");
        assert!(options["xAxis"].get("data").is_none(), "got {options}");
        assert_eq!(options["series"][0]["type"], "scatter");
        assert_eq!(
            options["series"][0]["data"],
            json!([["2024-01-01", 300.0], ["2024-01-01", 150.0], ["2024-03-15", 200.0]])
        );
    }

    #[test]
    fn empty_chart_renders_placeholder() {
        let charts = [
            DashboardChart {
                id: "top-users-chart",
                title: "Top",
                options: None,
            },
            DashboardChart {
                id: "transactions-chart",
                title: "Transactions",
                options: Some("{}".to_owned()),
            },
        ];

        let markup = charts_view(&charts).into_string();

        assert!(markup.contains("No data"));
        assert!(markup.contains(r#"window.dashboardCharts["transactions-chart"]"#));
        assert!(!markup.contains(r#"window.dashboardCharts["top-users-chart"]"#));
    }
}
