//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for displaying and refreshing the dashboard
//! - The handler for filtering users by join date
//! - HTML view functions for rendering the dashboard UI

use std::{
    sync::{Arc, Mutex, MutexGuard},
    time::Duration,
};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRequest;
use maud::{Markup, html};
use rusqlite::Connection;
use serde::Deserialize;
use time::{OffsetDateTime, UtcOffset};

use crate::{
    AppState, Error,
    dashboard::{
        cards::average_card,
        charts::{DashboardChart, charts_view, top_users_chart, transactions_chart},
        tables::report_table,
    },
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, ECHARTS_SCRIPT, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        HeadElement, PAGE_CONTAINER_STYLE, base,
    },
    report::{
        JoinDateRange, Report, ReportTable, average_transaction_amount, top_3_users_by_spend,
        transaction_amounts_over_time, user_report, users_by_join_date_range,
        users_with_no_transactions,
    },
    timezone::get_local_offset,
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for running the report queries.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
    /// How often the page polls for fresh content.
    pub refresh_interval: Duration,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
            refresh_interval: state.refresh_interval,
        }
    }
}

/// Form data for filtering users by join date.
///
/// Blank fields leave that end of the range open.
#[derive(Debug, Deserialize)]
pub struct JoinDateForm {
    /// The earliest join date as an ISO 8601 date.
    #[serde(default)]
    pub start: String,
    /// The latest join date as an ISO 8601 date.
    #[serde(default)]
    pub end: String,
}

/// Holds all the data needed to render the dashboard content.
struct DashboardData {
    average: Option<f64>,
    charts: [DashboardChart; 2],
    user_report: ReportTable,
    no_transactions: ReportTable,
}

/// Display the dashboard page.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let local_timezone = get_local_timezone(&state.local_timezone)?;
    let (data, joined_users) = load_dashboard_page_data(&state.db_connection)?;

    Ok(dashboard_view(
        data.as_ref(),
        &joined_users,
        state.refresh_interval,
        local_timezone,
    )
    .into_response())
}

/// Get the dashboard content without the surrounding page.
///
/// Requests that did not come from HTMX are redirected to the full dashboard page.
pub async fn get_dashboard_content(
    HxRequest(is_htmx_request): HxRequest,
    State(state): State<DashboardState>,
) -> Response {
    if !is_htmx_request {
        return Redirect::to(endpoints::DASHBOARD_VIEW).into_response();
    }

    let local_timezone = match get_local_timezone(&state.local_timezone) {
        Ok(local_timezone) => local_timezone,
        Err(error) => return error.into_alert_response(),
    };

    let data = match lock_connection(&state.db_connection)
        .and_then(|connection| build_dashboard_data(&connection))
    {
        Ok(data) => data,
        Err(error) => return error.into_alert_response(),
    };

    dashboard_content(data.as_ref(), local_timezone).into_response()
}

/// Get the table of users that joined within the submitted date range.
pub async fn post_users_by_join_date(
    State(state): State<DashboardState>,
    Form(form): Form<JoinDateForm>,
) -> Response {
    let range = match JoinDateRange::from_bounds(Some(&form.start), Some(&form.end)) {
        Ok(range) => range,
        Err(error) => return error.into_alert_response(),
    };

    let users = match lock_connection(&state.db_connection)
        .and_then(|connection| users_by_join_date_range(range.start, range.end, &connection))
    {
        Ok(users) => users,
        Err(error) => return error.into_alert_response(),
    };

    joined_users_table(&ReportTable::from_rows(&users)).into_response()
}

fn lock_connection(
    db_connection: &Mutex<Connection>,
) -> Result<MutexGuard<'_, Connection>, Error> {
    db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
}

/// Runs the queries for the full dashboard page.
///
/// The database lock is released before this returns, so rendering never blocks
/// other requests.
fn load_dashboard_page_data(
    db_connection: &Mutex<Connection>,
) -> Result<(Option<DashboardData>, ReportTable), Error> {
    let connection = lock_connection(db_connection)?;

    let data = build_dashboard_data(&connection)?;
    let joined_users =
        users_by_join_date_range(JoinDateRange::ALL.start, JoinDateRange::ALL.end, &connection)
            .inspect_err(|error| tracing::error!("could not get users by join date: {error}"))?;

    Ok((data, ReportTable::from_rows(&joined_users)))
}

fn get_local_timezone(local_timezone_name: &str) -> Result<UtcOffset, Error> {
    get_local_offset(local_timezone_name).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", local_timezone_name);
        Error::InvalidTimezoneError(local_timezone_name.to_owned())
    })
}

/// Runs the reports shown on the dashboard.
///
/// # Returns
/// All dashboard data ready for rendering, or `None` if there are no users and no transactions.
///
/// # Errors
/// Returns error if any of the database queries fail.
fn build_dashboard_data(connection: &Connection) -> Result<Option<DashboardData>, Error> {
    let user_report = user_report(connection)
        .inspect_err(|error| tracing::error!("could not get user report: {error}"))?;
    let transaction_points = transaction_amounts_over_time(connection)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;

    if user_report.is_empty() && transaction_points.is_empty() {
        return Ok(None);
    }

    let top_users = top_3_users_by_spend(connection)
        .inspect_err(|error| tracing::error!("could not get top users: {error}"))?;
    let average = average_transaction_amount(connection).inspect_err(|error| {
        tracing::error!("could not get average transaction amount: {error}")
    })?;
    let no_transactions = users_with_no_transactions(connection).inspect_err(|error| {
        tracing::error!("could not get users with no transactions: {error}")
    })?;

    let charts = [
        DashboardChart {
            id: "top-users-chart",
            title: "Total Amount Spent by Top 3 Users",
            options: (!top_users.is_empty()).then(|| top_users_chart(&top_users).to_string()),
        },
        DashboardChart {
            id: "transactions-chart",
            title: "Transaction Amounts Over Time",
            options: (!transaction_points.is_empty())
                .then(|| transactions_chart(&transaction_points).to_string()),
        },
    ];

    Ok(Some(DashboardData {
        average,
        charts,
        user_report: ReportTable::from_rows(&user_report),
        no_transactions: ReportTable::from_rows(&no_transactions),
    }))
}

/// Renders the full dashboard page.
///
/// The content section polls [endpoints::DASHBOARD_CONTENT] every `refresh_interval`
/// and swaps in the response, so new data shows up without reloading the page.
/// The join date filter sits outside the polled section and is always shown.
fn dashboard_view(
    data: Option<&DashboardData>,
    joined_users: &ReportTable,
    refresh_interval: Duration,
    local_timezone: UtcOffset,
) -> Markup {
    let refresh_trigger = format!("every {}s", refresh_interval.as_secs().max(1));

    let content = html!(
        div class={(PAGE_CONTAINER_STYLE) " max-w-screen-xl"}
        {
            h1 class="text-3xl font-bold mb-8" { "Dashboard" }

            div
                id="dashboard-content"
                class="w-full"
                hx-get=(endpoints::DASHBOARD_CONTENT)
                hx-trigger=(refresh_trigger)
                hx-swap="innerHTML"
                hx-target-error="#alert-container"
            {
                (dashboard_content(data, local_timezone))
            }

            (join_date_filter(joined_users))
        }
    );

    let scripts = [HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned())];

    base("Dashboard", &scripts, &content)
}

/// Renders the charts, card and tables, or a placeholder if there is no data.
fn dashboard_content(data: Option<&DashboardData>, local_timezone: UtcOffset) -> Markup {
    html!(
        @match data {
            Some(data) => {
                (average_card(data.average))
                (charts_view(&data.charts))
                (report_table("User Report", Report::UserReport, &data.user_report))
                (report_table(
                    "Users With No Transactions",
                    Report::NoTransactions,
                    &data.no_transactions,
                ))
            }
            None => {
                (dashboard_no_data_view())
            }
        }

        footer class="w-full text-sm text-gray-500 dark:text-gray-400 text-right"
        {
            "Last refreshed " span id="last-refreshed" { (format_refresh_time(local_timezone)) }
        }
    )
}

/// Renders the message shown when there are no users and no transactions.
fn dashboard_no_data_view() -> Markup {
    html!(
        div class="flex flex-col items-center mb-8"
        {
            h2 class="text-xl font-bold" { "Nothing here yet..." }

            p
            {
                "Charts and tables will show up here once there are users or transactions.
                Start the server without --no-seed to load the sample data."
            }
        }
    )
}

/// Renders the join date filter form and the table of matching users.
fn join_date_filter(joined_users: &ReportTable) -> Markup {
    html!(
        section id="join-date-filter" class="w-full mb-8"
        {
            form
                hx-post=(endpoints::USERS_BY_JOIN_DATE)
                hx-target="#joined-users"
                hx-target-error="#alert-container"
                hx-swap="innerHTML"
                class="flex flex-wrap items-end gap-4 mb-4"
            {
                div
                {
                    label for="start" class=(FORM_LABEL_STYLE) { "Joined on or after" }
                    input type="date" id="start" name="start" class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="end" class=(FORM_LABEL_STYLE) { "Joined on or before" }
                    input type="date" id="end" name="end" class=(FORM_TEXT_INPUT_STYLE);
                }

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Filter" }
            }

            div id="joined-users" { (joined_users_table(joined_users)) }
        }
    )
}

fn joined_users_table(joined_users: &ReportTable) -> Markup {
    report_table("Users By Join Date", Report::UsersByJoinDate, joined_users)
}

fn format_refresh_time(local_timezone: UtcOffset) -> String {
    let now = OffsetDateTime::now_utc().to_offset(local_timezone);

    format!(
        "{} {:02}:{:02}:{:02}",
        now.date(),
        now.hour(),
        now.minute(),
        now.second()
    )
}
