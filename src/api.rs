//! JSON endpoints that return report results.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, Query, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    report::{JoinDateRange, Report, ReportOutput},
};

/// The state needed for running reports.
#[derive(Debug, Clone)]
pub struct ReportState {
    /// The database connection for running the report queries.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The optional join date bounds for the users by join date report.
///
/// A missing bound is treated as unbounded.
#[derive(Debug, Deserialize)]
pub struct JoinDateQuery {
    /// The earliest join date as an ISO 8601 date.
    pub start: Option<String>,
    /// The latest join date as an ISO 8601 date.
    pub end: Option<String>,
}

/// Run the report named by `report` and return the result as JSON.
///
/// Tables are returned as `{"columns": [...], "rows": [[...], ...]}` and
/// single values as `{"name": ..., "value": ...}` where a missing value is `null`.
pub async fn get_report(
    State(state): State<ReportState>,
    Path(report): Path<String>,
    Query(query): Query<JoinDateQuery>,
) -> Response {
    match run_report(&state, &report, query) {
        Ok(output) => Json(output).into_response(),
        Err(error) => error.into_json_response(),
    }
}

fn run_report(
    state: &ReportState,
    report: &str,
    query: JoinDateQuery,
) -> Result<ReportOutput, Error> {
    let report: Report = report.parse()?;
    let join_dates = JoinDateRange::from_bounds(query.start.as_deref(), query.end.as_deref())?;

    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    report
        .run(join_dates, &connection)
        .inspect_err(|error| tracing::error!("could not run report {report}: {error}"))
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{db::initialize, endpoints, seed::reset_and_seed};

    use super::{ReportState, get_report};

    fn get_test_server(seed: bool) -> TestServer {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        if seed {
            reset_and_seed(&conn).unwrap();
        }

        let state = ReportState {
            db_connection: Arc::new(Mutex::new(conn)),
        };
        let app = Router::new()
            .route(endpoints::REPORTS_API, get(get_report))
            .with_state(state);

        TestServer::new(app)
    }

    #[tokio::test]
    async fn returns_user_report_as_table() {
        let server = get_test_server(true);

        let response = server.get("/api/reports/user-report").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["columns"], json!(["name", "email", "total_spent"]));
        assert_eq!(body["rows"].as_array().map(Vec::len), Some(5));
        assert_eq!(body["rows"][0], json!(["Ramesh", "ramesh@example.com", 900.0]));
    }

    #[tokio::test]
    async fn returns_average_as_scalar() {
        let server = get_test_server(true);

        let response = server.get("/api/reports/average-transaction").await;

        response.assert_status_ok();
        response.assert_json(&json!({ "name": "average_amount", "value": 435.0 }));
    }

    #[tokio::test]
    async fn average_of_empty_store_is_null() {
        let server = get_test_server(false);

        let response = server.get("/api/reports/average-transaction").await;

        response.assert_status_ok();
        response.assert_json(&json!({ "name": "average_amount", "value": null }));
    }

    #[tokio::test]
    async fn filters_users_by_join_date() {
        let server = get_test_server(true);

        let response = server
            .get("/api/reports/users-by-join-date")
            .add_query_param("start", "2024-02-01")
            .add_query_param("end", "2024-03-31")
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(
            body["rows"],
            json!([
                [2, "Mohit", "panday@example.com", "2024-02-03"],
                [3, "Sumit", "sumit@example.com", "2024-03-01"]
            ])
        );
    }

    #[tokio::test]
    async fn missing_bounds_include_every_user() {
        let server = get_test_server(true);

        let response = server.get("/api/reports/users-by-join-date").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["rows"].as_array().map(Vec::len), Some(5));
    }

    #[tokio::test]
    async fn invalid_date_is_bad_request() {
        let server = get_test_server(true);

        let response = server
            .get("/api/reports/users-by-join-date")
            .add_query_param("start", "yesterday")
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn unknown_report_is_not_found() {
        let server = get_test_server(true);

        let response = server.get("/api/reports/biggest-spenders").await;

        response.assert_status_not_found();
        let body: Value = response.json();
        assert!(body["error"].as_str().is_some_and(|error| error.contains("biggest-spenders")));
    }
}
