//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};

use crate::{
    AppState,
    api::get_report,
    dashboard::{get_dashboard_content, get_dashboard_page, post_users_by_join_date},
    endpoints,
    error_page::{get_404_not_found, get_error_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::DASHBOARD_CONTENT, get(get_dashboard_content))
        .route(
            endpoints::USERS_BY_JOIN_DATE,
            post(post_users_by_join_date),
        )
        .route(endpoints::REPORTS_API, get(get_report))
        .route(endpoints::INTERNAL_ERROR_VIEW, get(get_error_page))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::{Value, json};

    use crate::{AppState, endpoints, seed::reset_and_seed};

    use super::build_router;

    fn get_test_server() -> TestServer {
        let state = AppState::new(
            Connection::open_in_memory().unwrap(),
            "Etc/UTC",
            Duration::from_secs(5),
        )
        .unwrap();
        reset_and_seed(&state.db_connection.lock().unwrap()).unwrap();

        TestServer::new(build_router(state))
    }

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let server = get_test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(response.header("location"), endpoints::DASHBOARD_VIEW);
    }

    #[tokio::test]
    async fn serves_dashboard_page() {
        let server = get_test_server();

        let response = server.get(endpoints::DASHBOARD_VIEW).await;

        response.assert_status_ok();
        assert!(response.text().contains("Dashboard"));
    }

    #[tokio::test]
    async fn serves_dashboard_content_to_htmx() {
        let server = get_test_server();

        let response = server
            .get(endpoints::DASHBOARD_CONTENT)
            .add_header("HX-Request", "true")
            .await;

        response.assert_status_ok();
        assert!(!response.text().contains("<html"));
    }

    #[tokio::test]
    async fn filters_users_by_join_date() {
        let server = get_test_server();

        let response = server
            .post(endpoints::USERS_BY_JOIN_DATE)
            .form(&[("start", "2024-05-01"), ("end", "2024-05-31")])
            .await;

        response.assert_status_ok();
        let text = response.text();
        assert!(text.contains("Sohan"), "got {text}");
        assert!(!text.contains("Ramesh"), "got {text}");
    }

    #[tokio::test]
    async fn serves_reports_as_json() {
        let server = get_test_server();

        let response = server.get("/api/reports/top-users").await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(
            body["rows"],
            json!([
                [2, "Mohit", 1150.0],
                [3, "Sumit", 1050.0],
                [4, "Kumit", 1050.0]
            ])
        );
    }

    #[tokio::test]
    async fn error_page_is_internal_server_error() {
        let server = get_test_server();

        let response = server.get(endpoints::INTERNAL_ERROR_VIEW).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let server = get_test_server();

        let response = server.get("/reports/somewhere").await;

        response.assert_status_not_found();
        assert!(response.text().contains("404"));
    }
}
