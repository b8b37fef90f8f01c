//! The URIs served by the dashboard server.
//!
//! For endpoints that take a parameter, e.g., '/api/reports/{report}', use [format_endpoint].

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The dashboard page.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The dashboard content without the surrounding page, polled by HTMX.
pub const DASHBOARD_CONTENT: &str = "/dashboard/content";
/// The route for filtering users by their join date.
pub const USERS_BY_JOIN_DATE: &str = "/dashboard/users_by_join_date";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";

/// The route for getting a report as JSON.
pub const REPORTS_API: &str = "/api/reports/{report}";

/// Replace the parameter in `endpoint_path` with `value`.
///
/// Assumes the parameter is wrapped in braces, e.g. `{report}`, and that there is exactly one.
/// If there is no parameter, `endpoint_path` is returned unchanged.
pub fn format_endpoint(endpoint_path: &str, value: &str) -> String {
    let (Some(start), Some(end)) = (endpoint_path.find('{'), endpoint_path.find('}')) else {
        return endpoint_path.to_owned();
    };

    format!(
        "{}{}{}",
        &endpoint_path[..start],
        value,
        &endpoint_path[end + 1..]
    )
}

#[cfg(test)]
mod tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::{REPORTS_API, format_endpoint};

    #[track_caller]
    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok(), "{uri} is not a valid URI");
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::ROOT);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_VIEW);
        assert_endpoint_is_valid_uri(endpoints::DASHBOARD_CONTENT);
        assert_endpoint_is_valid_uri(endpoints::USERS_BY_JOIN_DATE);
        assert_endpoint_is_valid_uri(endpoints::INTERNAL_ERROR_VIEW);
        assert_endpoint_is_valid_uri(&format_endpoint(REPORTS_API, "user-report"));
    }

    #[test]
    fn replaces_parameter() {
        assert_eq!(
            format_endpoint(REPORTS_API, "top-users"),
            "/api/reports/top-users"
        );
    }

    #[test]
    fn leaves_path_without_parameter_unchanged() {
        assert_eq!(format_endpoint("/dashboard", "top-users"), "/dashboard");
    }
}
