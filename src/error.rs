//! Defines the app level error type and its conversions to error pages, alerts and JSON.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{alert::Alert, error_page::ErrorPage};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A report name that does not match any of the known reports.
    #[error("there is no report called \"{0}\"")]
    UnknownReport(String),

    /// A date string that is not a valid ISO 8601 calendar date (e.g., "2024-01-31").
    #[error("\"{0}\" is not a valid date")]
    InvalidDate(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl Error {
    /// The HTTP status code for a request that failed with this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound | Error::UnknownReport(_) => StatusCode::NOT_FOUND,
            Error::InvalidDate(_) => StatusCode::BAD_REQUEST,
            Error::SqlError(_) | Error::InvalidTimezoneError(_) | Error::DatabaseLockError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// A headline and a suggested fix that are safe to show to the client.
    ///
    /// Server-side failures get a generic message and are logged instead.
    fn client_message(&self) -> (&'static str, String) {
        match self {
            Error::NotFound | Error::UnknownReport(_) => (
                "Something's missing.",
                "Sorry, we can't find that page. You'll find lots to explore on the dashboard."
                    .to_owned(),
            ),
            Error::InvalidDate(date) => (
                "Invalid date",
                format!("\"{date}\" is not a valid date. Dates should look like 2024-01-31."),
            ),
            Error::InvalidTimezoneError(timezone) => (
                "Invalid Timezone Settings",
                format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            ),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    "Sorry, something went wrong.",
                    "Try again later or check the server logs for more details.".to_owned(),
                )
            }
        }
    }

    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (message, details) = self.client_message();

        (self.status_code(), Alert::error(message, &details).into_html()).into_response()
    }

    /// Convert the error into an HTTP response with a JSON body such as
    /// `{"error": "there is no report called \"foo\""}`.
    pub fn into_json_response(self) -> Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!("An unexpected error occurred: {}", self);
        }

        (status_code, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (description, fix) = self.client_message();

        ErrorPage::new(self.status_code(), description, &fix).into_response()
    }
}
