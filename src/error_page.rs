//! Full page responses for requests that cannot be served.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// A full HTML page describing an error and what the user can do about it.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPage {
    status: StatusCode,
    description: String,
    fix: String,
}

impl ErrorPage {
    /// Create a page for `status` with a short description and a suggested fix.
    pub fn new(status: StatusCode, description: &str, fix: &str) -> Self {
        Self {
            status,
            description: description.to_owned(),
            fix: fix.to_owned(),
        }
    }

    /// The page for a route or resource that does not exist.
    pub fn not_found() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "Something's missing.",
            "Sorry, we can't find that page. You'll find lots to explore on the dashboard.",
        )
    }

    /// The page for an unexpected failure on the server.
    pub fn server_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Sorry, something went wrong.",
            "Try again later or check the server logs for more details.",
        )
    }
}

impl IntoResponse for ErrorPage {
    fn into_response(self) -> Response {
        let title = self.status.canonical_reason().unwrap_or("Error");
        let markup = error_view(title, self.status.as_str(), &self.description, &self.fix);

        (self.status, Html(markup.into_string())).into_response()
    }
}

/// Route fallback for paths that match no route.
pub async fn get_404_not_found() -> Response {
    ErrorPage::not_found().into_response()
}

/// Route handler for the generic server error page.
pub async fn get_error_page() -> Response {
    ErrorPage::server_error().into_response()
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};
    use scraper::{Html, Selector};

    use super::ErrorPage;

    async fn render(page: ErrorPage) -> (StatusCode, Html) {
        let response = page.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Could not read response body");
        let text = String::from_utf8_lossy(&body).to_string();

        (status, Html::parse_document(&text))
    }

    #[track_caller]
    fn assert_heading(html: &Html, want: &str) {
        let selector = Selector::parse("h1").unwrap();
        let heading = html
            .select(&selector)
            .next()
            .expect("Could not find page heading");

        assert_eq!(heading.text().collect::<String>().trim(), want);
    }

    #[tokio::test]
    async fn not_found_page_shows_status_code() {
        let (status, html) = render(ErrorPage::not_found()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_heading(&html, "404");
    }

    #[tokio::test]
    async fn server_error_page_shows_status_code() {
        let (status, html) = render(ErrorPage::server_error()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_heading(&html, "500");
    }

    #[tokio::test]
    async fn custom_page_shows_description_and_fix() {
        let page = ErrorPage::new(StatusCode::BAD_REQUEST, "Bad date", "Use YYYY-MM-DD.");

        let (status, html) = render(page).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("Bad date"), "got {text}");
        assert!(text.contains("Use YYYY-MM-DD."), "got {text}");
    }
}
