//! Alerts for displaying error messages to users.
//!
//! Alerts are swapped into the `#alert-container` element of the base page by
//! HTMX when a request fails.

use axum::response::Html;
use maud::{Markup, html};

const ERROR_ALERT_STYLE: &str = "p-4 mb-4 text-red-800 border border-red-300 \
    rounded-lg bg-red-50 dark:bg-gray-800 dark:text-red-400 dark:border-red-800";

/// A dismissable error message shown at the bottom of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    /// The headline of the alert.
    pub message: String,
    /// What went wrong and how to fix it, may be empty.
    pub details: String,
}

impl Alert {
    /// Create a new error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Self {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Render the alert as an HTML fragment.
    pub fn into_markup(self) -> Markup {
        html! {
            div class=(ERROR_ALERT_STYLE) role="alert"
            {
                div class="flex items-center justify-between"
                {
                    h3 class="text-lg font-medium" { (self.message) }

                    button
                        type="button"
                        class="ms-auto bg-transparent rounded-lg p-1.5"
                        onclick="this.closest('[role=alert]').remove()"
                        aria-label="Close"
                    {
                        "✕"
                    }
                }

                @if !self.details.is_empty() {
                    div class="mt-2 mb-4 text-sm" { (self.details) }
                }
            }
        }
    }

    /// Render the alert as an HTML response body.
    pub fn into_html(self) -> Html<String> {
        Html(self.into_markup().into_string())
    }
}
