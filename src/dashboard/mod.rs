//! Dashboard module
//!
//! Provides a page showing the reports as charts, cards and tables,
//! refreshed by polling the server for new content.

mod cards;
mod charts;
mod handlers;
mod tables;

pub use handlers::{get_dashboard_content, get_dashboard_page, post_users_by_join_date};
