//! Realtime dashboard is a small reporting app over a SQLite store of users and
//! their transactions.
//!
//! The library provides:
//! - the store schema and sample data ([initialize_db], [reset_and_seed]),
//! - the read-only reporting queries in [report],
//! - a web dashboard that serves HTML pages and JSON reports ([build_router]).

#![warn(missing_docs)]

mod alert;
mod api;
mod app_state;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod error;
mod error_page;
mod html;
mod logging;
pub mod report;
mod routing;
mod seed;
mod timezone;
mod transaction;
mod user;

pub use app_state::AppState;
pub use database_id::{TransactionId, UserId};
pub use db::initialize as initialize_db;
pub use error::Error;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use seed::{reset_and_seed, sample_transactions, sample_users};
pub use transaction::{Transaction, create_transaction};
pub use user::{User, create_user};
