//! Database ID type definitions.

/// Alias for the integer type used for user IDs.
pub type UserId = i64;
/// Alias for the integer type used for transaction IDs.
pub type TransactionId = i64;
