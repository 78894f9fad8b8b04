//! Error taxonomy for remote calls.
//!
//! ERROR HANDLING
//! ==============
//! Screens display `ApiError` via `Display` and roll local state back to
//! last-known-good; nothing here is retried automatically.

use thiserror::Error;

/// Failure of a call against the hosted service.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never completed (network outage, service down).
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),

    /// A record-store call was attempted without a stored session.
    #[error("not signed in")]
    NotSignedIn,

    /// Stub result on non-browser builds.
    #[error("not available outside the browser")]
    Unavailable,
}
