//! Error types for the pantry plugin.
//!
//! This module defines the crate-wide error type [`PantryError`], the request
//! failure taxonomy [`RequestError`], and a [`Result`] alias. All errors derive
//! their `Error` implementation through `thiserror`.
//!
//! Request failures are kept distinct internally so they can be logged with
//! their cause, but the UI only ever sees [`REQUEST_FAILED_MESSAGE`]. They
//! live in a request's settlement and never become a [`PantryError`].

use thiserror::Error;

/// Fixed user-facing message shown for any failed request.
///
/// The concrete failure reason is logged but never surfaced to the UI.
pub const REQUEST_FAILED_MESSAGE: &str = "Something went wrong!";

/// The main error type for pantry operations.
///
/// # Examples
///
/// ```
/// use pantry::domain::PantryError;
///
/// fn validate() -> Result<(), PantryError> {
///     Err(PantryError::Config("base_url must not be empty".to_string()))
/// }
/// assert!(validate().is_err());
/// ```
#[derive(Debug, Error)]
pub enum PantryError {
    /// JSON encoding or decoding failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// User input could not be turned into a command.
    ///
    /// Raised when the add-item prompt cannot be parsed into a title and an
    /// amount.
    #[error("Invalid input: {0}")]
    Input(String),

    /// The host delivered a response whose correlation context is unreadable.
    #[error("Correlation error: {0}")]
    Correlation(String),
}

/// Why a request did not produce a usable response.
///
/// Every variant collapses to [`REQUEST_FAILED_MESSAGE`] at the UI boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestError {
    /// The channel could not complete the exchange.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The remote side answered with a non-success status.
    #[error("remote rejected the request with status {status}")]
    Rejected {
        /// HTTP status code returned by the remote side.
        status: u16,
    },

    /// The response body did not have the expected shape.
    #[error("malformed response body: {0}")]
    Decode(String),
}

/// A specialized `Result` type for pantry operations.
pub type Result<T> = std::result::Result<T, PantryError>;
