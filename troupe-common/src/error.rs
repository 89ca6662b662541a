//! Common error types for Troupe

use thiserror::Error;

/// Common result type for Troupe operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types shared by the directory client and front end.
///
/// An empty result set is deliberately not represented here: zero matches
/// is a valid view state rendered as a placeholder, never an error.
#[derive(Error, Debug)]
pub enum Error {
    /// Request failed to complete or the server answered with a non-2xx status
    #[error("Network error: {0}")]
    Network(String),

    /// Response body was not the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
