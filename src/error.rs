//! Error types for pagewise
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for pagewise
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Caller Contract Errors
    // ============================================================================
    /// A page number or page size outside its domain
    #[error("Invalid argument '{name}' ({value}): {message}")]
    InvalidArgument {
        /// Argument name
        name: &'static str,
        /// Rejected value
        value: usize,
        /// What the argument must satisfy
        message: String,
    },

    /// A subset that does not fit the page it is being wrapped into
    #[error("Page invariant violated: {message}")]
    InvariantViolation {
        /// Which bound was exceeded
        message: String,
    },

    // ============================================================================
    // State Access Errors
    // ============================================================================
    /// Page number or item count read from the empty sentinel
    #[error("There are no pages")]
    NoPages,

    /// Indexed read past the end of a page
    #[error("Index {index} is out of bounds for a page of {len} items")]
    IndexOutOfBounds {
        /// Requested index
        index: usize,
        /// Number of items on the page
        len: usize,
    },

    /// Operation not allowed in the deferred page's current phase
    #[error("Invalid state: {message}")]
    InvalidState {
        /// Why the operation was refused
        message: String,
    },

    /// Deferred listing stopped by its cancellation token
    #[error("Page materialization was cancelled")]
    Cancelled,

    // ============================================================================
    // Query Errors
    // ============================================================================
    /// A query round trip failed
    #[error("Query failed: {message}")]
    Query {
        /// Failure reported by the source
        message: String,
    },

    /// DuckDB rejected a statement
    #[error("Database error: {0}")]
    Database(#[from] duckdb::Error),

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    /// Unreadable or invalid configuration or input file
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong with it
        message: String,
    },

    /// Malformed YAML
    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Malformed JSON
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    /// Filesystem failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    /// Any other error, usually with added context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(name: &'static str, value: usize, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            value,
            message: message.into(),
        }
    }

    /// Create an invariant violation error
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    /// Create an out-of-bounds error
    pub fn out_of_bounds(index: usize, len: usize) -> Self {
        Self::IndexOutOfBounds { index, len }
    }

    /// Create an invalid state error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create a query error
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error signals caller misuse rather than a failing source
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Error::InvalidArgument { .. }
                | Error::InvariantViolation { .. }
                | Error::NoPages
                | Error::IndexOutOfBounds { .. }
                | Error::InvalidState { .. }
        )
    }
}

/// Result type alias for pagewise
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
