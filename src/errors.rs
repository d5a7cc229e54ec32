//! Unified error handling for `FieldMate`.
//!
//! All fallible operations in the crate return [`Result`], backed by a single
//! [`Error`] enum. Validation failures are surfaced before any write so that
//! a rejected operation never leaves partial state behind.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration problem (missing file, unparseable value, bad setting)
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// Input rejected before any write took place
    #[error("Validation error: {message}")]
    Validation {
        /// Description of the rejected input
        message: String,
    },

    /// A record targeted by an update or transition no longer exists
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Record kind label, e.g. "expense claim"
        kind: &'static str,
        /// Identifier that failed to resolve
        id: String,
    },

    /// A submission carried a type label outside the known record kinds
    #[error("Unknown submission type: {label}")]
    UnknownSubmissionType {
        /// The unmapped label as received
        label: String,
    },

    /// A monetary or distance amount was negative, NaN, or infinite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The offending value
        amount: f64,
    },

    /// Store failure surfaced as-is; the core performs no automatic retries
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error (config file access)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
