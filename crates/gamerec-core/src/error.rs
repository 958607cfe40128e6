//! Error types and exit codes for gamerec
//!
//! Exit codes:
//! - 0: Success
//! - 1: Generic failure
//! - 2: Usage error (bad flags/args)
//! - 3: Data/store error (missing store, missing stage, unknown item)

mod macros;

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the gamerec CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Success (0)
    Success = 0,
    /// Generic failure (1)
    Failure = 1,
    /// Usage error - bad flags/args (2)
    Usage = 2,
    /// Data/store error - missing store, missing stage, unknown item (3)
    Data = 3,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<rusqlite::Error> for GamerecError {
    fn from(err: rusqlite::Error) -> Self {
        GamerecError::Database(err.to_string())
    }
}

/// Errors that can occur while building or querying recommendations
#[derive(Error, Debug)]
pub enum GamerecError {
    // Pipeline errors
    /// A numeric catalog field could not be parsed. The discretizer recovers
    /// from this by emitting an unknown bucket.
    #[error("malformed {field} value {value:?}: {reason}")]
    MalformedRecord {
        field: String,
        value: String,
        reason: String,
    },

    /// An item has no genre or tag values. The combiner recovers from this by
    /// dropping the item.
    #[error("item has no attributes: {id}")]
    EmptyItem { id: String },

    #[error("item not found: {id}")]
    UnknownItem { id: String },

    #[error("invariant violated: {reason}")]
    InvariantViolation { reason: String },

    #[error("stage '{stage}' has not been built (run `gamerec {command}` first)")]
    StageMissing { stage: String, command: String },

    // Usage errors (exit code 2)
    #[error("unknown format: {0} (expected: human, json, or records)")]
    UnknownFormat(String),

    #[error("{0}")]
    UsageError(String),

    #[error("invalid {context}: {value}")]
    InvalidValue { context: String, value: String },

    // Store errors (exit code 3)
    #[error("store not found (searched from {search_root:?})")]
    StoreNotFound { search_root: PathBuf },

    // Generic failures (exit code 1)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("database error: {0}")]
    Database(String),

    #[error("failed to {operation}: {reason}")]
    FailedOperation { operation: String, reason: String },

    #[error("{0}")]
    Other(String),
}

impl GamerecError {
    /// Create an error for a numeric field that failed to parse
    pub fn malformed(
        field: &str,
        value: impl std::fmt::Display,
        reason: impl std::fmt::Display,
    ) -> Self {
        GamerecError::MalformedRecord {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an error for a query identifier missing from the canonical index
    pub fn unknown_item(id: impl Into<String>) -> Self {
        GamerecError::UnknownItem { id: id.into() }
    }

    /// Create an error for a broken pipeline contract
    pub fn invariant(reason: impl Into<String>) -> Self {
        GamerecError::InvariantViolation {
            reason: reason.into(),
        }
    }

    /// Create an error for a failed database operation
    pub fn db_operation(operation: &str, error: impl std::fmt::Display) -> Self {
        GamerecError::FailedOperation {
            operation: operation.to_string(),
            reason: error.to_string(),
        }
    }

    /// Create an error for an invalid value or configuration
    pub fn invalid_value(context: &str, value: impl std::fmt::Display) -> Self {
        GamerecError::InvalidValue {
            context: context.to_string(),
            value: value.to_string(),
        }
    }

    /// Get the appropriate exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        match self {
            GamerecError::UnknownFormat(_)
            | GamerecError::UsageError(_)
            | GamerecError::InvalidValue { .. } => ExitCode::Usage,

            GamerecError::StoreNotFound { .. }
            | GamerecError::StageMissing { .. }
            | GamerecError::UnknownItem { .. }
            | GamerecError::InvariantViolation { .. } => ExitCode::Data,

            GamerecError::MalformedRecord { .. }
            | GamerecError::EmptyItem { .. }
            | GamerecError::Io(_)
            | GamerecError::Csv(_)
            | GamerecError::Json(_)
            | GamerecError::Toml(_)
            | GamerecError::Database(_)
            | GamerecError::FailedOperation { .. }
            | GamerecError::Other(_) => ExitCode::Failure,
        }
    }

    /// Get the error type identifier
    pub fn error_type(&self) -> &'static str {
        match self {
            GamerecError::MalformedRecord { .. } => "malformed_record",
            GamerecError::EmptyItem { .. } => "empty_item",
            GamerecError::UnknownItem { .. } => "unknown_item",
            GamerecError::InvariantViolation { .. } => "invariant_violation",
            GamerecError::StageMissing { .. } => "stage_missing",
            GamerecError::UnknownFormat(_) => "unknown_format",
            GamerecError::UsageError(_) => "usage_error",
            GamerecError::InvalidValue { .. } => "invalid_value",
            GamerecError::StoreNotFound { .. } => "store_not_found",
            GamerecError::Io(_) => "io_error",
            GamerecError::Csv(_) => "csv_error",
            GamerecError::Json(_) => "json_error",
            GamerecError::Toml(_) => "toml_error",
            GamerecError::Database(_) => "database_error",
            GamerecError::FailedOperation { .. } => "failed_operation",
            GamerecError::Other(_) => "other",
        }
    }

    /// Convert error to JSON representation for structured error output.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.exit_code() as i32,
                "type": self.error_type(),
                "message": self.to_string(),
            }
        })
    }
}

/// Result type alias for gamerec operations
pub type Result<T> = std::result::Result<T, GamerecError>;
