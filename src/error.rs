//! Error types for taskdash
//!
//! Exit codes:
//! - 0: Success
//! - 2: User error (bad args, bad config)
//! - 3: Rejected by the task service (unknown id, invalid draft)
//! - 4: Operation failed (network, remote fault, corrupt task data)

use thiserror::Error;

use crate::task::TaskId;

/// Exit codes for the taskdash CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USER_ERROR: i32 = 2;
    pub const REJECTED: i32 = 3;
    pub const OPERATION_FAILED: i32 = 4;
}

/// Main error type for taskdash operations
#[derive(Error, Debug)]
pub enum Error {
    // User errors (exit code 2)
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Service rejections (exit code 3)
    #[error("Task not found: {0}")]
    TaskNotFound(TaskId),

    #[error("Draft rejected by task service: {0}")]
    DraftRejected(String),

    // Operation failures (exit code 4)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Task service error ({status}): {message}")]
    Service { status: u16, message: String },

    #[error("Task data integrity violation: {0}")]
    DataIntegrity(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            // User errors
            Error::InvalidConfig(_) | Error::InvalidArgument(_) => exit_codes::USER_ERROR,

            // Service rejections
            Error::TaskNotFound(_) | Error::DraftRejected(_) => exit_codes::REJECTED,

            // Operation failures
            Error::Network(_)
            | Error::Service { .. }
            | Error::DataIntegrity(_)
            | Error::Io(_)
            | Error::Json(_)
            | Error::TomlParse(_) => exit_codes::OPERATION_FAILED,
        }
    }
}

/// Result type alias for taskdash operations
pub type Result<T> = std::result::Result<T, Error>;
