//! Error types for conveyor.
//!
//! Uses thiserror for derive macros. Every failure is fatal for the build
//! invocation that triggered it; nothing here is retried.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for conveyor operations.
#[derive(Error, Debug)]
pub enum ConveyorError {
    /// Invalid arguments, invalid build description, or an unknown task.
    #[error("{0}")]
    UserError(String),

    /// A persisted file could not be read or written.
    #[error("I/O failure: {0}")]
    IoFailure(String),

    /// A registered configuration action failed while mutating a task.
    #[error("Configuration failed: {0}")]
    ConfigurationFailure(String),

    /// A descriptor file on disk is not well-formed.
    #[error("Malformed descriptor: {0}")]
    DescriptorError(String),

    /// A task action or finalizer failed while the task was executing.
    #[error("Task failed: {0}")]
    TaskFailure(String),
}

impl ConveyorError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ConveyorError::UserError(_) => exit_codes::USER_ERROR,
            ConveyorError::ConfigurationFailure(_) => exit_codes::CONFIGURATION_FAILURE,
            ConveyorError::IoFailure(_) | ConveyorError::DescriptorError(_) => {
                exit_codes::IO_FAILURE
            }
            ConveyorError::TaskFailure(_) => exit_codes::TASK_FAILURE,
        }
    }

    /// Build an `IoFailure` that names the offending path.
    pub fn io(action: &str, path: &std::path::Path, err: impl std::fmt::Display) -> Self {
        ConveyorError::IoFailure(format!("couldn't {} '{}': {}", action, path.display(), err))
    }
}

/// Result type alias for conveyor operations.
pub type Result<T> = std::result::Result<T, ConveyorError>;
