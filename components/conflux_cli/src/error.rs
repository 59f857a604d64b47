//! Error types for the CLI

use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Script file I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Malformed command
    #[error("{0}")]
    Parse(String),

    /// A command referenced a task name that was never defined
    #[error("unknown task '{0}'")]
    UnknownTask(String),

    /// A command tried to redefine an existing task name
    #[error("a task named '{0}' already exists")]
    DuplicateTask(String),

    /// A script line failed
    #[error("line {line}: {message}")]
    Script {
        /// 1-based line number in the script
        line: usize,
        /// The underlying error, rendered
        message: String,
    },

    /// Settlement report serialization error
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// Interactive shell error
    #[error("{0}")]
    Shell(String),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
