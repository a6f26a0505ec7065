//! CLI-level errors (wraps outline and config errors)

use thiserror::Error;

use crate::config::ConfigError;
use crate::outline::OutlineError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Outline(#[from] OutlineError),

    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Usage(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Config(_) => crate::exitcode::CONFIG,
            CliError::Outline(e) => match e {
                OutlineError::Io { .. } => crate::exitcode::NOINPUT,
                OutlineError::Tree(_) => crate::exitcode::SOFTWARE,
                _ => crate::exitcode::DATAERR,
            },
        }
    }
}
