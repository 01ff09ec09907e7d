use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the server binary.
///
/// These codes let supervisors distinguish a bad invocation from a
/// failure during startup or serving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Clean shutdown
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (config error, bind failure, I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for the SBOM service.
///
/// These travel inside `anyhow::Error`; the HTTP adapter downcasts them
/// to pick a status code, everything else is reported as internal.
#[derive(Debug, Error)]
pub enum SbomError {
    /// Malformed or incomplete input
    #[error("{message}")]
    Validation { message: String },

    #[error("SBOM not found: {id}")]
    SbomNotFound { id: String },

    #[error("NVD API key not configured")]
    NvdApiKeyMissing,

    #[error("NVD API error: {details}")]
    NvdRequestFailed { details: String },

    #[error("Failed to update environment file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    EnvFileError { path: PathBuf, details: String },

    #[error("Invalid configuration: {details}\n\n💡 Hint: {hint}")]
    ConfigError { details: String, hint: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

impl SbomError {
    pub fn validation(message: impl Into<String>) -> Self {
        SbomError::Validation {
            message: message.into(),
        }
    }
}
