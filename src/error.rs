//! Error types for the kiln CLI.
//!
//! Uses thiserror for derive macros. Every failure is terminal: there are no
//! retries and no degraded modes, so each variant maps straight to an exit
//! code and is surfaced verbatim to the invoking user.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for kiln operations.
///
/// Each variant maps to one failure class with its own exit code.
#[derive(Error, Debug)]
pub enum KilnError {
    /// Unreadable or invalid configuration, malformed overlay, or bad usage.
    #[error("{0}")]
    Config(String),

    /// One or more tracked tools failed the version gate.
    ///
    /// The message already contains every violation; callers print it as-is.
    #[error("Preflight failed:\n{0}")]
    Preflight(String),

    /// Previous build output could not be removed.
    #[error("Cleanup failed: {0}")]
    Cleanup(String),

    /// The engine reported compile errors or could not be run.
    #[error("Build failed: {0}")]
    Build(String),

    /// No free development server port could be found.
    #[error("Port unavailable: {0}")]
    PortUnavailable(String),
}

impl KilnError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            KilnError::Config(_) => exit_codes::CONFIG_ERROR,
            KilnError::Preflight(_) => exit_codes::PREFLIGHT_FAILURE,
            KilnError::Cleanup(_) => exit_codes::CLEANUP_FAILURE,
            KilnError::Build(_) => exit_codes::BUILD_FAILURE,
            KilnError::PortUnavailable(_) => exit_codes::PORT_FAILURE,
        }
    }
}

/// Result type alias for kiln operations.
pub type Result<T> = std::result::Result<T, KilnError>;
