//! Mute Error Handling
//!
//! Assertion failures are not errors: they are reported inline on the output
//! sink and the run carries on. `MuteError` covers what the engine itself
//! refuses to do (nesting too deep, unbalanced sections, duplicate
//! registrations) plus the I/O and parsing failures of the command-line tools.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::Location;

pub type Result<T, E = MuteError> = std::result::Result<T, E>;

/// Coarse error classification, logged by the CLI when a command fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// Section nesting or registration misuse by the test author
    Usage,
    /// Reading or writing files
    Io,
    /// Malformed configuration
    Config,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Usage => "Usage",
            ErrorType::Io => "Io",
            ErrorType::Config => "Config",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum MuteError {
    #[error("section nesting exceeds maximum depth of {max}")]
    #[diagnostic(
        code(mute::depth_overflow),
        help("flatten the section tree or split the test case")
    )]
    DepthOverflow { max: usize },

    #[error("section left while no section was open")]
    #[diagnostic(code(mute::depth_underflow))]
    DepthUnderflow,

    #[error("test '{name}' registered twice ({location})")]
    #[diagnostic(
        code(mute::duplicate_test),
        help("each test descriptor may only be registered once")
    )]
    DuplicateTest { name: String, location: Location },

    #[error("failed to {action} '{}'", path.display())]
    #[diagnostic(code(mute::io))]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid configuration in '{}'", path.display())]
    #[diagnostic(code(mute::config), help("see RunnerConfig for the accepted keys"))]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to walk directory: {0}")]
    #[diagnostic(code(mute::io))]
    Walk(#[from] walkdir::Error),

    #[error("failed to encode report: {0}")]
    #[diagnostic(code(mute::report))]
    Json(#[from] serde_json::Error),
}

impl MuteError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MuteError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn error_type(&self) -> ErrorType {
        match self {
            MuteError::DepthOverflow { .. }
            | MuteError::DepthUnderflow
            | MuteError::DuplicateTest { .. } => ErrorType::Usage,
            MuteError::Io { .. } | MuteError::Walk(_) | MuteError::Json(_) => ErrorType::Io,
            MuteError::Config { .. } => ErrorType::Config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_overflow_is_a_usage_error() {
        let overflow = MuteError::DepthOverflow { max: 16 };
        assert_eq!(overflow.error_type(), ErrorType::Usage);
        assert_eq!(
            overflow.to_string(),
            "section nesting exceeds maximum depth of 16"
        );
    }

    #[test]
    fn duplicate_registration_names_the_test() {
        let err = MuteError::DuplicateTest {
            name: "first test".to_string(),
            location: Location::new("tests/a.rs", 12),
        };
        assert_eq!(err.error_type(), ErrorType::Usage);
        assert_eq!(err.to_string(), "test 'first test' registered twice (tests/a.rs:12)");
    }
}
