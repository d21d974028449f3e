use thiserror::Error;

/// Custom error types for hovertip
///
/// Only host-facing operations surface these. The tooltip lifecycle itself
/// never fails loudly: missing titles and canceled events are silent no-ops.
#[derive(Debug, Error)]
pub enum HovertipError {
    #[error("No element matches '{0}'")]
    ElementNotFound(String),

    #[error("Invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Invalid script: {0}")]
    Script(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HovertipError {
    pub(crate) fn selector(selector: &str, reason: impl Into<String>) -> Self {
        HovertipError::Selector {
            selector: selector.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = HovertipError> = std::result::Result<T, E>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod error_tests;
