//! Error types for the value model.

use thiserror::Error;

/// Result type for model construction.
pub type Result<T> = std::result::Result<T, Error>;

/// Contract violations raised while building model values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A reading was built without any value.
    #[error("Reading '{0}' has no values")]
    EmptyValues(String),

    /// A mandatory field was empty.
    #[error("Empty field: {0}")]
    EmptyField(&'static str),

    /// A wire token did not resolve to a known enum member.
    #[error("Invalid {kind} token: '{token}'")]
    InvalidToken { kind: &'static str, token: String },
}

impl Error {
    pub(crate) fn invalid_token(kind: &'static str, token: impl Into<String>) -> Self {
        Self::InvalidToken {
            kind,
            token: token.into(),
        }
    }
}
