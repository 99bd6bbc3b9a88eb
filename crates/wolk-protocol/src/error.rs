//! Codec error types.
//!
//! Codecs never return these across their public boundary: every failure is
//! logged once and turned into `None`. [`crate::validate_json_payload`] is
//! the one operation that hands the error to the caller.

use thiserror::Error;
use wolk_core::MessageType;

/// Result type for codec internals and payload validation.
pub type Result<T> = std::result::Result<T, ProtocolError>;

#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The channel decodes to a different message type than requested.
    #[error("Expected '{expected}' message, got '{actual}'")]
    TypeMismatch {
        expected: MessageType,
        actual: MessageType,
    },

    /// The codec has no serializer or parser for this message kind.
    #[error("Message type '{0}' is not supported by this protocol")]
    Unsupported(MessageType),

    /// No JSON schema is registered for the message type.
    #[error("No JSON schema registered for message type '{0}'")]
    NoSchema(MessageType),

    /// The payload does not conform to the registered schema.
    #[error("Payload does not match the '{message_type}' schema: {reason}")]
    SchemaViolation {
        message_type: MessageType,
        reason: String,
    },

    /// Payload is not valid JSON or does not have the expected shape.
    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload is not UTF-8 text.
    #[error("Payload is not valid UTF-8")]
    NotUtf8,

    /// A mandatory field is empty or missing.
    #[error("Missing or empty field: {0}")]
    MissingField(&'static str),

    /// A field is present but holds an unusable value.
    #[error("Invalid field '{field}': {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    /// Building a model value failed.
    #[error(transparent)]
    Model(#[from] wolk_core::Error),

    /// A base64 payload could not be decoded.
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl ProtocolError {
    pub(crate) fn invalid_field(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }
}
