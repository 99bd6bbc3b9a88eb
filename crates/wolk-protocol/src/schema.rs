//! JSON schemas for structured payloads.
//!
//! [`SchemaValidator`] compiles one schema per message type that has one.
//! Codecs own their validator; [`validate_json_payload`] builds a fresh one
//! per call.

use std::collections::HashMap;

use jsonschema::Validator;
use serde_json::{json, Value};
use wolk_core::model::ParameterName;
use wolk_core::{Message, MessageType};

use crate::error::{ProtocolError, Result};
use crate::wolkabout;

fn non_blank_string_array() -> Value {
    json!({
        "type": "array",
        "items": { "type": "string", "pattern": "\\S" }
    })
}

fn parameter_names() -> Vec<&'static str> {
    ParameterName::ALL.iter().map(|name| name.as_str()).collect()
}

/// The schema registered for a message type, if any.
pub fn schema_for(message_type: MessageType) -> Option<Value> {
    let schema = match message_type {
        MessageType::FeedValues => json!({
            "type": "array",
            "items": {
                "type": "object",
                "required": ["timestamp"],
                "properties": {
                    "timestamp": { "type": "number" }
                }
            }
        }),
        MessageType::ParameterSync => json!({
            "type": "object",
            "propertyNames": { "enum": parameter_names() }
        }),
        MessageType::SynchronizeParameters => json!({
            "type": "array",
            "items": { "enum": parameter_names() }
        }),
        MessageType::DetailsSynchronizationResponse => json!({
            "type": "object",
            "required": ["feeds", "attributes"],
            "properties": {
                "feeds": non_blank_string_array(),
                "attributes": non_blank_string_array()
            }
        }),
        MessageType::FileUploadInit => json!({
            "type": "object",
            "required": ["name", "size", "hash"],
            "properties": {
                "name": { "type": "string" },
                "size": { "type": "number" },
                "hash": { "type": "string", "pattern": "^[0-9a-fA-F]{32}$" }
            }
        }),
        MessageType::FileDelete | MessageType::ChildrenSynchronizationResponse => {
            non_blank_string_array()
        }
        MessageType::RegisteredDevicesResponse => json!({
            "type": "object",
            "required": ["timestampFrom", "matchingDevices"],
            "properties": {
                "timestampFrom": { "type": "number" },
                "deviceType": { "type": "string" },
                "externalId": { "type": "string" },
                "matchingDevices": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "required": ["deviceKey"],
                        "properties": {
                            "deviceKey": { "type": "string", "pattern": "\\S" },
                            "externalId": { "type": "string" },
                            "deviceType": { "type": "string" }
                        }
                    }
                }
            }
        }),
        _ => return None,
    };
    Some(schema)
}

/// Every message type that has a schema.
pub const SCHEMA_TYPES: [MessageType; 8] = [
    MessageType::FeedValues,
    MessageType::ParameterSync,
    MessageType::SynchronizeParameters,
    MessageType::DetailsSynchronizationResponse,
    MessageType::FileUploadInit,
    MessageType::FileDelete,
    MessageType::ChildrenSynchronizationResponse,
    MessageType::RegisteredDevicesResponse,
];

/// Compiled schemas keyed by message type.
pub struct SchemaValidator {
    validators: HashMap<MessageType, Validator>,
}

impl SchemaValidator {
    pub fn new() -> Self {
        let mut validators = HashMap::new();
        for message_type in SCHEMA_TYPES {
            let Some(schema) = schema_for(message_type) else {
                continue;
            };
            match jsonschema::validator_for(&schema) {
                Ok(validator) => {
                    validators.insert(message_type, validator);
                }
                Err(e) => {
                    tracing::error!("Failed to compile '{}' schema: {}", message_type, e);
                }
            }
        }

        Self { validators }
    }

    pub fn has_schema(&self, message_type: MessageType) -> bool {
        self.validators.contains_key(&message_type)
    }

    /// Validate an already parsed payload against the schema for its type.
    pub fn validate_value(&self, message_type: MessageType, payload: &Value) -> Result<()> {
        let validator = self
            .validators
            .get(&message_type)
            .ok_or(ProtocolError::NoSchema(message_type))?;

        if let Some(error) = validator.iter_errors(payload).next() {
            return Err(ProtocolError::SchemaViolation {
                message_type,
                reason: error.to_string(),
            });
        }
        Ok(())
    }

    /// Parse the payload of `message` and validate it against the schema
    /// chosen by its channel. Returns the parsed payload.
    pub fn validate(&self, message: &Message) -> Result<Value> {
        let message_type = wolkabout::message_type(message);
        if !self.has_schema(message_type) {
            return Err(ProtocolError::NoSchema(message_type));
        }

        let payload: Value = serde_json::from_slice(message.content())?;
        self.validate_value(message_type, &payload)?;
        Ok(payload)
    }
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a message payload against the schema for its type.
///
/// Fails when the type has no schema, when the payload is not JSON, or when
/// it does not conform.
pub fn validate_json_payload(message: &Message) -> Result<()> {
    SchemaValidator::new().validate(message).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_schema_compiles() {
        let validator = SchemaValidator::new();
        for message_type in SCHEMA_TYPES {
            assert!(validator.has_schema(message_type), "{}", message_type);
        }
        assert!(!validator.has_schema(MessageType::TimeSync));
    }

    #[test]
    fn test_feed_values_schema() {
        let ok = Message::new(r#"[{"timestamp":1,"T":2.5}]"#, "p2d/KEY/feed_values");
        assert!(validate_json_payload(&ok).is_ok());

        let missing = Message::new(r#"[{"T":2.5}]"#, "p2d/KEY/feed_values");
        assert!(matches!(
            validate_json_payload(&missing),
            Err(ProtocolError::SchemaViolation { .. })
        ));
    }

    #[test]
    fn test_parameter_names_restricted() {
        let ok = Message::new(r#"{"FIRMWARE_VERSION":"1.0"}"#, "p2d/KEY/parameters");
        assert!(validate_json_payload(&ok).is_ok());

        let bad = Message::new(r#"{"NOT_A_PARAMETER":"1.0"}"#, "p2d/KEY/parameters");
        assert!(validate_json_payload(&bad).is_err());
    }

    #[test]
    fn test_file_upload_hash() {
        let ok = Message::new(
            r#"{"name":"f","size":3,"hash":"0123456789abcdef0123456789abcdef"}"#,
            "p2d/KEY/file_upload_initiate",
        );
        assert!(validate_json_payload(&ok).is_ok());

        let short = Message::new(r#"{"name":"f","size":3,"hash":"123"}"#, "p2d/KEY/file_upload_initiate");
        assert!(validate_json_payload(&short).is_err());
    }

    #[test]
    fn test_blank_strings_rejected() {
        let bad = Message::new(r#"["a", "  "]"#, "p2d/KEY/file_delete");
        assert!(validate_json_payload(&bad).is_err());
    }

    #[test]
    fn test_registered_devices_schema() {
        let ok = Message::new(
            r#"{"timestampFrom":0,"matchingDevices":[{"deviceKey":"D1","externalId":"E"}]}"#,
            "p2d/KEY/registered_devices",
        );
        assert!(validate_json_payload(&ok).is_ok());

        let bad = Message::new(
            r#"{"timestampFrom":0,"matchingDevices":[{"externalId":"E"}]}"#,
            "p2d/KEY/registered_devices",
        );
        assert!(validate_json_payload(&bad).is_err());
    }

    #[test]
    fn test_no_schema_or_bad_json() {
        let time = Message::new(r#"{"timestamp":1}"#, "p2d/KEY/time");
        assert!(matches!(validate_json_payload(&time), Err(ProtocolError::NoSchema(_))));

        let garbage = Message::new("{", "p2d/KEY/feed_values");
        assert!(matches!(validate_json_payload(&garbage), Err(ProtocolError::Json(_))));
    }
}
