//! Helpers shared by the codec implementations.

use serde_json::{Number, Value};
use wolk_core::model::{classify, ValueKind};
use wolk_core::{Message, MessageType};

use crate::error::{ProtocolError, Result};
use crate::protocol::Protocol;
use crate::wolkabout;

/// Log a failed serialization once and drop the error.
pub(crate) fn outbound<T>(protocol: &str, message_type: MessageType, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!(
                protocol = protocol,
                "Failed to serialize '{}' message: {}",
                message_type,
                e
            );
            None
        }
    }
}

/// Log a failed parse once and drop the error.
pub(crate) fn inbound<T>(protocol: &str, message_type: MessageType, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!(
                protocol = protocol,
                "Failed to parse '{}' message: {}",
                message_type,
                e
            );
            None
        }
    }
}

/// Check that `message` carries the expected type according to `protocol`.
pub(crate) fn expect_type<P: Protocol + ?Sized>(
    protocol: &P,
    message: &Message,
    expected: MessageType,
) -> Result<()> {
    let actual = protocol.message_type(message);
    if actual != expected {
        return Err(ProtocolError::TypeMismatch { expected, actual });
    }
    Ok(())
}

pub(crate) fn parse_json(message: &Message) -> Result<Value> {
    Ok(serde_json::from_slice(message.content())?)
}

pub(crate) fn text(message: &Message) -> Result<&str> {
    std::str::from_utf8(message.content()).map_err(|_| ProtocolError::NotUtf8)
}

/// Bare scalar payload with legacy quoting removed; must not be empty.
pub(crate) fn scalar(message: &Message, field: &'static str) -> Result<String> {
    let value = wolkabout::remove_quotes(text(message)?);
    if value.is_empty() {
        return Err(ProtocolError::MissingField(field));
    }
    Ok(value)
}

pub(crate) fn require(value: &str, field: &'static str) -> Result<()> {
    if value.is_empty() {
        return Err(ProtocolError::MissingField(field));
    }
    Ok(())
}

pub(crate) fn to_payload(value: &Value) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Encode a stored string value as the most specific JSON scalar.
pub(crate) fn typed_value(value: &str) -> Value {
    match classify(value) {
        ValueKind::Boolean => Value::Bool(value == "true"),
        ValueKind::UInt => value
            .parse::<u64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::from(value)),
        ValueKind::Int => value
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| Value::from(value)),
        ValueKind::Double => value
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| Value::from(value)),
        ValueKind::String => Value::from(value),
    }
}

/// Decode a JSON scalar back to its stored string form. Arrays, objects and
/// `null` have no scalar form.
pub(crate) fn scalar_value(value: &Value) -> Option<String> {
    match value {
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

pub(crate) fn string_array(value: &Value, field: &'static str) -> Result<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| ProtocolError::invalid_field(field, "expected an array"))?;
    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| ProtocolError::invalid_field(field, "expected an array of strings"))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_value() {
        assert_eq!(typed_value("true"), json!(true));
        assert_eq!(typed_value("42"), json!(42));
        assert_eq!(typed_value("-42"), json!(-42));
        assert_eq!(typed_value("2.5"), json!(2.5));
        assert_eq!(typed_value("warm"), json!("warm"));
        assert_eq!(typed_value("45.2,19.8"), json!("45.2,19.8"));
    }

    #[test]
    fn test_scalar_value() {
        assert_eq!(scalar_value(&json!(false)).as_deref(), Some("false"));
        assert_eq!(scalar_value(&json!(12)).as_deref(), Some("12"));
        assert_eq!(scalar_value(&json!("x")).as_deref(), Some("x"));
        assert_eq!(scalar_value(&json!(null)), None);
        assert_eq!(scalar_value(&json!([1])), None);
    }
}
