//! Feeds, attributes, parameters and time synchronization.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use wolk_core::messages::{
    AttributeRegistrationMessage, DetailsSynchronizationRequestMessage,
    DetailsSynchronizationResponseMessage, FeedRegistrationMessage, FeedRemovalMessage,
    FeedValuesMessage, ParametersPullMessage, ParametersUpdateMessage, PullFeedValuesMessage,
    SynchronizeParametersMessage, TimeSyncMessage,
};
use wolk_core::model::{ParameterName, Reading};
use wolk_core::{Message, MessageObject, MessageType};

use crate::codec;
use crate::error::{ProtocolError, Result};
use crate::protocol::Protocol;
use crate::schema::SchemaValidator;
use crate::wire::{AttributeJson, FeedJson};
use crate::wolkabout::{self, Direction, TIMESTAMP_KEY};

/// Message kinds a device receives from the platform.
const INBOUND_TYPES: [MessageType; 4] = [
    MessageType::FeedValues,
    MessageType::ParameterSync,
    MessageType::TimeSync,
    MessageType::DetailsSynchronizationResponse,
];

/// Codec for device data: feed values, feed and attribute registration,
/// parameters and time.
pub struct WolkaboutDataProtocol {
    validator: SchemaValidator,
}

impl WolkaboutDataProtocol {
    pub fn new() -> Self {
        Self {
            validator: SchemaValidator::new(),
        }
    }

    /// Serialize a data message for `device_key`. Returns `None` and logs
    /// the reason when a mandatory field is missing or the kind is not a
    /// data message.
    pub fn make_outbound_message(&self, device_key: &str, message: &MessageObject) -> Option<Message> {
        codec::outbound(self.name(), message.message_type(), serialize(device_key, message))
    }

    pub fn parse_feed_values(&self, message: &Message) -> Option<FeedValuesMessage> {
        codec::inbound(self.name(), MessageType::FeedValues, self.feed_values(message))
    }

    pub fn parse_parameters(&self, message: &Message) -> Option<ParametersUpdateMessage> {
        codec::inbound(self.name(), MessageType::ParameterSync, self.parameters(message))
    }

    pub fn parse_time_sync(&self, message: &Message) -> Option<TimeSyncMessage> {
        codec::inbound(self.name(), MessageType::TimeSync, self.time_sync(message))
    }

    pub fn parse_details_synchronization(
        &self,
        message: &Message,
    ) -> Option<DetailsSynchronizationResponseMessage> {
        codec::inbound(
            self.name(),
            MessageType::DetailsSynchronizationResponse,
            self.details_synchronization(message),
        )
    }

    pub fn parse_feed_registration(&self, message: &Message) -> Option<FeedRegistrationMessage> {
        codec::inbound(self.name(), MessageType::FeedRegistration, self.feed_registration(message))
    }

    pub fn parse_feed_removal(&self, message: &Message) -> Option<FeedRemovalMessage> {
        codec::inbound(self.name(), MessageType::FeedRemoval, self.feed_removal(message))
    }

    pub fn parse_attribute_registration(
        &self,
        message: &Message,
    ) -> Option<AttributeRegistrationMessage> {
        codec::inbound(
            self.name(),
            MessageType::AttributeRegistration,
            self.attribute_registration(message),
        )
    }

    pub fn parse_synchronize_parameters(
        &self,
        message: &Message,
    ) -> Option<SynchronizeParametersMessage> {
        codec::inbound(
            self.name(),
            MessageType::SynchronizeParameters,
            self.synchronize_parameters(message),
        )
    }

    /// Parse any data message, choosing the parser from the channel.
    pub fn parse(&self, message: &Message) -> Option<MessageObject> {
        match self.message_type(message) {
            MessageType::FeedValues => self.parse_feed_values(message).map(Into::into),
            MessageType::ParameterSync => self.parse_parameters(message).map(Into::into),
            MessageType::TimeSync => self.parse_time_sync(message).map(Into::into),
            MessageType::DetailsSynchronizationResponse => {
                self.parse_details_synchronization(message).map(Into::into)
            }
            MessageType::FeedRegistration => self.parse_feed_registration(message).map(Into::into),
            MessageType::FeedRemoval => self.parse_feed_removal(message).map(Into::into),
            MessageType::AttributeRegistration => {
                self.parse_attribute_registration(message).map(Into::into)
            }
            MessageType::SynchronizeParameters => {
                self.parse_synchronize_parameters(message).map(Into::into)
            }
            other => codec::inbound(self.name(), other, Err(ProtocolError::Unsupported(other))),
        }
    }

    fn feed_values(&self, message: &Message) -> Result<FeedValuesMessage> {
        codec::expect_type(self, message, MessageType::FeedValues)?;
        let payload = self.validator.validate(message)?;
        Ok(FeedValuesMessage::new(readings_from_json(&payload)?))
    }

    fn parameters(&self, message: &Message) -> Result<ParametersUpdateMessage> {
        codec::expect_type(self, message, MessageType::ParameterSync)?;
        let payload = self.validator.validate(message)?;
        let object = payload
            .as_object()
            .ok_or_else(|| ProtocolError::invalid_field("parameters", "expected an object"))?;

        let mut parameters = Vec::with_capacity(object.len());
        for (name, value) in object {
            let parameter = ParameterName::from_token(name).ok_or_else(|| {
                ProtocolError::invalid_field("parameters", format!("unknown parameter '{}'", name))
            })?;
            let value = match value {
                Value::Null => String::new(),
                other => codec::scalar_value(other).ok_or_else(|| {
                    ProtocolError::invalid_field(
                        "parameters",
                        format!("value of '{}' is not a string, boolean, number or null", name),
                    )
                })?,
            };
            parameters.push((parameter, value));
        }
        Ok(ParametersUpdateMessage::new(parameters))
    }

    fn time_sync(&self, message: &Message) -> Result<TimeSyncMessage> {
        codec::expect_type(self, message, MessageType::TimeSync)?;
        let payload = codec::parse_json(message)?;
        let timestamp = payload
            .get(TIMESTAMP_KEY)
            .and_then(Value::as_u64)
            .ok_or_else(|| ProtocolError::invalid_field("timestamp", "expected an unsigned integer"))?;
        Ok(TimeSyncMessage::new(timestamp))
    }

    fn details_synchronization(&self, message: &Message) -> Result<DetailsSynchronizationResponseMessage> {
        codec::expect_type(self, message, MessageType::DetailsSynchronizationResponse)?;
        let payload = self.validator.validate(message)?;
        Ok(DetailsSynchronizationResponseMessage::new(
            codec::string_array(&payload["feeds"], "feeds")?,
            codec::string_array(&payload["attributes"], "attributes")?,
        ))
    }

    fn feed_registration(&self, message: &Message) -> Result<FeedRegistrationMessage> {
        codec::expect_type(self, message, MessageType::FeedRegistration)?;
        let feeds: Vec<FeedJson> = serde_json::from_slice(message.content())?;
        let feeds = feeds
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>>>()?;
        Ok(FeedRegistrationMessage::new(feeds))
    }

    fn feed_removal(&self, message: &Message) -> Result<FeedRemovalMessage> {
        codec::expect_type(self, message, MessageType::FeedRemoval)?;
        let payload = codec::parse_json(message)?;
        Ok(FeedRemovalMessage::new(codec::string_array(&payload, "references")?))
    }

    fn attribute_registration(&self, message: &Message) -> Result<AttributeRegistrationMessage> {
        codec::expect_type(self, message, MessageType::AttributeRegistration)?;
        let attributes: Vec<AttributeJson> = serde_json::from_slice(message.content())?;
        let attributes = attributes
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<_>>>()?;
        Ok(AttributeRegistrationMessage::new(attributes))
    }

    fn synchronize_parameters(&self, message: &Message) -> Result<SynchronizeParametersMessage> {
        codec::expect_type(self, message, MessageType::SynchronizeParameters)?;
        let payload = self.validator.validate(message)?;
        let names = codec::string_array(&payload, "parameters")?
            .iter()
            .map(|name| {
                ParameterName::from_token(name).ok_or_else(|| {
                    ProtocolError::invalid_field("parameters", format!("unknown parameter '{}'", name))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(SynchronizeParametersMessage::new(names))
    }
}

impl Default for WolkaboutDataProtocol {
    fn default() -> Self {
        Self::new()
    }
}

impl Protocol for WolkaboutDataProtocol {
    fn name(&self) -> &'static str {
        "data"
    }

    fn inbound_channels_for_device(&self, device_key: &str) -> Vec<String> {
        INBOUND_TYPES
            .iter()
            .map(|t| wolkabout::channel(Direction::PlatformToDevice, device_key, *t))
            .collect()
    }

    fn response_channel_for_message(
        &self,
        message_type: MessageType,
        device_key: &str,
    ) -> Option<String> {
        let response = match message_type {
            MessageType::PullFeedValues => MessageType::FeedValues,
            MessageType::PullParameters | MessageType::SynchronizeParameters => {
                MessageType::ParameterSync
            }
            MessageType::DetailsSynchronizationRequest => {
                MessageType::DetailsSynchronizationResponse
            }
            _ => return None,
        };
        Some(wolkabout::channel(Direction::PlatformToDevice, device_key, response))
    }
}

fn serialize(device_key: &str, message: &MessageObject) -> Result<Message> {
    codec::require(device_key, "device key")?;

    let payload = match message {
        MessageObject::FeedValues(m) => feed_values_payload(m)?,
        MessageObject::FeedRegistration(m) => feed_registration_payload(m)?,
        MessageObject::FeedRemoval(m) => feed_removal_payload(m)?,
        MessageObject::AttributeRegistration(m) => attribute_registration_payload(m)?,
        MessageObject::ParametersUpdate(m) => parameters_payload(m)?,
        MessageObject::SynchronizeParameters(m) => synchronize_parameters_payload(m)?,
        MessageObject::PullFeedValues(PullFeedValuesMessage)
        | MessageObject::ParametersPull(ParametersPullMessage)
        | MessageObject::DetailsSynchronizationRequest(DetailsSynchronizationRequestMessage) => {
            String::new()
        }
        other => return Err(ProtocolError::Unsupported(other.message_type())),
    };

    Ok(Message::new(
        payload,
        wolkabout::channel(Direction::DeviceToPlatform, device_key, message.message_type()),
    ))
}

/// `[{"timestamp": ts, "<reference>": value, ...}, ...]`, one object per
/// distinct timestamp in ascending order.
fn feed_values_payload(message: &FeedValuesMessage) -> Result<String> {
    if message.readings.is_empty() {
        return Err(ProtocolError::MissingField("readings"));
    }

    let mut by_timestamp: BTreeMap<u64, Map<String, Value>> = BTreeMap::new();
    for reading in &message.readings {
        codec::require(reading.reference(), "reading reference")?;
        if reading.reference() == TIMESTAMP_KEY {
            return Err(ProtocolError::invalid_field(
                "reading reference",
                format!("'{}' is reserved", TIMESTAMP_KEY),
            ));
        }
        if reading.string_values().is_empty() {
            return Err(ProtocolError::MissingField("reading values"));
        }

        let value = if reading.is_multi() {
            Value::Array(reading.string_values().iter().map(|v| codec::typed_value(v)).collect())
        } else {
            codec::typed_value(reading.string_value())
        };

        by_timestamp
            .entry(reading.timestamp())
            .or_insert_with(|| {
                let mut object = Map::new();
                object.insert(TIMESTAMP_KEY.to_string(), Value::from(reading.timestamp()));
                object
            })
            .insert(reading.reference().to_string(), value);
    }

    codec::to_payload(&Value::Array(by_timestamp.into_values().map(Value::Object).collect()))
}

fn readings_from_json(payload: &Value) -> Result<Vec<Reading>> {
    let elements = payload
        .as_array()
        .ok_or_else(|| ProtocolError::invalid_field("feed values", "expected an array"))?;

    let mut readings = Vec::new();
    for element in elements {
        let object = element
            .as_object()
            .ok_or_else(|| ProtocolError::invalid_field("feed values", "expected an array of objects"))?;
        let timestamp = object
            .get(TIMESTAMP_KEY)
            .and_then(Value::as_u64)
            .ok_or_else(|| ProtocolError::invalid_field("timestamp", "expected an unsigned integer"))?;

        for (reference, value) in object.iter().filter(|(key, _)| key.as_str() != TIMESTAMP_KEY) {
            let reading = match value {
                Value::Array(items) => {
                    let values = items
                        .iter()
                        .map(|item| match item {
                            Value::Number(n) => Ok(n.to_string()),
                            _ => Err(ProtocolError::invalid_field(
                                "feed values",
                                format!("'{}' holds a non-numeric array member", reference),
                            )),
                        })
                        .collect::<Result<Vec<_>>>()?;
                    Reading::with_values(reference.as_str(), values, timestamp)?
                }
                other => {
                    let value = codec::scalar_value(other).ok_or_else(|| {
                        ProtocolError::invalid_field(
                            "feed values",
                            format!("'{}' holds an unsupported value", reference),
                        )
                    })?;
                    Reading::new(reference.as_str(), value, timestamp)
                }
            };
            readings.push(reading);
        }
    }
    Ok(readings)
}

fn feed_registration_payload(message: &FeedRegistrationMessage) -> Result<String> {
    if message.feeds.is_empty() {
        return Err(ProtocolError::MissingField("feeds"));
    }
    let feeds: Vec<FeedJson> = message.feeds.iter().map(FeedJson::from).collect();
    Ok(serde_json::to_string(&feeds)?)
}

fn feed_removal_payload(message: &FeedRemovalMessage) -> Result<String> {
    if message.references.is_empty() {
        return Err(ProtocolError::MissingField("references"));
    }
    for reference in &message.references {
        codec::require(reference, "feed reference")?;
    }
    Ok(serde_json::to_string(&message.references)?)
}

fn attribute_registration_payload(message: &AttributeRegistrationMessage) -> Result<String> {
    if message.attributes.is_empty() {
        return Err(ProtocolError::MissingField("attributes"));
    }
    let attributes: Vec<AttributeJson> = message.attributes.iter().map(AttributeJson::from).collect();
    Ok(serde_json::to_string(&attributes)?)
}

fn parameters_payload(message: &ParametersUpdateMessage) -> Result<String> {
    if message.parameters.is_empty() {
        return Err(ProtocolError::MissingField("parameters"));
    }
    let object: Map<String, Value> = message
        .parameters
        .iter()
        .map(|(name, value)| (name.as_str().to_string(), codec::typed_value(value)))
        .collect();
    codec::to_payload(&Value::Object(object))
}

fn synchronize_parameters_payload(message: &SynchronizeParametersMessage) -> Result<String> {
    if message.parameters.is_empty() {
        return Err(ProtocolError::MissingField("parameters"));
    }
    let names: Vec<&str> = message.parameters.iter().map(|name| name.as_str()).collect();
    Ok(serde_json::to_string(&names)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_values_grouped_by_timestamp() {
        let message = FeedValuesMessage::new(vec![
            Reading::new("T", 23.5, 2),
            Reading::new("SW", true, 1),
            Reading::new("H", 40u64, 2),
        ]);
        let payload = feed_values_payload(&message).unwrap();
        let json: Value = serde_json::from_str(&payload).unwrap();

        assert_eq!(json[0]["timestamp"], 1);
        assert_eq!(json[0]["SW"], true);
        assert_eq!(json[1]["timestamp"], 2);
        assert_eq!(json[1]["T"], 23.5);
        assert_eq!(json[1]["H"], 40);
    }

    #[test]
    fn test_non_numeric_array_rejects_whole_message() {
        let payload: Value =
            serde_json::from_str(r#"[{"timestamp":1,"T":1,"ACL":[1,"x",3]}]"#).unwrap();
        assert!(readings_from_json(&payload).is_err());
    }

    #[test]
    fn test_response_channels() {
        let protocol = WolkaboutDataProtocol::new();
        assert_eq!(
            protocol.response_channel_for_message(MessageType::PullParameters, "KEY").as_deref(),
            Some("p2d/KEY/parameters")
        );
        assert_eq!(protocol.response_channel_for_message(MessageType::FeedValues, "KEY"), None);
    }
}
