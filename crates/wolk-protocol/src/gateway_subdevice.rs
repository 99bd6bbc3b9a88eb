//! Subdevice traffic relayed through a gateway.
//!
//! A subdevice's own message is wrapped as `{"device": <key>, "payload":
//! <body>}` and published on `g2p/<gateway key>/<type>`. The platform answers
//! on `p2g/<gateway key>/<type>` with either one wrapped object or an array
//! of them. File binary responses travel base64 encoded inside the wrapper.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use wolk_core::messages::GatewaySubdeviceMessage;
use wolk_core::{Message, MessageType};

use crate::codec;
use crate::error::{ProtocolError, Result};
use crate::protocol::Protocol;
use crate::wolkabout::{self, Direction};

const DEVICE_KEY: &str = "device";
const PAYLOAD_KEY: &str = "payload";

/// Message kinds a subdevice may exchange through the gateway.
pub const SUBDEVICE_MESSAGE_TYPES: [MessageType; 26] = [
    MessageType::FeedValues,
    MessageType::PullFeedValues,
    MessageType::FeedRegistration,
    MessageType::FeedRemoval,
    MessageType::AttributeRegistration,
    MessageType::ParameterSync,
    MessageType::PullParameters,
    MessageType::SynchronizeParameters,
    MessageType::TimeSync,
    MessageType::DetailsSynchronizationRequest,
    MessageType::DetailsSynchronizationResponse,
    MessageType::FileUploadInit,
    MessageType::FileUploadStatus,
    MessageType::FileUploadAbort,
    MessageType::FileBinaryRequest,
    MessageType::FileBinaryResponse,
    MessageType::FileUrlDownloadInit,
    MessageType::FileUrlDownloadAbort,
    MessageType::FileUrlDownloadStatus,
    MessageType::FileListRequest,
    MessageType::FileListResponse,
    MessageType::FileDelete,
    MessageType::FilePurge,
    MessageType::FirmwareUpdateInstall,
    MessageType::FirmwareUpdateStatus,
    MessageType::FirmwareUpdateAbort,
];

pub fn is_subdevice_message_type(message_type: MessageType) -> bool {
    SUBDEVICE_MESSAGE_TYPES.contains(&message_type)
}

#[derive(Debug, Default)]
pub struct WolkaboutGatewaySubdeviceProtocol;

impl WolkaboutGatewaySubdeviceProtocol {
    pub fn new() -> Self {
        Self
    }

    /// Wrap a subdevice message for the gateway identified by `gateway_key`.
    pub fn make_outbound_message(
        &self,
        gateway_key: &str,
        message: &GatewaySubdeviceMessage,
    ) -> Option<Message> {
        codec::outbound(self.name(), message.message_type(), wrap(gateway_key, message))
    }

    /// Unwrap every subdevice message carried by `message`. Malformed
    /// members are logged and skipped.
    pub fn parse_messages(&self, message: &Message) -> Vec<GatewaySubdeviceMessage> {
        let message_type = self.message_type(message);
        let Some((direction, elements)) =
            codec::inbound(self.name(), message_type, self.elements(message, message_type))
        else {
            return Vec::new();
        };

        elements
            .iter()
            .filter_map(|element| {
                codec::inbound(
                    self.name(),
                    message_type,
                    unwrap(element, direction, message_type),
                )
            })
            .collect()
    }

    fn elements(&self, message: &Message, message_type: MessageType) -> Result<(Direction, Vec<Value>)> {
        if message_type == MessageType::Unknown {
            return Err(ProtocolError::Unsupported(message_type));
        }
        let direction = match wolkabout::direction(message) {
            Some(Direction::PlatformToGateway) => Direction::PlatformToDevice,
            Some(Direction::GatewayToPlatform) => Direction::DeviceToPlatform,
            _ => {
                return Err(ProtocolError::invalid_field(
                    "channel",
                    format!("'{}' is not a gateway channel", message.channel()),
                ))
            }
        };

        match codec::parse_json(message)? {
            Value::Array(elements) => Ok((direction, elements)),
            object @ Value::Object(_) => Ok((direction, vec![object])),
            _ => Err(ProtocolError::invalid_field(
                PAYLOAD_KEY,
                "expected an object or an array of objects",
            )),
        }
    }
}

impl Protocol for WolkaboutGatewaySubdeviceProtocol {
    fn name(&self) -> &'static str {
        "gateway_subdevice"
    }

    fn inbound_channels_for_device(&self, gateway_key: &str) -> Vec<String> {
        vec![wolkabout::wildcard_channel(Direction::PlatformToGateway, gateway_key)]
    }

    fn response_channel_for_message(
        &self,
        message_type: MessageType,
        gateway_key: &str,
    ) -> Option<String> {
        let response = match message_type {
            MessageType::PullFeedValues => MessageType::FeedValues,
            MessageType::PullParameters | MessageType::SynchronizeParameters => {
                MessageType::ParameterSync
            }
            MessageType::DetailsSynchronizationRequest => {
                MessageType::DetailsSynchronizationResponse
            }
            MessageType::FileBinaryRequest => MessageType::FileBinaryResponse,
            _ => return None,
        };
        Some(wolkabout::channel(Direction::PlatformToGateway, gateway_key, response))
    }
}

fn wrap(gateway_key: &str, message: &GatewaySubdeviceMessage) -> Result<Message> {
    codec::require(gateway_key, "gateway key")?;

    let message_type = message.message_type();
    if !is_subdevice_message_type(message_type) {
        return Err(ProtocolError::Unsupported(message_type));
    }
    let device_key = wolkabout::device_key(&message.message);
    codec::require(&device_key, "subdevice key")?;

    let content = message.message.content();
    let payload = if message_type == MessageType::FileBinaryResponse {
        Value::String(STANDARD.encode(content))
    } else if content.is_empty() {
        Value::String(String::new())
    } else {
        serde_json::from_slice(content).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(content).into_owned())
        })
    };

    let body = json!({ DEVICE_KEY: device_key, PAYLOAD_KEY: payload });
    Ok(Message::new(
        codec::to_payload(&body)?,
        wolkabout::channel(Direction::GatewayToPlatform, gateway_key, message_type),
    ))
}

fn unwrap(element: &Value, direction: Direction, message_type: MessageType) -> Result<GatewaySubdeviceMessage> {
    let device_key = element
        .get(DEVICE_KEY)
        .and_then(Value::as_str)
        .filter(|key| !key.is_empty())
        .ok_or(ProtocolError::MissingField(DEVICE_KEY))?;
    let payload = element
        .get(PAYLOAD_KEY)
        .ok_or(ProtocolError::MissingField(PAYLOAD_KEY))?;

    let content = match payload {
        Value::String(encoded) if message_type == MessageType::FileBinaryResponse => {
            STANDARD.decode(encoded)?
        }
        _ if message_type == MessageType::FileBinaryResponse => {
            return Err(ProtocolError::invalid_field(PAYLOAD_KEY, "expected a base64 string"));
        }
        Value::String(text) => text.clone().into_bytes(),
        other => codec::to_payload(other)?.into_bytes(),
    };

    Ok(GatewaySubdeviceMessage::new(Message::new(
        content,
        wolkabout::channel(direction, device_key, message_type),
    )))
}
