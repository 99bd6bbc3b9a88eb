//! Platform connectivity announcements.
//!
//! The connection status channel is global: `p2d/connection_status`, with
//! no device key.

use wolk_core::messages::PlatformStatusMessage;
use wolk_core::model::ConnectivityStatus;
use wolk_core::{Message, MessageObject, MessageType};

use crate::codec;
use crate::error::{ProtocolError, Result};
use crate::protocol::Protocol;
use crate::wolkabout::{Direction, CHANNEL_DELIMITER};

/// `p2d/connection_status`.
pub fn connection_status_channel() -> String {
    format!(
        "{}{}{}",
        Direction::PlatformToDevice.as_str(),
        CHANNEL_DELIMITER,
        MessageType::PlatformConnectionStatus.as_str()
    )
}

#[derive(Debug, Default)]
pub struct WolkaboutPlatformStatusProtocol;

impl WolkaboutPlatformStatusProtocol {
    pub fn new() -> Self {
        Self
    }

    /// Serialize a status announcement. The device key does not appear in
    /// the channel.
    pub fn make_outbound_message(&self, _device_key: &str, message: &MessageObject) -> Option<Message> {
        codec::outbound(self.name(), message.message_type(), serialize(message))
    }

    pub fn parse_platform_status(&self, message: &Message) -> Option<PlatformStatusMessage> {
        codec::inbound(
            self.name(),
            MessageType::PlatformConnectionStatus,
            self.platform_status(message),
        )
    }

    fn platform_status(&self, message: &Message) -> Result<PlatformStatusMessage> {
        codec::expect_type(self, message, MessageType::PlatformConnectionStatus)?;
        let token = codec::scalar(message, "status")?;
        let status = ConnectivityStatus::from_token(&token)
            .ok_or_else(|| ProtocolError::invalid_field("status", format!("unknown status '{}'", token)))?;
        Ok(PlatformStatusMessage::new(status))
    }
}

impl Protocol for WolkaboutPlatformStatusProtocol {
    fn name(&self) -> &'static str {
        "platform_status"
    }

    fn inbound_channels(&self) -> Vec<String> {
        vec![connection_status_channel()]
    }

    fn inbound_channels_for_device(&self, _device_key: &str) -> Vec<String> {
        Vec::new()
    }
}

fn serialize(message: &MessageObject) -> Result<Message> {
    let MessageObject::PlatformStatus(status) = message else {
        return Err(ProtocolError::Unsupported(message.message_type()));
    };
    let token = status.status.as_str();
    if token.is_empty() {
        return Err(ProtocolError::MissingField("status"));
    }
    Ok(Message::new(token, connection_status_channel()))
}
