//! Platform-level messages: errors, connection status and wrapped
//! subdevice traffic.

use chrono::{DateTime, Utc};

use crate::message::Message;
use crate::model::ConnectivityStatus;
use crate::types::MessageType;

/// Error text the platform sent about one device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage {
    /// Device the channel named.
    pub device_key: String,
    pub message: String,
    /// When the message was parsed.
    pub arrival_time: DateTime<Utc>,
}

impl ErrorMessage {
    /// Stamp the error with the current time.
    pub fn new(device_key: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            device_key: device_key.into(),
            message: message.into(),
            arrival_time: Utc::now(),
        }
    }
}

/// Gateway connection state towards the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformStatusMessage {
    pub status: ConnectivityStatus,
}

impl PlatformStatusMessage {
    pub fn new(status: ConnectivityStatus) -> Self {
        Self { status }
    }
}

/// A subdevice's own envelope, carried through the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewaySubdeviceMessage {
    pub message: Message,
}

impl GatewaySubdeviceMessage {
    pub fn new(message: Message) -> Self {
        Self { message }
    }

    /// Type of the wrapped message, taken from the last segment of its
    /// channel.
    pub fn message_type(&self) -> MessageType {
        let channel = self.message.channel();
        let token = channel.rsplit('/').next().unwrap_or(channel);
        MessageType::from_token(token)
    }

    pub fn into_message(self) -> Message {
        self.message
    }
}
