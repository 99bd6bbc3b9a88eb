//! Topic grammar shared by every codec.
//!
//! Channels have the form `<direction>/<device key>/<type token>`. All
//! helpers here are pure string operations on the channel of a [`Message`].

use wolk_core::{DeviceType, Message, MessageType};

pub const CHANNEL_DELIMITER: char = '/';
pub const CHANNEL_WILDCARD: &str = "+";
pub const DEVICE_TO_PLATFORM_DIRECTION: &str = "d2p";
pub const PLATFORM_TO_DEVICE_DIRECTION: &str = "p2d";
pub const GATEWAY_TO_PLATFORM_DIRECTION: &str = "g2p";
pub const PLATFORM_TO_GATEWAY_DIRECTION: &str = "p2g";
pub const TIMESTAMP_KEY: &str = "timestamp";

/// Which way a channel flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    DeviceToPlatform,
    PlatformToDevice,
    GatewayToPlatform,
    PlatformToGateway,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeviceToPlatform => DEVICE_TO_PLATFORM_DIRECTION,
            Self::PlatformToDevice => PLATFORM_TO_DEVICE_DIRECTION,
            Self::GatewayToPlatform => GATEWAY_TO_PLATFORM_DIRECTION,
            Self::PlatformToGateway => PLATFORM_TO_GATEWAY_DIRECTION,
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            DEVICE_TO_PLATFORM_DIRECTION => Some(Self::DeviceToPlatform),
            PLATFORM_TO_DEVICE_DIRECTION => Some(Self::PlatformToDevice),
            GATEWAY_TO_PLATFORM_DIRECTION => Some(Self::GatewayToPlatform),
            PLATFORM_TO_GATEWAY_DIRECTION => Some(Self::PlatformToGateway),
            _ => None,
        }
    }

    pub fn device_type(&self) -> DeviceType {
        match self {
            Self::DeviceToPlatform | Self::PlatformToDevice => DeviceType::Standalone,
            Self::GatewayToPlatform | Self::PlatformToGateway => DeviceType::Gateway,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Direction of a channel, taken from the segment before the first delimiter.
pub fn direction(message: &Message) -> Option<Direction> {
    let channel = message.channel();
    let token = channel
        .split_once(CHANNEL_DELIMITER)
        .map_or(channel, |(first, _)| first);
    Direction::from_token(token)
}

/// Message type from the segment after the last delimiter.
pub fn message_type(message: &Message) -> MessageType {
    let channel = message.channel();
    let token = channel
        .rsplit_once(CHANNEL_DELIMITER)
        .map_or(channel, |(_, last)| last);
    MessageType::from_token(token)
}

/// Device type implied by the channel direction.
pub fn device_type(message: &Message) -> DeviceType {
    direction(message).map_or(DeviceType::None, |d| d.device_type())
}

/// Everything strictly between the first and the last delimiter.
///
/// Channels with fewer than two delimiters have no key and yield an empty
/// string.
pub fn device_key(message: &Message) -> String {
    let channel = message.channel();
    match (channel.find(CHANNEL_DELIMITER), channel.rfind(CHANNEL_DELIMITER)) {
        (Some(first), Some(last)) if first < last => channel[first + 1..last].to_string(),
        _ => String::new(),
    }
}

/// Strip every `"` from a scalar payload.
///
/// Older platforms wrap bare string payloads in escaped quotes. This is a
/// plain character removal, not JSON unescaping.
pub fn remove_quotes(value: &str) -> String {
    value.replace('"', "")
}

/// Build `<direction>/<device key>/<type token>`.
pub fn channel(direction: Direction, device_key: &str, message_type: MessageType) -> String {
    format!(
        "{}{}{}{}{}",
        direction.as_str(),
        CHANNEL_DELIMITER,
        device_key,
        CHANNEL_DELIMITER,
        message_type.as_str()
    )
}

/// Build `<direction>/<device key>/+`, matching every type for one device.
pub fn wildcard_channel(direction: Direction, device_key: &str) -> String {
    format!(
        "{}{}{}{}{}",
        direction.as_str(),
        CHANNEL_DELIMITER,
        device_key,
        CHANNEL_DELIMITER,
        CHANNEL_WILDCARD
    )
}
