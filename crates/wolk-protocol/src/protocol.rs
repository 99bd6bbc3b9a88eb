//! The contract shared by every codec.

use wolk_core::{DeviceType, Message, MessageType};

use crate::wolkabout;

/// A codec for one functional area of the protocol.
///
/// Implementors list the channels they need and classify inbound messages.
/// Serialization and parsing live on the concrete types since each area
/// handles its own message kinds.
pub trait Protocol: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Channels not scoped to a single device.
    fn inbound_channels(&self) -> Vec<String> {
        Vec::new()
    }

    /// Channels this codec subscribes to for one device.
    fn inbound_channels_for_device(&self, device_key: &str) -> Vec<String>;

    fn message_type(&self, message: &Message) -> MessageType {
        wolkabout::message_type(message)
    }

    fn device_type(&self, message: &Message) -> DeviceType {
        wolkabout::device_type(message)
    }

    fn device_key(&self, message: &Message) -> String {
        wolkabout::device_key(message)
    }

    /// Channel the platform answers on for a request of this type, if the
    /// request expects an answer at all.
    fn response_channel_for_message(
        &self,
        message_type: MessageType,
        device_key: &str,
    ) -> Option<String> {
        let _ = (message_type, device_key);
        None
    }
}
