//! Error reports the platform sends about a device.

use wolk_core::messages::ErrorMessage;
use wolk_core::{Message, MessageType};

use crate::codec;
use crate::error::{ProtocolError, Result};
use crate::protocol::Protocol;
use crate::wolkabout::{self, Direction};

#[derive(Debug, Default)]
pub struct WolkaboutErrorProtocol;

impl WolkaboutErrorProtocol {
    pub fn new() -> Self {
        Self
    }

    /// Parse an error report. The channel must name a device.
    pub fn parse_error(&self, message: &Message) -> Option<ErrorMessage> {
        codec::inbound(self.name(), MessageType::Error, self.error(message))
    }

    fn error(&self, message: &Message) -> Result<ErrorMessage> {
        codec::expect_type(self, message, MessageType::Error)?;
        let device_key = self.device_key(message);
        if device_key.is_empty() {
            return Err(ProtocolError::MissingField("device key"));
        }
        let text = wolkabout::remove_quotes(codec::text(message)?);
        Ok(ErrorMessage::new(device_key, text))
    }
}

impl Protocol for WolkaboutErrorProtocol {
    fn name(&self) -> &'static str {
        "error"
    }

    fn inbound_channels_for_device(&self, device_key: &str) -> Vec<String> {
        vec![wolkabout::channel(Direction::PlatformToDevice, device_key, MessageType::Error)]
    }
}
