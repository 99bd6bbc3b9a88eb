//! Firmware installation commands and status reports.

use serde::Serialize;
use wolk_core::messages::{
    FirmwareUpdateAbortMessage, FirmwareUpdateInstallMessage, FirmwareUpdateStatusMessage,
};
use wolk_core::model::FirmwareUpdateStatus;
use wolk_core::{Message, MessageObject, MessageType};

use crate::codec;
use crate::error::{ProtocolError, Result};
use crate::protocol::Protocol;
use crate::wolkabout::{self, Direction};

const INBOUND_TYPES: [MessageType; 2] = [
    MessageType::FirmwareUpdateInstall,
    MessageType::FirmwareUpdateAbort,
];

#[derive(Debug, Serialize)]
struct FirmwareUpdateStatusJson {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<u64>,
}

#[derive(Debug, Default)]
pub struct WolkaboutFirmwareUpdateProtocol;

impl WolkaboutFirmwareUpdateProtocol {
    pub fn new() -> Self {
        Self
    }

    pub fn make_outbound_message(&self, device_key: &str, message: &MessageObject) -> Option<Message> {
        codec::outbound(self.name(), message.message_type(), serialize(device_key, message))
    }

    pub fn parse_firmware_update_install(
        &self,
        message: &Message,
    ) -> Option<FirmwareUpdateInstallMessage> {
        codec::inbound(
            self.name(),
            MessageType::FirmwareUpdateInstall,
            codec::expect_type(self, message, MessageType::FirmwareUpdateInstall)
                .and_then(|_| codec::scalar(message, "file name"))
                .map(FirmwareUpdateInstallMessage::new),
        )
    }

    pub fn parse_firmware_update_abort(&self, message: &Message) -> Option<FirmwareUpdateAbortMessage> {
        codec::inbound(
            self.name(),
            MessageType::FirmwareUpdateAbort,
            codec::expect_type(self, message, MessageType::FirmwareUpdateAbort)
                .map(|_| FirmwareUpdateAbortMessage),
        )
    }

    pub fn parse(&self, message: &Message) -> Option<MessageObject> {
        match self.message_type(message) {
            MessageType::FirmwareUpdateInstall => {
                self.parse_firmware_update_install(message).map(Into::into)
            }
            MessageType::FirmwareUpdateAbort => {
                self.parse_firmware_update_abort(message).map(Into::into)
            }
            other => codec::inbound(self.name(), other, Err(ProtocolError::Unsupported(other))),
        }
    }
}

impl Protocol for WolkaboutFirmwareUpdateProtocol {
    fn name(&self) -> &'static str {
        "firmware_update"
    }

    fn inbound_channels_for_device(&self, device_key: &str) -> Vec<String> {
        INBOUND_TYPES
            .iter()
            .map(|t| wolkabout::channel(Direction::PlatformToDevice, device_key, *t))
            .collect()
    }
}

fn serialize(device_key: &str, message: &MessageObject) -> Result<Message> {
    codec::require(device_key, "device key")?;

    let MessageObject::FirmwareUpdateStatus(status) = message else {
        return Err(ProtocolError::Unsupported(message.message_type()));
    };
    let payload = status_payload(status)?;

    Ok(Message::new(
        payload,
        wolkabout::channel(Direction::DeviceToPlatform, device_key, message.message_type()),
    ))
}

fn status_payload(message: &FirmwareUpdateStatusMessage) -> Result<String> {
    let error = match (message.status, message.error) {
        (FirmwareUpdateStatus::Error, None) => return Err(ProtocolError::MissingField("error")),
        (FirmwareUpdateStatus::Error, Some(error)) => Some(error.code()),
        _ => None,
    };
    let json = FirmwareUpdateStatusJson {
        status: message.status.as_str(),
        error,
    };
    Ok(serde_json::to_string(&json)?)
}
