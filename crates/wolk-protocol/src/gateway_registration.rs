//! Subdevice registration, local device side.
//!
//! The gateway plays the platform for devices connected to it: requests
//! arrive on `d2p/<device key>/…` and answers go out on
//! `p2d/<device key>/…`. Because request and response share a wire token,
//! this codec decodes those tokens to the request variant.

use wolk_core::messages::{
    ChildrenSynchronizationRequestMessage, ChildrenSynchronizationResponseMessage,
    DeviceRegistrationMessage, DeviceRegistrationResponseMessage, DeviceRemovalMessage,
    RegisteredDevicesRequestMessage, RegisteredDevicesResponseMessage,
};
use wolk_core::model::DeviceRegistrationData;
use wolk_core::{Message, MessageObject, MessageType};

use crate::codec;
use crate::error::{ProtocolError, Result};
use crate::protocol::Protocol;
use crate::wire::{DevicesJson, RegisteredDeviceJson, RegisteredDevicesJson, RegistrationResultJson};
use crate::wolkabout::{self, Direction};

const INBOUND_TYPES: [MessageType; 4] = [
    MessageType::DeviceRegistration,
    MessageType::DeviceRemoval,
    MessageType::ChildrenSynchronizationRequest,
    MessageType::RegisteredDevicesRequest,
];

/// Codec the gateway uses towards its local devices for registration.
#[derive(Debug, Default)]
pub struct WolkaboutGatewayRegistrationProtocol;

impl WolkaboutGatewayRegistrationProtocol {
    pub fn new() -> Self {
        Self
    }

    pub fn make_outbound_message(&self, device_key: &str, message: &MessageObject) -> Option<Message> {
        codec::outbound(self.name(), message.message_type(), serialize(device_key, message))
    }

    pub fn parse_device_registration(&self, message: &Message) -> Option<DeviceRegistrationMessage> {
        codec::inbound(
            self.name(),
            MessageType::DeviceRegistration,
            self.device_registration(message),
        )
    }

    pub fn parse_device_removal(&self, message: &Message) -> Option<DeviceRemovalMessage> {
        codec::inbound(self.name(), MessageType::DeviceRemoval, self.device_removal(message))
    }

    pub fn parse_children_synchronization_request(
        &self,
        message: &Message,
    ) -> Option<ChildrenSynchronizationRequestMessage> {
        codec::inbound(
            self.name(),
            MessageType::ChildrenSynchronizationRequest,
            codec::expect_type(self, message, MessageType::ChildrenSynchronizationRequest)
                .map(|_| ChildrenSynchronizationRequestMessage),
        )
    }

    pub fn parse_registered_devices_request(
        &self,
        message: &Message,
    ) -> Option<RegisteredDevicesRequestMessage> {
        codec::inbound(
            self.name(),
            MessageType::RegisteredDevicesRequest,
            self.registered_devices_request(message),
        )
    }

    pub fn parse(&self, message: &Message) -> Option<MessageObject> {
        match self.message_type(message) {
            MessageType::DeviceRegistration => self.parse_device_registration(message).map(Into::into),
            MessageType::DeviceRemoval => self.parse_device_removal(message).map(Into::into),
            MessageType::ChildrenSynchronizationRequest => {
                self.parse_children_synchronization_request(message).map(Into::into)
            }
            MessageType::RegisteredDevicesRequest => {
                self.parse_registered_devices_request(message).map(Into::into)
            }
            other => codec::inbound(self.name(), other, Err(ProtocolError::Unsupported(other))),
        }
    }

    fn device_registration(&self, message: &Message) -> Result<DeviceRegistrationMessage> {
        codec::expect_type(self, message, MessageType::DeviceRegistration)?;
        let json: DevicesJson = serde_json::from_slice(message.content())?;
        if json.devices.is_empty() {
            return Err(ProtocolError::MissingField("devices"));
        }
        let devices = json
            .devices
            .into_iter()
            .map(DeviceRegistrationData::try_from)
            .collect::<Result<Vec<_>>>()?;
        Ok(DeviceRegistrationMessage::new(devices))
    }

    fn device_removal(&self, message: &Message) -> Result<DeviceRemovalMessage> {
        codec::expect_type(self, message, MessageType::DeviceRemoval)?;
        let payload = codec::parse_json(message)?;
        let keys = codec::string_array(&payload, "device keys")?;
        if keys.is_empty() || keys.iter().any(String::is_empty) {
            return Err(ProtocolError::MissingField("device keys"));
        }
        Ok(DeviceRemovalMessage::new(keys))
    }

    fn registered_devices_request(&self, message: &Message) -> Result<RegisteredDevicesRequestMessage> {
        codec::expect_type(self, message, MessageType::RegisteredDevicesRequest)?;
        let json: RegisteredDevicesJson = serde_json::from_slice(message.content())?;
        Ok(RegisteredDevicesRequestMessage {
            timestamp_from: json.timestamp_from,
            device_type: json.device_type,
            external_id: json.external_id,
        })
    }
}

impl Protocol for WolkaboutGatewayRegistrationProtocol {
    fn name(&self) -> &'static str {
        "gateway_registration"
    }

    fn inbound_channels_for_device(&self, device_key: &str) -> Vec<String> {
        INBOUND_TYPES
            .iter()
            .map(|t| wolkabout::channel(Direction::DeviceToPlatform, device_key, *t))
            .collect()
    }

    /// Shared tokens decode to the request variant here, since this side
    /// only ever receives requests.
    fn message_type(&self, message: &Message) -> MessageType {
        match wolkabout::message_type(message) {
            MessageType::RegisteredDevicesResponse => MessageType::RegisteredDevicesRequest,
            MessageType::ChildrenSynchronizationResponse => {
                MessageType::ChildrenSynchronizationRequest
            }
            other => other,
        }
    }
}

fn serialize(device_key: &str, message: &MessageObject) -> Result<Message> {
    codec::require(device_key, "device key")?;

    let payload = match message {
        MessageObject::DeviceRegistrationResponse(m) => registration_response_payload(m)?,
        MessageObject::ChildrenSynchronizationResponse(m) => children_payload(m)?,
        MessageObject::RegisteredDevicesResponse(m) => registered_devices_payload(m)?,
        other => return Err(ProtocolError::Unsupported(other.message_type())),
    };

    Ok(Message::new(
        payload,
        wolkabout::channel(Direction::PlatformToDevice, device_key, message.message_type()),
    ))
}

fn registration_response_payload(message: &DeviceRegistrationResponseMessage) -> Result<String> {
    if message.success.is_empty() && message.failed.is_empty() {
        return Err(ProtocolError::MissingField("success or failed device keys"));
    }
    let json = RegistrationResultJson {
        success: message.success.clone(),
        failed: message.failed.clone(),
    };
    Ok(serde_json::to_string(&json)?)
}

fn children_payload(message: &ChildrenSynchronizationResponseMessage) -> Result<String> {
    for key in &message.children {
        codec::require(key, "child device key")?;
    }
    Ok(serde_json::to_string(&message.children)?)
}

fn registered_devices_payload(message: &RegisteredDevicesResponseMessage) -> Result<String> {
    for device in &message.matching_devices {
        codec::require(&device.device_key, "matching device key")?;
    }
    let json = RegisteredDevicesJson {
        timestamp_from: message.timestamp_from,
        device_type: message.device_type.clone(),
        external_id: message.external_id.clone(),
        matching_devices: Some(
            message
                .matching_devices
                .iter()
                .map(RegisteredDeviceJson::from)
                .collect(),
        ),
    };
    Ok(serde_json::to_string(&json)?)
}
