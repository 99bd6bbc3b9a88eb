//! Subdevice registration, gateway side.
//!
//! The gateway registers, removes and looks up its subdevices on the
//! platform. Requests go out on `d2p/<gateway key>/…` and answers come back
//! on `p2d/<gateway key>/…`.

use wolk_core::messages::{
    ChildrenSynchronizationRequestMessage, ChildrenSynchronizationResponseMessage,
    DeviceRegistrationMessage, DeviceRegistrationResponseMessage, DeviceRemovalMessage,
    RegisteredDevicesRequestMessage, RegisteredDevicesResponseMessage,
};
use wolk_core::model::RegisteredDeviceInformation;
use wolk_core::{Message, MessageObject, MessageType};

use crate::codec;
use crate::error::{ProtocolError, Result};
use crate::protocol::Protocol;
use crate::schema::SchemaValidator;
use crate::wire::{
    DeviceRegistrationJson, DevicesJson, RegisteredDevicesJson, RegistrationResultJson,
};
use crate::wolkabout::{self, Direction};

const INBOUND_TYPES: [MessageType; 3] = [
    MessageType::DeviceRegistrationResponse,
    MessageType::ChildrenSynchronizationResponse,
    MessageType::RegisteredDevicesResponse,
];

/// Codec the gateway uses towards the platform for subdevice registration.
pub struct WolkaboutRegistrationProtocol {
    validator: SchemaValidator,
}

impl WolkaboutRegistrationProtocol {
    pub fn new() -> Self {
        Self {
            validator: SchemaValidator::new(),
        }
    }

    pub fn make_outbound_message(&self, device_key: &str, message: &MessageObject) -> Option<Message> {
        codec::outbound(self.name(), message.message_type(), serialize(device_key, message))
    }

    pub fn parse_registration_response(
        &self,
        message: &Message,
    ) -> Option<DeviceRegistrationResponseMessage> {
        codec::inbound(
            self.name(),
            MessageType::DeviceRegistrationResponse,
            self.registration_response(message),
        )
    }

    pub fn parse_children_synchronization(
        &self,
        message: &Message,
    ) -> Option<ChildrenSynchronizationResponseMessage> {
        codec::inbound(
            self.name(),
            MessageType::ChildrenSynchronizationResponse,
            self.children_synchronization(message),
        )
    }

    pub fn parse_registered_devices(
        &self,
        message: &Message,
    ) -> Option<RegisteredDevicesResponseMessage> {
        codec::inbound(
            self.name(),
            MessageType::RegisteredDevicesResponse,
            self.registered_devices(message),
        )
    }

    pub fn parse(&self, message: &Message) -> Option<MessageObject> {
        match self.message_type(message) {
            MessageType::DeviceRegistrationResponse => {
                self.parse_registration_response(message).map(Into::into)
            }
            MessageType::ChildrenSynchronizationResponse => {
                self.parse_children_synchronization(message).map(Into::into)
            }
            MessageType::RegisteredDevicesResponse => {
                self.parse_registered_devices(message).map(Into::into)
            }
            other => codec::inbound(self.name(), other, Err(ProtocolError::Unsupported(other))),
        }
    }

    fn registration_response(&self, message: &Message) -> Result<DeviceRegistrationResponseMessage> {
        codec::expect_type(self, message, MessageType::DeviceRegistrationResponse)?;
        let result: RegistrationResultJson = serde_json::from_slice(message.content())?;
        Ok(DeviceRegistrationResponseMessage::new(result.success, result.failed))
    }

    fn children_synchronization(&self, message: &Message) -> Result<ChildrenSynchronizationResponseMessage> {
        codec::expect_type(self, message, MessageType::ChildrenSynchronizationResponse)?;
        let payload = self.validator.validate(message)?;
        Ok(ChildrenSynchronizationResponseMessage::new(codec::string_array(
            &payload, "children",
        )?))
    }

    fn registered_devices(&self, message: &Message) -> Result<RegisteredDevicesResponseMessage> {
        codec::expect_type(self, message, MessageType::RegisteredDevicesResponse)?;
        let payload = self.validator.validate(message)?;
        let json: RegisteredDevicesJson = serde_json::from_value(payload)?;

        let request = RegisteredDevicesRequestMessage {
            timestamp_from: json.timestamp_from,
            device_type: json.device_type,
            external_id: json.external_id,
        };
        let matching: Vec<RegisteredDeviceInformation> = json
            .matching_devices
            .unwrap_or_default()
            .into_iter()
            .map(Into::into)
            .collect();
        Ok(RegisteredDevicesResponseMessage::new(&request, matching))
    }
}

impl Default for WolkaboutRegistrationProtocol {
    fn default() -> Self {
        Self::new()
    }
}

impl Protocol for WolkaboutRegistrationProtocol {
    fn name(&self) -> &'static str {
        "registration"
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
            MessageType::DeviceRegistration => MessageType::DeviceRegistrationResponse,
            MessageType::ChildrenSynchronizationRequest => {
                MessageType::ChildrenSynchronizationResponse
            }
            MessageType::RegisteredDevicesRequest => MessageType::RegisteredDevicesResponse,
            _ => return None,
        };
        Some(wolkabout::channel(Direction::PlatformToDevice, device_key, response))
    }
}

fn serialize(device_key: &str, message: &MessageObject) -> Result<Message> {
    codec::require(device_key, "device key")?;

    let payload = match message {
        MessageObject::DeviceRegistration(m) => device_registration_payload(m)?,
        MessageObject::DeviceRemoval(m) => device_removal_payload(m)?,
        MessageObject::ChildrenSynchronizationRequest(ChildrenSynchronizationRequestMessage) => {
            String::new()
        }
        MessageObject::RegisteredDevicesRequest(m) => registered_devices_request_payload(m)?,
        other => return Err(ProtocolError::Unsupported(other.message_type())),
    };

    Ok(Message::new(
        payload,
        wolkabout::channel(Direction::DeviceToPlatform, device_key, message.message_type()),
    ))
}

fn device_registration_payload(message: &DeviceRegistrationMessage) -> Result<String> {
    if message.devices.is_empty() {
        return Err(ProtocolError::MissingField("devices"));
    }
    for device in &message.devices {
        codec::require(&device.name, "device name")?;
        codec::require(&device.key, "device key")?;
    }

    let json = DevicesJson {
        devices: message.devices.iter().map(DeviceRegistrationJson::from).collect(),
    };
    Ok(serde_json::to_string(&json)?)
}

fn device_removal_payload(message: &DeviceRemovalMessage) -> Result<String> {
    if message.keys.is_empty() {
        return Err(ProtocolError::MissingField("device keys"));
    }
    for key in &message.keys {
        codec::require(key, "device key")?;
    }
    Ok(serde_json::to_string(&message.keys)?)
}

fn registered_devices_request_payload(message: &RegisteredDevicesRequestMessage) -> Result<String> {
    let json = RegisteredDevicesJson {
        timestamp_from: message.timestamp_from,
        device_type: message.device_type.clone().filter(|s| !s.is_empty()),
        external_id: message.external_id.clone().filter(|s| !s.is_empty()),
        matching_devices: None,
    };
    Ok(serde_json::to_string(&json)?)
}
