//! Subdevice registration messages exchanged between a gateway and the
//! platform (or a gateway and its local devices).

use crate::model::{DeviceRegistrationData, RegisteredDeviceInformation};

/// Register subdevices under a gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRegistrationMessage {
    pub devices: Vec<DeviceRegistrationData>,
}

impl DeviceRegistrationMessage {
    pub fn new(devices: Vec<DeviceRegistrationData>) -> Self {
        Self { devices }
    }
}

/// Keys of devices that were and were not registered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceRegistrationResponseMessage {
    pub success: Vec<String>,
    pub failed: Vec<String>,
}

impl DeviceRegistrationResponseMessage {
    pub fn new(success: Vec<String>, failed: Vec<String>) -> Self {
        Self { success, failed }
    }
}

/// Remove subdevices from a gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceRemovalMessage {
    /// Device keys.
    pub keys: Vec<String>,
}

impl DeviceRemovalMessage {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }
}

/// Ask for the keys of every subdevice under the gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildrenSynchronizationRequestMessage;

/// Keys of every subdevice registered under the gateway.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChildrenSynchronizationResponseMessage {
    pub children: Vec<String>,
}

impl ChildrenSynchronizationResponseMessage {
    pub fn new(children: Vec<String>) -> Self {
        Self { children }
    }
}

/// Look up devices registered since `timestamp_from` (milliseconds),
/// optionally narrowed by device type and external id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredDevicesRequestMessage {
    pub timestamp_from: u64,
    /// Omitted from the payload when `None`.
    pub device_type: Option<String>,
    /// Omitted from the payload when `None`.
    pub external_id: Option<String>,
}

impl RegisteredDevicesRequestMessage {
    pub fn new(timestamp_from: u64) -> Self {
        Self {
            timestamp_from,
            device_type: None,
            external_id: None,
        }
    }

    pub fn with_device_type(mut self, device_type: impl Into<String>) -> Self {
        self.device_type = Some(device_type.into());
        self
    }

    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }
}

/// Answer to a [`RegisteredDevicesRequestMessage`], echoing its filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredDevicesResponseMessage {
    pub timestamp_from: u64,
    pub device_type: Option<String>,
    pub external_id: Option<String>,
    pub matching_devices: Vec<RegisteredDeviceInformation>,
}

impl RegisteredDevicesResponseMessage {
    pub fn new(
        request: &RegisteredDevicesRequestMessage,
        matching_devices: Vec<RegisteredDeviceInformation>,
    ) -> Self {
        Self {
            timestamp_from: request.timestamp_from,
            device_type: request.device_type.clone(),
            external_id: request.external_id.clone(),
            matching_devices,
        }
    }
}
