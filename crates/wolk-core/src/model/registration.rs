//! Subdevice registration data.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::feed::{Attribute, Feed};
use super::parameter::ParameterName;

/// Everything the platform needs to create a subdevice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRegistrationData {
    pub name: String,
    pub key: String,
    /// Identifier of the device template on the platform.
    pub guid: String,
    pub parameters: BTreeMap<ParameterName, String>,
    pub feeds: Vec<Feed>,
    pub attributes: Vec<Attribute>,
}

impl DeviceRegistrationData {
    pub fn new(name: impl Into<String>, key: impl Into<String>, guid: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            key: key.into(),
            guid: guid.into(),
            parameters: BTreeMap::new(),
            feeds: Vec::new(),
            attributes: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, name: ParameterName, value: impl Into<String>) -> Self {
        self.parameters.insert(name, value.into());
        self
    }

    pub fn with_feed(mut self, feed: Feed) -> Self {
        self.feeds.push(feed);
        self
    }

    pub fn with_attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }
}

/// One entry of a registered-devices lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredDeviceInformation {
    pub device_key: String,
    pub external_id: String,
    pub device_type: String,
}

impl RegisteredDeviceInformation {
    pub fn new(
        device_key: impl Into<String>,
        external_id: impl Into<String>,
        device_type: impl Into<String>,
    ) -> Self {
        Self {
            device_key: device_key.into(),
            external_id: external_id.into(),
            device_type: device_type.into(),
        }
    }
}
