//! JSON shapes shared by more than one codec.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use wolk_core::model::{
    Attribute, DeviceRegistrationData, Feed, FileInformation, ParameterName,
    RegisteredDeviceInformation,
};

use crate::codec;
use crate::error::{ProtocolError, Result};

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FeedJson {
    pub name: String,
    pub reference: String,
    #[serde(rename = "type")]
    pub feed_type: String,
    #[serde(default)]
    pub unit_guid: String,
}

impl From<&Feed> for FeedJson {
    fn from(feed: &Feed) -> Self {
        Self {
            name: feed.name().to_string(),
            reference: feed.reference().to_string(),
            feed_type: feed.feed_type().as_str().to_string(),
            unit_guid: feed.unit().to_string(),
        }
    }
}

impl TryFrom<FeedJson> for Feed {
    type Error = ProtocolError;

    fn try_from(json: FeedJson) -> Result<Self> {
        Ok(Feed::from_tokens(&json.name, &json.reference, &json.feed_type, &json.unit_guid)?)
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AttributeJson {
    pub name: String,
    pub data_type: String,
    pub value: String,
}

impl From<&Attribute> for AttributeJson {
    fn from(attribute: &Attribute) -> Self {
        Self {
            name: attribute.name().to_string(),
            data_type: attribute.data_type().as_str().to_string(),
            value: attribute.value().to_string(),
        }
    }
}

impl TryFrom<AttributeJson> for Attribute {
    type Error = ProtocolError;

    fn try_from(json: AttributeJson) -> Result<Self> {
        Ok(Attribute::from_tokens(&json.name, &json.data_type, &json.value)?)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct FileInformationJson {
    pub name: String,
    pub size: u64,
    pub hash: String,
}

impl From<&FileInformation> for FileInformationJson {
    fn from(file: &FileInformation) -> Self {
        Self {
            name: file.name.clone(),
            size: file.size,
            hash: file.hash.clone(),
        }
    }
}

impl From<FileInformationJson> for FileInformation {
    fn from(json: FileInformationJson) -> Self {
        FileInformation::new(json.name, json.size, json.hash)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct DeviceRegistrationJson {
    pub name: String,
    pub key: String,
    pub guid: String,
    #[serde(default)]
    pub parameters: BTreeMap<String, Value>,
    #[serde(default)]
    pub feeds: Vec<FeedJson>,
    #[serde(default)]
    pub attributes: Vec<AttributeJson>,
}

impl From<&DeviceRegistrationData> for DeviceRegistrationJson {
    fn from(device: &DeviceRegistrationData) -> Self {
        Self {
            name: device.name.clone(),
            key: device.key.clone(),
            guid: device.guid.clone(),
            parameters: device
                .parameters
                .iter()
                .map(|(name, value)| (name.as_str().to_string(), codec::typed_value(value)))
                .collect(),
            feeds: device.feeds.iter().map(FeedJson::from).collect(),
            attributes: device.attributes.iter().map(AttributeJson::from).collect(),
        }
    }
}

impl TryFrom<DeviceRegistrationJson> for DeviceRegistrationData {
    type Error = ProtocolError;

    fn try_from(json: DeviceRegistrationJson) -> Result<Self> {
        codec::require(&json.name, "device name")?;
        codec::require(&json.key, "device key")?;

        let mut device = DeviceRegistrationData::new(json.name, json.key, json.guid);
        for (name, value) in json.parameters {
            let parameter = ParameterName::from_token(&name)
                .ok_or_else(|| ProtocolError::invalid_field("parameters", format!("unknown parameter '{}'", name)))?;
            let value = codec::scalar_value(&value)
                .ok_or_else(|| ProtocolError::invalid_field("parameters", format!("'{}' is not a scalar", name)))?;
            device = device.with_parameter(parameter, value);
        }
        for feed in json.feeds {
            device = device.with_feed(feed.try_into()?);
        }
        for attribute in json.attributes {
            device = device.with_attribute(attribute.try_into()?);
        }
        Ok(device)
    }
}

/// `{"devices": [...]}` body of a registration request.
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct DevicesJson {
    pub devices: Vec<DeviceRegistrationJson>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisteredDeviceJson {
    pub device_key: String,
    #[serde(default)]
    pub external_id: String,
    #[serde(default)]
    pub device_type: String,
}

impl From<&RegisteredDeviceInformation> for RegisteredDeviceJson {
    fn from(device: &RegisteredDeviceInformation) -> Self {
        Self {
            device_key: device.device_key.clone(),
            external_id: device.external_id.clone(),
            device_type: device.device_type.clone(),
        }
    }
}

impl From<RegisteredDeviceJson> for RegisteredDeviceInformation {
    fn from(json: RegisteredDeviceJson) -> Self {
        RegisteredDeviceInformation::new(json.device_key, json.external_id, json.device_type)
    }
}

/// Request and response of a registered-devices lookup share this shape;
/// only the response carries `matchingDevices`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RegisteredDevicesJson {
    pub timestamp_from: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matching_devices: Option<Vec<RegisteredDeviceJson>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub(crate) struct RegistrationResultJson {
    #[serde(default)]
    pub success: Vec<String>,
    #[serde(default)]
    pub failed: Vec<String>,
}
