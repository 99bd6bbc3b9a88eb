//! Platform-controlled device parameters.

use serde::{Deserialize, Serialize};

/// Names of the parameters the platform can set on a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParameterName {
    ConnectivityType,
    OutboundDataMode,
    OutboundDataRetentionTime,
    MaximumMessageSize,
    FileTransferPlatformEnabled,
    FileTransferUrlEnabled,
    FirmwareUpdateEnabled,
    FirmwareUpdateCheckTime,
    FirmwareUpdateRepository,
    FirmwareVersion,
    Gateway,
    GatewayParent,
    ExternalId,
}

impl ParameterName {
    pub const ALL: [ParameterName; 13] = [
        Self::ConnectivityType,
        Self::OutboundDataMode,
        Self::OutboundDataRetentionTime,
        Self::MaximumMessageSize,
        Self::FileTransferPlatformEnabled,
        Self::FileTransferUrlEnabled,
        Self::FirmwareUpdateEnabled,
        Self::FirmwareUpdateCheckTime,
        Self::FirmwareUpdateRepository,
        Self::FirmwareVersion,
        Self::Gateway,
        Self::GatewayParent,
        Self::ExternalId,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConnectivityType => "CONNECTIVITY_TYPE",
            Self::OutboundDataMode => "OUTBOUND_DATA_MODE",
            Self::OutboundDataRetentionTime => "OUTBOUND_DATA_RETENTION_TIME",
            Self::MaximumMessageSize => "MAXIMUM_MESSAGE_SIZE",
            Self::FileTransferPlatformEnabled => "FILE_TRANSFER_PLATFORM_ENABLED",
            Self::FileTransferUrlEnabled => "FILE_TRANSFER_URL_ENABLED",
            Self::FirmwareUpdateEnabled => "FIRMWARE_UPDATE_ENABLED",
            Self::FirmwareUpdateCheckTime => "FIRMWARE_UPDATE_CHECK_TIME",
            Self::FirmwareUpdateRepository => "FIRMWARE_UPDATE_REPOSITORY",
            Self::FirmwareVersion => "FIRMWARE_VERSION",
            Self::Gateway => "GATEWAY",
            Self::GatewayParent => "GATEWAY_PARENT",
            Self::ExternalId => "EXTERNAL_ID",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|name| name.as_str() == token)
    }
}

impl std::fmt::Display for ParameterName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A parameter and its value, kept as a string like reading values.
pub type Parameter = (ParameterName, String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_tokens() {
        for name in ParameterName::ALL {
            assert_eq!(ParameterName::from_token(name.as_str()), Some(name));
        }
        assert_eq!(ParameterName::from_token("connectivity_type"), None);
    }
}
