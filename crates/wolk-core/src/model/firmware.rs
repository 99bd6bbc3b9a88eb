//! Firmware update states.

use serde::{Deserialize, Serialize};

/// Progress of a firmware update as reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FirmwareUpdateStatus {
    /// Waiting for the device to start.
    AwaitingDevice,
    /// Image is being installed.
    Installing,
    /// New firmware is running.
    Success,
    /// Install failed; see [`FirmwareUpdateError`].
    Error,
    /// Update cancelled.
    Aborted,
}

impl FirmwareUpdateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingDevice => "AWAITING_DEVICE",
            Self::Installing => "INSTALLING",
            Self::Success => "SUCCESS",
            Self::Error => "ERROR",
            Self::Aborted => "ABORTED",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "AWAITING_DEVICE" => Some(Self::AwaitingDevice),
            "INSTALLING" => Some(Self::Installing),
            "SUCCESS" => Some(Self::Success),
            "ERROR" => Some(Self::Error),
            "ABORTED" => Some(Self::Aborted),
            _ => None,
        }
    }
}

/// Reason a firmware update failed. Travels as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FirmwareUpdateError {
    /// Code 0.
    UnknownError,
    /// Code 1: the named file is not on the device.
    UnknownFile,
    /// Code 2.
    InstallationFailed,
    /// Code 3: install attempts exhausted their retries.
    RetryCountExceeded,
}

impl FirmwareUpdateError {
    pub fn code(&self) -> u64 {
        match self {
            Self::UnknownError => 0,
            Self::UnknownFile => 1,
            Self::InstallationFailed => 2,
            Self::RetryCountExceeded => 3,
        }
    }

    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(Self::UnknownError),
            1 => Some(Self::UnknownFile),
            2 => Some(Self::InstallationFailed),
            3 => Some(Self::RetryCountExceeded),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_tokens_and_error_codes() {
        for status in [
            FirmwareUpdateStatus::AwaitingDevice,
            FirmwareUpdateStatus::Installing,
            FirmwareUpdateStatus::Success,
            FirmwareUpdateStatus::Error,
            FirmwareUpdateStatus::Aborted,
        ] {
            assert_eq!(FirmwareUpdateStatus::from_token(status.as_str()), Some(status));
        }
        assert_eq!(FirmwareUpdateStatus::from_token("installing"), None);

        assert_eq!(FirmwareUpdateError::UnknownFile.code(), 1);
        assert_eq!(FirmwareUpdateError::from_code(3), Some(FirmwareUpdateError::RetryCountExceeded));
        assert_eq!(FirmwareUpdateError::from_code(4), None);
    }
}
