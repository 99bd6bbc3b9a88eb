//! Firmware update messages.

use crate::model::{FirmwareUpdateError, FirmwareUpdateStatus};

/// Install the named file, previously transferred to the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareUpdateInstallMessage {
    pub file: String,
}

impl FirmwareUpdateInstallMessage {
    pub fn new(file: impl Into<String>) -> Self {
        Self { file: file.into() }
    }
}

/// Progress of a firmware update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareUpdateStatusMessage {
    pub status: FirmwareUpdateStatus,
    /// Set only when `status` is `Error`.
    pub error: Option<FirmwareUpdateError>,
}

impl FirmwareUpdateStatusMessage {
    pub fn new(status: FirmwareUpdateStatus) -> Self {
        Self {
            status,
            error: None,
        }
    }

    pub fn with_error(mut self, error: FirmwareUpdateError) -> Self {
        self.error = Some(error);
        self
    }
}

/// Cancel a firmware update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirmwareUpdateAbortMessage;
