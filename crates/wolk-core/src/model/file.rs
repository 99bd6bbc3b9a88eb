//! File transfer descriptors.

use serde::{Deserialize, Serialize};

/// Progress of a file transfer as reported by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileTransferStatus {
    /// Waiting for the device to start.
    AwaitingDevice,
    /// Chunks are being exchanged.
    FileTransfer,
    /// File stored and verified.
    FileReady,
    /// Transfer failed; see [`FileTransferError`].
    Error,
    /// Transfer cancelled.
    Aborted,
}

impl FileTransferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingDevice => "AWAITING_DEVICE",
            Self::FileTransfer => "FILE_TRANSFER",
            Self::FileReady => "FILE_READY",
            Self::Error => "ERROR",
            Self::Aborted => "ABORTED",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "AWAITING_DEVICE" => Some(Self::AwaitingDevice),
            "FILE_TRANSFER" => Some(Self::FileTransfer),
            "FILE_READY" => Some(Self::FileReady),
            "ERROR" => Some(Self::Error),
            "ABORTED" => Some(Self::Aborted),
            _ => None,
        }
    }
}

/// Reason a file transfer failed. Travels as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileTransferError {
    /// Code 0.
    UnspecifiedError,
    /// Code 1: the device does not accept this kind of transfer.
    TransferProtocolDisabled,
    /// Code 2: file too large for the device.
    UnsupportedFileSize,
    /// Code 3: download URL could not be parsed.
    MalformedUrl,
    /// Code 4: received data does not match its hash.
    FileHashMismatch,
    /// Code 5: the file could not be written.
    FileSystemError,
    /// Code 10: chunk requests exhausted their retries.
    RetryCountExceeded,
}

impl FileTransferError {
    pub fn code(&self) -> u64 {
        match self {
            Self::UnspecifiedError => 0,
            Self::TransferProtocolDisabled => 1,
            Self::UnsupportedFileSize => 2,
            Self::MalformedUrl => 3,
            Self::FileHashMismatch => 4,
            Self::FileSystemError => 5,
            Self::RetryCountExceeded => 10,
        }
    }

    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            0 => Some(Self::UnspecifiedError),
            1 => Some(Self::TransferProtocolDisabled),
            2 => Some(Self::UnsupportedFileSize),
            3 => Some(Self::MalformedUrl),
            4 => Some(Self::FileHashMismatch),
            5 => Some(Self::FileSystemError),
            10 => Some(Self::RetryCountExceeded),
            _ => None,
        }
    }
}

/// Name, size and hash of a file held by the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInformation {
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Hex-encoded hash of the whole file.
    pub hash: String,
}

impl FileInformation {
    pub fn new(name: impl Into<String>, size: u64, hash: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            hash: hash.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(FileTransferError::RetryCountExceeded.code(), 10);
        assert_eq!(FileTransferError::from_code(4), Some(FileTransferError::FileHashMismatch));
        assert_eq!(FileTransferError::from_code(6), None);
    }
}
