//! File transfer messages.

use crate::model::{FileInformation, FileTransferError, FileTransferStatus};

/// Length in bytes of each hash in a file binary frame.
pub const HASH_SIZE: usize = 32;

/// Start transferring a file to the device in chunks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUploadInitiateMessage {
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Hex-encoded hash of the whole file.
    pub hash: String,
}

impl FileUploadInitiateMessage {
    pub fn new(name: impl Into<String>, size: u64, hash: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            hash: hash.into(),
        }
    }
}

/// Progress of a chunked transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUploadStatusMessage {
    pub name: String,
    pub status: FileTransferStatus,
    /// Set only when `status` is `Error`.
    pub error: Option<FileTransferError>,
}

impl FileUploadStatusMessage {
    pub fn new(name: impl Into<String>, status: FileTransferStatus) -> Self {
        Self {
            name: name.into(),
            status,
            error: None,
        }
    }

    pub fn with_error(mut self, error: FileTransferError) -> Self {
        self.error = Some(error);
        self
    }
}

/// Cancel a chunked transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUploadAbortMessage {
    pub name: String,
}

impl FileUploadAbortMessage {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Request one chunk of a file being uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileBinaryRequestMessage {
    pub name: String,
    /// Zero-based.
    pub chunk_index: u64,
}

impl FileBinaryRequestMessage {
    pub fn new(name: impl Into<String>, chunk_index: u64) -> Self {
        Self {
            name: name.into(),
            chunk_index,
        }
    }
}

/// One chunk of file data framed as `previous hash | data | current hash`.
///
/// The frame has no delimiters: both hashes are [`HASH_SIZE`] bytes. A frame
/// of `2 * HASH_SIZE` bytes or less is treated as empty and leaves every
/// field empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileBinaryResponseMessage {
    /// Hash of the preceding chunk.
    pub previous_hash: Vec<u8>,
    pub data: Vec<u8>,
    /// Hash of `data`.
    pub current_hash: Vec<u8>,
}

impl FileBinaryResponseMessage {
    /// Split a raw frame into its three parts.
    pub fn from_frame(frame: &[u8]) -> Self {
        if frame.len() <= 2 * HASH_SIZE {
            return Self::default();
        }

        let data_end = frame.len() - HASH_SIZE;
        Self {
            previous_hash: frame[..HASH_SIZE].to_vec(),
            data: frame[HASH_SIZE..data_end].to_vec(),
            current_hash: frame[data_end..].to_vec(),
        }
    }

    pub fn new(previous_hash: Vec<u8>, data: Vec<u8>, current_hash: Vec<u8>) -> Self {
        Self {
            previous_hash,
            data,
            current_hash,
        }
    }

    /// Rebuild the raw frame.
    pub fn to_frame(&self) -> Vec<u8> {
        let mut frame =
            Vec::with_capacity(self.previous_hash.len() + self.data.len() + self.current_hash.len());
        frame.extend_from_slice(&self.previous_hash);
        frame.extend_from_slice(&self.data);
        frame.extend_from_slice(&self.current_hash);
        frame
    }

    pub fn is_empty(&self) -> bool {
        self.previous_hash.is_empty() && self.data.is_empty() && self.current_hash.is_empty()
    }
}

/// Have the device fetch a file itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUrlDownloadInitMessage {
    pub file_url: String,
}

impl FileUrlDownloadInitMessage {
    pub fn new(file_url: impl Into<String>) -> Self {
        Self {
            file_url: file_url.into(),
        }
    }
}

/// Cancel a URL download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUrlDownloadAbortMessage {
    pub file_url: String,
}

impl FileUrlDownloadAbortMessage {
    pub fn new(file_url: impl Into<String>) -> Self {
        Self {
            file_url: file_url.into(),
        }
    }
}

/// Progress of a URL download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUrlDownloadStatusMessage {
    pub file_url: String,
    /// Name the file was stored under, once known.
    pub file_name: Option<String>,
    pub status: FileTransferStatus,
    /// Set only when `status` is `Error`.
    pub error: Option<FileTransferError>,
}

impl FileUrlDownloadStatusMessage {
    pub fn new(file_url: impl Into<String>, status: FileTransferStatus) -> Self {
        Self {
            file_url: file_url.into(),
            file_name: None,
            status,
            error: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }

    pub fn with_error(mut self, error: FileTransferError) -> Self {
        self.error = Some(error);
        self
    }
}

/// Ask the device which files it holds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileListRequestMessage;

/// Files the device holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileListResponseMessage {
    pub files: Vec<FileInformation>,
}

impl FileListResponseMessage {
    pub fn new(files: Vec<FileInformation>) -> Self {
        Self { files }
    }
}

/// Delete files from the device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDeleteMessage {
    /// File names.
    pub files: Vec<String>,
}

impl FileDeleteMessage {
    pub fn new(files: Vec<String>) -> Self {
        Self { files }
    }
}

/// Delete every file on the device.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilePurgeMessage;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_split() {
        let frame: Vec<u8> = (0..666u32).map(|i| (i % 251) as u8).collect();
        let message = FileBinaryResponseMessage::from_frame(&frame);

        assert_eq!(message.previous_hash.len(), HASH_SIZE);
        assert_eq!(message.data.len(), 666 - 2 * HASH_SIZE);
        assert_eq!(message.current_hash.len(), HASH_SIZE);
        assert_eq!(message.to_frame(), frame);
    }

    #[test]
    fn test_short_frame_is_empty() {
        assert!(FileBinaryResponseMessage::from_frame(&[7u8; 64]).is_empty());
        assert!(FileBinaryResponseMessage::from_frame(b"").is_empty());
        assert!(!FileBinaryResponseMessage::from_frame(&[7u8; 65]).is_empty());
    }
}
