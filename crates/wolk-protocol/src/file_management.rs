//! File transfer: platform uploads, URL downloads and file listing.

use serde::{Deserialize, Serialize};
use wolk_core::messages::{
    FileBinaryRequestMessage, FileBinaryResponseMessage, FileDeleteMessage, FileListRequestMessage,
    FileListResponseMessage, FilePurgeMessage, FileUploadAbortMessage, FileUploadInitiateMessage,
    FileUploadStatusMessage, FileUrlDownloadAbortMessage, FileUrlDownloadInitMessage,
    FileUrlDownloadStatusMessage,
};
use wolk_core::model::FileTransferStatus;
use wolk_core::{Message, MessageObject, MessageType};

use crate::codec;
use crate::error::{ProtocolError, Result};
use crate::protocol::Protocol;
use crate::schema::SchemaValidator;
use crate::wire::FileInformationJson;
use crate::wolkabout::{self, Direction};

const INBOUND_TYPES: [MessageType; 8] = [
    MessageType::FileUploadInit,
    MessageType::FileUploadAbort,
    MessageType::FileBinaryResponse,
    MessageType::FileUrlDownloadInit,
    MessageType::FileUrlDownloadAbort,
    MessageType::FileListRequest,
    MessageType::FileDelete,
    MessageType::FilePurge,
];

#[derive(Debug, Deserialize)]
struct FileUploadInitJson {
    name: String,
    size: u64,
    hash: String,
}

#[derive(Debug, Serialize)]
struct FileUploadStatusJson<'a> {
    name: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileBinaryRequestJson<'a> {
    name: &'a str,
    chunk_index: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileUrlDownloadStatusJson<'a> {
    file_url: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    file_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<u64>,
}

/// Codec for file transfer messages on a device.
pub struct WolkaboutFileManagementProtocol {
    validator: SchemaValidator,
}

impl WolkaboutFileManagementProtocol {
    pub fn new() -> Self {
        Self {
            validator: SchemaValidator::new(),
        }
    }

    pub fn make_outbound_message(&self, device_key: &str, message: &MessageObject) -> Option<Message> {
        codec::outbound(self.name(), message.message_type(), serialize(device_key, message))
    }

    pub fn parse_file_upload_init(&self, message: &Message) -> Option<FileUploadInitiateMessage> {
        codec::inbound(self.name(), MessageType::FileUploadInit, self.file_upload_init(message))
    }

    pub fn parse_file_upload_abort(&self, message: &Message) -> Option<FileUploadAbortMessage> {
        codec::inbound(self.name(), MessageType::FileUploadAbort, self.file_upload_abort(message))
    }

    pub fn parse_file_binary_response(&self, message: &Message) -> Option<FileBinaryResponseMessage> {
        codec::inbound(
            self.name(),
            MessageType::FileBinaryResponse,
            codec::expect_type(self, message, MessageType::FileBinaryResponse)
                .map(|_| FileBinaryResponseMessage::from_frame(message.content())),
        )
    }

    pub fn parse_file_url_download_init(&self, message: &Message) -> Option<FileUrlDownloadInitMessage> {
        codec::inbound(
            self.name(),
            MessageType::FileUrlDownloadInit,
            self.file_url(message, MessageType::FileUrlDownloadInit)
                .map(FileUrlDownloadInitMessage::new),
        )
    }

    pub fn parse_file_url_download_abort(
        &self,
        message: &Message,
    ) -> Option<FileUrlDownloadAbortMessage> {
        codec::inbound(
            self.name(),
            MessageType::FileUrlDownloadAbort,
            self.file_url(message, MessageType::FileUrlDownloadAbort)
                .map(FileUrlDownloadAbortMessage::new),
        )
    }

    pub fn parse_file_list_request(&self, message: &Message) -> Option<FileListRequestMessage> {
        codec::inbound(
            self.name(),
            MessageType::FileListRequest,
            codec::expect_type(self, message, MessageType::FileListRequest)
                .map(|_| FileListRequestMessage),
        )
    }

    pub fn parse_file_delete(&self, message: &Message) -> Option<FileDeleteMessage> {
        codec::inbound(self.name(), MessageType::FileDelete, self.file_delete(message))
    }

    pub fn parse_file_purge(&self, message: &Message) -> Option<FilePurgeMessage> {
        codec::inbound(
            self.name(),
            MessageType::FilePurge,
            codec::expect_type(self, message, MessageType::FilePurge).map(|_| FilePurgeMessage),
        )
    }

    pub fn parse(&self, message: &Message) -> Option<MessageObject> {
        match self.message_type(message) {
            MessageType::FileUploadInit => self.parse_file_upload_init(message).map(Into::into),
            MessageType::FileUploadAbort => self.parse_file_upload_abort(message).map(Into::into),
            MessageType::FileBinaryResponse => {
                self.parse_file_binary_response(message).map(Into::into)
            }
            MessageType::FileUrlDownloadInit => {
                self.parse_file_url_download_init(message).map(Into::into)
            }
            MessageType::FileUrlDownloadAbort => {
                self.parse_file_url_download_abort(message).map(Into::into)
            }
            MessageType::FileListRequest => self.parse_file_list_request(message).map(Into::into),
            MessageType::FileDelete => self.parse_file_delete(message).map(Into::into),
            MessageType::FilePurge => self.parse_file_purge(message).map(Into::into),
            other => codec::inbound(self.name(), other, Err(ProtocolError::Unsupported(other))),
        }
    }

    fn file_upload_init(&self, message: &Message) -> Result<FileUploadInitiateMessage> {
        codec::expect_type(self, message, MessageType::FileUploadInit)?;
        let json: FileUploadInitJson = serde_json::from_slice(message.content())?;
        codec::require(&json.name, "name")?;
        Ok(FileUploadInitiateMessage::new(json.name, json.size, json.hash))
    }

    fn file_upload_abort(&self, message: &Message) -> Result<FileUploadAbortMessage> {
        codec::expect_type(self, message, MessageType::FileUploadAbort)?;
        Ok(FileUploadAbortMessage::new(codec::scalar(message, "name")?))
    }

    fn file_url(&self, message: &Message, expected: MessageType) -> Result<String> {
        codec::expect_type(self, message, expected)?;
        codec::scalar(message, "file url")
    }

    fn file_delete(&self, message: &Message) -> Result<FileDeleteMessage> {
        codec::expect_type(self, message, MessageType::FileDelete)?;
        let payload = self.validator.validate(message)?;
        Ok(FileDeleteMessage::new(codec::string_array(&payload, "files")?))
    }
}

impl Default for WolkaboutFileManagementProtocol {
    fn default() -> Self {
        Self::new()
    }
}

impl Protocol for WolkaboutFileManagementProtocol {
    fn name(&self) -> &'static str {
        "file_management"
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
        match message_type {
            MessageType::FileBinaryRequest => Some(wolkabout::channel(
                Direction::PlatformToDevice,
                device_key,
                MessageType::FileBinaryResponse,
            )),
            _ => None,
        }
    }
}

fn serialize(device_key: &str, message: &MessageObject) -> Result<Message> {
    codec::require(device_key, "device key")?;

    let payload = match message {
        MessageObject::FileUploadStatus(m) => file_upload_status_payload(m)?,
        MessageObject::FileBinaryRequest(m) => file_binary_request_payload(m)?,
        MessageObject::FileUrlDownloadStatus(m) => file_url_download_status_payload(m)?,
        MessageObject::FileListResponse(m) => file_list_payload(m)?,
        other => return Err(ProtocolError::Unsupported(other.message_type())),
    };

    Ok(Message::new(
        payload,
        wolkabout::channel(Direction::DeviceToPlatform, device_key, message.message_type()),
    ))
}

fn file_upload_status_payload(message: &FileUploadStatusMessage) -> Result<String> {
    codec::require(&message.name, "name")?;
    let json = FileUploadStatusJson {
        name: &message.name,
        status: message.status.as_str(),
        error: status_error(message.status, message.error.map(|e| e.code()))?,
    };
    Ok(serde_json::to_string(&json)?)
}

fn file_binary_request_payload(message: &FileBinaryRequestMessage) -> Result<String> {
    codec::require(&message.name, "name")?;
    let json = FileBinaryRequestJson {
        name: &message.name,
        chunk_index: message.chunk_index,
    };
    Ok(serde_json::to_string(&json)?)
}

fn file_url_download_status_payload(message: &FileUrlDownloadStatusMessage) -> Result<String> {
    codec::require(&message.file_url, "file url")?;
    let json = FileUrlDownloadStatusJson {
        file_url: &message.file_url,
        status: message.status.as_str(),
        file_name: message.file_name.as_deref().filter(|name| !name.is_empty()),
        error: status_error(message.status, message.error.map(|e| e.code()))?,
    };
    Ok(serde_json::to_string(&json)?)
}

fn file_list_payload(message: &FileListResponseMessage) -> Result<String> {
    for file in &message.files {
        codec::require(&file.name, "file name")?;
    }
    let files: Vec<FileInformationJson> = message.files.iter().map(FileInformationJson::from).collect();
    Ok(serde_json::to_string(&files)?)
}

/// An `ERROR` status must name its error; other statuses carry none.
fn status_error(status: FileTransferStatus, code: Option<u64>) -> Result<Option<u64>> {
    match (status, code) {
        (FileTransferStatus::Error, None) => Err(ProtocolError::MissingField("error")),
        (FileTransferStatus::Error, code) => Ok(code),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wolk_core::model::FileTransferError;

    #[test]
    fn test_error_status_requires_code() {
        assert!(status_error(FileTransferStatus::Error, None).is_err());
        assert_eq!(
            status_error(FileTransferStatus::Error, Some(FileTransferError::FileHashMismatch.code()))
                .unwrap(),
            Some(4)
        );
        assert_eq!(status_error(FileTransferStatus::FileReady, Some(4)).unwrap(), None);
    }
}
