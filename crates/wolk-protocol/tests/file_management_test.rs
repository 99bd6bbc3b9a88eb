//! File management and firmware update codec tests.

use wolk_core::messages::{
    FileBinaryRequestMessage, FileBinaryResponseMessage, FileListResponseMessage,
    FileUploadStatusMessage, FileUrlDownloadStatusMessage, FirmwareUpdateStatusMessage,
    HASH_SIZE,
};
use wolk_core::model::{
    FileInformation, FileTransferError, FileTransferStatus, FirmwareUpdateError,
    FirmwareUpdateStatus,
};
use wolk_core::{Message, MessageType};
use wolk_protocol::{Protocol, WolkaboutFileManagementProtocol, WolkaboutFirmwareUpdateProtocol};

const KEY: &str = "DEV";

#[test]
fn test_parse_file_upload_init() {
    let protocol = WolkaboutFileManagementProtocol::new();
    let payload = r#"{"name":"f","size":123,"hash":"123"}"#;

    let message = Message::new(payload, "p2d/DEV/file_upload_initiate");
    let parsed = protocol.parse_file_upload_init(&message).unwrap();
    assert_eq!(parsed.name, "f");
    assert_eq!(parsed.size, 123);
    assert_eq!(parsed.hash, "123");

    let wrong_type = Message::new(payload, "p2d/DEV/file_upload_not_initiate");
    assert!(protocol.parse_file_upload_init(&wrong_type).is_none());

    let missing_size = Message::new(r#"{"name":"f","hash":"123"}"#, "p2d/DEV/file_upload_initiate");
    assert!(protocol.parse_file_upload_init(&missing_size).is_none());
}

#[test]
fn test_file_binary_response_framing() {
    let protocol = WolkaboutFileManagementProtocol::new();

    let frame: Vec<u8> = (0..666u32).map(|i| (i % 200) as u8 + 32).collect();
    let message = Message::new(frame.clone(), "p2d/DEV/file_binary_response");
    let parsed = protocol.parse_file_binary_response(&message).unwrap();
    assert_eq!(parsed.previous_hash, &frame[..HASH_SIZE]);
    assert_eq!(parsed.data, &frame[HASH_SIZE..666 - HASH_SIZE]);
    assert_eq!(parsed.current_hash, &frame[666 - HASH_SIZE..]);

    let short = Message::new(vec![1u8; 64], "p2d/DEV/file_binary_response");
    let parsed = protocol.parse_file_binary_response(&short).unwrap();
    assert_eq!(parsed, FileBinaryResponseMessage::default());
}

#[test]
fn test_scalar_payloads() {
    let protocol = WolkaboutFileManagementProtocol::new();

    let abort = Message::new("\"file.bin\"", "p2d/DEV/file_upload_abort");
    assert_eq!(protocol.parse_file_upload_abort(&abort).unwrap().name, "file.bin");

    let url = Message::new("https://example.com/f.bin", "p2d/DEV/file_url_download_initiate");
    assert_eq!(
        protocol.parse_file_url_download_init(&url).unwrap().file_url,
        "https://example.com/f.bin"
    );

    let empty = Message::new("\"\"", "p2d/DEV/file_url_download_abort");
    assert!(protocol.parse_file_url_download_abort(&empty).is_none());

    let list = Message::new("", "p2d/DEV/file_list");
    assert!(protocol.parse_file_list_request(&list).is_some());

    let delete = Message::new(r#"["a.bin","b.bin"]"#, "p2d/DEV/file_delete");
    assert_eq!(protocol.parse_file_delete(&delete).unwrap().files, vec!["a.bin", "b.bin"]);
}

#[test]
fn test_outbound_file_messages() {
    let protocol = WolkaboutFileManagementProtocol::new();

    let status = FileUploadStatusMessage::new("f.bin", FileTransferStatus::FileReady);
    let message = protocol.make_outbound_message(KEY, &status.into()).unwrap();
    assert_eq!(message.channel(), "d2p/DEV/file_upload_status");
    let json: serde_json::Value = serde_json::from_slice(message.content()).unwrap();
    assert_eq!(json, serde_json::json!({"name": "f.bin", "status": "FILE_READY"}));

    let failed = FileUploadStatusMessage::new("f.bin", FileTransferStatus::Error)
        .with_error(FileTransferError::RetryCountExceeded);
    let message = protocol.make_outbound_message(KEY, &failed.into()).unwrap();
    let json: serde_json::Value = serde_json::from_slice(message.content()).unwrap();
    assert_eq!(json["error"], 10);

    let request = FileBinaryRequestMessage::new("f.bin", 3);
    let message = protocol.make_outbound_message(KEY, &request.into()).unwrap();
    let json: serde_json::Value = serde_json::from_slice(message.content()).unwrap();
    assert_eq!(json, serde_json::json!({"name": "f.bin", "chunkIndex": 3}));

    let download = FileUrlDownloadStatusMessage::new("https://x/f.bin", FileTransferStatus::FileReady)
        .with_file_name("f.bin");
    let message = protocol.make_outbound_message(KEY, &download.into()).unwrap();
    let json: serde_json::Value = serde_json::from_slice(message.content()).unwrap();
    assert_eq!(json["fileUrl"], "https://x/f.bin");
    assert_eq!(json["fileName"], "f.bin");

    let list = FileListResponseMessage::new(vec![FileInformation::new("f.bin", 10, "abc")]);
    let message = protocol.make_outbound_message(KEY, &list.into()).unwrap();
    assert_eq!(message.channel(), "d2p/DEV/file_list");
    assert_eq!(message.content_str(), r#"[{"name":"f.bin","size":10,"hash":"abc"}]"#);
}

#[test]
fn test_outbound_file_validation() {
    let protocol = WolkaboutFileManagementProtocol::new();

    let unnamed = FileUploadStatusMessage::new("", FileTransferStatus::FileReady);
    assert!(protocol.make_outbound_message(KEY, &unnamed.into()).is_none());

    let error_without_code = FileUploadStatusMessage::new("f.bin", FileTransferStatus::Error);
    assert!(protocol.make_outbound_message(KEY, &error_without_code.into()).is_none());

    let no_url = FileUrlDownloadStatusMessage::new("", FileTransferStatus::FileReady);
    assert!(protocol.make_outbound_message(KEY, &no_url.into()).is_none());
}

#[test]
fn test_response_channel_for_chunk_request() {
    let protocol = WolkaboutFileManagementProtocol::new();
    assert_eq!(
        protocol
            .response_channel_for_message(MessageType::FileBinaryRequest, KEY)
            .as_deref(),
        Some("p2d/DEV/file_binary_response")
    );
}

#[test]
fn test_firmware_update() {
    let protocol = WolkaboutFirmwareUpdateProtocol::new();
    assert_eq!(
        protocol.inbound_channels_for_device(KEY),
        vec!["p2d/DEV/firmware_update_install", "p2d/DEV/firmware_update_abort"]
    );

    let install = Message::new("\"firmware.bin\"", "p2d/DEV/firmware_update_install");
    assert_eq!(protocol.parse_firmware_update_install(&install).unwrap().file, "firmware.bin");

    let abort = Message::new("", "p2d/DEV/firmware_update_abort");
    assert!(protocol.parse_firmware_update_abort(&abort).is_some());
    assert!(protocol.parse_firmware_update_install(&abort).is_none());

    let status = FirmwareUpdateStatusMessage::new(FirmwareUpdateStatus::Installing);
    let message = protocol.make_outbound_message(KEY, &status.into()).unwrap();
    assert_eq!(message.channel(), "d2p/DEV/firmware_update_status");
    assert_eq!(message.content_str(), r#"{"status":"INSTALLING"}"#);

    let failed = FirmwareUpdateStatusMessage::new(FirmwareUpdateStatus::Error)
        .with_error(FirmwareUpdateError::InstallationFailed);
    let message = protocol.make_outbound_message(KEY, &failed.into()).unwrap();
    assert_eq!(message.content_str(), r#"{"status":"ERROR","error":2}"#);

    let missing = FirmwareUpdateStatusMessage::new(FirmwareUpdateStatus::Error);
    assert!(protocol.make_outbound_message(KEY, &missing.into()).is_none());
}
