//! Platform status and error codec tests.

use wolk_core::messages::PlatformStatusMessage;
use wolk_core::model::ConnectivityStatus;
use wolk_core::{Message, MessageType};
use wolk_protocol::{Protocol, WolkaboutErrorProtocol, WolkaboutPlatformStatusProtocol};

#[test]
fn test_connection_status_type() {
    let protocol = WolkaboutPlatformStatusProtocol::new();
    let message = Message::new("", "p2d/DEV/connection_status");
    assert_eq!(protocol.message_type(&message), MessageType::PlatformConnectionStatus);
}

#[test]
fn test_status_channels() {
    let protocol = WolkaboutPlatformStatusProtocol::new();
    assert_eq!(protocol.inbound_channels(), vec!["p2d/connection_status"]);
    assert!(protocol.inbound_channels_for_device("DEV").is_empty());
}

#[test]
fn test_status_outbound() {
    let protocol = WolkaboutPlatformStatusProtocol::new();

    let message = protocol
        .make_outbound_message("DEV", &PlatformStatusMessage::new(ConnectivityStatus::Connected).into())
        .unwrap();
    assert_eq!(message, Message::new("CONNECTED", "p2d/connection_status"));

    let none = PlatformStatusMessage::new(ConnectivityStatus::None);
    assert!(protocol.make_outbound_message("DEV", &none.into()).is_none());
}

#[test]
fn test_status_parse() {
    let protocol = WolkaboutPlatformStatusProtocol::new();

    let message = Message::new("\"OFFLINE\"", "p2d/connection_status");
    assert_eq!(
        protocol.parse_platform_status(&message),
        Some(PlatformStatusMessage::new(ConnectivityStatus::Offline))
    );

    let unknown = Message::new("ASLEEP", "p2d/connection_status");
    assert!(protocol.parse_platform_status(&unknown).is_none());

    let wrong_type = Message::new("CONNECTED", "p2d/DEV/error");
    assert!(protocol.parse_platform_status(&wrong_type).is_none());
}

#[test]
fn test_error_protocol() {
    let protocol = WolkaboutErrorProtocol::new();
    assert_eq!(protocol.inbound_channels_for_device("DEV"), vec!["p2d/DEV/error"]);

    let message = Message::new("\"Feed 'T' is not registered\"", "p2d/DEV/error");
    let parsed = protocol.parse_error(&message).unwrap();
    assert_eq!(parsed.device_key, "DEV");
    assert_eq!(parsed.message, "Feed 'T' is not registered");

    let keyless = Message::new("oops", "p2d/error");
    assert!(protocol.parse_error(&keyless).is_none());

    let wrong_type = Message::new("oops", "p2d/DEV/time");
    assert!(protocol.parse_error(&wrong_type).is_none());
}
