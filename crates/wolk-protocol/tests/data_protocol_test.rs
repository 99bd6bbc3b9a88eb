//! Data codec tests: feed values, parameters, registration of feeds and
//! attributes, time and details synchronization.

use wolk_core::messages::{
    AttributeRegistrationMessage, DetailsSynchronizationRequestMessage, FeedRegistrationMessage,
    FeedRemovalMessage, FeedValuesMessage, ParametersPullMessage, ParametersUpdateMessage,
    SynchronizeParametersMessage,
};
use wolk_core::model::{Attribute, DataType, Feed, FeedType, Location, ParameterName, Reading};
use wolk_core::{DeviceType, Message, MessageObject, MessageType};
use wolk_protocol::{Protocol, WolkaboutDataProtocol};

const KEY: &str = "DEVICE_KEY";

fn protocol() -> WolkaboutDataProtocol {
    WolkaboutDataProtocol::new()
}

#[test]
fn test_inbound_channels() {
    assert_eq!(
        protocol().inbound_channels_for_device(KEY),
        vec![
            "p2d/DEVICE_KEY/feed_values",
            "p2d/DEVICE_KEY/parameters",
            "p2d/DEVICE_KEY/time",
            "p2d/DEVICE_KEY/details_synchronization",
        ]
    );
    assert!(protocol().inbound_channels().is_empty());
}

#[test]
fn test_classification() {
    let message = Message::new("[]", "p2d/DEVICE_KEY/feed_values");
    let protocol = protocol();
    assert_eq!(protocol.message_type(&message), MessageType::FeedValues);
    assert_eq!(protocol.device_type(&message), DeviceType::Standalone);
    assert_eq!(protocol.device_key(&message), KEY);
}

#[test]
fn test_feed_values_round_trip() {
    let original = FeedValuesMessage::new(vec![
        Reading::new("T", 23.5, 1_000),
        Reading::new("SW", true, 1_000),
        Reading::new("C", 7u64, 2_000),
        Reading::new("N", -3i64, 2_000),
        Reading::new("S", "hello", 2_000),
        Reading::new("GPS", Location::new(45.25, 19.5), 3_000),
        Reading::with_values("ACL", [1.5, 2.0, -3.25], 3_000).unwrap(),
    ]);

    let protocol = protocol();
    let message = protocol
        .make_outbound_message(KEY, &original.clone().into())
        .expect("serialized");
    assert_eq!(message.channel(), "d2p/DEVICE_KEY/feed_values");

    let parsed = protocol.parse_feed_values(&message).expect("parsed");
    assert_eq!(parsed.readings.len(), original.readings.len());

    let find = |reference: &str| {
        parsed
            .readings
            .iter()
            .find(|r| r.reference() == reference)
            .cloned()
            .unwrap()
    };
    assert_eq!(find("T").as_f64(), Some(23.5));
    assert_eq!(find("T").timestamp(), 1_000);
    assert_eq!(find("SW").as_bool(), Some(true));
    assert_eq!(find("C").as_u64(), Some(7));
    assert_eq!(find("N").as_i64(), Some(-3));
    assert_eq!(find("S").string_value(), "hello");
    assert_eq!(find("GPS").as_location(), Some(Location::new(45.25, 19.5)));
    assert!(find("ACL").is_multi());
    assert_eq!(find("ACL").string_values().len(), 3);
}

#[test]
fn test_feed_values_parse_rules() {
    let protocol = protocol();

    let ok = Message::new(r#"[{"timestamp":5,"T":1,"ACL":[1,2,3]}]"#, "p2d/KEY/feed_values");
    assert_eq!(protocol.parse_feed_values(&ok).unwrap().readings.len(), 2);

    let no_timestamp = Message::new(r#"[{"T":1}]"#, "p2d/KEY/feed_values");
    assert!(protocol.parse_feed_values(&no_timestamp).is_none());

    let negative_timestamp = Message::new(r#"[{"timestamp":-1,"T":1}]"#, "p2d/KEY/feed_values");
    assert!(protocol.parse_feed_values(&negative_timestamp).is_none());

    let mixed_array = Message::new(r#"[{"timestamp":5,"T":1,"ACL":[1,"a"]}]"#, "p2d/KEY/feed_values");
    assert!(protocol.parse_feed_values(&mixed_array).is_none());

    let not_json = Message::new("feed", "p2d/KEY/feed_values");
    assert!(protocol.parse_feed_values(&not_json).is_none());
}

#[test]
fn test_parameters_round_trip() {
    let original = ParametersUpdateMessage::new(vec![
        (ParameterName::FirmwareVersion, "1.2.3".to_string()),
        (ParameterName::FileTransferPlatformEnabled, "true".to_string()),
        (ParameterName::MaximumMessageSize, "1024".to_string()),
    ]);

    let protocol = protocol();
    let message = protocol
        .make_outbound_message(KEY, &original.into())
        .unwrap();
    assert_eq!(message.channel(), "d2p/DEVICE_KEY/parameters");

    let parsed = protocol.parse_parameters(&message).unwrap();
    assert_eq!(parsed.get(ParameterName::FirmwareVersion), Some("1.2.3"));
    assert_eq!(parsed.get(ParameterName::FileTransferPlatformEnabled), Some("true"));
    assert_eq!(parsed.get(ParameterName::MaximumMessageSize), Some("1024"));
}

#[test]
fn test_parameters_reject_unknown_names_and_values() {
    let protocol = protocol();

    let unknown = Message::new(r#"{"SPEED":"1"}"#, "p2d/KEY/parameters");
    assert!(protocol.parse_parameters(&unknown).is_none());

    let nested = Message::new(r#"{"FIRMWARE_VERSION":{"a":1}}"#, "p2d/KEY/parameters");
    assert!(protocol.parse_parameters(&nested).is_none());

    let null = Message::new(r#"{"EXTERNAL_ID":null}"#, "p2d/KEY/parameters");
    assert_eq!(
        protocol.parse_parameters(&null).unwrap().get(ParameterName::ExternalId),
        Some("")
    );
}

#[test]
fn test_registration_messages_round_trip() {
    let protocol = protocol();

    let feeds = FeedRegistrationMessage::new(vec![
        Feed::new("Temperature", "T", FeedType::In, "CELSIUS").unwrap(),
        Feed::new("Switch", "SW", FeedType::InOut, "BOOLEAN_ON_OFF").unwrap(),
    ]);
    let message = protocol.make_outbound_message(KEY, &feeds.clone().into()).unwrap();
    assert_eq!(protocol.parse_feed_registration(&message), Some(feeds));

    let removal = FeedRemovalMessage::new(vec!["T".to_string()]);
    let message = protocol.make_outbound_message(KEY, &removal.clone().into()).unwrap();
    assert_eq!(message.content_str(), r#"["T"]"#);
    assert_eq!(protocol.parse_feed_removal(&message), Some(removal));

    let attributes = AttributeRegistrationMessage::new(vec![
        Attribute::new("Serial", DataType::String, "SN-1").unwrap(),
    ]);
    let message = protocol.make_outbound_message(KEY, &attributes.clone().into()).unwrap();
    assert_eq!(protocol.parse_attribute_registration(&message), Some(attributes));

    let sync = SynchronizeParametersMessage::new(vec![ParameterName::FirmwareUpdateEnabled]);
    let message = protocol.make_outbound_message(KEY, &sync.clone().into()).unwrap();
    assert_eq!(protocol.parse_synchronize_parameters(&message), Some(sync));
}

#[test]
fn test_empty_payload_requests() {
    let protocol = protocol();
    for request in [
        MessageObject::from(ParametersPullMessage),
        MessageObject::from(DetailsSynchronizationRequestMessage),
    ] {
        let message = protocol.make_outbound_message(KEY, &request).unwrap();
        assert!(message.content().is_empty());
        assert!(message.channel().starts_with("d2p/DEVICE_KEY/"));
    }
}

#[test]
fn test_validate_before_serialize() {
    let protocol = protocol();

    assert!(protocol
        .make_outbound_message(KEY, &FeedValuesMessage::new(vec![]).into())
        .is_none());
    assert!(protocol
        .make_outbound_message(KEY, &FeedValuesMessage::new(vec![Reading::new("", 1u64, 1)]).into())
        .is_none());
    assert!(protocol
        .make_outbound_message("", &FeedValuesMessage::new(vec![Reading::new("T", 1u64, 1)]).into())
        .is_none());
    assert!(protocol
        .make_outbound_message(KEY, &FeedRemovalMessage::new(vec![String::new()]).into())
        .is_none());
    assert!(protocol
        .make_outbound_message(KEY, &ParametersUpdateMessage::new(vec![]).into())
        .is_none());
}

#[test]
fn test_timestamp_reference_is_reserved() {
    let protocol = protocol();
    let readings = vec![Reading::new("T", 21u64, 1000), Reading::new("timestamp", 5u64, 1000)];

    assert!(protocol
        .make_outbound_message(KEY, &FeedValuesMessage::new(readings).into())
        .is_none());
}

#[test]
fn test_empty_reading_never_reaches_serializer() {
    let empty = serde_json::from_str::<Reading>(r#"{"reference":"T","values":[],"timestamp":1}"#);
    assert!(empty.is_err());

    let reading: Reading = serde_json::from_str(r#"{"reference":"T","values":["4"],"timestamp":1}"#).unwrap();
    let message = protocol()
        .make_outbound_message(KEY, &FeedValuesMessage::new(vec![reading]).into())
        .unwrap();
    let payload: serde_json::Value = serde_json::from_slice(message.content()).unwrap();
    assert_eq!(payload, serde_json::json!([{"T": 4, "timestamp": 1}]));
}

#[test]
fn test_time_and_details() {
    let protocol = protocol();

    let time = Message::new(r#"{"timestamp":1700000000000}"#, "p2d/KEY/time");
    assert_eq!(protocol.parse_time_sync(&time).unwrap().timestamp, 1_700_000_000_000);

    let details = Message::new(
        r#"{"feeds":["T","SW"],"attributes":["Serial"]}"#,
        "p2d/KEY/details_synchronization",
    );
    let parsed = protocol.parse_details_synchronization(&details).unwrap();
    assert_eq!(parsed.feeds, vec!["T", "SW"]);
    assert_eq!(parsed.attributes, vec!["Serial"]);

    let blank = Message::new(
        r#"{"feeds":[" "],"attributes":[]}"#,
        "p2d/KEY/details_synchronization",
    );
    assert!(protocol.parse_details_synchronization(&blank).is_none());
}

#[test]
fn test_type_gate() {
    let protocol = protocol();
    let message = Message::new(r#"[{"timestamp":1,"T":1}]"#, "p2d/KEY/parameters");
    assert!(protocol.parse_feed_values(&message).is_none());

    let message = Message::new(r#"{"timestamp":1}"#, "p2d/KEY/feed_values");
    assert!(protocol.parse_time_sync(&message).is_none());
}

#[test]
fn test_generic_parse_routes_by_type() {
    let protocol = protocol();
    let message = Message::new(r#"{"timestamp":42}"#, "p2d/KEY/time");
    let parsed = protocol.parse(&message).unwrap();
    assert_eq!(parsed.message_type(), MessageType::TimeSync);

    let message = Message::new("", "p2d/KEY/file_purge");
    assert!(protocol.parse(&message).is_none());
}
