//! Message codecs for the Wolkabout device protocol.
//!
//! Every codec maps typed messages from [`wolk_core::messages`] to channel +
//! payload envelopes and back. Codecs are stateless apart from their
//! compiled JSON schemas and can be shared freely between threads.
//!
//! | Codec | Area |
//! |-------|------|
//! | [`WolkaboutDataProtocol`] | feed values, feed/attribute registration, parameters, time |
//! | [`WolkaboutRegistrationProtocol`] | subdevice registration towards the platform |
//! | [`WolkaboutGatewayRegistrationProtocol`] | subdevice registration towards local devices |
//! | [`WolkaboutFileManagementProtocol`] | file upload, URL download, file listing |
//! | [`WolkaboutFirmwareUpdateProtocol`] | firmware install and status |
//! | [`WolkaboutGatewaySubdeviceProtocol`] | subdevice traffic wrapped by a gateway |
//! | [`WolkaboutErrorProtocol`] | platform error reports |
//! | [`WolkaboutPlatformStatusProtocol`] | platform connection status |
//!
//! Serializers and parsers return `None` on failure after logging exactly
//! one `ERROR` line. [`validate_json_payload`] is the exception: it returns
//! the error to the caller.
//!
//! ## Example
//!
//! ```rust
//! use wolk_core::messages::FeedValuesMessage;
//! use wolk_core::model::Reading;
//! use wolk_protocol::WolkaboutDataProtocol;
//!
//! let protocol = WolkaboutDataProtocol::new();
//! let message = protocol
//!     .make_outbound_message("DEVICE", &FeedValuesMessage::new(vec![Reading::new("T", 21.5, 1)]).into())
//!     .unwrap();
//! assert_eq!(message.channel(), "d2p/DEVICE/feed_values");
//! ```

mod codec;
mod wire;

pub mod data;
pub mod error;
pub mod error_protocol;
pub mod file_management;
pub mod firmware_update;
pub mod gateway_registration;
pub mod gateway_subdevice;
pub mod platform_status;
pub mod protocol;
pub mod registration;
pub mod schema;
pub mod wolkabout;

pub use data::WolkaboutDataProtocol;
pub use error::{ProtocolError, Result};
pub use error_protocol::WolkaboutErrorProtocol;
pub use file_management::WolkaboutFileManagementProtocol;
pub use firmware_update::WolkaboutFirmwareUpdateProtocol;
pub use gateway_registration::WolkaboutGatewayRegistrationProtocol;
pub use gateway_subdevice::WolkaboutGatewaySubdeviceProtocol;
pub use platform_status::WolkaboutPlatformStatusProtocol;
pub use protocol::Protocol;
pub use registration::WolkaboutRegistrationProtocol;
pub use schema::{validate_json_payload, SchemaValidator};
pub use wolkabout::Direction;
