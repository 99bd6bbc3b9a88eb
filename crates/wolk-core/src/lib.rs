//! Core types for the Wolkabout device protocol.
//!
//! - [`Message`]: the channel + payload envelope exchanged with the transport
//! - [`MessageType`] / [`DeviceType`]: tags decoded from a channel
//! - [`model`]: readings, feeds, attributes, parameters and the enums used
//!   by file transfer, firmware update and registration
//! - [`messages`]: one typed struct per message kind, plus [`MessageObject`]
//!
//! ## Example
//!
//! ```rust
//! use wolk_core::messages::FeedValuesMessage;
//! use wolk_core::model::Reading;
//!
//! let message = FeedValuesMessage::new(vec![
//!     Reading::new("T", 23.5, 1_700_000_000_000),
//!     Reading::new("SW", true, 1_700_000_000_000),
//! ]);
//! assert_eq!(message.readings.len(), 2);
//! ```

pub mod config;
pub mod error;
pub mod message;
pub mod messages;
pub mod model;
pub mod types;

pub use error::{Error, Result};
pub use message::Message;
pub use messages::MessageObject;
pub use types::{DeviceType, MessageType};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
