//! Device-side connectivity helpers for Wolkabout devices.
//!
//! - [`OutboundMessageHandler`]: the sender trait codecs publish through.
//! - [`OutboundRetryMessageHandler`]: resends requests until a correlated
//!   response arrives or retries run out.
//! - [`persistence`]: stores for messages that could not be published yet.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use wolk_connectivity::{ChannelOutboundHandler, OutboundRetryMessageHandler, RetryMessage};
//! use wolk_core::{Message, config::RetryConfig};
//!
//! # async fn example() -> wolk_connectivity::Result<()> {
//! let (sender, mut transport) = ChannelOutboundHandler::new();
//! let retry = OutboundRetryMessageHandler::new(Arc::new(sender));
//!
//! retry.add_message(RetryMessage::new(
//!     Message::new("", "d2p/KEY/pull_parameters"),
//!     "p2d/KEY/parameters",
//!     |response| println!("response: {:?}", response),
//!     RetryConfig::default(),
//! ))?;
//!
//! let request = transport.recv().await;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod outbound;
pub mod persistence;
pub mod retry;

pub use error::{ConnectivityError, Result};
pub use outbound::{ChannelOutboundHandler, OutboundMessageHandler};
pub use persistence::{
    FilesystemMessagePersistence, InMemoryMessagePersistence, MessagePersistence, PersistenceMode,
};
pub use retry::{OutboundRetryMessageHandler, ResponseCallback, RetryMessage};
