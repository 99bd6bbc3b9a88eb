//! Outbound message persistence.
//!
//! Messages that cannot be published right away (no connection, broker
//! backpressure) are parked in a [`MessagePersistence`] and drained later
//! through `front`/`pop`.

mod filesystem;
mod memory;

pub use filesystem::{FilesystemMessagePersistence, PersistenceMode};
pub use memory::InMemoryMessagePersistence;

use wolk_core::Message;

/// Store of messages waiting to be published.
pub trait MessagePersistence: Send + Sync {
    /// Store a message. Returns `false` if it could not be kept.
    fn push(&self, message: Message) -> bool;

    /// Drop the message `front` currently returns.
    fn pop(&self);

    /// The next message to publish, if any.
    fn front(&self) -> Option<Message>;

    fn is_empty(&self) -> bool;

    /// Number of stored messages.
    fn len(&self) -> usize;
}
