//! The seam between codecs and the transport.

use tokio::sync::mpsc;
use wolk_core::Message;

/// Publishes envelopes. Implementations are fire-and-forget: delivery
/// failures are the transport's business.
pub trait OutboundMessageHandler: Send + Sync {
    fn send(&self, message: Message);
}

/// Hands every envelope to a channel drained by the transport task.
#[derive(Debug, Clone)]
pub struct ChannelOutboundHandler {
    tx: mpsc::UnboundedSender<Message>,
}

impl ChannelOutboundHandler {
    /// Create a handler and the receiver the transport reads from.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Message>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl OutboundMessageHandler for ChannelOutboundHandler {
    fn send(&self, message: Message) {
        if self.tx.send(message).is_err() {
            tracing::warn!("Outbound channel closed, dropping message");
        }
    }
}
