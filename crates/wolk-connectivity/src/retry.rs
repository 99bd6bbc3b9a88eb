//! Request retry with response correlation.
//!
//! Some requests (pull feed values, registered devices, details
//! synchronization and so on) expect a reply on a known channel. The
//! [`OutboundRetryMessageHandler`] publishes such a request, then resends it
//! on a timer until a message arrives on the response channel or the retry
//! budget runs out. Exactly one of the two outcomes reaches the caller's
//! callback: `Some(response)` or `None`.
//!
//! Pending requests are keyed by response channel. Registering a second
//! request for a channel that is still pending replaces the first one; the
//! replaced callback is dropped without being called.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use wolk_core::Message;
use wolk_core::config::RetryConfig;

use crate::error::{ConnectivityError, Result};
use crate::outbound::OutboundMessageHandler;

/// Invoked once with the response, or with `None` when retries run out.
pub type ResponseCallback = Box<dyn FnOnce(Option<Message>) + Send + 'static>;

/// A request that waits for a correlated response.
pub struct RetryMessage {
    pub message: Message,
    pub response_channel: String,
    pub on_response: ResponseCallback,
    pub max_retries: u32,
    pub retry_interval: Duration,
}

impl RetryMessage {
    pub fn new<F>(
        message: Message,
        response_channel: impl Into<String>,
        on_response: F,
        config: RetryConfig,
    ) -> Self
    where
        F: FnOnce(Option<Message>) + Send + 'static,
    {
        Self {
            message,
            response_channel: response_channel.into(),
            on_response: Box::new(on_response),
            max_retries: config.max_retries,
            retry_interval: config.retry_interval,
        }
    }

    /// Build a request with retry settings read from `WOLK_RETRY_COUNT` and
    /// `WOLK_RETRY_INTERVAL_MS`.
    pub fn from_env<F>(message: Message, response_channel: impl Into<String>, on_response: F) -> Self
    where
        F: FnOnce(Option<Message>) + Send + 'static,
    {
        Self::new(message, response_channel, on_response, RetryConfig::from_env())
    }
}

impl std::fmt::Debug for RetryMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetryMessage")
            .field("message", &self.message)
            .field("response_channel", &self.response_channel)
            .field("max_retries", &self.max_retries)
            .field("retry_interval", &self.retry_interval)
            .finish_non_exhaustive()
    }
}

struct PendingRequest {
    id: u64,
    retry_count: u32,
    on_response: ResponseCallback,
    timer: JoinHandle<()>,
}

type PendingMap = Arc<Mutex<HashMap<String, PendingRequest>>>;

/// Outcome of one timer tick, decided under the lock.
enum Tick {
    Resend,
    Exhausted(ResponseCallback),
    Gone,
}

/// Resends requests until their response arrives.
pub struct OutboundRetryMessageHandler {
    sender: Arc<dyn OutboundMessageHandler>,
    pending: PendingMap,
    next_id: AtomicU64,
}

impl OutboundRetryMessageHandler {
    pub fn new(sender: Arc<dyn OutboundMessageHandler>) -> Self {
        Self {
            sender,
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_id: AtomicU64::new(0),
        }
    }

    /// Publish `retry.message` and keep resending it every
    /// `retry.retry_interval` until [`message_received`] sees a message on
    /// `retry.response_channel`.
    ///
    /// Must be called from within a Tokio runtime; the retry timer is a
    /// spawned task.
    ///
    /// [`message_received`]: Self::message_received
    pub fn add_message(&self, retry: RetryMessage) -> Result<()> {
        let runtime = Handle::try_current().map_err(|_| ConnectivityError::NoRuntime)?;
        let RetryMessage {
            message,
            response_channel,
            on_response,
            max_retries,
            retry_interval,
        } = retry;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);

        {
            // The timer task takes the same lock before its first tick, so it
            // never observes the map without its own entry.
            let mut pending = self.pending.lock();
            let timer = runtime.spawn(retry_loop(
                id,
                response_channel.clone(),
                message.clone(),
                retry_interval,
                max_retries,
                self.pending.clone(),
                self.sender.clone(),
            ));

            let request = PendingRequest {
                id,
                retry_count: 0,
                on_response,
                timer,
            };
            if let Some(replaced) = pending.insert(response_channel.clone(), request) {
                replaced.timer.abort();
                tracing::warn!(
                    channel = %response_channel,
                    "Replacing pending request waiting on the same response channel"
                );
            }
        }

        tracing::debug!(
            channel = %message.channel(),
            response_channel = %response_channel,
            max_retries,
            "Sending request awaiting response"
        );
        self.sender.send(message);
        Ok(())
    }

    /// Match an inbound message against pending requests. Returns `true`
    /// when a request was waiting on its channel; its timer is cancelled and
    /// its callback receives the message.
    pub fn message_received(&self, message: Message) -> bool {
        let Some(request) = self.pending.lock().remove(message.channel()) else {
            return false;
        };
        request.timer.abort();

        tracing::debug!(
            channel = %message.channel(),
            retries = request.retry_count,
            "Response received for pending request"
        );
        (request.on_response)(Some(message));
        true
    }

    /// Number of requests still waiting for a response.
    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    /// Whether a request is waiting on `response_channel`.
    pub fn is_pending(&self, response_channel: &str) -> bool {
        self.pending.lock().contains_key(response_channel)
    }
}

impl Drop for OutboundRetryMessageHandler {
    fn drop(&mut self) {
        for (_, request) in self.pending.lock().drain() {
            request.timer.abort();
        }
    }
}

async fn retry_loop(
    id: u64,
    response_channel: String,
    message: Message,
    interval: Duration,
    max_retries: u32,
    pending: PendingMap,
    sender: Arc<dyn OutboundMessageHandler>,
) {
    loop {
        tokio::time::sleep(interval).await;

        let tick = {
            let mut map = pending.lock();
            let can_retry = map
                .get_mut(&response_channel)
                .filter(|request| request.id == id)
                .map(|request| {
                    let can_retry = request.retry_count < max_retries;
                    if can_retry {
                        request.retry_count += 1;
                    }
                    can_retry
                });

            match can_retry {
                Some(true) => Tick::Resend,
                Some(false) => map
                    .remove(&response_channel)
                    .map_or(Tick::Gone, |request| Tick::Exhausted(request.on_response)),
                None => Tick::Gone,
            }
        };

        match tick {
            Tick::Resend => {
                tracing::debug!(channel = %message.channel(), "Resending request");
                sender.send(message.clone());
            }
            Tick::Exhausted(on_response) => {
                tracing::warn!(
                    channel = %message.channel(),
                    response_channel = %response_channel,
                    max_retries,
                    "No response received, giving up"
                );
                on_response(None);
                return;
            }
            Tick::Gone => return,
        }
    }
}
