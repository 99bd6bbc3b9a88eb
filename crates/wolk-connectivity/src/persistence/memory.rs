use std::collections::VecDeque;

use parking_lot::Mutex;
use wolk_core::Message;

use super::MessagePersistence;

/// FIFO store kept in memory. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryMessagePersistence {
    queue: Mutex<VecDeque<Message>>,
}

impl InMemoryMessagePersistence {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MessagePersistence for InMemoryMessagePersistence {
    fn push(&self, message: Message) -> bool {
        self.queue.lock().push_back(message);
        true
    }

    fn pop(&self) {
        self.queue.lock().pop_front();
    }

    fn front(&self) -> Option<Message> {
        self.queue.lock().front().cloned()
    }

    fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    fn len(&self) -> usize {
        self.queue.lock().len()
    }
}
