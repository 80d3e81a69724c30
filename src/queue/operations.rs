/*!
 * Queue Operations
 * Push and pop operations on named queues
 */

use super::store::QueueStore;
use super::types::{
    QueueError, QueueMessage, QueueResult, MAX_MESSAGE_SIZE, MAX_PRIORITY, PRIORITY_LEVELS,
};
use crate::core::types::{MessageId, Priority};
use log::debug;
use std::sync::atomic::Ordering;

impl QueueStore {
    /// Push a message onto a queue
    ///
    /// Inputs are validated before the queue is touched: an admission
    /// failure leaves the queue contents unchanged.
    pub fn push(&self, name: &str, msg: String, priority: Priority) -> QueueResult<MessageId> {
        if (priority as usize) >= PRIORITY_LEVELS {
            return Err(QueueError::InvalidPriority(format!(
                "priority {} out of range 0..={}",
                priority, MAX_PRIORITY
            )));
        }

        if msg.len() > MAX_MESSAGE_SIZE {
            return Err(QueueError::LimitExceeded(format!(
                "message size {} exceeds limit {}",
                msg.len(),
                MAX_MESSAGE_SIZE
            )));
        }

        let mut queue = self
            .queues
            .get_mut(name)
            .ok_or_else(|| QueueError::NotFound(name.to_string()))?;

        let id = self.next_msg_id.fetch_add(1, Ordering::SeqCst);
        queue.push(QueueMessage::new(id, msg, priority))?;
        self.counters.pushed.fetch_add(1, Ordering::Relaxed);

        debug!(
            "Pushed message {} onto queue {:?} (priority {})",
            id, name, priority
        );
        Ok(id)
    }

    /// Pop the most urgent message from a queue (non-blocking)
    ///
    /// Returns `Ok(None)` when the queue exists but holds no messages;
    /// blocking-until-available is a policy the broker does not offer.
    pub fn pop(&self, name: &str) -> QueueResult<Option<QueueMessage>> {
        let mut queue = self
            .queues
            .get_mut(name)
            .ok_or_else(|| QueueError::NotFound(name.to_string()))?;

        let message = queue.pop();
        if let Some(ref msg) = message {
            self.counters.popped.fetch_add(1, Ordering::Relaxed);
            debug!("Popped message {} from queue {:?}", msg.id, name);
        }
        Ok(message)
    }
}
