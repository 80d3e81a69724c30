/*!
 * Priority Queue
 * Level-bucketed message queue (level 0 served first, FIFO within a level)
 */

use super::types::{
    QueueError, QueueMessage, QueueResult, MAX_PRIORITY, MAX_QUEUE_CAPACITY, PRIORITY_LEVELS,
};
use crate::core::types::Size;
use std::collections::VecDeque;

/// Priority queue implementation
///
/// One FIFO bucket per priority level keeps arrival order exact within a
/// level, which a single heap keyed on priority alone cannot guarantee.
pub(super) struct PriorityQueue {
    pub name: String,
    pub capacity: Size,
    buckets: [VecDeque<QueueMessage>; PRIORITY_LEVELS],
}

impl PriorityQueue {
    pub fn new(name: &str, capacity: Size) -> Self {
        Self {
            name: name.to_string(),
            capacity: capacity.min(MAX_QUEUE_CAPACITY),
            buckets: std::array::from_fn(|_| VecDeque::new()),
        }
    }

    /// Append a message to its level bucket in arrival order
    ///
    /// Validation happens before any mutation: a rejected message leaves the
    /// queue contents unchanged.
    pub fn push(&mut self, message: QueueMessage) -> QueueResult<()> {
        let level = message.priority as usize;
        if level >= PRIORITY_LEVELS {
            return Err(QueueError::InvalidPriority(format!(
                "priority {} out of range 0..={}",
                message.priority, MAX_PRIORITY
            )));
        }

        if self.len() >= self.capacity {
            return Err(QueueError::LimitExceeded(format!(
                "queue {} full: {}/{}",
                self.name,
                self.len(),
                self.capacity
            )));
        }

        self.buckets[level].push_back(message);
        Ok(())
    }

    /// Remove and return the oldest message at the lowest non-empty level
    pub fn pop(&mut self) -> Option<QueueMessage> {
        self.buckets
            .iter_mut()
            .find(|bucket| !bucket.is_empty())?
            .pop_front()
    }

    pub fn len(&self) -> Size {
        self.buckets.iter().map(VecDeque::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(VecDeque::is_empty)
    }

    /// Message count per level, most urgent first
    pub fn depths(&self) -> [Size; PRIORITY_LEVELS] {
        std::array::from_fn(|level| self.buckets[level].len())
    }

    /// Approximate resident size of all queued messages
    pub fn byte_size(&self) -> Size {
        self.buckets.iter().flatten().map(QueueMessage::size).sum()
    }
}
