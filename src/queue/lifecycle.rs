/*!
 * Queue Lifecycle Operations
 * Create, delete, and introspection operations on the store
 */

use super::priority::PriorityQueue;
use super::store::QueueStore;
use super::types::{
    QueueError, QueueResult, QueueStats, StoreStats, DEFAULT_QUEUE_CAPACITY, MAX_QUEUES,
};
use crate::core::types::Size;
use dashmap::mapref::entry::Entry;
use log::info;
use std::sync::atomic::Ordering;

impl QueueStore {
    /// Create a new empty queue under `name`
    ///
    /// The entry is taken atomically: a concurrent create on the same name
    /// yields exactly one winner and `AlreadyExists` for the rest. An
    /// existing queue is never overwritten.
    pub fn create(&self, name: &str, capacity: Option<Size>) -> QueueResult<()> {
        if self.queues.len() >= MAX_QUEUES {
            return Err(QueueError::LimitExceeded(format!(
                "queue count limit reached: {}/{}",
                self.queues.len(),
                MAX_QUEUES
            )));
        }

        match self.queues.entry(name.to_string()) {
            Entry::Occupied(_) => Err(QueueError::AlreadyExists(name.to_string())),
            Entry::Vacant(entry) => {
                let capacity = capacity.unwrap_or(DEFAULT_QUEUE_CAPACITY);
                entry.insert(PriorityQueue::new(name, capacity));
                self.counters.created.fetch_add(1, Ordering::Relaxed);
                info!("Created queue {:?} (capacity: {})", name, capacity);
                Ok(())
            }
        }
    }

    /// Delete a queue and discard its contents
    ///
    /// Returns the number of messages discarded. Removal is atomic with
    /// respect to in-flight push/pop on the same name: an operation either
    /// completes before the removal or observes `NotFound`.
    pub fn delete(&self, name: &str) -> QueueResult<Size> {
        let (_, queue) = self
            .queues
            .remove(name)
            .ok_or_else(|| QueueError::NotFound(name.to_string()))?;

        let discarded = queue.len();
        self.counters.deleted.fetch_add(1, Ordering::Relaxed);
        if queue.is_empty() {
            info!("Deleted queue {:?}", name);
        } else {
            info!("Deleted queue {:?} (discarded {} messages)", name, discarded);
        }
        Ok(discarded)
    }

    /// Get queue statistics
    pub fn stats(&self, name: &str) -> QueueResult<QueueStats> {
        let queue = self
            .queues
            .get(name)
            .ok_or_else(|| QueueError::NotFound(name.to_string()))?;

        Ok(QueueStats {
            name: queue.name.clone(),
            capacity: queue.capacity,
            length: queue.len(),
            depths: queue.depths(),
        })
    }

    /// Check whether a queue exists
    pub fn contains(&self, name: &str) -> bool {
        self.queues.contains_key(name)
    }

    /// Names of all live queues (unordered)
    pub fn list(&self) -> Vec<String> {
        self.queues.iter().map(|q| q.key().clone()).collect()
    }

    /// Number of live queues
    pub fn queue_count(&self) -> Size {
        self.queues.len()
    }

    /// Store-wide statistics
    pub fn store_stats(&self) -> StoreStats {
        StoreStats {
            queues: self.queues.len(),
            queued_messages: self.queues.iter().map(|q| q.len()).sum(),
            queued_bytes: self.queues.iter().map(|q| q.byte_size()).sum(),
            messages_pushed: self.counters.pushed.load(Ordering::Relaxed),
            messages_popped: self.counters.popped.load(Ordering::Relaxed),
            queues_created: self.counters.created.load(Ordering::Relaxed),
            queues_deleted: self.counters.deleted.load(Ordering::Relaxed),
        }
    }
}
