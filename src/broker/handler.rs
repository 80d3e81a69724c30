/*!
 * Broker
 * Validates producer/consumer requests and dispatches to the queue store
 */

use crate::core::types::{MessageId, Priority, Size};
use crate::queue::types::MAX_PRIORITY;
use crate::queue::{QueueError, QueueMessage, QueueResult, QueueStats, QueueStore, StoreStats};
use log::info;

/// Broker mediating all queue operations
///
/// Clones share the underlying store, so one broker instance threads
/// through every request handler without ambient global state.
#[derive(Clone)]
pub struct Broker {
    store: QueueStore,
}

impl Broker {
    pub fn new() -> Self {
        info!("Broker initialized");
        Self {
            store: QueueStore::new(),
        }
    }

    pub fn with_store(store: QueueStore) -> Self {
        Self { store }
    }

    /// Access the underlying store (capacity overrides, introspection)
    pub fn store(&self) -> &QueueStore {
        &self.store
    }

    /// Liveness probe; succeeds whenever the process is responsive
    pub fn ping(&self) -> bool {
        true
    }

    /// Register a new empty queue with the default capacity
    pub fn create_queue(&self, name: &str) -> QueueResult<()> {
        self.store.create(name, None)
    }

    /// Delete a queue, discarding its contents
    pub fn delete_queue(&self, name: &str) -> QueueResult<Size> {
        self.store.delete(name)
    }

    /// Push a message onto a queue
    ///
    /// The priority range is enforced here even though well-behaved clients
    /// pre-validate it; the server does not trust the client.
    pub fn add_message(
        &self,
        name: &str,
        msg: impl Into<String>,
        priority: Priority,
    ) -> QueueResult<MessageId> {
        if priority > MAX_PRIORITY {
            return Err(QueueError::InvalidPriority(format!(
                "priority {} out of range 0..={}",
                priority, MAX_PRIORITY
            )));
        }
        self.store.push(name, msg.into(), priority)
    }

    /// Pop the most urgent message from a queue
    ///
    /// Fails fast with `Empty` when the queue holds no messages; consumers
    /// poll rather than block.
    pub fn get_message(&self, name: &str) -> QueueResult<QueueMessage> {
        self.store
            .pop(name)?
            .ok_or_else(|| QueueError::Empty(name.to_string()))
    }

    /// Statistics for one queue
    pub fn queue_stats(&self, name: &str) -> QueueResult<QueueStats> {
        self.store.stats(name)
    }

    /// Names of all live queues
    pub fn list_queues(&self) -> Vec<String> {
        self.store.list()
    }

    /// Store-wide statistics
    pub fn store_stats(&self) -> StoreStats {
        self.store.store_stats()
    }
}

impl Default for Broker {
    fn default() -> Self {
        Self::new()
    }
}
