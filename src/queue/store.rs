/*!
 * Queue Store
 * Concurrent owner of the name-to-queue mapping
 */

use super::priority::PriorityQueue;
use super::types::MAX_QUEUES;
use ahash::RandomState;
use dashmap::DashMap;
use log::info;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

/// Store-wide operation counters
#[derive(Debug, Default)]
pub(super) struct StoreCounters {
    pub pushed: AtomicU64,
    pub popped: AtomicU64,
    pub created: AtomicU64,
    pub deleted: AtomicU64,
}

/// Concurrent store of named priority queues
///
/// Structural changes (create/delete) and message operations on the same
/// name serialize through the map entry; operations on different names
/// proceed in parallel on independent shards.
///
/// # Performance
/// - Cache-line aligned to prevent false sharing of the atomic ID generator
#[repr(C, align(64))]
pub struct QueueStore {
    pub(super) queues: Arc<DashMap<String, PriorityQueue, RandomState>>,
    pub(super) next_msg_id: Arc<AtomicU64>,
    pub(super) counters: Arc<StoreCounters>,
}

impl QueueStore {
    pub fn new() -> Self {
        info!("Queue store initialized (max queues: {})", MAX_QUEUES);
        Self {
            queues: Arc::new(DashMap::with_hasher(RandomState::new())),
            next_msg_id: Arc::new(AtomicU64::new(1)),
            counters: Arc::new(StoreCounters::default()),
        }
    }
}

impl Default for QueueStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for QueueStore {
    fn clone(&self) -> Self {
        Self {
            queues: Arc::clone(&self.queues),
            next_msg_id: Arc::clone(&self.next_msg_id),
            counters: Arc::clone(&self.counters),
        }
    }
}
