/*!
 * Message Queue Broker Library
 * Priority message-queue broker core exposed as a library
 *
 * The broker mediates all queue operations for an external RPC layer:
 * - Named priority queues (5 levels, 0 is most urgent)
 * - Create/delete lifecycle with safe concurrent access
 * - Non-blocking push/pop with a fail-fast empty signal
 */

pub mod broker;
pub mod core;
pub mod queue;
pub mod telemetry;

// Re-exports
pub use broker::{Broker, BrokerRequest, BrokerResponse};
pub use queue::{QueueError, QueueMessage, QueueResult, QueueStats, QueueStore, StoreStats};
pub use telemetry::init_tracing;
