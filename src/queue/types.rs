/*!
 * Queue Types
 * Common types, errors, and constants for message queues
 */

use crate::core::serde::{is_zero_u64, is_zero_usize};
use crate::core::types::{MessageId, Priority, Size};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::time::SystemTime;
use thiserror::Error;

// Queue limits
pub const PRIORITY_LEVELS: usize = 5;
pub const MAX_PRIORITY: Priority = (PRIORITY_LEVELS - 1) as Priority;
pub const DEFAULT_QUEUE_CAPACITY: usize = 1_000;
pub const MAX_QUEUE_CAPACITY: usize = 10_000;
pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024; // 1MB
pub const MAX_QUEUES: usize = 1_024;

/// Queue operation result
///
/// # Must Use
/// Queue operations can fail and must be handled to keep producer and
/// consumer state consistent
pub type QueueResult<T> = Result<T, QueueError>;

/// Unified queue error type with miette diagnostics
///
/// `Empty` is a normal negative result rather than an exceptional failure;
/// it carries its own kind so callers can poll without string matching.
#[derive(Error, Debug, Clone, Serialize, Deserialize, Diagnostic)]
#[serde(rename_all = "snake_case", tag = "error", content = "details")]
pub enum QueueError {
    /// Queue not found
    #[error("queue not found: {0}")]
    #[diagnostic(
        code(queue::not_found),
        help("The named queue does not exist. Create it first or verify the name.")
    )]
    NotFound(String),

    /// Queue already exists
    #[error("queue already exists: {0}")]
    #[diagnostic(
        code(queue::already_exists),
        help("A live queue is already registered under this name. Delete it first or pick another name.")
    )]
    AlreadyExists(String),

    /// Priority outside the admissible range
    #[error("invalid priority: {0}")]
    #[diagnostic(
        code(queue::invalid_priority),
        help("Priority must be an integer in 0..=4, where 0 is the most urgent level.")
    )]
    InvalidPriority(String),

    /// Pop on an empty queue
    #[error("queue empty: {0}")]
    #[diagnostic(
        code(queue::empty),
        help("The queue holds no messages right now. Poll again later; the broker never blocks a consumer.")
    )]
    Empty(String),

    /// Resource limit exceeded
    #[error("queue limit exceeded: {0}")]
    #[diagnostic(
        code(queue::limit_exceeded),
        help("A capacity, size, or count limit was reached. Drain or delete queues, or push smaller messages.")
    )]
    LimitExceeded(String),

    /// Transport or connectivity failure (surfaced by the RPC adapter, never
    /// constructed by the core)
    #[error("broker unavailable: {0}")]
    #[diagnostic(
        code(queue::unavailable),
        help("The broker could not be reached. Check the transport layer and retry.")
    )]
    Unavailable(String),
}

/// Queue message with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueMessage {
    pub id: MessageId,
    pub msg: String,
    pub priority: Priority,
    #[serde(with = "crate::core::serde::system_time_micros")]
    pub timestamp: SystemTime,
}

impl QueueMessage {
    pub fn new(id: MessageId, msg: String, priority: Priority) -> Self {
        Self {
            id,
            msg,
            priority,
            timestamp: SystemTime::now(),
        }
    }

    pub fn size(&self) -> usize {
        std::mem::size_of::<Self>() + self.msg.len()
    }
}

/// Per-queue statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct QueueStats {
    pub name: String,
    pub capacity: Size,
    pub length: Size,
    /// Messages waiting at each priority level, most urgent first
    pub depths: [Size; PRIORITY_LEVELS],
}

/// Store-wide statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StoreStats {
    #[serde(skip_serializing_if = "is_zero_usize")]
    pub queues: usize,
    #[serde(skip_serializing_if = "is_zero_usize")]
    pub queued_messages: usize,
    #[serde(skip_serializing_if = "is_zero_usize")]
    pub queued_bytes: usize,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub messages_pushed: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub messages_popped: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub queues_created: u64,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub queues_deleted: u64,
}
