/*!
 * Core Types
 * Common types used across the broker
 */

/// Priority level (0-4, lower is more urgent)
pub type Priority = u8;

/// Monotonic message identifier
pub type MessageId = u64;

/// Size type for lengths and capacities
pub type Size = usize;
