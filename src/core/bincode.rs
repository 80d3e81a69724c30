/*!
 * Binary Serialization with bincode
 * Compact payload marshaling for the transport boundary
 */

use serde::{de::DeserializeOwned, Serialize};

/// Result type for bincode operations
pub type BincodeResult<T> = Result<T, BincodeError>;

/// Binary serialization errors
#[derive(Debug, thiserror::Error)]
pub enum BincodeError {
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Serialize to binary bytes using bincode
///
/// Much smaller and faster than JSON; use for machine-to-machine payloads
/// where human-readability is not required.
#[inline]
pub fn to_vec<T: Serialize>(value: &T) -> BincodeResult<Vec<u8>> {
    bincode::serialize(value).map_err(|e| BincodeError::Serialization(e.to_string()))
}

/// Deserialize from binary bytes using bincode
///
/// Matches the output of `to_vec`.
#[inline]
pub fn from_slice<T: DeserializeOwned>(bytes: &[u8]) -> BincodeResult<T> {
    bincode::deserialize(bytes).map_err(|e| BincodeError::Deserialization(e.to_string()))
}

/// Get the serialized size of a value without actually serializing it
///
/// Useful for pre-allocating buffers or checking size limits.
#[inline]
pub fn serialized_size<T: Serialize>(value: &T) -> BincodeResult<u64> {
    bincode::serialized_size(value).map_err(|e| BincodeError::Serialization(e.to_string()))
}
