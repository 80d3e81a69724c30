/*!
 * Broker Requests
 * Serializable request/response surface consumed by the RPC adapter
 *
 * The transport layer owns framing and connections; it marshals bytes into
 * `BrokerRequest`, calls `Broker::dispatch`, and marshals the
 * `BrokerResponse` back out. Priority crosses the wire as `i32` (matching
 * the original protobuf contract) and is range-checked before it can reach
 * the store.
 */

use super::handler::Broker;
use crate::core::bincode::BincodeResult;
use crate::core::json::JsonResult;
use crate::core::types::Priority;
use crate::queue::types::MAX_PRIORITY;
use crate::queue::{QueueError, QueueResult, QueueStats};
use log::debug;
use serde::{Deserialize, Serialize};

/// Request surface mirroring the remote interface implied by the client SDK
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrokerRequest {
    Ping { ack: bool },
    CreateQueue { qname: String },
    DeleteQueue { qname: String },
    AddMessage { qname: String, msg: String, priority: i32 },
    GetMessage { qname: String },
    QueueStats { qname: String },
    ListQueues,
}

/// Response envelope returned to the transport layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrokerResponse {
    Pong { ack: bool },
    Success,
    Message { msg: String },
    Stats { stats: QueueStats },
    Queues { qnames: Vec<String> },
    Error { error: QueueError },
}

impl BrokerRequest {
    /// Serialize using bincode for machine-to-machine payloads
    pub fn to_bincode_bytes(&self) -> BincodeResult<Vec<u8>> {
        crate::core::bincode::to_vec(self)
    }

    /// Deserialize from bincode payload bytes
    pub fn from_bincode_bytes(bytes: &[u8]) -> BincodeResult<Self> {
        crate::core::bincode::from_slice(bytes)
    }

    /// Serialize as JSON payload bytes
    pub fn to_json_bytes(&self) -> JsonResult<Vec<u8>> {
        crate::core::json::to_vec(self)
    }

    /// Deserialize from JSON payload bytes
    pub fn from_json_bytes(bytes: &[u8]) -> JsonResult<Self> {
        crate::core::json::from_slice(bytes)
    }
}

impl BrokerResponse {
    /// Serialize using bincode for machine-to-machine payloads
    pub fn to_bincode_bytes(&self) -> BincodeResult<Vec<u8>> {
        crate::core::bincode::to_vec(self)
    }

    /// Deserialize from bincode payload bytes
    pub fn from_bincode_bytes(bytes: &[u8]) -> BincodeResult<Self> {
        crate::core::bincode::from_slice(bytes)
    }

    /// Serialize as JSON payload bytes
    pub fn to_json_bytes(&self) -> JsonResult<Vec<u8>> {
        crate::core::json::to_vec(self)
    }

    /// Deserialize from JSON payload bytes
    pub fn from_json_bytes(bytes: &[u8]) -> JsonResult<Self> {
        crate::core::json::from_slice(bytes)
    }
}

/// Narrow a wire-level priority into the admissible range
fn wire_priority(raw: i32) -> QueueResult<Priority> {
    Priority::try_from(raw)
        .ok()
        .filter(|p| *p <= MAX_PRIORITY)
        .ok_or_else(|| {
            QueueError::InvalidPriority(format!("priority {} out of range 0..={}", raw, MAX_PRIORITY))
        })
}

impl Broker {
    /// Execute one request and produce its response
    ///
    /// Every failure is scoped to the requesting call; nothing here is
    /// fatal to the broker process.
    pub fn dispatch(&self, request: BrokerRequest) -> BrokerResponse {
        debug!("Dispatching {:?}", request);

        match request {
            BrokerRequest::Ping { ack } => BrokerResponse::Pong { ack },
            BrokerRequest::CreateQueue { qname } => match self.create_queue(&qname) {
                Ok(()) => BrokerResponse::Success,
                Err(error) => BrokerResponse::Error { error },
            },
            BrokerRequest::DeleteQueue { qname } => match self.delete_queue(&qname) {
                Ok(_) => BrokerResponse::Success,
                Err(error) => BrokerResponse::Error { error },
            },
            BrokerRequest::AddMessage {
                qname,
                msg,
                priority,
            } => {
                let priority = match wire_priority(priority) {
                    Ok(priority) => priority,
                    Err(error) => return BrokerResponse::Error { error },
                };
                match self.add_message(&qname, msg, priority) {
                    Ok(_) => BrokerResponse::Success,
                    Err(error) => BrokerResponse::Error { error },
                }
            }
            BrokerRequest::GetMessage { qname } => match self.get_message(&qname) {
                Ok(message) => BrokerResponse::Message { msg: message.msg },
                Err(error) => BrokerResponse::Error { error },
            },
            BrokerRequest::QueueStats { qname } => match self.queue_stats(&qname) {
                Ok(stats) => BrokerResponse::Stats { stats },
                Err(error) => BrokerResponse::Error { error },
            },
            BrokerRequest::ListQueues => BrokerResponse::Queues {
                qnames: self.list_queues(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_priority_bounds() {
        assert_eq!(wire_priority(0).unwrap(), 0);
        assert_eq!(wire_priority(4).unwrap(), 4);
        assert!(matches!(
            wire_priority(-1),
            Err(QueueError::InvalidPriority(_))
        ));
        assert!(matches!(
            wire_priority(5),
            Err(QueueError::InvalidPriority(_))
        ));
    }
}
