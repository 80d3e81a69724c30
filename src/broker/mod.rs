/*!
 * Broker Module
 * Server-side operations and the transport-facing dispatch surface
 */

pub mod handler;
pub mod request;

// Re-export public API
pub use handler::Broker;
pub use request::{BrokerRequest, BrokerResponse};
