//! Peer Link
//!
//! Wireless notification path to a paired phone or base station:
//! - Connection callbacks reduced to a single "is a peer connected" query
//! - Accident record serialized as one JSON notification frame
//! - In-process channel sink standing in for the radio characteristic

mod config;
mod link;

pub use config::{LinkConfig, LinkIdentity};
pub use link::{ChannelSink, ConnectionEvents, ConnectionHandle, NotificationSink, PeerLink};

use thiserror::Error;

/// Peer link error types
#[derive(Error, Debug)]
pub enum LinkError {
    #[error("Invalid {field} UUID: {source}")]
    InvalidUuid {
        field: &'static str,
        #[source]
        source: uuid::Error,
    },

    #[error("No peer connected")]
    NotConnected,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Delivery failed: {0}")]
    Delivery(String),
}
