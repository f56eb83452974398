//! Network messages - communication between App and Network layers

use crate::error::TransportError;
use crate::params::QueryParams;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkCommand {
    /// GET one endpoint. Everything here is a snapshot taken at trigger time.
    Fetch {
        id: u64,
        label: String,
        path: String,
        params: QueryParams,
    },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkResponse {
    /// The endpoint answered with a JSON body
    Success {
        id: u64,
        label: String,
        payload: serde_json::Value,
        time_ms: u64,
    },
    /// Transport or HTTP failure
    Error {
        id: u64,
        label: String,
        error: TransportError,
        time_ms: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Success { id, .. } => *id,
            NetworkResponse::Error { id, .. } => *id,
        }
    }

    /// Label of the endpoint the request was dispatched for
    pub fn label(&self) -> &str {
        match self {
            NetworkResponse::Success { label, .. } => label,
            NetworkResponse::Error { label, .. } => label,
        }
    }

    pub fn time_ms(&self) -> u64 {
        match self {
            NetworkResponse::Success { time_ms, .. } => *time_ms,
            NetworkResponse::Error { time_ms, .. } => *time_ms,
        }
    }
}
