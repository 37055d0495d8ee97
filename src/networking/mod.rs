//! Networking with the graph server.

pub mod client;
pub mod protocol;

pub use client::{HttpNeighborProvider, NeighborProvider};
pub use protocol::{GraphRequest, NeighborResponse, StartResponse};

use thiserror::Error;

/// Errors from a neighbor provider call.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server returned status {status}: {detail}")]
    Status { status: u16, detail: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Request timed out")]
    Timeout,
}
