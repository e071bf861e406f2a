//! Error type for backend calls.
//!
//! The store treats every variant the same way (log and drop); the split
//! exists so diagnostics can say what actually went wrong.

use thiserror::Error;

use crate::Endpoint;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base address is not an absolute http(s) URL.
    #[error("invalid base url `{0}`")]
    InvalidBaseUrl(String),

    /// Connection refused, timeout, TLS failure, ...
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("{endpoint} returned {status}: {body}")]
    Status {
        endpoint: Endpoint,
        status: u16,
        body: String,
    },

    /// The body could not be decoded into the expected shape.
    #[error("{endpoint} returned an unexpected body: {source}")]
    Decode {
        endpoint: Endpoint,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
