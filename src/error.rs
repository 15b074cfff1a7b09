use std::net::AddrParseError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid listen address {addr}: {source}")]
    Address {
        addr: String,
        #[source]
        source: AddrParseError,
    },
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
    #[error("failed to encode projection: {0}")]
    Encode(#[from] serde_json::Error),
}
