//! Error types for model loading and serving.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to read or interpret a regression model artifact.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot read model \"{path}\": {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid model JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid model: {0}")]
    Invalid(String),
}

/// Failure while running the HTTP service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}
