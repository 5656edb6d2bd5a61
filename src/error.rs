//! Server error types

use std::net::SocketAddr;

/// Errors that stop the server from starting or keep it from serving.
///
/// Per-request failures never surface here; the handler turns them into
/// HTTP error responses.
#[derive(thiserror::Error, Debug)]
pub enum ServerError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to accept connection: {0}")]
    Accept(#[source] std::io::Error),
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
