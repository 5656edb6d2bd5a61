//! jsserve: a single-threaded static file HTTP server
//!
//! Serves a directory over HTTP/1.x, one connection at a time, with `.js`
//! files sent as `application/javascript`.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;

pub use config::Config;
pub use error::ServerError;
pub use server::{Server, StopHandle};
