// Server module entry point
// Binds the listener and runs the accept loop with an explicit lifecycle:
// start -> serve_forever -> stop

pub mod connection;
pub mod listener;

// `loop` is a keyword, so the file is mounted under another name
#[path = "loop.rs"]
pub mod server_loop;

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::config::{AppState, Config};
use crate::error::ServerError;

// Re-export commonly used items
pub use listener::create_listener;
pub use server_loop::accept_loop;

/// A bound static file server
///
/// Owns its listening socket, so independent instances can run side by side
/// on different ports.
pub struct Server {
    listener: TcpListener,
    state: Arc<AppState>,
    stop: Arc<Notify>,
}

/// Ends a running [`Server::serve_forever`] loop
///
/// A stop requested while a connection is being served takes effect once
/// that connection is done; one requested before serving starts ends the loop
/// immediately.
#[derive(Clone, Debug)]
pub struct StopHandle {
    stop: Arc<Notify>,
}

impl StopHandle {
    pub fn stop(&self) {
        self.stop.notify_one();
    }
}

impl Server {
    /// Bind the listening socket described by `config`
    ///
    /// Fails with [`ServerError::Bind`] if the port is taken or cannot be
    /// bound. Must be called from within a Tokio runtime.
    pub fn start(config: &Config) -> Result<Self, ServerError> {
        let addr = config.get_socket_addr()?;
        let state = Arc::new(AppState::new(config)?);
        let listener = create_listener(addr)?;

        Ok(Self {
            listener,
            state,
            stop: Arc::new(Notify::new()),
        })
    }

    /// Address actually bound (resolves port 0)
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    pub fn stop_handle(&self) -> StopHandle {
        StopHandle {
            stop: Arc::clone(&self.stop),
        }
    }

    /// Serve connections one at a time until stopped
    ///
    /// Without a stop request this only returns on an accept error.
    pub async fn serve_forever(self) -> Result<(), ServerError> {
        accept_loop(self.listener, self.state, self.stop).await
    }
}
