// Server loop module
// Sequential accept loop: one connection is served to completion before the
// next one is accepted

use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::serve_connection;
use crate::config::AppState;
use crate::error::ServerError;

/// Accept and serve connections until `stop` is notified
///
/// An accept error is fatal and returned to the caller; it is not retried.
#[allow(clippy::ignored_unit_patterns)]
pub async fn accept_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    stop: Arc<Notify>,
) -> Result<(), ServerError> {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                let (stream, _peer_addr) = accept_result.map_err(ServerError::Accept)?;
                serve_connection(stream, Arc::clone(&state)).await;
            }

            _ = stop.notified() => {
                return Ok(());
            }
        }
    }
}
