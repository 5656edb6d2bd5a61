// Connection handling module
// Serves a single accepted TCP connection to completion

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::Arc;
use tokio::net::TcpStream;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Serve one connection.
///
/// This function:
/// 1. Wraps the TCP stream in `TokioIo`
/// 2. Disables keep-alive so the connection carries a single request
/// 3. Serves it with the request handler and waits until the response has
///    been written
///
/// Connection-level errors (malformed requests, client resets) are logged and
/// swallowed; they never stop the accept loop.
pub async fn serve_connection(stream: TcpStream, state: Arc<AppState>) {
    let io = TokioIo::new(stream);

    let mut builder = http1::Builder::new();
    builder.keep_alive(false);

    let conn = builder.serve_connection(
        io,
        service_fn(move |req| handler::handle_request(req, Arc::clone(&state))),
    );

    if let Err(err) = conn.await {
        logger::log_connection_error(&err);
    }
}
