// Application state module
// Read-only per-server state derived from the startup configuration

use hyper::header::HeaderValue;
use std::path::PathBuf;

use super::types::Config;
use crate::error::ServerError;
use crate::http::mime::MimeTable;

/// Application state shared by every request a server handles
#[derive(Debug)]
pub struct AppState {
    /// Canonical root directory
    pub root: PathBuf,
    pub mime: MimeTable,
    pub index_files: Vec<String>,
    /// Pre-validated `Server` header, `None` if the configured name is not a
    /// valid header value
    pub server_name: Option<HeaderValue>,
}

impl AppState {
    /// Create `AppState` from the configuration
    ///
    /// Fails if the root directory cannot be canonicalized.
    pub fn new(config: &Config) -> Result<Self, ServerError> {
        let root = config.files.root.canonicalize()?;
        let server_name = HeaderValue::from_str(&config.http.server_name).ok();

        Ok(Self {
            root,
            mime: MimeTable::new(&config.mime.overrides),
            index_files: config.files.index_files.clone(),
            server_name,
        })
    }
}
