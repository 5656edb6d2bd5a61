// Configuration module entry point
// Builds the immutable startup configuration and the per-server state

mod state;
mod types;

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::ServerError;

// Re-export public types
pub use state::AppState;
pub use types::{Config, FilesConfig, HttpConfig, LoggingConfig, MimeConfig, ServerConfig};

/// Port the server listens on. Not configurable from outside the process.
pub const DEFAULT_PORT: u16 = 8000;

impl Config {
    /// Load the configuration for serving the current working directory
    pub fn load() -> Result<Self, ServerError> {
        let cwd = std::env::current_dir()?;
        Self::with_root(cwd)
    }

    /// Build the configuration for serving `root`
    ///
    /// Every key gets a default, and `.js` is forced to
    /// `application/javascript` as an override layered above the defaults.
    pub fn with_root(root: impl Into<PathBuf>) -> Result<Self, ServerError> {
        let settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("files.index_files", vec!["index.html", "index.htm"])?
            .set_default(
                "http.server_name",
                concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")),
            )?
            .set_default("logging.level", "info")?
            .set_override("mime.overrides.js", "application/javascript")?
            .build()?;

        let mut cfg: Self = settings.try_deserialize()?;
        cfg.files.root = root.into();
        Ok(cfg)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ServerError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| ServerError::InvalidAddress(format!("{}:{} ({e})", self.server.host, self.server.port)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = Config::with_root("/srv/site").unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8000);
        assert_eq!(cfg.files.root, PathBuf::from("/srv/site"));
        assert_eq!(cfg.files.index_files, vec!["index.html", "index.htm"]);
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.http.server_name.starts_with("jsserve/"));
    }

    #[test]
    fn test_js_override() {
        let cfg = Config::with_root(".").unwrap();
        assert_eq!(cfg.mime.overrides.len(), 1);
        assert_eq!(
            cfg.mime.overrides.get("js").map(String::as_str),
            Some("application/javascript")
        );
    }

    #[test]
    fn test_load_uses_current_dir() {
        let cfg = Config::load().unwrap();
        assert_eq!(cfg.files.root, std::env::current_dir().unwrap());
    }

    #[test]
    fn test_socket_addr() {
        let mut cfg = Config::with_root(".").unwrap();
        assert_eq!(cfg.get_socket_addr().unwrap(), "0.0.0.0:8000".parse().unwrap());

        cfg.server.host = "not a host".to_string();
        assert!(matches!(
            cfg.get_socket_addr(),
            Err(ServerError::InvalidAddress(_))
        ));
    }
}
