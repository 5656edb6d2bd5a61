// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub files: FilesConfig,
    pub mime: MimeConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// File serving configuration
#[derive(Debug, Deserialize, Clone)]
pub struct FilesConfig {
    /// Directory request paths are resolved against
    #[serde(skip)]
    pub root: PathBuf,
    /// Files served in place of a directory listing, tried in order
    pub index_files: Vec<String>,
}

/// Content type configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct MimeConfig {
    /// Extension (without the leading dot) to content type, checked before
    /// the built-in table
    #[serde(default)]
    pub overrides: HashMap<String, String>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}
