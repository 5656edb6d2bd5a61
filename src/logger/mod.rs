//! Logger module
//!
//! Provides logging utilities for the file server:
//! - Server startup line
//! - Error and warning logging with timestamps
//!
//! Messages at or above the configured level go to stdout (info) or stderr
//! (warnings and errors). There is no access log.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::OnceLock;

use chrono::Local;

use crate::config::LoggingConfig;
use crate::error::ServerError;

/// Level set by `init`; `Info` until then
static LOG_LEVEL: OnceLock<Level> = OnceLock::new();

/// Log verbosity, ordered from quietest to most verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Off,
    Error,
    Warn,
    Info,
}

impl FromStr for Level {
    type Err = ServerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" | "none" => Ok(Self::Off),
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            other => Err(ServerError::InvalidLogLevel(other.to_string())),
        }
    }
}

/// Initialize the logger with configuration
///
/// Should be called once at application startup; later calls keep the
/// first level.
pub fn init(config: &LoggingConfig) -> Result<(), ServerError> {
    let level: Level = config.level.parse()?;
    let _ = LOG_LEVEL.set(level);
    Ok(())
}

fn enabled(level: Level) -> bool {
    level <= *LOG_LEVEL.get().unwrap_or(&Level::Info)
}

fn timestamp() -> String {
    Local::now().format("%d/%b/%Y %H:%M:%S").to_string()
}

/// Write to info log
fn write_info(message: &str) {
    if enabled(Level::Info) {
        println!("{message}");
    }
}

/// Write to error log
fn write_error(level: Level, message: &str) {
    if enabled(level) {
        eprintln!("[{}] {message}", timestamp());
    }
}

pub fn log_server_start(addr: &SocketAddr) {
    write_info(&format!("serving at port {}", addr.port()));
}

pub fn log_connection_error(err: &impl fmt::Display) {
    write_error(Level::Error, &format!("[ERROR] Failed to serve connection: {err}"));
}

pub fn log_error(message: &str) {
    write_error(Level::Error, &format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(Level::Warn, &format!("[WARN] {message}"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_levels() {
        assert_eq!("info".parse::<Level>().unwrap(), Level::Info);
        assert_eq!("WARN".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("warning".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!(" error ".parse::<Level>().unwrap(), Level::Error);
        assert_eq!("off".parse::<Level>().unwrap(), Level::Off);
        assert!(matches!(
            "verbose".parse::<Level>(),
            Err(ServerError::InvalidLogLevel(l)) if l == "verbose"
        ));
    }

    #[test]
    fn test_level_order() {
        assert!(Level::Off < Level::Error);
        assert!(Level::Error < Level::Warn);
        assert!(Level::Warn < Level::Info);
    }

    #[test]
    fn test_init_rejects_unknown_level() {
        let config = LoggingConfig {
            level: "loud".to_string(),
        };
        assert!(init(&config).is_err());
    }
}
