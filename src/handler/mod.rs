//! Request handler module
//!
//! Validates the request method and serves files, index pages and directory
//! listings from the root directory.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
