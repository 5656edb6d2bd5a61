//! HTTP protocol layer module
//!
//! Provides the protocol-level pieces of the file server (content types, path
//! translation, bodies, listings, response builders), decoupled from request
//! handling.

pub mod body;
pub mod listing;
pub mod mime;
pub mod path;
pub mod response;

// Re-export commonly used types
pub use body::Body;
pub use path::{translate_path, TranslatedPath};
pub use response::{
    build_404_response, build_501_response, build_error_response, build_file_response,
    build_html_response, build_redirect_response,
};
