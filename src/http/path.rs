//! Request path translation
//!
//! Maps the path of a request URI onto a path relative to the served root.

use percent_encoding::percent_decode_str;
use std::path::{Component, Path, PathBuf};

/// A request path translated to the filesystem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedPath {
    /// Path relative to the root; empty for the root itself
    pub relative: PathBuf,
    /// Whether the decoded request path ended with `/`
    pub trailing_slash: bool,
    /// Percent-decoded request path, used for display
    pub decoded: String,
}

/// Translate a request path into a root-relative filesystem path
///
/// Query and fragment are dropped and the rest is percent-decoded. `.` and
/// empty segments are skipped, `..` removes the previous segment but never
/// climbs above the root, and any segment that is not a single plain path
/// component on this platform is skipped.
pub fn translate_path(request_path: &str) -> TranslatedPath {
    let path = request_path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    let decoded = percent_decode_str(path).decode_utf8_lossy().into_owned();
    let trailing_slash = decoded.trim_end().ends_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s if is_plain_component(s) => segments.push(s),
            _ => {}
        }
    }

    TranslatedPath {
        relative: segments.iter().collect(),
        trailing_slash,
        decoded,
    }
}

/// True if `segment` parses as exactly one normal path component
fn is_plain_component(segment: &str) -> bool {
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
