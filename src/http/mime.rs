//! MIME type detection module
//!
//! Returns the corresponding Content-Type based on file extension, with
//! per-server overrides taking precedence over the built-in table.

use std::collections::HashMap;
use std::path::Path;

/// Content type for anything the tables do not recognise
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Get MIME Content-Type from the built-in table
///
/// # Examples
/// ```
/// use jsserve::http::mime::get_content_type;
/// assert_eq!(get_content_type(Some("html")), Some("text/html"));
/// assert_eq!(get_content_type(Some("js")), Some("text/javascript"));
/// assert_eq!(get_content_type(None), None);
/// ```
pub fn get_content_type(extension: Option<&str>) -> Option<&'static str> {
    let content_type = match extension? {
        // Text
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "txt" | "text" | "md" => "text/plain",
        "csv" => "text/csv",
        "xml" => "text/xml",

        // JavaScript/WASM
        "js" | "mjs" => "text/javascript",
        "json" | "map" => "application/json",
        "wasm" => "application/wasm",

        // Images
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/vnd.microsoft.icon",
        "webp" => "image/webp",
        "bmp" => "image/bmp",

        // Video
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "ogv" => "video/ogg",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",

        // Audio
        "mp3" => "audio/mpeg",
        "wav" => "audio/x-wav",
        "ogg" => "audio/ogg",
        "flac" => "audio/flac",
        "m4a" => "audio/mp4",

        // Fonts
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "otf" => "font/otf",

        // 3D assets
        "gltf" => "model/gltf+json",
        "glb" => "model/gltf-binary",
        "obj" => "model/obj",

        // Documents
        "pdf" => "application/pdf",
        "zip" => "application/zip",
        "tar" => "application/x-tar",

        // Compressed encodings
        "gz" => "application/gzip",
        "bz2" => "application/x-bzip2",
        "xz" => "application/x-xz",
        "Z" => DEFAULT_CONTENT_TYPE,

        _ => return None,
    };
    Some(content_type)
}

/// Extension to content type lookup: overrides first, then the built-in
/// table, then [`DEFAULT_CONTENT_TYPE`].
#[derive(Debug, Clone, Default)]
pub struct MimeTable {
    overrides: HashMap<String, String>,
}

impl MimeTable {
    /// Build a table from extension overrides
    ///
    /// Keys may be given with or without the leading dot.
    pub fn new(overrides: &HashMap<String, String>) -> Self {
        let overrides = overrides
            .iter()
            .map(|(ext, ct)| (ext.trim_start_matches('.').to_string(), ct.clone()))
            .collect();
        Self { overrides }
    }

    /// Content type for an extension (without the leading dot)
    ///
    /// Each table is tried with the extension as given, then lowercased.
    pub fn lookup(&self, extension: Option<&str>) -> &str {
        let Some(ext) = extension else {
            return DEFAULT_CONTENT_TYPE;
        };
        let lower = ext.to_ascii_lowercase();

        if let Some(ct) = self
            .overrides
            .get(ext)
            .or_else(|| self.overrides.get(&lower))
        {
            return ct;
        }

        get_content_type(Some(ext))
            .or_else(|| get_content_type(Some(&lower)))
            .unwrap_or(DEFAULT_CONTENT_TYPE)
    }

    /// Content type for a file path, by its last extension
    pub fn content_type_for(&self, path: &Path) -> &str {
        self.lookup(path.extension().and_then(|e| e.to_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn js_table() -> MimeTable {
        let mut overrides = HashMap::new();
        overrides.insert(".js".to_string(), "application/javascript".to_string());
        MimeTable::new(&overrides)
    }

    #[test]
    fn test_common_types() {
        assert_eq!(get_content_type(Some("html")), Some("text/html"));
        assert_eq!(get_content_type(Some("css")), Some("text/css"));
        assert_eq!(get_content_type(Some("js")), Some("text/javascript"));
        assert_eq!(get_content_type(Some("json")), Some("application/json"));
        assert_eq!(get_content_type(Some("png")), Some("image/png"));
        assert_eq!(get_content_type(Some("gz")), Some("application/gzip"));
    }

    #[test]
    fn test_unknown_extension() {
        assert_eq!(get_content_type(Some("xyz")), None);
        assert_eq!(get_content_type(None), None);

        let table = MimeTable::default();
        assert_eq!(table.lookup(Some("xyz")), DEFAULT_CONTENT_TYPE);
        assert_eq!(table.lookup(None), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_override_wins() {
        let table = js_table();
        assert_eq!(table.lookup(Some("js")), "application/javascript");
        assert_eq!(table.lookup(Some("JS")), "application/javascript");
        // Untouched extensions keep the built-in mapping
        assert_eq!(table.lookup(Some("mjs")), "text/javascript");
        assert_eq!(table.lookup(Some("html")), "text/html");
    }

    #[test]
    fn test_case_fallback() {
        let table = MimeTable::default();
        assert_eq!(table.lookup(Some("HTML")), "text/html");
        assert_eq!(table.lookup(Some("Z")), DEFAULT_CONTENT_TYPE);
    }

    #[test]
    fn test_content_type_for_path() {
        let table = js_table();
        assert_eq!(
            table.content_type_for(Path::new("studies/03/main.js")),
            "application/javascript"
        );
        assert_eq!(
            table.content_type_for(Path::new("bundle.tar.gz")),
            "application/gzip"
        );
        assert_eq!(table.content_type_for(Path::new("Makefile")), DEFAULT_CONTENT_TYPE);
    }
}
