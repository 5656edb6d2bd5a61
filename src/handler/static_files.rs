//! Static file serving module
//!
//! Resolves request paths under the root directory and serves files, index
//! files and directory listings.

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http::{self, listing, translate_path, Body};
use crate::logger;
use hyper::Response;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File};

const FILE_NOT_FOUND: &str = "File not found";

/// Serve whatever the request path names under the root
pub async fn serve_path(ctx: &RequestContext<'_>, state: &AppState) -> Response<Body> {
    let translated = translate_path(ctx.path);
    let requested = state.root.join(&translated.relative);

    let Some(target) = confine(&state.root, &requested, ctx.path).await else {
        return http::build_404_response(FILE_NOT_FOUND);
    };
    let Ok(meta) = fs::metadata(&target).await else {
        return http::build_404_response(FILE_NOT_FOUND);
    };

    if meta.is_dir() {
        // Decided on the raw path: `%2F` does not stand in for the slash
        if !ctx.path.ends_with('/') {
            return http::build_redirect_response(&directory_location(ctx));
        }
        if let Some((index_path, index_target)) = find_index_file(state, &target, ctx.path).await {
            return serve_file(state, &index_path, &index_target).await;
        }
        return serve_listing(&target, &translated.decoded).await;
    }

    // A file cannot be addressed as a directory
    if translated.trailing_slash {
        return http::build_404_response(FILE_NOT_FOUND);
    }

    serve_file(state, &requested, &target).await
}

/// Canonicalize `requested` and make sure it still lies under `root`
///
/// Catches symlinks that lead out of the served tree; `..` segments are
/// already clamped during path translation.
async fn confine(root: &Path, requested: &Path, request_path: &str) -> Option<PathBuf> {
    // File not found is common (404), no need to log it
    let canonical = fs::canonicalize(requested).await.ok()?;
    if canonical.starts_with(root) {
        Some(canonical)
    } else {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            request_path,
            canonical.display()
        ));
        None
    }
}

/// `Location` for a directory requested without its trailing slash
fn directory_location(ctx: &RequestContext<'_>) -> String {
    match ctx.query {
        Some(query) => format!("{}/?{query}", ctx.path),
        None => format!("{}/", ctx.path),
    }
}

/// First configured index file that exists as a regular file in `dir`
///
/// Returns the index path as named under `dir` and its canonical target.
async fn find_index_file(
    state: &AppState,
    dir: &Path,
    request_path: &str,
) -> Option<(PathBuf, PathBuf)> {
    for index_file in &state.index_files {
        let index_path = dir.join(index_file);
        let is_file = fs::metadata(&index_path).await.is_ok_and(|m| m.is_file());
        if !is_file {
            continue;
        }
        if let Some(target) = confine(&state.root, &index_path, request_path).await {
            return Some((index_path, target));
        }
    }
    None
}

/// Serve a regular file
///
/// `named` decides the content type (the name the client asked for), while
/// `target` is what gets opened.
async fn serve_file(state: &AppState, named: &Path, target: &Path) -> Response<Body> {
    let file = match File::open(target).await {
        Ok(f) => f,
        Err(e) => {
            if !matches!(e.kind(), ErrorKind::NotFound | ErrorKind::PermissionDenied) {
                logger::log_error(&format!(
                    "Failed to open file '{}': {e}",
                    target.display()
                ));
            }
            return http::build_404_response(FILE_NOT_FOUND);
        }
    };

    let meta = match file.metadata().await {
        Ok(m) => m,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read metadata of '{}': {e}",
                target.display()
            ));
            return http::build_404_response(FILE_NOT_FOUND);
        }
    };
    // Sockets, FIFOs and devices are not served
    if !meta.is_file() {
        return http::build_404_response(FILE_NOT_FOUND);
    }

    let content_type = state.mime.content_type_for(named);
    let len = meta.len();
    http::build_file_response(Body::file(file, len), content_type, len)
}

/// Serve the HTML listing of a directory
async fn serve_listing(dir: &Path, display_path: &str) -> Response<Body> {
    match listing::read_entries(dir).await {
        Ok(entries) => http::build_html_response(listing::render_listing(display_path, &entries)),
        Err(e) => {
            logger::log_warning(&format!(
                "Failed to list directory '{}': {e}",
                dir.display()
            ));
            http::build_404_response("No permission to list directory")
        }
    }
}
