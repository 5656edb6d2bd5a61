//! Request dispatch module
//!
//! Entry point for HTTP request processing, responsible for method validation
//! and handing the request to the static file handler.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http::{self, Body};
use hyper::header::SERVER;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Raw (still percent-encoded) request path
    pub path: &'a str,
    pub query: Option<&'a str>,
}

/// Main entry point for HTTP request handling
///
/// Never fails: every outcome, including filesystem errors, becomes a
/// response.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Body>, Infallible> {
    let method = req.method();
    let uri = req.uri();
    let is_head = *method == Method::HEAD;

    let mut response = match check_http_method(method) {
        Some(resp) => resp,
        None => {
            let ctx = RequestContext {
                path: collapse_leading_slashes(uri.path()),
                query: uri.query(),
            };
            static_files::serve_path(&ctx, &state).await
        }
    };

    // HEAD gets the GET headers, Content-Length included, without a body
    if is_head {
        *response.body_mut() = Body::Empty;
    }
    if let Some(server_name) = &state.server_name {
        response.headers_mut().insert(SERVER, server_name.clone());
    }
    Ok(response)
}

/// Reduce a run of leading slashes to one
///
/// `//host/dir` would otherwise be echoed into a redirect `Location`, which
/// clients read as a scheme-relative URL pointing at another host.
fn collapse_leading_slashes(path: &str) -> &str {
    let rest = path.trim_start_matches('/');
    if path.len() - rest.len() > 1 {
        &path[path.len() - rest.len() - 1..]
    } else {
        path
    }
}

/// Check HTTP method and return 501 for anything other than GET/HEAD
fn check_http_method(method: &Method) -> Option<Response<Body>> {
    match *method {
        Method::GET | Method::HEAD => None,
        _ => Some(http::build_501_response(method.as_str())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;
    use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
    use hyper::StatusCode;

    fn state_for(dir: &std::path::Path) -> Arc<AppState> {
        let cfg = Config::with_root(dir).unwrap();
        Arc::new(AppState::new(&cfg).unwrap())
    }

    fn request(method: Method, uri: &str) -> Request<()> {
        Request::builder().method(method).uri(uri).body(()).unwrap()
    }

    async fn body_bytes(resp: Response<Body>) -> Vec<u8> {
        resp.into_body().collect().await.unwrap().to_bytes().to_vec()
    }

    #[tokio::test]
    async fn test_get_js_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.js"), "console.log(1);").unwrap();
        let state = state_for(dir.path());

        let resp = handle_request(request(Method::GET, "/app.js"), state).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "application/javascript");
        assert_eq!(resp.headers()[CONTENT_LENGTH], "15");
        assert!(resp.headers()[SERVER].to_str().unwrap().starts_with("jsserve/"));
        assert_eq!(body_bytes(resp).await, b"console.log(1);");
    }

    #[tokio::test]
    async fn test_head_has_no_body() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>hi</h1>").unwrap();
        let state = state_for(dir.path());

        let resp = handle_request(request(Method::HEAD, "/index.html"), state).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[CONTENT_TYPE], "text/html");
        assert_eq!(resp.headers()[CONTENT_LENGTH], "11");
        assert!(body_bytes(resp).await.is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_methods() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_for(dir.path());

        for method in [Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS] {
            let resp = handle_request(request(method, "/"), Arc::clone(&state))
                .await
                .unwrap();
            assert_eq!(resp.status(), StatusCode::NOT_IMPLEMENTED);
        }
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_for(dir.path());

        let resp = handle_request(request(Method::GET, "/missing.txt"), state)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_directory_redirect_keeps_query() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("studies")).unwrap();
        let state = state_for(dir.path());

        let resp = handle_request(request(Method::GET, "/studies?v=2"), state)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()[LOCATION], "/studies/?v=2");
    }

    #[test]
    fn test_collapse_leading_slashes() {
        assert_eq!(collapse_leading_slashes("//evil.example"), "/evil.example");
        assert_eq!(collapse_leading_slashes("///a//b/"), "/a//b/");
        assert_eq!(collapse_leading_slashes("/a"), "/a");
        assert_eq!(collapse_leading_slashes("/"), "/");
    }

    #[tokio::test]
    async fn test_redirect_stays_on_host() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("evil.example")).unwrap();
        let state = state_for(dir.path());

        let resp = handle_request(request(Method::GET, "//evil.example"), state)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()[LOCATION], "/evil.example/");
    }

    #[tokio::test]
    async fn test_encoded_slash_still_redirects() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("studies")).unwrap();
        let state = state_for(dir.path());

        let resp = handle_request(request(Method::GET, "/studies%2F"), state)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(resp.headers()[LOCATION], "/studies%2F/");
    }

    #[tokio::test]
    async fn test_head_on_errors_has_no_body() {
        let dir = tempfile::tempdir().unwrap();
        let state = state_for(dir.path());

        let resp = handle_request(request(Method::HEAD, "/missing.txt"), state)
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        let announced: usize = resp.headers()[CONTENT_LENGTH].to_str().unwrap().parse().unwrap();
        assert!(announced > 0);
        assert!(body_bytes(resp).await.is_empty());
    }
}
