//! HTTP response building module
//!
//! Provides builders for the responses the file server sends, decoupled from
//! request handling.

use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE, LOCATION};
use hyper::{Response, StatusCode};

use super::body::Body;
use super::listing::escape_html;

const HTML_CONTENT_TYPE: &str = "text/html; charset=utf-8";

/// Build 200 OK response for a file
pub fn build_file_response(body: Body, content_type: &str, content_length: u64) -> Response<Body> {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, content_type)
        .header(CONTENT_LENGTH, content_length)
        .body(body)
        .unwrap_or_else(|e| {
            log_build_error("200", &e);
            Response::new(Body::Empty)
        })
}

/// Build 200 OK response for a generated HTML page
pub fn build_html_response(content: String) -> Response<Body> {
    let content_length = content.len();

    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, HTML_CONTENT_TYPE)
        .header(CONTENT_LENGTH, content_length)
        .body(Body::from(content))
        .unwrap_or_else(|e| {
            log_build_error("HTML", &e);
            Response::new(Body::Empty)
        })
}

/// Build 301 redirect response
pub fn build_redirect_response(location: &str) -> Response<Body> {
    Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header(LOCATION, location)
        .header(CONTENT_LENGTH, 0)
        .body(Body::Empty)
        .unwrap_or_else(|e| {
            log_build_error("301", &e);
            error_fallback(StatusCode::MOVED_PERMANENTLY)
        })
}

/// Build 404 Not Found response
pub fn build_404_response(message: &str) -> Response<Body> {
    build_error_response(StatusCode::NOT_FOUND, message)
}

/// Build 501 Not Implemented response for an unsupported method
pub fn build_501_response(method: &str) -> Response<Body> {
    build_error_response(
        StatusCode::NOT_IMPLEMENTED,
        &format!("Unsupported method ('{method}')"),
    )
}

/// Build an HTML error page
pub fn build_error_response(status: StatusCode, message: &str) -> Response<Body> {
    let page = render_error_page(status, message);
    let content_length = page.len();

    Response::builder()
        .status(status)
        .header(CONTENT_TYPE, HTML_CONTENT_TYPE)
        .header(CONTENT_LENGTH, content_length)
        .body(Body::from(page))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            error_fallback(status)
        })
}

fn render_error_page(status: StatusCode, message: &str) -> String {
    let code = status.as_u16();
    let reason = status.canonical_reason().unwrap_or("Error");
    format!(
        "<!DOCTYPE HTML>\n\
         <html lang=\"en\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>Error response</title>\n\
         </head>\n\
         <body>\n\
         <h1>Error response</h1>\n\
         <p>Error code: {code}</p>\n\
         <p>Message: {}.</p>\n\
         <p>Error code explanation: {code} - {reason}.</p>\n\
         </body>\n\
         </html>\n",
        escape_html(message)
    )
}

fn error_fallback(status: StatusCode) -> Response<Body> {
    let mut resp = Response::new(Body::Empty);
    *resp.status_mut() = status;
    resp
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
