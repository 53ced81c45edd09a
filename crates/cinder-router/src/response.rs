//! HTTP response assembly.

use std::collections::HashMap;

use crate::error::{HttpError, Result};

/// An HTTP response under construction.
///
/// Header names are normalized to lowercase on insert, so repeated sets of
/// the same header with different casing replace each other.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code.
    status: u16,
    /// Response headers, keyed by lowercased name.
    headers: HashMap<String, String>,
    /// Response body.
    body: Vec<u8>,
}

impl Response {
    /// Creates a new response with the given status.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a 200 OK response.
    pub fn ok() -> Self {
        Self::new(200)
    }

    /// Creates a response with HTML content.
    pub fn html(body: impl Into<String>) -> Self {
        Self::ok()
            .header("Content-Type", "text/html; charset=utf-8")
            .body(body.into().into_bytes())
    }

    /// Creates a response with plain text content.
    pub fn text(body: impl Into<String>) -> Self {
        Self::ok()
            .header("Content-Type", "text/plain; charset=utf-8")
            .body(body.into().into_bytes())
    }

    /// Creates a response with XML content.
    pub fn xml(body: impl Into<String>) -> Self {
        Self::ok()
            .header("Content-Type", "application/xml")
            .body(body.into().into_bytes())
    }

    /// Creates a response with JSON content.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError::JsonEncoding`] if the value cannot be serialized.
    pub fn json<T: serde::Serialize>(data: &T) -> Result<Self> {
        let body = serde_json::to_vec(data).map_err(|_| HttpError::JsonEncoding)?;
        Ok(Self::ok()
            .header("Content-Type", "application/json")
            .body(body))
    }

    /// Creates a redirect response (302 Found).
    pub fn redirect(url: impl Into<String>) -> Self {
        Self::new(302).header("Location", url)
    }

    /// Creates a permanent redirect response (301).
    pub fn redirect_permanent(url: impl Into<String>) -> Self {
        Self::new(301).header("Location", url)
    }

    /// Sets the status code.
    #[must_use]
    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Sets a header, replacing any previous value for the same name.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into().to_lowercase(), value.into());
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Returns the status code.
    pub fn status_code(&self) -> u16 {
        self.status
    }

    /// Gets a header value, matching the name case-insensitively.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_lowercase()).map(String::as_str)
    }

    /// Returns all headers, keyed by lowercased name.
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Returns the body as a string.
    pub fn body_string(&self) -> Option<String> {
        String::from_utf8(self.body.clone()).ok()
    }

    /// Returns the raw body bytes.
    pub fn body_bytes(&self) -> &[u8] {
        &self.body
    }

    /// Returns the status text for the current status code.
    pub fn status_text(&self) -> &'static str {
        match self.status {
            200 => "OK",
            201 => "Created",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            304 => "Not Modified",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            409 => "Conflict",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            _ => "Unknown",
        }
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_html() {
        let res = Response::html("<h1>Hello</h1>");
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.get_header("Content-Type"), Some("text/html; charset=utf-8"));
        assert_eq!(res.body_string(), Some("<h1>Hello</h1>".to_string()));
    }

    #[test]
    fn test_response_json() {
        let data = serde_json::json!({"name": "test"});
        let res = Response::json(&data).unwrap();
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.get_header("content-type"), Some("application/json"));
    }

    #[test]
    fn test_response_redirect() {
        let res = Response::redirect("/login");
        assert_eq!(res.status_code(), 302);
        assert_eq!(res.get_header("Location"), Some("/login"));
    }

    #[test]
    fn test_header_name_normalized() {
        let res = Response::ok()
            .header("X-Custom", "one")
            .header("x-custom", "two");
        assert_eq!(res.get_header("X-CUSTOM"), Some("two"));
        assert_eq!(res.headers().len(), 1);
    }

    #[test]
    fn test_response_builder() {
        let res = Response::ok().status(201).body("Hello");
        assert_eq!(res.status_code(), 201);
        assert_eq!(res.status_text(), "Created");
        assert_eq!(res.body_string(), Some("Hello".to_string()));
    }
}
