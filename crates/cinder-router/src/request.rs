//! HTTP request descriptor.

use std::collections::HashMap;

/// HTTP request methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET method
    Get,
    /// POST method
    Post,
    /// PUT method
    Put,
    /// PATCH method
    Patch,
    /// DELETE method
    Delete,
    /// HEAD method
    Head,
    /// OPTIONS method
    Options,
}

impl Method {
    /// Every method a route can be registered under.
    pub const ALL: [Self; 7] = [
        Self::Get,
        Self::Post,
        Self::Put,
        Self::Delete,
        Self::Patch,
        Self::Options,
        Self::Head,
    ];

    /// Parses a method from a string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "GET" => Some(Self::Get),
            "POST" => Some(Self::Post),
            "PUT" => Some(Self::Put),
            "PATCH" => Some(Self::Patch),
            "DELETE" => Some(Self::Delete),
            "HEAD" => Some(Self::Head),
            "OPTIONS" => Some(Self::Options),
            _ => None,
        }
    }

    /// Returns the method as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Path parameters captured while matching a route pattern.
///
/// Insertion order is the left-to-right order of the parameter segments in
/// the pattern; dispatch binds handler arguments positionally from it.
#[derive(Debug, Clone, Default)]
pub struct PathParams {
    params: Vec<(String, String)>,
}

impl PathParams {
    /// Creates new empty path params.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter, preserving capture order.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.push((key.into(), value.into()));
    }

    /// Gets a parameter value by name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the number of captured parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns whether no parameters were captured.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Returns an iterator over the parameters in capture order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the parameter values in capture order.
    pub fn values(&self) -> Vec<String> {
        self.params.iter().map(|(_, v)| v.clone()).collect()
    }
}

/// An inbound HTTP request, normalized for routing.
///
/// Built once per transport event and read-only afterwards. The query string
/// is stripped and percent-escapes decoded at construction time; the matcher
/// itself never decodes. The raw URI is kept untouched for logging.
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    raw_uri: String,
    path: String,
    headers: HashMap<String, String>,
    body: HashMap<String, String>,
}

impl Request {
    /// Creates a request from a method and raw request URI.
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        let raw_uri = uri.into();
        let path = match raw_uri.find('?') {
            Some(pos) => &raw_uri[..pos],
            None => raw_uri.as_str(),
        };
        let path = percent_decode(path);

        Self {
            method,
            raw_uri,
            path,
            headers: HashMap::new(),
            body: HashMap::new(),
        }
    }

    /// Creates a GET request.
    pub fn get(uri: impl Into<String>) -> Self {
        Self::new(Method::Get, uri)
    }

    /// Creates a POST request.
    pub fn post(uri: impl Into<String>) -> Self {
        Self::new(Method::Post, uri)
    }

    /// Sets a header.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds a body field, HTML-escaping the value.
    #[must_use]
    pub fn body_param(mut self, key: impl Into<String>, value: &str) -> Self {
        self.body.insert(key.into(), sanitize(value));
        self
    }

    /// Returns the request method.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the decoded path with the query string stripped.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the original request URI as received from the transport.
    pub fn raw_uri(&self) -> &str {
        &self.raw_uri
    }

    /// Gets a header value, matching the name case-insensitively.
    pub fn get_header(&self, name: &str) -> Option<&str> {
        let name_lower = name.to_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| k.to_lowercase() == name_lower)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the sanitized body fields.
    pub fn body(&self) -> &HashMap<String, String> {
        &self.body
    }

    /// Returns whether this is a GET request.
    pub fn is_get(&self) -> bool {
        self.method == Method::Get
    }

    /// Returns whether this is a POST request.
    pub fn is_post(&self) -> bool {
        self.method == Method::Post
    }

    /// Returns whether the request was made via `XMLHttpRequest`.
    pub fn is_ajax(&self) -> bool {
        self.get_header("X-Requested-With") == Some("XMLHttpRequest")
    }
}

/// Decodes percent-escapes in a path.
fn percent_decode(s: &str) -> String {
    let mut result = String::new();
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '%' {
            let hex: String = chars.by_ref().take(2).collect();
            if hex.len() == 2 {
                if let Ok(byte) = u8::from_str_radix(&hex, 16) {
                    result.push(byte as char);
                    continue;
                }
            }
            result.push('%');
            result.push_str(&hex);
        } else {
            result.push(c);
        }
    }

    result
}

/// Escapes HTML special characters in a scalar body value.
fn sanitize(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#39;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parsing() {
        assert_eq!(Method::from_str("GET"), Some(Method::Get));
        assert_eq!(Method::from_str("post"), Some(Method::Post));
        assert_eq!(Method::from_str("INVALID"), None);
    }

    #[test]
    fn test_path_params_order() {
        let mut params = PathParams::new();
        params.insert("post_id", "42");
        params.insert("comment_id", "7");

        assert_eq!(params.get("post_id"), Some("42"));
        assert_eq!(params.get("missing"), None);
        assert_eq!(params.values(), vec!["42".to_string(), "7".to_string()]);
    }

    #[test]
    fn test_query_string_stripped() {
        let req = Request::get("/users?page=2&sort=name");
        assert_eq!(req.path(), "/users");
        assert_eq!(req.raw_uri(), "/users?page=2&sort=name");
    }

    #[test]
    fn test_path_decoded_once() {
        let req = Request::get("/files/hello%20world");
        assert_eq!(req.path(), "/files/hello world");
    }

    #[test]
    fn test_header_lookup_case_insensitive() {
        let req = Request::get("/").header("X-Requested-With", "XMLHttpRequest");
        assert_eq!(req.get_header("x-requested-with"), Some("XMLHttpRequest"));
        assert!(req.is_ajax());
    }

    #[test]
    fn test_body_sanitized() {
        let req = Request::post("/login").body_param("name", "<script>\"x\"</script>");
        assert_eq!(
            req.body().get("name").map(String::as_str),
            Some("&lt;script&gt;&quot;x&quot;&lt;/script&gt;")
        );
    }
}
