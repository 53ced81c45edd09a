//! Path pattern matching.

use crate::request::PathParams;

/// A segment in a path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// A literal string segment.
    Literal(String),
    /// A parameter segment (e.g., {id}).
    Param(String),
}

/// A parsed path pattern for matching request paths.
///
/// Matching walks the pattern and path segment-by-segment; there is no
/// regex, no wildcard, and no variable-length segment support. A pattern
/// only matches paths with exactly the same segment count.
#[derive(Debug, Clone)]
pub struct PathPattern {
    /// The original pattern string.
    pattern: String,
    /// Parsed segments.
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Parses a path pattern string.
    ///
    /// Pattern syntax:
    /// - `/users` - Literal path
    /// - `/users/{id}` - Path with parameter
    ///
    /// Parsing is permissive: a segment is only a parameter when delimited by
    /// both `{` and `}`. Anything else, including half-delimited text like
    /// `{id`, is kept as a literal and matched byte-for-byte.
    ///
    /// # Example
    ///
    /// ```
    /// use cinder_router::PathPattern;
    ///
    /// let pattern = PathPattern::new("/posts/{id}/comments/{comment_id}");
    /// let params = pattern.match_path("/posts/123/comments/456").unwrap();
    /// assert_eq!(params.get("id"), Some("123"));
    /// assert_eq!(params.get("comment_id"), Some("456"));
    /// ```
    pub fn new(pattern: &str) -> Self {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|part| {
                part.strip_prefix('{')
                    .and_then(|s| s.strip_suffix('}'))
                    .map_or_else(
                        || Segment::Literal(part.to_string()),
                        |name| Segment::Param(name.to_string()),
                    )
            })
            .collect();

        Self {
            pattern: pattern.to_string(),
            segments,
        }
    }

    /// Attempts to match a concrete path against this pattern.
    ///
    /// Returns the captured parameters if the path matches. Leading and
    /// trailing slashes on the path are ignored; literal segments compare
    /// byte-wise and case-sensitively; parameter segments capture the raw
    /// path segment verbatim, with no decoding and no validation.
    pub fn match_path(&self, path: &str) -> Option<PathParams> {
        let parts: Vec<&str> = path
            .trim_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::new();

        for (segment, part) in self.segments.iter().zip(&parts) {
            match segment {
                Segment::Literal(lit) => {
                    if lit != part {
                        return None;
                    }
                }
                Segment::Param(name) => params.insert(name.clone(), *part),
            }
        }

        Some(params)
    }

    /// Returns the original pattern string.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the parsed segments.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }
}
