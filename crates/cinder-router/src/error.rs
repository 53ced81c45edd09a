//! Error taxonomy and the abort signal.

use thiserror::Error;

/// The terminal error context handed to the error-rendering boundary.
///
/// Flows synchronously from the point of failure to the [`ErrorHandler`];
/// it is never persisted and never recovered from.
///
/// [`ErrorHandler`]: crate::registry::ErrorHandler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Abort {
    /// HTTP status code.
    pub code: u16,
    /// Short, user-facing message.
    pub message: String,
    /// Longer description of what went wrong.
    pub description: String,
}

impl Abort {
    /// Creates an abort signal.
    pub fn new(code: u16, message: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            description: description.into(),
        }
    }
}

impl std::fmt::Display for Abort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {} - {}", self.code, self.message, self.description)
    }
}

/// Application-level error categories with fixed status/message/description
/// triples.
///
/// `RouteNotFound` is raised by the router itself; the remaining categories
/// are raised by collaborators (controllers, session, persistence) and
/// surface through the same abort protocol.
#[derive(Debug, Error)]
pub enum HttpError {
    /// No registered route matched the request.
    #[error("Page not found")]
    RouteNotFound,

    /// The request method is not allowed for the resource.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// The submitted data failed validation.
    #[error("Validation failed")]
    Validation,

    /// The caller is not authorized for the resource.
    #[error("Unauthorized access")]
    UnauthorizedAccess,

    /// The user session has expired.
    #[error("Session expired")]
    SessionExpired,

    /// The caller exceeded the API rate limit.
    #[error("API rate limit exceeded")]
    RateLimitExceeded,

    /// The database connection failed.
    #[error("Database connection error")]
    DatabaseConnection,

    /// Encoding a JSON response body failed.
    #[error("JSON encoding error")]
    JsonEncoding,

    /// A caller-defined error with its own triple.
    #[error("{message}")]
    Custom {
        /// HTTP status code.
        code: u16,
        /// Short message.
        message: String,
        /// Longer description.
        description: String,
    },
}

impl HttpError {
    /// Returns the HTTP status code for this category.
    pub fn code(&self) -> u16 {
        match self {
            Self::RouteNotFound => 404,
            Self::MethodNotAllowed => 405,
            Self::Validation => 400,
            Self::UnauthorizedAccess => 403,
            Self::SessionExpired => 401,
            Self::RateLimitExceeded => 429,
            Self::DatabaseConnection | Self::JsonEncoding => 500,
            Self::Custom { code, .. } => *code,
        }
    }

    /// Returns the long description for this category.
    pub fn description(&self) -> String {
        match self {
            Self::RouteNotFound => "The requested page was not found on this server.".to_string(),
            Self::MethodNotAllowed => {
                "The request method is not allowed for the requested resource.".to_string()
            }
            Self::Validation => "The submitted data failed validation.".to_string(),
            Self::UnauthorizedAccess => {
                "You are not authorized to access this resource.".to_string()
            }
            Self::SessionExpired => {
                "The session has expired and the user needs to log in again.".to_string()
            }
            Self::RateLimitExceeded => {
                "You have exceeded the rate limit for this API. Please try again later.".to_string()
            }
            Self::DatabaseConnection => {
                "An error occurred while connecting to the database. Please try again later."
                    .to_string()
            }
            Self::JsonEncoding => {
                "An error occurred while encoding the JSON response.".to_string()
            }
            Self::Custom { description, .. } => description.clone(),
        }
    }

    /// Converts this category into its abort triple.
    pub fn to_abort(&self) -> Abort {
        Abort::new(self.code(), self.to_string(), self.description())
    }
}

/// Result type alias for router operations.
pub type Result<T> = std::result::Result<T, HttpError>;
