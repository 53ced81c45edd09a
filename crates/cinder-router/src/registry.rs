//! Controller registration and error rendering seams.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{HttpError, Result};
use crate::response::Response;

/// A boxed controller action.
///
/// Arguments are the path parameters in pattern capture order.
pub type ActionFn = Arc<dyn Fn(&[String]) -> Result<Response> + Send + Sync>;

/// Resolves a (controller, action) name pair to a callable.
///
/// The router only needs existence-checking and invocation; how the table is
/// populated is the application's concern.
pub trait HandlerRegistry {
    /// Returns whether the controller/action pair is registered.
    fn exists(&self, controller: &str, action: &str) -> bool;

    /// Invokes the action with the given ordered parameters.
    ///
    /// # Errors
    ///
    /// Returns the action's own error, or an internal error if the pair is
    /// not registered.
    fn invoke(&self, controller: &str, action: &str, params: &[String]) -> Result<Response>;
}

/// A typed handler table populated at startup.
///
/// Replaces name-based reflection: every controller action is registered
/// explicitly as a callable keyed by its (controller, action) names, and
/// existence-checking is a map lookup.
#[derive(Default, Clone)]
pub struct ControllerRegistry {
    actions: HashMap<(String, String), ActionFn>,
}

impl ControllerRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an action under a controller/action name pair.
    ///
    /// Registering the same pair twice replaces the earlier callable.
    pub fn register<F>(&mut self, controller: impl Into<String>, action: impl Into<String>, f: F)
    where
        F: Fn(&[String]) -> Result<Response> + Send + Sync + 'static,
    {
        self.actions
            .insert((controller.into(), action.into()), Arc::new(f));
    }

    /// Returns the number of registered actions.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl HandlerRegistry for ControllerRegistry {
    fn exists(&self, controller: &str, action: &str) -> bool {
        self.actions
            .contains_key(&(controller.to_string(), action.to_string()))
    }

    fn invoke(&self, controller: &str, action: &str, params: &[String]) -> Result<Response> {
        let f = self
            .actions
            .get(&(controller.to_string(), action.to_string()))
            .ok_or_else(|| HttpError::Custom {
                code: 500,
                message: "Internal server error".to_string(),
                description: format!("No handler registered for {controller}::{action}"),
            })?;
        f(params)
    }
}

/// Renders an abort triple into a response.
pub trait ErrorHandler {
    /// Produces the error response for the given status, message, and
    /// description.
    fn render(&self, code: u16, message: &str, description: &str) -> Response;
}

/// Plain error rendering in the `code - message - description` shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultErrorHandler;

impl ErrorHandler for DefaultErrorHandler {
    fn render(&self, code: u16, message: &str, description: &str) -> Response {
        Response::html(format!("{code} - {message} - {description}")).status(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_exists() {
        let mut registry = ControllerRegistry::new();
        registry.register("UserController", "show", |_| Ok(Response::text("user")));

        assert!(registry.exists("UserController", "show"));
        assert!(!registry.exists("UserController", "index"));
        assert!(!registry.exists("PostController", "show"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_invoke_passes_ordered_params() {
        let mut registry = ControllerRegistry::new();
        registry.register("PostController", "comment", |params: &[String]| {
            Ok(Response::text(params.join(",")))
        });

        let res = registry
            .invoke(
                "PostController",
                "comment",
                &["42".to_string(), "7".to_string()],
            )
            .unwrap();
        assert_eq!(res.body_string(), Some("42,7".to_string()));
    }

    #[test]
    fn test_invoke_missing_is_internal_error() {
        let registry = ControllerRegistry::new();
        let err = registry
            .invoke("Ghost", "walk", &[])
            .expect_err("missing handler must not dispatch");
        assert_eq!(err.code(), 500);
        assert!(err.description().contains("Ghost::walk"));
    }

    #[test]
    fn test_default_error_handler_shape() {
        let res = DefaultErrorHandler.render(404, "Page not found", "No such page.");
        assert_eq!(res.status_code(), 404);
        assert_eq!(
            res.body_string(),
            Some("404 - Page not found - No such page.".to_string())
        );
    }
}
