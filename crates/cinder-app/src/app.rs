//! The application context.

use cinder_router::{
    DefaultErrorHandler, ErrorHandler, HandlerRegistry, Request, Resolution, Response, Router,
};
use cinder_session::Session;

/// The application context: router, handler registry, and error handler,
/// wired together once at startup.
///
/// There is no process-wide instance; the embedding server constructs one
/// `App` and passes it by reference into each request-handling scope.
pub struct App {
    router: Router,
    registry: Box<dyn HandlerRegistry>,
    error_handler: Box<dyn ErrorHandler>,
}

impl App {
    /// Creates an application context with the default error rendering.
    pub fn new(router: Router, registry: impl HandlerRegistry + 'static) -> Self {
        Self {
            router,
            registry: Box::new(registry),
            error_handler: Box::new(DefaultErrorHandler),
        }
    }

    /// Replaces the error handler.
    #[must_use]
    pub fn with_error_handler(mut self, handler: impl ErrorHandler + 'static) -> Self {
        self.error_handler = Box::new(handler);
        self
    }

    /// Returns the router.
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Handles one request against one client session.
    ///
    /// Runs the session's flash sweep first (this is the "session load"
    /// point of the flash lifecycle), then resolves the request. Aborts are
    /// rendered through the error handler, so every request produces a
    /// complete response.
    pub fn handle(&self, request: &Request, session: &mut Session) -> Response {
        session.sweep();

        match self.router.resolve(request, self.registry.as_ref()) {
            Resolution::Dispatched(response) => response,
            Resolution::Aborted(abort) => {
                self.error_handler
                    .render(abort.code, &abort.message, &abort.description)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinder_router::ControllerRegistry;

    fn app() -> App {
        let mut registry = ControllerRegistry::new();
        registry.register("HomeController", "index", |_| Ok(Response::text("home")));
        registry.register("UserController", "show", |params: &[String]| {
            Ok(Response::text(format!("user:{}", params[0])))
        });

        let router = Router::new()
            .get("/", "HomeController", "index")
            .get("/users/{id}", "UserController", "show");

        App::new(router, registry)
    }

    #[test]
    fn test_dispatch_end_to_end() {
        let app = app();
        let mut session = Session::new();

        let res = app.handle(&Request::get("/users/42"), &mut session);
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.body_string(), Some("user:42".to_string()));
    }

    #[test]
    fn test_abort_rendered_by_default_handler() {
        let app = app();
        let mut session = Session::new();

        let res = app.handle(&Request::get("/missing"), &mut session);
        assert_eq!(res.status_code(), 404);
        assert_eq!(
            res.body_string(),
            Some(
                "404 - Page not found - The requested page was not found on this server."
                    .to_string()
            )
        );
    }

    #[test]
    fn test_custom_error_handler() {
        struct JsonErrors;
        impl ErrorHandler for JsonErrors {
            fn render(&self, code: u16, message: &str, description: &str) -> Response {
                Response::json(&serde_json::json!({
                    "code": code,
                    "message": message,
                    "description": description,
                }))
                .map(|res| res.status(code))
                .unwrap_or_else(|_| Response::new(500))
            }
        }

        let app = app().with_error_handler(JsonErrors);
        let mut session = Session::new();

        let res = app.handle(&Request::get("/missing"), &mut session);
        assert_eq!(res.status_code(), 404);
        assert_eq!(res.get_header("content-type"), Some("application/json"));
    }

    #[test]
    fn test_handle_runs_flash_sweep() {
        let app = app();
        let mut session = Session::new();
        session.set_flash("notice", "saved");

        // First request after the write: still readable.
        let _ = app.handle(&Request::get("/"), &mut session);
        assert!(session.has_flash("notice"));

        // Second request: the load sweep has removed it.
        let _ = app.handle(&Request::get("/"), &mut session);
        assert!(!session.has_flash("notice"));
    }
}
