//! Main router implementation.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::error::{Abort, HttpError};
use crate::path::PathPattern;
use crate::registry::HandlerRegistry;
use crate::request::{Method, Request};
use crate::response::Response;

/// A single route definition.
///
/// Immutable after registration; the pattern never changes once the route is
/// in the table.
#[derive(Debug, Clone)]
pub struct Route {
    method: Method,
    pattern: PathPattern,
    controller: String,
    action: String,
}

impl Route {
    /// Creates a new route.
    pub fn new(
        method: Method,
        pattern: &str,
        controller: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            method,
            pattern: PathPattern::new(pattern),
            controller: controller.into(),
            action: action.into(),
        }
    }

    /// Returns the HTTP method this route is registered under.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Returns the path pattern.
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Returns the controller name.
    pub fn controller(&self) -> &str {
        &self.controller
    }

    /// Returns the action name.
    pub fn action(&self) -> &str {
        &self.action
    }
}

/// Registered routes, keyed by method, in registration order per method.
///
/// The table never deduplicates: two routes under the same method may have
/// identical or overlapping patterns, and the earlier registration wins at
/// resolution time.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: HashMap<Method, Vec<Route>>,
}

impl RouteTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a route to the method's sequence.
    ///
    /// Pattern syntax is not validated beyond segment splitting; a malformed
    /// pattern is registered as-is and simply never matches.
    pub fn register(
        &mut self,
        method: Method,
        pattern: &str,
        controller: impl Into<String>,
        action: impl Into<String>,
    ) {
        self.routes
            .entry(method)
            .or_default()
            .push(Route::new(method, pattern, controller, action));
    }

    /// Returns the routes registered under a method, in registration order.
    ///
    /// Returns an empty slice when nothing is registered for the method.
    pub fn routes_for(&self, method: Method) -> &[Route] {
        self.routes.get(&method).map_or(&[], Vec::as_slice)
    }

    /// Returns the total number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.values().map(Vec::len).sum()
    }

    /// Returns whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.values().all(Vec::is_empty)
    }
}

/// The outcome of resolving one request.
///
/// Resolution is a single synchronous pass: exactly one handler ran, or
/// exactly one abort was produced. Callers must treat `Aborted` as a
/// short-circuit and hand the triple to the error-rendering boundary.
#[derive(Debug)]
pub enum Resolution {
    /// A handler was invoked and produced this response.
    Dispatched(Response),
    /// Resolution failed; render the abort and stop.
    Aborted(Abort),
}

impl Resolution {
    /// Returns whether a handler was dispatched.
    pub fn is_dispatched(&self) -> bool {
        matches!(self, Self::Dispatched(_))
    }
}

/// The request router.
///
/// The table is built once at startup via the builder methods and is
/// read-only from the first `resolve` call on; registration after startup
/// must be synchronized externally.
#[derive(Debug, Default)]
pub struct Router {
    table: RouteTable,
}

impl Router {
    /// Creates a new empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a route for GET requests.
    #[must_use]
    pub fn get(
        self,
        path: &str,
        controller: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        self.route(Method::Get, path, controller, action)
    }

    /// Registers a route for POST requests.
    #[must_use]
    pub fn post(
        self,
        path: &str,
        controller: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        self.route(Method::Post, path, controller, action)
    }

    /// Registers a route for PUT requests.
    #[must_use]
    pub fn put(
        self,
        path: &str,
        controller: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        self.route(Method::Put, path, controller, action)
    }

    /// Registers a route for DELETE requests.
    #[must_use]
    pub fn delete(
        self,
        path: &str,
        controller: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        self.route(Method::Delete, path, controller, action)
    }

    /// Registers the same controller/action under every supported method.
    ///
    /// Sugar for seven independent registrations, not a wildcard match.
    #[must_use]
    pub fn any(
        mut self,
        path: &str,
        controller: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        let controller = controller.into();
        let action = action.into();
        for method in Method::ALL {
            self.table
                .register(method, path, controller.clone(), action.clone());
        }
        self
    }

    /// Registers a route under a specific method.
    #[must_use]
    pub fn route(
        mut self,
        method: Method,
        path: &str,
        controller: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        self.table.register(method, path, controller, action);
        self
    }

    /// Returns the route table.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Resolves a request to exactly one handler invocation or one abort.
    ///
    /// Candidates are scanned in registration order and the first structural
    /// match wins. A matched route whose controller/action is missing from
    /// the registry is terminal: resolution aborts with 500 and does not fall
    /// through to later routes. Exhausting the candidates aborts with 404.
    /// A path registered under a different method is indistinguishable from
    /// an unregistered path; there is no 405 here.
    pub fn resolve(&self, request: &Request, registry: &dyn HandlerRegistry) -> Resolution {
        let method = request.method();
        let path = request.path();

        for route in self.table.routes_for(method) {
            let Some(params) = route.pattern().match_path(path) else {
                continue;
            };

            if !registry.exists(route.controller(), route.action()) {
                warn!(
                    controller = route.controller(),
                    action = route.action(),
                    uri = request.raw_uri(),
                    "matched route has no registered handler"
                );
                return Self::abort(
                    500,
                    "Internal server error",
                    format!(
                        "No handler registered for {}::{}",
                        route.controller(),
                        route.action()
                    ),
                );
            }

            debug!(
                %method,
                uri = request.raw_uri(),
                pattern = route.pattern().pattern(),
                controller = route.controller(),
                action = route.action(),
                "dispatching"
            );

            let args = params.values();
            return match registry.invoke(route.controller(), route.action(), &args) {
                Ok(response) => Resolution::Dispatched(response),
                Err(err) => {
                    warn!(
                        controller = route.controller(),
                        action = route.action(),
                        error = %err,
                        "handler returned an error"
                    );
                    Resolution::Aborted(err.to_abort())
                }
            };
        }

        warn!(%method, uri = request.raw_uri(), "no route matched");
        let abort = HttpError::RouteNotFound.to_abort();
        Self::abort(abort.code, abort.message, abort.description)
    }

    /// Produces the terminal abort signal for the current request.
    pub fn abort(
        code: u16,
        message: impl Into<String>,
        description: impl Into<String>,
    ) -> Resolution {
        Resolution::Aborted(Abort::new(code, message, description))
    }
}
