//! # cinder-router
//!
//! A minimal request-routing and dispatch engine.
//!
//! This crate provides:
//! - Segment-walk path matching with `{name}` parameters
//! - Method-scoped route tables with first-match-wins precedence
//! - Dispatch to a typed controller/action registry
//! - A structured abort protocol for the error-rendering boundary
//!
//! ## Quick Start
//!
//! ```
//! use cinder_router::{ControllerRegistry, Request, Resolution, Response, Router};
//!
//! let mut registry = ControllerRegistry::new();
//! registry.register("UserController", "show", |params: &[String]| {
//!     Ok(Response::text(format!("User: {}", params[0])))
//! });
//!
//! let router = Router::new().get("/users/{id}", "UserController", "show");
//!
//! match router.resolve(&Request::get("/users/123"), &registry) {
//!     Resolution::Dispatched(res) => assert_eq!(res.status_code(), 200),
//!     Resolution::Aborted(abort) => panic!("unexpected abort: {abort}"),
//! }
//! ```
//!
//! ## Path Parameters
//!
//! Routes can include path parameters using `{name}` syntax:
//!
//! ```ignore
//! router.get("/posts/{post_id}/comments/{comment_id}", "PostController", "comment")
//! ```
//!
//! Parameter values are handed to the action positionally, in the
//! left-to-right order of the parameter segments in the pattern.
//!
//! ## Precedence
//!
//! Within a method, routes are scanned in registration order and the first
//! structural match wins. A literal segment gets no priority over a
//! parameter segment: if `/users/{id}` is registered before `/users/active`,
//! a request for `/users/active` dispatches with `id = "active"`. Register
//! literal routes first when they should shadow parameterized ones.
//!
//! ## Aborts
//!
//! Resolution never unwinds. Every failed request ends in exactly one
//! [`Resolution::Aborted`] carrying a status code, a short message, and a
//! description, which the application renders through an [`ErrorHandler`].

mod error;
mod path;
mod registry;
mod request;
mod response;
mod router;

pub use error::{Abort, HttpError, Result};
pub use path::{PathPattern, Segment};
pub use registry::{ActionFn, ControllerRegistry, DefaultErrorHandler, ErrorHandler, HandlerRegistry};
pub use request::{Method, PathParams, Request};
pub use response::Response;
pub use router::{Resolution, Route, RouteTable, Router};
