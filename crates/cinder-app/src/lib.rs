//! # cinder-app
//!
//! Application wiring: an explicit context struct in place of a global
//! application instance, `.env`-backed configuration, and tracing setup.
//!
//! ```no_run
//! use cinder_app::{init_tracing, App};
//! use cinder_router::{ControllerRegistry, Request, Response, Router};
//! use cinder_session::Session;
//!
//! init_tracing(false).expect("subscriber already set");
//!
//! let mut registry = ControllerRegistry::new();
//! registry.register("HomeController", "index", |_| Ok(Response::text("hello")));
//!
//! let router = Router::new().get("/", "HomeController", "index");
//! let app = App::new(router, registry);
//!
//! let mut session = Session::new();
//! let response = app.handle(&Request::get("/"), &mut session);
//! assert_eq!(response.status_code(), 200);
//! ```

mod app;
mod config;

pub use app::App;
pub use config::{Config, ConfigError};

use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_tracing(
    verbose: bool,
) -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let log_level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
}
