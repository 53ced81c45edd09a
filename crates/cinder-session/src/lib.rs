//! # cinder-session
//!
//! Per-client session state with flash-message lifecycle semantics.
//!
//! Flash values are readable for the rest of the request they were written
//! in and for exactly one subsequent request. Reading a flash value flags it
//! for removal but never deletes it in place; the [`Session::sweep`] run at
//! session load performs all deletion. See [`Session`] for the lifecycle
//! details.
//!
//! ```
//! use cinder_session::Session;
//!
//! let mut session = Session::new();
//! session.set_flash("notice", "Profile saved");
//!
//! // ---- next request ----
//! session.sweep();
//! assert_eq!(
//!     session.get_flash("notice"),
//!     Some(serde_json::Value::from("Profile saved"))
//! );
//!
//! // ---- request after that ----
//! session.sweep();
//! assert_eq!(session.get_flash("notice"), None);
//! ```

mod session;

pub use session::Session;
