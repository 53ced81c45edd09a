//! Per-session state: value bag, flash entries, CSRF token.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

/// A flash value and its removal flag.
///
/// The flag is what gives flash data its two-request horizon: reading flags
/// the entry but leaves it in place, so further reads within the same request
/// still see it; the next load-time sweep performs the actual deletion.
#[derive(Debug, Clone)]
struct FlashEntry {
    value: Value,
    pending_removal: bool,
}

/// Session state for one client.
///
/// Holds a plain key/value bag, flash entries with read-once-across-requests
/// semantics, and the CSRF token slot.
///
/// One `Session` belongs to one request at a time. Concurrent requests for
/// the same session are not synchronized here and are outside this design;
/// an embedding server that allows them must serialize access itself.
#[derive(Debug, Clone, Default)]
pub struct Session {
    values: HashMap<String, Value>,
    flash: HashMap<String, FlashEntry>,
    csrf_token: Option<String>,
}

impl Session {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets a value from the session.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Sets a session value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns whether a session value is set.
    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Removes a session value, returning it if present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Clears all session state, including flash data and the CSRF token.
    pub fn destroy(&mut self) {
        self.values.clear();
        self.flash.clear();
        self.csrf_token = None;
    }

    /// Stores a flash value.
    ///
    /// The value survives the rest of the current request and the whole of
    /// the next one; the sweep after that removes it.
    pub fn set_flash(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.flash.insert(
            key.into(),
            FlashEntry {
                value: value.into(),
                pending_removal: false,
            },
        );
    }

    /// Reads a flash value and flags it for removal.
    ///
    /// The entry is not deleted here: concurrent reads within the same
    /// request still see it. Deletion happens in the next [`sweep`].
    ///
    /// [`sweep`]: Self::sweep
    pub fn get_flash(&mut self, key: &str) -> Option<Value> {
        let entry = self.flash.get_mut(key)?;
        entry.pending_removal = true;
        Some(entry.value.clone())
    }

    /// Returns whether a flash value is present, without flagging it.
    pub fn has_flash(&self, key: &str) -> bool {
        self.flash.contains_key(key)
    }

    /// Runs the load-time flash sweep.
    ///
    /// Deletes every entry flagged during the previous request, then flags
    /// all remaining entries so the upcoming request is their last. Must run
    /// once per session load, before any handler touches the session.
    pub fn sweep(&mut self) {
        let before = self.flash.len();
        self.flash.retain(|_, entry| !entry.pending_removal);
        let removed = before - self.flash.len();

        for entry in self.flash.values_mut() {
            entry.pending_removal = true;
        }

        if removed > 0 {
            debug!(removed, remaining = self.flash.len(), "swept flash data");
        }
    }

    /// Generates a new CSRF token and stores it in the session.
    pub fn generate_csrf_token(&mut self) -> String {
        let token = generate_token();
        self.csrf_token = Some(token.clone());
        token
    }

    /// Returns the CSRF token stored in the session, if any.
    pub fn csrf_token(&self) -> Option<&str> {
        self.csrf_token.as_deref()
    }

    /// Validates a token against the stored CSRF token in constant time.
    pub fn validate_csrf_token(&self, token: &str) -> bool {
        self.csrf_token
            .as_deref()
            .is_some_and(|stored| constant_time_eq(stored.as_bytes(), token.as_bytes()))
    }
}

/// Generates a cryptographically secure token (64 hex characters).
fn generate_token() -> String {
    use rand::RngExt;
    let mut rng = rand::rng();
    let mut bytes = [0u8; 32];
    rng.fill(&mut bytes);
    hex::encode(&bytes)
}

/// Byte comparison that does not short-circuit on the first mismatch.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Helper module for hex encoding (avoiding external dependency).
mod hex {
    pub fn encode(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{b:02x}")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_bag() {
        let mut session = Session::new();
        session.set("user_id", 7);
        session.set("name", "ada");

        assert!(session.has("user_id"));
        assert_eq!(session.get("name"), Some(&Value::from("ada")));

        session.remove("user_id");
        assert!(!session.has("user_id"));

        session.destroy();
        assert_eq!(session.get("name"), None);
    }

    #[test]
    fn test_flash_read_in_write_request() {
        let mut session = Session::new();
        session.set_flash("a", 1);

        // Readable immediately, and still there for a second read.
        assert_eq!(session.get_flash("a"), Some(Value::from(1)));
        assert_eq!(session.get_flash("a"), Some(Value::from(1)));

        // Next request's load sweep deletes it.
        session.sweep();
        assert_eq!(session.get_flash("a"), None);
    }

    #[test]
    fn test_flash_read_in_next_request() {
        let mut session = Session::new();
        session.set_flash("notice", "saved");

        // Next request: survives the sweep, readable once more.
        session.sweep();
        assert_eq!(session.get_flash("notice"), Some(Value::from("saved")));

        session.sweep();
        assert_eq!(session.get_flash("notice"), None);
    }

    #[test]
    fn test_flash_unread_survives_one_extra_request() {
        let mut session = Session::new();
        session.set_flash("ignored", true);

        // Never read: the first sweep flags it, the second removes it.
        session.sweep();
        assert!(session.has_flash("ignored"));

        session.sweep();
        assert!(!session.has_flash("ignored"));
    }

    #[test]
    fn test_flash_reading_does_not_extend_lifetime() {
        let mut session = Session::new();
        session.set_flash("x", 1);

        session.sweep();
        assert_eq!(session.get_flash("x"), Some(Value::from(1)));

        session.sweep();
        assert_eq!(session.get_flash("x"), None);
    }

    #[test]
    fn test_flash_rewrite_resets_lifecycle() {
        let mut session = Session::new();
        session.set_flash("a", "old");
        session.sweep();

        // Overwriting in the second request starts a fresh horizon.
        session.set_flash("a", "new");
        session.sweep();
        assert_eq!(session.get_flash("a"), Some(Value::from("new")));
    }

    #[test]
    fn test_csrf_token_generation() {
        let mut session = Session::new();
        let token1 = session.generate_csrf_token();
        assert_eq!(token1.len(), 64);
        assert_eq!(session.csrf_token(), Some(token1.as_str()));

        let token2 = session.generate_csrf_token();
        assert_ne!(token1, token2);
    }

    #[test]
    fn test_csrf_validation() {
        let mut session = Session::new();
        assert!(!session.validate_csrf_token("anything"));

        let token = session.generate_csrf_token();
        assert!(session.validate_csrf_token(&token));
        assert!(!session.validate_csrf_token("wrong"));
        assert!(!session.validate_csrf_token(&token[..32]));
    }
}
