//! Diagnostics helpers on top of `tracing`.
//!
//! Bindings are re-evaluated every frame, so a warning about a binding shape
//! would otherwise be emitted 60 times a second. [`warn_once`] keeps a
//! thread-local set of message keys and only forwards the first occurrence.

use std::cell::RefCell;
use std::collections::HashSet;

thread_local! {
    static EMITTED: RefCell<HashSet<String>> = RefCell::new(HashSet::new());
}

/// Emit `message` at WARN level the first time `key` is seen on this thread.
///
/// Returns `true` if the message was emitted.
pub fn warn_once(key: &str, message: impl FnOnce() -> String) -> bool {
    let first = EMITTED.with(|emitted| emitted.borrow_mut().insert(key.to_owned()));
    if first {
        tracing::warn!("{}", message());
    }
    first
}

/// Forget every key recorded by [`warn_once`].
pub fn reset_warnings() {
    EMITTED.with(|emitted| emitted.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warns_once_per_key() {
        reset_warnings();
        assert!(warn_once("a", || "first".into()));
        assert!(!warn_once("a", || "second".into()));
        assert!(warn_once("b", || "other".into()));
    }

    #[test]
    fn reset_allows_repeat() {
        reset_warnings();
        assert!(warn_once("k", || "x".into()));
        reset_warnings();
        assert!(warn_once("k", || "x".into()));
    }
}
