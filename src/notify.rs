// SPDX-License-Identifier: MIT

//! User-facing notification seam.
//!
//! The storefront surfaces transient confirmations and errors to the user
//! ("added to cart", "session expired"). How those are rendered is up to the
//! embedding application; the SDK only emits them through this trait.

/// Sink for user-visible notifications.
pub trait Notifier: Send + Sync {
    /// A confirmation of a completed action.
    fn success(&self, message: &str);

    /// A recoverable, user-actionable problem.
    fn error(&self, message: &str);
}

/// Notifier that forwards messages to `tracing`.
///
/// Suitable default for headless use; interactive frontends supply their own.
#[derive(Debug, Default, Clone)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        tracing::info!(notice = %message, "user notification");
    }

    fn error(&self, message: &str) {
        tracing::warn!(notice = %message, "user notification");
    }
}

/// Notifier that drops all messages. Used in tests.
#[derive(Debug, Default, Clone)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn success(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}
