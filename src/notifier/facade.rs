//! Notification facade.
//!
//! Tracks whether notifications are enabled and resolves the effective
//! setting from the explicit option and the environment override.
//! Actual desktop delivery is a collaborator concern; when on, messages
//! go to the log.

use std::sync::atomic::{AtomicBool, Ordering};

/// Environment variable overriding the notify option.
pub const NOTIFY_ENV: &str = "VIGIL_NOTIFY";

/// Resolve the effective notification state.
///
/// An explicit `false` option always disables. Otherwise an environment
/// override of `"false"` disables, and any other environment value, an
/// explicit `true`, or nothing at all enables.
pub fn resolve_notify_state(option: Option<bool>, env_value: Option<&str>) -> bool {
    if option == Some(false) {
        return false;
    }
    env_value != Some("false")
}

/// Notification delivery switch.
pub struct Notifier {
    /// Whether notifications are delivered
    on: AtomicBool,
}

impl Notifier {
    /// Create a notifier, initially off.
    pub fn new() -> Self {
        Self {
            on: AtomicBool::new(false),
        }
    }

    /// Enable notification delivery.
    pub fn turn_on(&self) {
        self.on.store(true, Ordering::SeqCst);
    }

    /// Disable notification delivery.
    pub fn turn_off(&self) {
        self.on.store(false, Ordering::SeqCst);
    }

    /// Whether notifications are currently delivered.
    pub fn is_on(&self) -> bool {
        self.on.load(Ordering::SeqCst)
    }

    /// Deliver a notification; a no-op while off.
    pub fn notify(&self, title: &str, body: &str) {
        if self.is_on() {
            tracing::info!(title, body, "notification");
        }
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
