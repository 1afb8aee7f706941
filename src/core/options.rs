//! Process-wide options captured at setup time.
//!
//! Immutable for the remainder of the process lifetime once setup completes.

use crate::core::types::OptionsMap;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Options recognized by [`Supervisor::setup`](crate::lifecycle::Supervisor::setup).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Enable debug-level logging
    pub verbose: bool,
    /// Notification toggle; `None` falls back to the environment override
    pub notify: Option<bool>,
    /// Disable the interactive console
    pub no_interactions: bool,
    /// Disable the signal bridge
    pub no_signals: bool,
    /// Root directory to watch; defaults to the current directory
    pub watch_root: Option<PathBuf>,
    /// Opaque pass-through bag for collaborator-specific settings
    pub extra: OptionsMap,
}

impl SessionOptions {
    /// Create options with all defaults.
    pub fn new() -> Self {
        Self {
            verbose: false,
            notify: None,
            no_interactions: false,
            no_signals: false,
            watch_root: None,
            extra: OptionsMap::new(),
        }
    }

    /// Options for embedded use: no console, no signals, no notifications.
    pub fn headless() -> Self {
        Self {
            notify: Some(false),
            no_interactions: true,
            no_signals: true,
            ..Self::new()
        }
    }

    /// Set the watch root.
    pub fn with_watch_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.watch_root = Some(root.into());
        self
    }

    /// Set the notification toggle.
    pub fn with_notify(mut self, notify: bool) -> Self {
        self.notify = Some(notify);
        self
    }
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::new()
    }
}
