//! Plugin interface definition.
//!
//! Defines the capability contract plugins must implement and the
//! factory contract their implementations register at startup.

use crate::core::{OptionsMap, Result};
use std::path::PathBuf;

/// The polymorphic surface every plugin instance must support.
///
/// Every lifecycle callback is independently overridable and defaults
/// to a no-op, so implementations only provide the reactions they
/// care about.
pub trait Plugin: Send + Sync {
    /// Called when the host starts watching.
    fn start(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called when the host stops watching.
    fn stop(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called when the host reconfigures at runtime.
    fn reload(&mut self) -> Result<()> {
        Ok(())
    }

    /// Called with the paths that were created or modified.
    fn run_on_change(&mut self, _paths: &[PathBuf]) -> Result<()> {
        Ok(())
    }

    /// Called with the paths that were removed.
    fn run_on_removal(&mut self, _paths: &[PathBuf]) -> Result<()> {
        Ok(())
    }
}

/// Constructor contract registered with the resolver at process
/// initialization.
pub trait PluginFactory: Send + Sync {
    /// The declared implementation name, e.g. `FooBar`.
    ///
    /// Resolution matches identifiers against this name; it normally
    /// follows the capitalized-concatenation convention but is not
    /// required to.
    fn type_name(&self) -> &str;

    /// Construct a plugin instance from watch patterns and options.
    fn construct(&self, watch_patterns: Vec<String>, options: OptionsMap) -> Box<dyn Plugin>;

    /// Initializer template appended to a Vigilfile by scaffolding.
    fn template(&self) -> Option<&str> {
        None
    }
}

/// A simple built-in plugin that reports the paths it is handed.
///
/// Useful as a first plugin in a fresh Vigilfile and as a fixture in
/// tests.
pub struct LogPlugin {
    watch_patterns: Vec<String>,
    options: OptionsMap,
}

impl LogPlugin {
    /// Create a new log plugin.
    pub fn new(watch_patterns: Vec<String>, options: OptionsMap) -> Self {
        Self {
            watch_patterns,
            options,
        }
    }

    /// The factory registered under the `log` identifier.
    pub fn factory() -> LogPluginFactory {
        LogPluginFactory
    }

    /// The watch patterns this instance was constructed with.
    pub fn watch_patterns(&self) -> &[String] {
        &self.watch_patterns
    }

    /// The options this instance was constructed with.
    pub fn options(&self) -> &OptionsMap {
        &self.options
    }
}

impl Plugin for LogPlugin {
    fn run_on_change(&mut self, paths: &[PathBuf]) -> Result<()> {
        for path in paths {
            tracing::info!(path = %path.display(), "changed");
        }
        Ok(())
    }

    fn run_on_removal(&mut self, paths: &[PathBuf]) -> Result<()> {
        for path in paths {
            tracing::info!(path = %path.display(), "removed");
        }
        Ok(())
    }
}

/// Factory for [`LogPlugin`].
pub struct LogPluginFactory;

impl PluginFactory for LogPluginFactory {
    fn type_name(&self) -> &str {
        "Log"
    }

    fn construct(&self, watch_patterns: Vec<String>, options: OptionsMap) -> Box<dyn Plugin> {
        Box::new(LogPlugin::new(watch_patterns, options))
    }

    fn template(&self) -> Option<&str> {
        Some("# Report every change under the watched patterns.\nplugin \"log\"\n")
    }
}
