//! Error types for vigil.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for vigil operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in vigil operations.
#[derive(Error, Debug)]
pub enum Error {
    // Resolution errors
    #[error("could not resolve plugin '{identifier}'")]
    UnresolvedPlugin {
        /// The identifier that failed to resolve
        identifier: String,
        /// The diagnostics reported on the loud path (always two)
        diagnostics: Vec<String>,
    },

    #[error("plugin type '{0}' is already registered")]
    DuplicateFactory(String),

    // Scaffolding errors
    #[error("configuration file already exists: {0}")]
    VigilfileExists(PathBuf),

    #[error("no initializer template found for '{identifier}' (tried: {})", .attempted.join(", "))]
    TemplateNotFound {
        /// The identifier a template was requested for
        identifier: String,
        /// The locations that were attempted, in order
        attempted: Vec<String>,
    },

    // Lifecycle errors
    #[error("supervisor has not been set up: {0}")]
    NotConfigured(&'static str),

    // Watcher errors
    #[error("watch error: {0}")]
    Watch(String),

    // Plugin errors
    #[error("plugin error: {0}")]
    Plugin(String),

    // Generic errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<notify::Error> for Error {
    fn from(err: notify::Error) -> Self {
        Error::Watch(err.to_string())
    }
}
