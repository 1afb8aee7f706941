//! # vigil - reaction-plugin host
//!
//! A host process coordinating independently loadable reaction plugins:
//! - **Resolver**: identifier-to-factory resolution by naming convention
//! - **Registry**: grouped plugins with an ordered query interface
//! - **Supervisor**: pause/resume lifecycle control and protected
//!   runtime reconfiguration
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vigil::config::ProgramEvaluator;
//! use vigil::core::SessionOptions;
//! use vigil::lifecycle::Supervisor;
//! use vigil::plugin::{LogPlugin, PluginResolver};
//!
//! #[tokio::main]
//! async fn main() -> vigil::Result<()> {
//!     let mut resolver = PluginResolver::new();
//!     resolver.register(LogPlugin::factory())?;
//!
//!     let config = ProgramEvaluator::new().plugin("log", vec!["src".to_string()]);
//!     let mut supervisor = Supervisor::new(resolver).with_evaluator(config);
//!     supervisor.start(SessionOptions::default()).await
//! }
//! ```

pub mod config;
pub mod console;
pub mod core;
pub mod lifecycle;
pub mod notifier;
pub mod plugin;
pub mod registry;
pub mod watch;

pub use crate::core::error::{Error, Result};
