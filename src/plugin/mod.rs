//! Plugin Module
//!
//! Provides the extensible plugin architecture:
//! - Plugin capability contract and factories
//! - Identifier resolution by naming convention
//! - Vigilfile scaffolding

pub mod interface;
pub mod resolver;
pub mod scaffold;

pub use interface::{LogPlugin, LogPluginFactory, Plugin, PluginFactory};
pub use resolver::{canonical_type_name, PluginResolver};
pub use scaffold::{create_vigilfile, insert_template, user_template_dir, VIGILFILE_SEED};
