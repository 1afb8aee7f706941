//! Registry Module
//!
//! The group/plugin data model and its query interface:
//! - Instantiated plugin entries, insertion order preserved
//! - Named groups with a permanent default
//! - Filtered queries over both sequences

pub mod group;
pub mod registry;

pub use group::{Group, DEFAULT_GROUP};
pub use registry::{PluginEntry, PluginQuery, Registry};
