//! Named plugin groups.

use crate::core::{bool_option, OptionsMap};

/// Name of the group every plugin belongs to unless told otherwise.
pub const DEFAULT_GROUP: &str = "default";

/// A named partition of plugins sharing activation options.
#[derive(Clone, Debug)]
pub struct Group {
    /// Canonical group name
    pub name: String,
    /// Arbitrary options; `halt_on_failure` is a recognized convention
    pub options: OptionsMap,
}

impl Group {
    /// Create a new group with a normalized name.
    pub fn new(identifier: &str, options: OptionsMap) -> Self {
        Self {
            name: Self::canonical_name(identifier),
            options,
        }
    }

    /// The implicit group present in every registry.
    pub fn default_group() -> Self {
        Self::new(DEFAULT_GROUP, OptionsMap::new())
    }

    /// Normalize a group identifier to its canonical symbolic form.
    pub fn canonical_name(identifier: &str) -> String {
        identifier.trim().to_lowercase().replace('-', "_")
    }

    /// Whether a plugin failure halts the remainder of this group.
    pub fn halt_on_failure(&self) -> bool {
        bool_option(&self.options, "halt_on_failure").unwrap_or(false)
    }
}
