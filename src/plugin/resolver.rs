//! Plugin resolution by naming convention.
//!
//! Maps short identifiers to registered plugin factories. Implementations
//! self-register a factory at process initialization; resolution then
//! canonicalizes the identifier and looks the factory up, tolerating
//! irregularly cased implementation names through a fallback scan.

use crate::core::{Error, Result};
use crate::plugin::interface::PluginFactory;

/// Derive the canonical type name for an identifier.
///
/// Splits on `-`/`_`, capitalizes each segment and concatenates, e.g.
/// `dashed-class-name` becomes `DashedClassName`. Best-effort: an
/// implementation whose declared name breaks this convention is still
/// reachable through the case-insensitive fallback.
pub fn canonical_type_name(identifier: &str) -> String {
    identifier
        .split(['-', '_'])
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Registry of plugin factories, ordered by declaration.
#[derive(Default)]
pub struct PluginResolver {
    /// Registered factories, in registration order
    factories: Vec<Box<dyn PluginFactory>>,
}

impl PluginResolver {
    /// Create an empty resolver.
    pub fn new() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// Register a plugin factory.
    ///
    /// Declaration order is preserved; it decides which factory wins
    /// when the fallback scan matches more than one.
    pub fn register(&mut self, factory: impl PluginFactory + 'static) -> Result<()> {
        if self
            .factories
            .iter()
            .any(|existing| existing.type_name() == factory.type_name())
        {
            return Err(Error::DuplicateFactory(factory.type_name().to_string()));
        }
        self.factories.push(Box::new(factory));
        Ok(())
    }

    /// Look up a factory for an identifier, failing silently.
    ///
    /// Tries the exact canonical name first, then a case-insensitive
    /// scan over the registration table; the first match in declaration
    /// order wins. Returns `None` without diagnostics when nothing
    /// matches.
    pub fn find(&self, identifier: &str) -> Option<&dyn PluginFactory> {
        let canonical = canonical_type_name(identifier);

        if let Some(factory) = self
            .factories
            .iter()
            .find(|factory| factory.type_name() == canonical)
        {
            return Some(factory.as_ref());
        }

        self.factories
            .iter()
            .find(|factory| factory.type_name().eq_ignore_ascii_case(&canonical))
            .map(|factory| factory.as_ref())
    }

    /// Look up a factory for an identifier, reporting on failure.
    ///
    /// On failure the returned error carries exactly two diagnostics
    /// (no registration under the identifier, no type matching the
    /// canonical name), each also emitted through `tracing::error!`.
    pub fn resolve(&self, identifier: &str) -> Result<&dyn PluginFactory> {
        match self.find(identifier) {
            Some(factory) => Ok(factory),
            None => {
                let canonical = canonical_type_name(identifier);
                let diagnostics = vec![
                    format!("no plugin is registered under the identifier '{identifier}'"),
                    format!("no plugin type matching '{canonical}' is known"),
                ];
                for diagnostic in &diagnostics {
                    tracing::error!("{diagnostic}");
                }
                Err(Error::UnresolvedPlugin {
                    identifier: identifier.to_string(),
                    diagnostics,
                })
            }
        }
    }

    /// Resolve an identifier to its factory's initializer template.
    ///
    /// Absent when the identifier is unknown or the factory ships no
    /// template.
    pub fn template_for(&self, identifier: &str) -> Option<&str> {
        self.find(identifier).and_then(PluginFactory::template)
    }

    /// Number of registered factories.
    pub fn factory_count(&self) -> usize {
        self.factories.len()
    }
}
