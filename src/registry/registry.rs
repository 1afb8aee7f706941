//! Registry of instantiated plugins and their groups.
//!
//! Holds the ordered plugin sequence (insertion order decides reaction
//! order) and the ordered group sequence, and answers filtered queries
//! over both. One registry value is owned per host; collaborators
//! receive it by reference.

use crate::core::{now, string_option, OptionsMap, Result, Timestamp};
use crate::plugin::interface::Plugin;
use crate::plugin::resolver::PluginResolver;
use crate::registry::group::Group;
use regex::Regex;

/// An instantiated plugin tracked by the registry.
pub struct PluginEntry {
    /// Identifier the plugin was registered under, lowercased
    pub name: String,
    /// Canonical name of the group the plugin belongs to
    pub group: String,
    /// Patterns narrowing which changed paths reach the plugin
    pub watch_patterns: Vec<String>,
    /// Options the instance was constructed with
    pub options: OptionsMap,
    /// The plugin instance
    pub instance: Box<dyn Plugin>,
    /// Registration time
    pub registered_at: Timestamp,
}

/// Structured filter over the plugin sequence.
///
/// Both fields omitted matches everything; one given filters on that
/// one; both given returns the intersection.
#[derive(Clone, Debug, Default)]
pub struct PluginQuery {
    /// Match plugins belonging to this group
    pub group: Option<String>,
    /// Match plugins registered under this name
    pub name: Option<String>,
}

impl PluginQuery {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter on a group.
    pub fn with_group(mut self, group: &str) -> Self {
        self.group = Some(group.to_string());
        self
    }

    /// Filter on a plugin name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }
}

/// Plugin and group registry.
pub struct Registry {
    /// Plugins in insertion order
    plugins: Vec<PluginEntry>,
    /// Groups in insertion order, default always first
    groups: Vec<Group>,
}

impl Registry {
    /// Create a registry holding only the default group.
    pub fn new() -> Self {
        Self {
            plugins: Vec::new(),
            groups: vec![Group::default_group()],
        }
    }

    /// Resolve, construct and append a plugin.
    ///
    /// Resolution failures propagate to the caller and carry the
    /// resolver's diagnostics. The group is taken from the `group`
    /// option when present, defaulting to `default`.
    pub fn add_plugin(
        &mut self,
        resolver: &PluginResolver,
        identifier: &str,
        watch_patterns: Vec<String>,
        mut options: OptionsMap,
    ) -> Result<&PluginEntry> {
        let factory = resolver.resolve(identifier)?;

        let group = string_option(&options, "group")
            .map(|name| Group::canonical_name(&name))
            .unwrap_or_else(|| Group::default_group().name);
        options.remove("group");

        let instance = factory.construct(watch_patterns.clone(), options.clone());
        let entry = PluginEntry {
            name: identifier.to_ascii_lowercase(),
            group,
            watch_patterns,
            options,
            instance,
            registered_at: now(),
        };

        let index = self.plugins.len();
        self.plugins.push(entry);
        tracing::debug!(plugin = identifier, "plugin registered");
        Ok(&self.plugins[index])
    }

    /// Append a group unless one with that name already exists.
    ///
    /// Re-adding is idempotent and does not reset options.
    pub fn add_group(&mut self, identifier: &str, options: OptionsMap) -> &Group {
        let name = Group::canonical_name(identifier);
        if let Some(index) = self.groups.iter().position(|group| group.name == name) {
            return &self.groups[index];
        }

        self.groups.push(Group { name, options });
        let index = self.groups.len() - 1;
        &self.groups[index]
    }

    /// Clear all groups and reinstate only the default group.
    pub fn reset_groups(&mut self) {
        self.groups.clear();
        self.groups.push(Group::default_group());
    }

    /// Drop all plugin entries.
    pub fn clear_plugins(&mut self) {
        self.plugins.clear();
    }

    /// The full plugin sequence, insertion order preserved.
    pub fn plugins(&self) -> &[PluginEntry] {
        &self.plugins
    }

    /// The first plugin registered under the given name.
    pub fn plugin(&self, name: &str) -> Option<&PluginEntry> {
        self.plugins
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    /// All plugins whose name matches the expression, order preserved.
    pub fn plugins_matching(&self, pattern: &Regex) -> Vec<&PluginEntry> {
        self.plugins
            .iter()
            .filter(|entry| pattern.is_match(&entry.name))
            .collect()
    }

    /// All plugins matching a structured group/name query.
    pub fn plugins_where(&self, query: &PluginQuery) -> Vec<&PluginEntry> {
        let group = query.group.as_deref().map(Group::canonical_name);
        self.plugins
            .iter()
            .filter(|entry| {
                group.as_deref().map_or(true, |g| entry.group == g)
                    && query
                        .name
                        .as_deref()
                        .map_or(true, |n| entry.name.eq_ignore_ascii_case(n))
            })
            .collect()
    }

    /// The full group sequence, default first.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// The group registered under the given name.
    pub fn group(&self, name: &str) -> Option<&Group> {
        let name = Group::canonical_name(name);
        self.groups.iter().find(|group| group.name == name)
    }

    /// All groups whose name matches the expression, order preserved.
    pub fn groups_matching(&self, pattern: &Regex) -> Vec<&Group> {
        self.groups
            .iter()
            .filter(|group| pattern.is_match(&group.name))
            .collect()
    }

    pub(crate) fn plugins_mut(&mut self) -> impl Iterator<Item = &mut PluginEntry> {
        self.plugins.iter_mut()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
