//! Configuration evaluation surface.
//!
//! The declarative Vigilfile language lives outside this crate; its
//! consumption surface is an evaluator that receives the live registry
//! and populates it. A programmatic evaluator is provided for embedders
//! that configure in code.

use crate::core::{OptionsMap, Result};
use crate::plugin::resolver::PluginResolver;
use crate::registry::group::DEFAULT_GROUP;
use crate::registry::registry::Registry;

/// Populates a registry during setup.
pub trait ConfigEvaluator: Send + Sync {
    /// Evaluate the configuration against the live registry.
    ///
    /// Resolution failures propagate and abort setup.
    fn evaluate(&self, resolver: &PluginResolver, registry: &mut Registry) -> Result<()>;
}

/// An evaluator that registers nothing.
pub struct NullEvaluator;

impl ConfigEvaluator for NullEvaluator {
    fn evaluate(&self, _resolver: &PluginResolver, _registry: &mut Registry) -> Result<()> {
        Ok(())
    }
}

/// One configuration instruction.
#[derive(Clone, Debug)]
enum Instruction {
    /// Open a group; following plugins land in it
    Group {
        name: String,
        options: OptionsMap,
    },
    /// Register a plugin
    Plugin {
        identifier: String,
        watch_patterns: Vec<String>,
        options: OptionsMap,
    },
}

/// Ordered, programmatic configuration.
///
/// Mirrors the shape of a declarative config file: a `group`
/// instruction scopes the plugins that follow it until the next group.
#[derive(Clone, Debug, Default)]
pub struct ProgramEvaluator {
    instructions: Vec<Instruction>,
}

impl ProgramEvaluator {
    /// Create an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a group scope.
    pub fn group(self, name: &str) -> Self {
        self.group_with(name, OptionsMap::new())
    }

    /// Open a group scope with options.
    pub fn group_with(mut self, name: &str, options: OptionsMap) -> Self {
        self.instructions.push(Instruction::Group {
            name: name.to_string(),
            options,
        });
        self
    }

    /// Register a plugin in the current group scope.
    pub fn plugin(self, identifier: &str, watch_patterns: Vec<String>) -> Self {
        self.plugin_with(identifier, watch_patterns, OptionsMap::new())
    }

    /// Register a plugin with options in the current group scope.
    ///
    /// An explicit `group` option wins over the surrounding scope.
    pub fn plugin_with(
        mut self,
        identifier: &str,
        watch_patterns: Vec<String>,
        options: OptionsMap,
    ) -> Self {
        self.instructions.push(Instruction::Plugin {
            identifier: identifier.to_string(),
            watch_patterns,
            options,
        });
        self
    }
}

impl ConfigEvaluator for ProgramEvaluator {
    fn evaluate(&self, resolver: &PluginResolver, registry: &mut Registry) -> Result<()> {
        let mut current_group = DEFAULT_GROUP.to_string();

        for instruction in &self.instructions {
            match instruction {
                Instruction::Group { name, options } => {
                    current_group = registry.add_group(name, options.clone()).name.clone();
                }
                Instruction::Plugin {
                    identifier,
                    watch_patterns,
                    options,
                } => {
                    let mut options = options.clone();
                    options
                        .entry("group".to_string())
                        .or_insert_with(|| serde_json::Value::String(current_group.clone()));
                    registry.add_plugin(resolver, identifier, watch_patterns.clone(), options)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::interface::{Plugin, PluginFactory};

    struct TestFactory(&'static str);

    struct TestPlugin;

    impl Plugin for TestPlugin {}

    impl PluginFactory for TestFactory {
        fn type_name(&self) -> &str {
            self.0
        }

        fn construct(&self, _watch_patterns: Vec<String>, _options: OptionsMap) -> Box<dyn Plugin> {
            Box::new(TestPlugin)
        }
    }

    fn resolver() -> PluginResolver {
        let mut resolver = PluginResolver::new();
        resolver.register(TestFactory("Rspec")).unwrap();
        resolver.register(TestFactory("Minitest")).unwrap();
        resolver
    }

    #[test]
    fn test_null_evaluator() {
        let resolver = resolver();
        let mut registry = Registry::new();

        NullEvaluator.evaluate(&resolver, &mut registry).unwrap();
        assert!(registry.plugins().is_empty());
    }

    #[test]
    fn test_group_scope_applies_to_following_plugins() {
        let resolver = resolver();
        let mut registry = Registry::new();

        let program = ProgramEvaluator::new()
            .plugin("rspec", vec!["spec".to_string()])
            .group("backend")
            .plugin("minitest", vec!["test".to_string()]);

        program.evaluate(&resolver, &mut registry).unwrap();

        assert_eq!(registry.plugins()[0].group, "default");
        assert_eq!(registry.plugins()[1].group, "backend");
        assert!(registry.group("backend").is_some());
    }

    #[test]
    fn test_explicit_group_option_wins() {
        let resolver = resolver();
        let mut registry = Registry::new();
        let mut options = OptionsMap::new();
        options.insert("group".to_string(), serde_json::json!("frontend"));

        let program = ProgramEvaluator::new()
            .group("backend")
            .plugin_with("rspec", Vec::new(), options);

        program.evaluate(&resolver, &mut registry).unwrap();
        assert_eq!(registry.plugins()[0].group, "frontend");
    }

    #[test]
    fn test_resolution_failure_aborts_evaluation() {
        let resolver = resolver();
        let mut registry = Registry::new();

        let program = ProgramEvaluator::new()
            .plugin("rspec", Vec::new())
            .plugin("missing", Vec::new())
            .plugin("minitest", Vec::new());

        assert!(program.evaluate(&resolver, &mut registry).is_err());
        // evaluation stops at the failure
        assert_eq!(registry.plugins().len(), 1);
    }
}
