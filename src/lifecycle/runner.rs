//! Change-event dispatch across the registry.
//!
//! Invokes plugin callbacks in insertion order, narrowing by watch
//! patterns and honoring each group's `halt_on_failure` option.

use crate::core::Result;
use crate::registry::registry::Registry;
use crate::watch::event::ChangeEvent;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

/// Dispatches lifecycle callbacks over registered plugins.
pub struct Runner;

impl Runner {
    /// Dispatch a change event to every matching plugin.
    ///
    /// A failure inside a group carrying `halt_on_failure` skips the
    /// remaining plugins of that group for this event; other groups run
    /// regardless. Returns the per-plugin results of the callbacks that
    /// ran.
    pub fn dispatch(registry: &mut Registry, event: &ChangeEvent) -> Vec<(String, Result<()>)> {
        let halting: HashMap<String, bool> = registry
            .groups()
            .iter()
            .map(|group| (group.name.clone(), group.halt_on_failure()))
            .collect();

        let mut halted: HashSet<String> = HashSet::new();
        let mut results = Vec::new();

        for entry in registry.plugins_mut() {
            if halted.contains(&entry.group) {
                tracing::debug!(plugin = %entry.name, group = %entry.group, "skipped, group halted");
                continue;
            }

            let modified = matching_paths(&entry.watch_patterns, &event.modified);
            let removed = matching_paths(&entry.watch_patterns, &event.removed);
            if modified.is_empty() && removed.is_empty() {
                continue;
            }

            let mut outcome = Ok(());
            if !modified.is_empty() {
                outcome = entry.instance.run_on_change(&modified);
            }
            if outcome.is_ok() && !removed.is_empty() {
                outcome = entry.instance.run_on_removal(&removed);
            }

            if outcome.is_err() && halting.get(&entry.group).copied().unwrap_or(false) {
                halted.insert(entry.group.clone());
            }
            results.push((entry.name.clone(), outcome));
        }

        results
    }

    /// Run every plugin's start callback, insertion order.
    pub fn start_all(registry: &mut Registry) -> Vec<(String, Result<()>)> {
        registry
            .plugins_mut()
            .map(|entry| (entry.name.clone(), entry.instance.start()))
            .collect()
    }

    /// Run every plugin's stop callback, insertion order.
    pub fn stop_all(registry: &mut Registry) -> Vec<(String, Result<()>)> {
        registry
            .plugins_mut()
            .map(|entry| (entry.name.clone(), entry.instance.stop()))
            .collect()
    }

    /// Run every plugin's reload callback, insertion order.
    pub fn reload_all(registry: &mut Registry) -> Vec<(String, Result<()>)> {
        registry
            .plugins_mut()
            .map(|entry| (entry.name.clone(), entry.instance.reload()))
            .collect()
    }
}

/// Paths a plugin's patterns select out of a change set.
///
/// An empty pattern list matches everything; otherwise a path matches
/// when its display form contains any pattern.
fn matching_paths(patterns: &[String], paths: &[PathBuf]) -> Vec<PathBuf> {
    if patterns.is_empty() {
        return paths.to_vec();
    }

    paths
        .iter()
        .filter(|path| {
            let display = path.display().to_string();
            patterns.iter().any(|pattern| display.contains(pattern))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Error, OptionsMap};
    use crate::plugin::interface::{Plugin, PluginFactory};
    use crate::plugin::resolver::PluginResolver;
    use std::sync::{Arc, Mutex};

    /// Records every callback invocation; fails on demand.
    struct RecorderPlugin {
        name: String,
        log: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl Plugin for RecorderPlugin {
        fn start(&mut self) -> Result<()> {
            self.log.lock().unwrap().push(format!("{}:start", self.name));
            Ok(())
        }

        fn reload(&mut self) -> Result<()> {
            self.log.lock().unwrap().push(format!("{}:reload", self.name));
            Ok(())
        }

        fn run_on_change(&mut self, paths: &[PathBuf]) -> Result<()> {
            self.log
                .lock()
                .unwrap()
                .push(format!("{}:change:{}", self.name, paths.len()));
            if self.fail {
                return Err(Error::Plugin(format!("{} failed", self.name)));
            }
            Ok(())
        }

        fn run_on_removal(&mut self, paths: &[PathBuf]) -> Result<()> {
            self.log
                .lock()
                .unwrap()
                .push(format!("{}:removal:{}", self.name, paths.len()));
            Ok(())
        }
    }

    struct RecorderFactory {
        type_name: &'static str,
        log: Arc<Mutex<Vec<String>>>,
        fail: bool,
    }

    impl PluginFactory for RecorderFactory {
        fn type_name(&self) -> &str {
            self.type_name
        }

        fn construct(&self, _watch_patterns: Vec<String>, _options: OptionsMap) -> Box<dyn Plugin> {
            Box::new(RecorderPlugin {
                name: self.type_name.to_lowercase(),
                log: Arc::clone(&self.log),
                fail: self.fail,
            })
        }
    }

    fn recorder_resolver(log: &Arc<Mutex<Vec<String>>>, failing: &[&'static str]) -> PluginResolver {
        let mut resolver = PluginResolver::new();
        for type_name in ["First", "Second", "Third"] {
            resolver
                .register(RecorderFactory {
                    type_name,
                    log: Arc::clone(log),
                    fail: failing.contains(&type_name),
                })
                .unwrap();
        }
        resolver
    }

    fn change(paths: &[&str]) -> ChangeEvent {
        ChangeEvent {
            modified: paths.iter().map(PathBuf::from).collect(),
            removed: Vec::new(),
        }
    }

    fn group_options(group: &str) -> OptionsMap {
        let mut options = OptionsMap::new();
        options.insert("group".to_string(), serde_json::json!(group));
        options
    }

    #[test]
    fn test_dispatch_in_insertion_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let resolver = recorder_resolver(&log, &[]);
        let mut registry = Registry::new();
        registry
            .add_plugin(&resolver, "second", Vec::new(), OptionsMap::new())
            .unwrap();
        registry
            .add_plugin(&resolver, "first", Vec::new(), OptionsMap::new())
            .unwrap();

        let results = Runner::dispatch(&mut registry, &change(&["src/lib.rs"]));
        assert_eq!(results.len(), 2);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["second:change:1", "first:change:1"]
        );
    }

    #[test]
    fn test_dispatch_narrows_by_patterns() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let resolver = recorder_resolver(&log, &[]);
        let mut registry = Registry::new();
        registry
            .add_plugin(
                &resolver,
                "first",
                vec!["spec".to_string()],
                OptionsMap::new(),
            )
            .unwrap();

        let results = Runner::dispatch(&mut registry, &change(&["src/lib.rs"]));
        assert!(results.is_empty());

        let results = Runner::dispatch(&mut registry, &change(&["spec/lib_spec.rb", "src/a.rs"]));
        assert_eq!(results.len(), 1);
        assert_eq!(*log.lock().unwrap(), vec!["first:change:1"]);
    }

    #[test]
    fn test_dispatch_routes_removals() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let resolver = recorder_resolver(&log, &[]);
        let mut registry = Registry::new();
        registry
            .add_plugin(&resolver, "first", Vec::new(), OptionsMap::new())
            .unwrap();

        let event = ChangeEvent {
            modified: Vec::new(),
            removed: vec![PathBuf::from("src/old.rs")],
        };
        Runner::dispatch(&mut registry, &event);
        assert_eq!(*log.lock().unwrap(), vec!["first:removal:1"]);
    }

    #[test]
    fn test_halt_on_failure_skips_rest_of_group() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let resolver = recorder_resolver(&log, &["First"]);
        let mut registry = Registry::new();

        let mut halting = OptionsMap::new();
        halting.insert("halt_on_failure".to_string(), serde_json::json!(true));
        registry.add_group("backend", halting);
        registry.add_group("frontend", OptionsMap::new());

        registry
            .add_plugin(&resolver, "first", Vec::new(), group_options("backend"))
            .unwrap();
        registry
            .add_plugin(&resolver, "second", Vec::new(), group_options("backend"))
            .unwrap();
        registry
            .add_plugin(&resolver, "third", Vec::new(), group_options("frontend"))
            .unwrap();

        let results = Runner::dispatch(&mut registry, &change(&["src/lib.rs"]));

        // "second" is skipped, "third" still runs in its own group
        assert_eq!(
            *log.lock().unwrap(),
            vec!["first:change:1", "third:change:1"]
        );
        assert_eq!(results.len(), 2);
        assert!(results[0].1.is_err());
        assert!(results[1].1.is_ok());
    }

    #[test]
    fn test_failure_without_halt_option_continues() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let resolver = recorder_resolver(&log, &["First"]);
        let mut registry = Registry::new();
        registry
            .add_plugin(&resolver, "first", Vec::new(), OptionsMap::new())
            .unwrap();
        registry
            .add_plugin(&resolver, "second", Vec::new(), OptionsMap::new())
            .unwrap();

        let results = Runner::dispatch(&mut registry, &change(&["src/lib.rs"]));
        assert_eq!(results.len(), 2);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["first:change:1", "second:change:1"]
        );
    }

    #[test]
    fn test_lifecycle_sweeps() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let resolver = recorder_resolver(&log, &[]);
        let mut registry = Registry::new();
        registry
            .add_plugin(&resolver, "first", Vec::new(), OptionsMap::new())
            .unwrap();
        registry
            .add_plugin(&resolver, "second", Vec::new(), OptionsMap::new())
            .unwrap();

        Runner::start_all(&mut registry);
        Runner::reload_all(&mut registry);
        assert_eq!(
            *log.lock().unwrap(),
            vec!["first:start", "second:start", "first:reload", "second:reload"]
        );
    }

    #[test]
    fn test_matching_paths() {
        let paths = vec![PathBuf::from("spec/a_spec.rb"), PathBuf::from("src/a.rs")];

        assert_eq!(matching_paths(&[], &paths).len(), 2);
        assert_eq!(
            matching_paths(&["spec".to_string()], &paths),
            vec![PathBuf::from("spec/a_spec.rb")]
        );
        assert!(matching_paths(&["docs".to_string()], &paths).is_empty());
    }
}
