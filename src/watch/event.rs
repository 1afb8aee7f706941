//! Change events delivered to plugins.

use notify::EventKind;
use std::path::PathBuf;

/// A folded filesystem change: which paths were touched and which
/// disappeared.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangeEvent {
    /// Paths created or modified
    pub modified: Vec<PathBuf>,
    /// Paths removed
    pub removed: Vec<PathBuf>,
}

impl ChangeEvent {
    /// Fold a raw notify event into a change event.
    ///
    /// Access events and path-less events carry no reaction-relevant
    /// information and fold to `None`.
    pub fn from_notify(event: &notify::Event) -> Option<Self> {
        if event.paths.is_empty() {
            return None;
        }

        match event.kind {
            EventKind::Access(_) => None,
            EventKind::Remove(_) => Some(Self {
                modified: Vec::new(),
                removed: event.paths.clone(),
            }),
            _ => Some(Self {
                modified: event.paths.clone(),
                removed: Vec::new(),
            }),
        }
    }

    /// Whether the event carries no paths at all.
    pub fn is_empty(&self) -> bool {
        self.modified.is_empty() && self.removed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind, RemoveKind};

    fn raw(kind: EventKind, path: &str) -> notify::Event {
        notify::Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_create_and_modify_fold_to_modified() {
        let create = raw(EventKind::Create(CreateKind::File), "src/lib.rs");
        let event = ChangeEvent::from_notify(&create).unwrap();
        assert_eq!(event.modified, vec![PathBuf::from("src/lib.rs")]);
        assert!(event.removed.is_empty());

        let modify = raw(EventKind::Modify(ModifyKind::Any), "src/lib.rs");
        let event = ChangeEvent::from_notify(&modify).unwrap();
        assert_eq!(event.modified.len(), 1);
    }

    #[test]
    fn test_remove_folds_to_removed() {
        let remove = raw(EventKind::Remove(RemoveKind::File), "src/old.rs");
        let event = ChangeEvent::from_notify(&remove).unwrap();
        assert!(event.modified.is_empty());
        assert_eq!(event.removed, vec![PathBuf::from("src/old.rs")]);
    }

    #[test]
    fn test_access_and_empty_events_are_dropped() {
        let access = raw(EventKind::Access(AccessKind::Any), "src/lib.rs");
        assert!(ChangeEvent::from_notify(&access).is_none());

        let empty = notify::Event::new(EventKind::Create(CreateKind::File));
        assert!(ChangeEvent::from_notify(&empty).is_none());
    }
}
