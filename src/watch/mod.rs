//! Watch Module
//!
//! Change detection plumbing:
//! - Folded change events
//! - The notify-backed watcher handle

pub mod event;
pub mod watcher;

pub use event::ChangeEvent;
pub use watcher::{RawEvent, Watcher};
