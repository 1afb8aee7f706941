//! Notifier Module
//!
//! The notification on/off facade and the option/environment
//! resolution rule.

pub mod facade;

pub use facade::{resolve_notify_state, Notifier, NOTIFY_ENV};
