//! Lifecycle Module
//!
//! The pause/resume state machine and its surroundings:
//! - The supervisor owning watcher, console and registry lock
//! - Change-event dispatch across the registry
//! - Control messages and the signal bridge

pub mod controller;
pub mod runner;
#[cfg(unix)]
pub mod signal;
pub mod state;

pub use controller::Supervisor;
pub use runner::Runner;
#[cfg(unix)]
pub use signal::SignalBridge;
pub use state::{ControlMessage, LifecycleState};
