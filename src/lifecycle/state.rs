//! Lifecycle state and control messages.

use serde::{Deserialize, Serialize};

/// Host lifecycle state.
///
/// `Stopped` is initial; once started, `Running` and `Paused` toggle
/// back and forth until the watcher shuts down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Not watching
    Stopped,
    /// Watching and reacting to changes
    Running,
    /// Watching suspended; change events are discarded
    Paused,
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleState::Stopped => write!(f, "stopped"),
            LifecycleState::Running => write!(f, "running"),
            LifecycleState::Paused => write!(f, "paused"),
        }
    }
}

/// Messages consumed by the run loop's single decision point.
///
/// Operator commands and external signals are both translated into
/// these; the run loop applies them in arrival order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControlMessage {
    /// Suspend change dispatch
    Pause,
    /// Resume change dispatch
    Resume,
    /// Re-run plugin reload callbacks under the protected-mutation lock
    Reload,
    /// Shut the run loop down
    Stop,
}

impl ControlMessage {
    /// Parse an operator command line.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "pause" => Some(ControlMessage::Pause),
            "resume" | "unpause" => Some(ControlMessage::Resume),
            "reload" => Some(ControlMessage::Reload),
            "stop" | "quit" | "exit" => Some(ControlMessage::Stop),
            _ => None,
        }
    }
}
