//! Signal bridge.
//!
//! Translates SIGUSR1/SIGUSR2 into pause/resume control messages,
//! guarded by the watcher's observed state so duplicate signals never
//! double-toggle. Absent on platforms without signal delivery.

use crate::core::Result;
use crate::lifecycle::state::ControlMessage;
use crate::watch::watcher::Watcher;
use std::sync::Arc;
use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Installed pause/resume signal handlers.
///
/// Dropping the bridge aborts its listener tasks, so reinstalling
/// against a fresh watcher never leaves stale handlers behind.
pub struct SignalBridge {
    /// The two listener tasks
    handles: Vec<JoinHandle<()>>,
}

impl SignalBridge {
    /// Install SIGUSR1 (pause) and SIGUSR2 (resume) handlers.
    ///
    /// Spawns two listener tasks feeding the control channel; must be
    /// called from within an async runtime.
    pub fn install(
        watcher: Arc<Watcher>,
        tx: mpsc::UnboundedSender<ControlMessage>,
    ) -> Result<Self> {
        let mut pause_signal =
            signal(SignalKind::user_defined1()).map_err(crate::core::Error::Io)?;
        let mut resume_signal =
            signal(SignalKind::user_defined2()).map_err(crate::core::Error::Io)?;

        let pause_watcher = Arc::clone(&watcher);
        let pause_tx = tx.clone();
        let pause_task = tokio::spawn(async move {
            while pause_signal.recv().await.is_some() {
                if let Some(message) = Self::on_pause_signal(&pause_watcher) {
                    if pause_tx.send(message).is_err() {
                        break;
                    }
                }
            }
        });

        let resume_task = tokio::spawn(async move {
            while resume_signal.recv().await.is_some() {
                if let Some(message) = Self::on_resume_signal(&watcher) {
                    if tx.send(message).is_err() {
                        break;
                    }
                }
            }
        });

        tracing::debug!("signal bridge installed");
        Ok(Self {
            handles: vec![pause_task, resume_task],
        })
    }

    /// React to the pause signal: a message only when not yet paused.
    fn on_pause_signal(watcher: &Watcher) -> Option<ControlMessage> {
        if watcher.paused() {
            None
        } else {
            Some(ControlMessage::Pause)
        }
    }

    /// React to the resume signal: a message only when paused.
    fn on_resume_signal(watcher: &Watcher) -> Option<ControlMessage> {
        if watcher.paused() {
            Some(ControlMessage::Resume)
        } else {
            None
        }
    }
}

impl Drop for SignalBridge {
    fn drop(&mut self) {
        for handle in &self.handles {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn watcher() -> Watcher {
        let dir = tempfile::tempdir().unwrap();
        Watcher::new(dir.path()).unwrap()
    }

    #[test]
    fn test_pause_signal_guarded_by_observed_state() {
        let watcher = watcher();

        assert_eq!(
            SignalBridge::on_pause_signal(&watcher),
            Some(ControlMessage::Pause)
        );

        watcher.toggle_pause();
        assert_eq!(SignalBridge::on_pause_signal(&watcher), None);
    }

    #[test]
    fn test_resume_signal_guarded_by_observed_state() {
        let watcher = watcher();

        assert_eq!(SignalBridge::on_resume_signal(&watcher), None);

        watcher.toggle_pause();
        assert_eq!(
            SignalBridge::on_resume_signal(&watcher),
            Some(ControlMessage::Resume)
        );
    }

    #[tokio::test]
    async fn test_install_and_reinstall() {
        let (tx, _rx) = mpsc::unbounded_channel();

        let bridge = SignalBridge::install(Arc::new(watcher()), tx.clone()).unwrap();
        drop(bridge);

        let bridge = SignalBridge::install(Arc::new(watcher()), tx).unwrap();
        drop(bridge);
    }
}
