//! Interactive operator console.
//!
//! Reads commands from stdin on a dedicated thread and forwards them as
//! control messages. The console is suspended, not killed, while a
//! protected reconfiguration is in flight; a blocked stdin read cannot
//! be interrupted portably, so the reader re-checks the suspend flag
//! before forwarding each line.

use crate::lifecycle::state::ControlMessage;
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use tokio::sync::mpsc;

/// Stdin-driven command console.
pub struct Console {
    /// Suppresses command dispatch while set
    suspended: Arc<AtomicBool>,
    /// Whether the reader thread has been spawned
    spawned: AtomicBool,
    /// Control channel into the run loop
    tx: mpsc::UnboundedSender<ControlMessage>,
}

impl Console {
    /// Fabricate a console wired to the given control channel.
    pub fn fabricate(tx: mpsc::UnboundedSender<ControlMessage>) -> Self {
        Self {
            suspended: Arc::new(AtomicBool::new(true)),
            spawned: AtomicBool::new(false),
            tx,
        }
    }

    /// Start (or resume) command dispatch.
    ///
    /// The reader thread is spawned on first start; later starts only
    /// clear the suspend flag.
    pub fn start(&self) {
        self.suspended.store(false, Ordering::SeqCst);
        if self.spawned.swap(true, Ordering::SeqCst) {
            return;
        }

        let suspended = Arc::clone(&self.suspended);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                if !Self::forward(&line, &suspended, &tx) {
                    break;
                }
            }
        });
    }

    /// Suspend command dispatch.
    pub fn stop(&self) {
        self.suspended.store(true, Ordering::SeqCst);
    }

    /// Whether the console is currently suspended.
    pub fn is_suspended(&self) -> bool {
        self.suspended.load(Ordering::SeqCst)
    }

    /// Forward one input line as a control message.
    ///
    /// Returns `false` when the receiving side is gone and the reader
    /// should exit.
    fn forward(
        line: &str,
        suspended: &AtomicBool,
        tx: &mpsc::UnboundedSender<ControlMessage>,
    ) -> bool {
        if suspended.load(Ordering::SeqCst) {
            return true;
        }

        match ControlMessage::parse(line) {
            Some(message) => tx.send(message).is_ok(),
            None => {
                if !line.trim().is_empty() {
                    tracing::warn!(input = line.trim(), "unknown command");
                }
                true
            }
        }
    }
}
