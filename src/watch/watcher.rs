//! Filesystem watcher handle.
//!
//! Wraps a notify watcher bound to a root directory and forwards raw
//! events into a channel consumed by the supervisor's run loop. The
//! paused flag carries its own synchronization so pause toggles never
//! contend with registry mutation.

use crate::core::Result;
use notify::{RecommendedWatcher, RecursiveMode, Watcher as _};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Raw events as delivered by the notify backend.
pub type RawEvent = notify::Result<notify::Event>;

/// Watcher bound to a configured root directory.
pub struct Watcher {
    /// Watched root directory
    root: PathBuf,
    /// Event suppression flag, toggled by pause/resume
    paused: AtomicBool,
    /// Cooperative stop flag, observed between events
    stopped: AtomicBool,
    /// Whether the root watch has been registered
    started: AtomicBool,
    /// The notify backend; dropped on stop
    inner: Mutex<Option<RecommendedWatcher>>,
    /// Receiver half handed to the run loop
    events: Mutex<Option<mpsc::UnboundedReceiver<RawEvent>>>,
}

impl Watcher {
    /// Create a watcher bound to a root directory.
    ///
    /// The backend starts delivering only after [`start`](Self::start)
    /// registers the root.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let backend = notify::recommended_watcher(move |raw: RawEvent| {
            let _ = tx.send(raw);
        })?;

        Ok(Self {
            root: root.into(),
            paused: AtomicBool::new(false),
            stopped: AtomicBool::new(false),
            started: AtomicBool::new(false),
            inner: Mutex::new(Some(backend)),
            events: Mutex::new(Some(rx)),
        })
    }

    /// Register the recursive watch on the root directory.
    pub fn start(&self) -> Result<()> {
        let mut inner = self.inner.lock().unwrap();
        match inner.as_mut() {
            Some(backend) => {
                backend.watch(&self.root, RecursiveMode::Recursive)?;
                self.started.store(true, Ordering::SeqCst);
                tracing::info!(root = %self.root.display(), "watching");
                Ok(())
            }
            None => Err(crate::core::Error::Watch(
                "watcher has already been stopped".to_string(),
            )),
        }
    }

    /// Stop watching.
    ///
    /// Cooperative: sets the stop flag and drops the backend; the run
    /// loop observes the flag between events.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        self.inner.lock().unwrap().take();
    }

    /// Whether [`stop`](Self::stop) has been requested.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }

    /// Whether the root watch has been registered.
    pub fn is_started(&self) -> bool {
        self.started.load(Ordering::SeqCst)
    }

    /// Whether event delivery is currently suppressed.
    pub fn paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Flip the paused flag, returning the new state.
    pub fn toggle_pause(&self) -> bool {
        !self.paused.fetch_xor(true, Ordering::SeqCst)
    }

    /// The configured root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Take the event receiver; the run loop calls this exactly once.
    pub fn take_events(&self) -> Option<mpsc::UnboundedReceiver<RawEvent>> {
        self.events.lock().unwrap().take()
    }
}
