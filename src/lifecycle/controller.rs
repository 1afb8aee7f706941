//! Lifecycle controller.
//!
//! Owns the registry (and the advisory lock protecting it), the watcher
//! handle, the interactive console and the notifier, and drives the
//! run loop consuming change events and control messages. Pause/resume
//! are guarded toggles of the watcher's paused flag and are applied at
//! the run loop's single decision point, so duplicate requests are
//! no-ops rather than errors.

use crate::config::evaluator::{ConfigEvaluator, NullEvaluator};
use crate::console::interactor::Console;
use crate::core::logging;
use crate::core::{Error, Result, SessionOptions};
use crate::lifecycle::runner::Runner;
#[cfg(unix)]
use crate::lifecycle::signal::SignalBridge;
use crate::lifecycle::state::{ControlMessage, LifecycleState};
use crate::notifier::facade::{resolve_notify_state, Notifier, NOTIFY_ENV};
use crate::plugin::resolver::PluginResolver;
use crate::registry::registry::Registry;
use crate::watch::event::ChangeEvent;
use crate::watch::watcher::{RawEvent, Watcher};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;

/// Host process controller for the plugin lifecycle.
pub struct Supervisor {
    /// The registry and its advisory mutation lock
    registry: Arc<Mutex<Registry>>,
    /// Factory table used to resolve plugin identifiers
    resolver: Arc<PluginResolver>,
    /// Configuration evaluation collaborator
    evaluator: Box<dyn ConfigEvaluator>,
    /// Options captured at setup
    options: SessionOptions,
    /// Watcher handle, present after setup
    watcher: Option<Arc<Watcher>>,
    /// Interactive console, absent when interactions are disabled
    console: Option<Console>,
    /// Notification switch
    notifier: Notifier,
    /// Installed signal handlers, replaced on every setup
    #[cfg(unix)]
    signal_bridge: Option<SignalBridge>,
    /// Sender half of the control channel
    control_tx: mpsc::UnboundedSender<ControlMessage>,
    /// Receiver half, taken by the run loop while active
    control_rx: Option<mpsc::UnboundedReceiver<ControlMessage>>,
}

impl Supervisor {
    /// Create a supervisor around a resolver, with an empty
    /// configuration.
    pub fn new(resolver: PluginResolver) -> Self {
        let (control_tx, control_rx) = mpsc::unbounded_channel();
        Self {
            registry: Arc::new(Mutex::new(Registry::new())),
            resolver: Arc::new(resolver),
            evaluator: Box::new(NullEvaluator),
            options: SessionOptions::default(),
            watcher: None,
            console: None,
            notifier: Notifier::new(),
            #[cfg(unix)]
            signal_bridge: None,
            control_tx,
            control_rx: Some(control_rx),
        }
    }

    /// Set the configuration evaluator.
    pub fn with_evaluator(mut self, evaluator: impl ConfigEvaluator + 'static) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    /// Shared handle to the registry.
    pub fn registry(&self) -> Arc<Mutex<Registry>> {
        Arc::clone(&self.registry)
    }

    /// A sender for injecting control messages.
    pub fn control_handle(&self) -> mpsc::UnboundedSender<ControlMessage> {
        self.control_tx.clone()
    }

    /// The notification switch.
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// The options captured by the last setup.
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Current lifecycle state, derived from the watcher.
    pub fn state(&self) -> LifecycleState {
        match &self.watcher {
            Some(watcher) if watcher.is_started() && !watcher.is_stopped() => {
                if watcher.paused() {
                    LifecycleState::Paused
                } else {
                    LifecycleState::Running
                }
            }
            _ => LifecycleState::Stopped,
        }
    }

    /// Idempotently reinitialize all process-wide state.
    ///
    /// Resets groups and plugins, binds a fresh watcher to the watch
    /// root, evaluates the configuration (resolution failures abort),
    /// resolves the effective notification state, and brings up the
    /// console and signal handlers unless disabled. A configuration
    /// that registers zero plugins is reported and tolerated.
    pub fn setup(&mut self, options: SessionOptions) -> Result<()> {
        logging::init(options.verbose);

        {
            let mut registry = self.lock_registry();
            registry.reset_groups();
            registry.clear_plugins();
        }

        let root = match &options.watch_root {
            Some(root) => root.clone(),
            None => std::env::current_dir()?,
        };
        let watcher = Arc::new(Watcher::new(root)?);
        self.watcher = Some(Arc::clone(&watcher));

        {
            let mut registry = self.lock_registry();
            self.evaluator.evaluate(&self.resolver, &mut registry)?;
            if registry.plugins().is_empty() {
                tracing::warn!("configuration registered no plugins");
            }
        }

        let env_value = std::env::var(NOTIFY_ENV).ok();
        if resolve_notify_state(options.notify, env_value.as_deref()) {
            self.notifier.turn_on();
        } else {
            self.notifier.turn_off();
        }

        if options.no_interactions {
            if let Some(console) = &self.console {
                console.stop();
            }
            self.console = None;
        } else {
            match &self.console {
                Some(console) => console.start(),
                None => {
                    let console = Console::fabricate(self.control_tx.clone());
                    console.start();
                    self.console = Some(console);
                }
            }
        }

        #[cfg(unix)]
        {
            self.signal_bridge = None;
            if !options.no_signals {
                if tokio::runtime::Handle::try_current().is_ok() {
                    self.signal_bridge =
                        Some(SignalBridge::install(watcher, self.control_tx.clone())?);
                } else {
                    tracing::debug!("signal bridge skipped, no async runtime");
                }
            }
        }

        self.options = options;
        tracing::debug!("setup complete");
        Ok(())
    }

    /// Set up and run until the watcher shuts down.
    pub async fn start(&mut self, options: SessionOptions) -> Result<()> {
        self.setup(options)?;
        self.run().await
    }

    /// Transition `Running -> Paused`; a no-op when already paused.
    pub fn pause(&self) {
        if self.state() != LifecycleState::Running {
            return;
        }
        if let Some(watcher) = &self.watcher {
            watcher.toggle_pause();
            tracing::info!("change dispatch paused");
        }
    }

    /// Transition `Paused -> Running`; a no-op when already running.
    pub fn resume(&self) {
        if self.state() != LifecycleState::Paused {
            return;
        }
        if let Some(watcher) = &self.watcher {
            watcher.toggle_pause();
            tracing::info!("change dispatch resumed");
        }
    }

    /// Run a registry mutation under the advisory lock with the console
    /// held off.
    ///
    /// The console restarts and the lock releases on every exit path,
    /// including an error or panic inside the block; concurrently
    /// invoked blocks are strictly serialized.
    pub fn within_preserved_state<T>(
        &self,
        f: impl FnOnce(&mut Registry) -> Result<T>,
    ) -> Result<T> {
        let mut registry = self.lock_registry();
        if let Some(console) = &self.console {
            console.stop();
        }
        let _restart = ConsoleRestart(self.console.as_ref());
        f(&mut registry)
    }

    /// Re-run plugin reload callbacks as a protected mutation.
    pub fn reload(&self) -> Result<()> {
        tracing::info!("reloading");
        self.within_preserved_state(|registry| {
            for (name, result) in Runner::reload_all(registry) {
                if let Err(error) = result {
                    tracing::error!(plugin = %name, %error, "reload callback failed");
                }
            }
            Ok(())
        })
    }

    /// Request shutdown of the run loop.
    pub fn stop(&self) {
        if let Some(watcher) = &self.watcher {
            watcher.stop();
        }
        let _ = self.control_tx.send(ControlMessage::Stop);
    }

    /// The blocking event loop: the single decision point consuming
    /// change events and control messages.
    async fn run(&mut self) -> Result<()> {
        let watcher = self
            .watcher
            .clone()
            .ok_or(Error::NotConfigured("start requires a watcher"))?;
        watcher.start()?;
        let mut events = watcher
            .take_events()
            .ok_or_else(|| Error::Watch("event channel already taken".to_string()))?;
        let mut control = self
            .control_rx
            .take()
            .ok_or(Error::NotConfigured("run loop already active"))?;

        {
            let mut registry = self.lock_registry();
            for (name, result) in Runner::start_all(&mut registry) {
                if let Err(error) = result {
                    tracing::error!(plugin = %name, %error, "start callback failed");
                }
            }
        }
        tracing::info!(root = %watcher.root().display(), "running");

        loop {
            if watcher.is_stopped() {
                break;
            }

            tokio::select! {
                message = control.recv() => match message {
                    Some(ControlMessage::Pause) => self.pause(),
                    Some(ControlMessage::Resume) => self.resume(),
                    Some(ControlMessage::Reload) => {
                        if let Err(error) = self.reload() {
                            tracing::error!(%error, "reload failed");
                        }
                    }
                    Some(ControlMessage::Stop) | None => break,
                },
                raw = events.recv() => match raw {
                    Some(raw) => self.handle_raw_event(&watcher, raw),
                    None => break,
                },
            }
        }

        watcher.stop();
        {
            let mut registry = self.lock_registry();
            for (name, result) in Runner::stop_all(&mut registry) {
                if let Err(error) = result {
                    tracing::error!(plugin = %name, %error, "stop callback failed");
                }
            }
        }
        if let Some(console) = &self.console {
            console.stop();
        }
        self.control_rx = Some(control);
        tracing::info!("stopped");
        Ok(())
    }

    /// Fold and dispatch one raw watcher event.
    fn handle_raw_event(&self, watcher: &Watcher, raw: RawEvent) {
        let event = match raw {
            Ok(event) => ChangeEvent::from_notify(&event),
            Err(error) => {
                tracing::warn!(%error, "watch backend error");
                return;
            }
        };
        let Some(event) = event else { return };

        if watcher.paused() {
            tracing::debug!("paused, event discarded");
            return;
        }

        let mut registry = self.lock_registry();
        for (name, result) in Runner::dispatch(&mut registry, &event) {
            if let Err(error) = result {
                tracing::error!(plugin = %name, %error, "reaction failed");
                self.notifier.notify(&name, &error.to_string());
            }
        }
    }

    fn lock_registry(&self) -> MutexGuard<'_, Registry> {
        match self.registry.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// Restarts the console when dropped, so protected mutations cannot
/// leave it stopped.
struct ConsoleRestart<'a>(Option<&'a Console>);

impl Drop for ConsoleRestart<'_> {
    fn drop(&mut self) {
        if let Some(console) = self.0 {
            console.start();
        }
    }
}
