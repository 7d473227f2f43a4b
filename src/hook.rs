//! Lifecycle glue between a [`ShortcutEngine`] and the host that owns the input source.
//!
//! A hook is either mounted (key listener and config subscription both held) or not
//! (neither held). Stopping cancels any pending sequence timer.

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{info, warn};

use crate::engine::{MatchOutcome, ShortcutEngine};
use crate::error::{ResultExt, ShortcutError};
use crate::shortcuts::{parse_shortcut_config, KeyInput};

/// Identifies a listener or subscription registered with an [`InputHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Called for every keydown. The returned outcome tells the host whether to suppress the
/// event.
pub type KeyListener = Box<dyn FnMut(&KeyInput) -> MatchOutcome + Send>;

/// Called with each configuration payload pushed by the host.
pub type ConfigListener = Box<dyn FnMut(&Value) + Send>;

/// The environment that delivers key events and configuration payloads.
pub trait InputHost {
    fn add_key_listener(&mut self, listener: KeyListener) -> anyhow::Result<ListenerId>;
    fn remove_key_listener(&mut self, id: ListenerId) -> anyhow::Result<()>;
    fn subscribe_config(&mut self, listener: ConfigListener) -> anyhow::Result<ListenerId>;
    fn unsubscribe_config(&mut self, id: ListenerId) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Copy)]
struct Mounted {
    key_listener: ListenerId,
    config_subscription: ListenerId,
}

/// Owns the host registration for one engine.
pub struct ShortcutHook<H: InputHost> {
    host: H,
    engine: Arc<Mutex<ShortcutEngine>>,
    mounted: Option<Mounted>,
}

impl<H: InputHost> ShortcutHook<H> {
    pub fn new(host: H, engine: ShortcutEngine) -> Self {
        Self {
            host,
            engine: Arc::new(Mutex::new(engine)),
            mounted: None,
        }
    }

    /// Register the key listener and the config subscription.
    ///
    /// Acquires both or neither: if the subscription fails, the key listener is removed
    /// again before the error is returned.
    pub fn start(&mut self) -> crate::error::Result<()> {
        if self.mounted.is_some() {
            return Err(ShortcutError::AlreadyStarted);
        }

        let engine = Arc::clone(&self.engine);
        let key_listener = self
            .host
            .add_key_listener(Box::new(move |input: &KeyInput| engine.lock().handle(input)))
            .map_err(|source| ShortcutError::Subscription {
                what: "keyboard input",
                source,
            })?;

        let registry = self.engine.lock().registry().clone();
        let subscription = self.host.subscribe_config(Box::new(move |payload: &Value| {
            let specs = parse_shortcut_config(payload);
            info!(
                event_type = "shortcuts_config",
                count = specs.len(),
                "Shortcut configuration received"
            );
            registry.replace(specs);
        }));

        let config_subscription = match subscription {
            Ok(id) => id,
            Err(source) => {
                warn!(error = %source, "Config subscription failed, removing key listener");
                self.host.remove_key_listener(key_listener).log_err();
                return Err(ShortcutError::Subscription {
                    what: "shortcut configuration",
                    source,
                });
            }
        };

        self.mounted = Some(Mounted {
            key_listener,
            config_subscription,
        });
        info!(event_type = "hook_lifecycle", action = "started", "Shortcut hook started");
        Ok(())
    }

    /// Release both registrations and cancel the pending sequence timer. No-op when not
    /// started.
    pub fn stop(&mut self) {
        let Some(mounted) = self.mounted.take() else {
            return;
        };

        self.host.remove_key_listener(mounted.key_listener).log_err();
        self.host
            .unsubscribe_config(mounted.config_subscription)
            .log_err();
        self.engine.lock().reset();
        info!(event_type = "hook_lifecycle", action = "stopped", "Shortcut hook stopped");
    }

    pub fn is_started(&self) -> bool {
        self.mounted.is_some()
    }

    /// Shared handle to the engine, e.g. for inspecting pending keys.
    pub fn engine(&self) -> Arc<Mutex<ShortcutEngine>> {
        Arc::clone(&self.engine)
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

impl<H: InputHost> Drop for ShortcutHook<H> {
    fn drop(&mut self) {
        self.stop();
    }
}
