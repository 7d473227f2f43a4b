//! Shortcut engine: one keydown in, at most one action out.
//!
//! Per event, in order:
//! 1. Editable targets pass through untouched
//! 2. Key and modifiers are normalized
//! 3. Chords are tried; a hit consumes the event (the sequence buffer never sees it)
//! 4. Sequences are tried; the key always lands in the buffer
//!
//! A hit yields [`MatchOutcome::Suppressed`] and sends one [`ShortcutTriggered`] on the
//! notification channel, if one is attached. The host must then prevent default
//! handling and stop propagation of the event.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::{ResultExt, ShortcutError};
use crate::shortcuts::{
    chord, normalize_key, KeyInput, ModifierSet, SequenceMatcher, ShortcutRegistry,
};
use crate::timer::Scheduler;

/// Result of handling one keydown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "camelCase")]
pub enum MatchOutcome {
    /// A shortcut fired; the event should not reach anything else.
    Suppressed { action_id: String },
    /// No shortcut; deliver the event as usual.
    PassThrough,
}

impl MatchOutcome {
    pub fn suppressed(action_id: impl Into<String>) -> Self {
        Self::Suppressed {
            action_id: action_id.into(),
        }
    }

    pub fn is_suppressed(&self) -> bool {
        matches!(self, Self::Suppressed { .. })
    }

    pub fn action_id(&self) -> Option<&str> {
        match self {
            Self::Suppressed { action_id } => Some(action_id),
            Self::PassThrough => None,
        }
    }
}

/// Notification sent to the consumer when a shortcut fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutTriggered {
    pub action_id: String,
}

/// Create the bounded notification channel sized from config.
pub fn notification_channel(
    config: &EngineConfig,
) -> (
    async_channel::Sender<ShortcutTriggered>,
    async_channel::Receiver<ShortcutTriggered>,
) {
    async_channel::bounded(config.get_notification_capacity())
}

/// Matches keydowns against the registry. Owns the sequence buffer and its timer.
#[derive(Debug)]
pub struct ShortcutEngine {
    registry: ShortcutRegistry,
    sequences: SequenceMatcher,
    notifier: Option<async_channel::Sender<ShortcutTriggered>>,
}

impl ShortcutEngine {
    pub fn new(
        registry: ShortcutRegistry,
        scheduler: Arc<dyn Scheduler>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            registry,
            sequences: SequenceMatcher::new(config.get_sequence_timeout(), scheduler),
            notifier: None,
        }
    }

    /// Attach the channel that receives [`ShortcutTriggered`] notifications.
    pub fn with_notifier(mut self, notifier: async_channel::Sender<ShortcutTriggered>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn registry(&self) -> &ShortcutRegistry {
        &self.registry
    }

    /// Handle one keydown.
    pub fn handle(&mut self, input: &KeyInput) -> MatchOutcome {
        if input.target_is_editable {
            return MatchOutcome::PassThrough;
        }

        let key = normalize_key(&input.key);
        let modifiers = ModifierSet::from_flags(input.modifiers);
        let specs = self.registry.current();

        let action_id = match chord::try_match(&key, &modifiers, &specs) {
            Some(action_id) => Some(action_id.to_string()),
            None => self.sequences.try_match(&key, &specs),
        };

        match action_id {
            Some(action_id) => {
                info!(
                    event_type = "shortcut_triggered",
                    action_id = %action_id,
                    key = %key,
                    modifiers = %modifiers.display(),
                    "Shortcut matched"
                );
                self.notify(&action_id).warn_on_err();
                MatchOutcome::Suppressed { action_id }
            }
            None => {
                debug!(key = %key, pending = ?self.sequences.pending_keys(), "No shortcut matched");
                MatchOutcome::PassThrough
            }
        }
    }

    /// Clear the sequence buffer and cancel the debounce timer.
    pub fn reset(&mut self) {
        self.sequences.reset();
    }

    /// Keys typed so far in an in-progress sequence.
    pub fn pending_keys(&self) -> Vec<String> {
        self.sequences.pending_keys()
    }

    pub fn has_pending_timer(&self) -> bool {
        self.sequences.has_pending_timer()
    }

    fn notify(&self, action_id: &str) -> crate::error::Result<()> {
        let Some(notifier) = &self.notifier else {
            return Ok(());
        };
        notifier
            .try_send(ShortcutTriggered {
                action_id: action_id.to_string(),
            })
            .map_err(|e| match e {
                async_channel::TrySendError::Closed(_) => ShortcutError::NotificationClosed,
                async_channel::TrySendError::Full(event) => ShortcutError::NotificationFull {
                    action_id: event.action_id,
                },
            })
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
