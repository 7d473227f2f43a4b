//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::defaults::*;

/// Engine settings, read from `~/.shortcut-engine/config.json`.
///
/// Every field is optional; the getters apply the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Debounce window for sequences in milliseconds (default: 500)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_timeout_ms: Option<u64>,
    /// Bounded capacity of the notification channel (default: 100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_capacity: Option<usize>,
}

impl EngineConfig {
    /// Returns the sequence debounce window, or DEFAULT_SEQUENCE_TIMEOUT_MS if not configured
    pub fn get_sequence_timeout(&self) -> Duration {
        Duration::from_millis(
            self.sequence_timeout_ms
                .unwrap_or(DEFAULT_SEQUENCE_TIMEOUT_MS),
        )
    }

    /// Returns the notification channel capacity (at least 1)
    pub fn get_notification_capacity(&self) -> usize {
        self.notification_capacity
            .unwrap_or(DEFAULT_NOTIFICATION_CAPACITY)
            .max(1)
    }

    /// Overlay values from `other` that are set.
    pub fn merged_with(mut self, other: EngineConfig) -> Self {
        if other.sequence_timeout_ms.is_some() {
            self.sequence_timeout_ms = other.sequence_timeout_ms;
        }
        if other.notification_capacity.is_some() {
            self.notification_capacity = other.notification_capacity;
        }
        self
    }
}
