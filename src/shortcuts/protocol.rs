//! Shortcut configuration payload decoding.
//!
//! # Format
//!
//! ```json
//! {"shortcuts": [
//!   {"action_id": "save", "shortcuts": [{"type": "chord", "key": "s", "modifiers": ["ctrl"]}]},
//!   {"action_id": "top", "shortcuts": [{"type": "sequence", "keys": ["g", "g"]}]}
//! ]}
//! ```
//!
//! A bare array of spec objects is accepted too. Decoding never fails as a whole:
//! entries without a string `action_id` are dropped, a missing definition list counts
//! as zero definitions, and unknown or malformed definitions are skipped.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::types::{ShortcutDefinition, ShortcutSpec};

/// One definition as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum WireDefinition {
    Chord {
        key: String,
        /// Absent and `null` both mean no modifiers.
        #[serde(default)]
        modifiers: Option<Vec<String>>,
    },
    Sequence {
        keys: Vec<String>,
    },
    /// Any other `type` value. Ignored.
    #[serde(other)]
    Unknown,
}

impl WireDefinition {
    /// Convert to a normalized definition, `None` for unknown or unusable entries.
    pub fn into_definition(self) -> Option<ShortcutDefinition> {
        match self {
            Self::Chord { key, modifiers } if !key.is_empty() => {
                Some(ShortcutDefinition::chord(&key, modifiers.unwrap_or_default()))
            }
            Self::Sequence { keys } if !keys.is_empty() => {
                Some(ShortcutDefinition::sequence(keys))
            }
            _ => None,
        }
    }
}

/// Decode a configuration payload into specs, skipping whatever is malformed.
pub fn parse_shortcut_config(payload: &Value) -> Vec<ShortcutSpec> {
    let entries: &[Value] = match payload {
        Value::Array(entries) => entries.as_slice(),
        Value::Object(map) => match map.get("shortcuts") {
            Some(Value::Array(entries)) => entries.as_slice(),
            Some(Value::Null) | None => &[],
            Some(other) => {
                warn!(payload = %other, "Shortcut config 'shortcuts' is not a list, ignoring");
                &[]
            }
        },
        Value::Null => &[],
        other => {
            warn!(payload = %other, "Unexpected shortcut config payload, ignoring");
            &[]
        }
    };

    entries.iter().filter_map(parse_spec).collect()
}

/// Decode a configuration payload from its JSON text.
pub fn parse_shortcut_config_str(json: &str) -> serde_json::Result<Vec<ShortcutSpec>> {
    let payload: Value = serde_json::from_str(json)?;
    Ok(parse_shortcut_config(&payload))
}

fn parse_spec(entry: &Value) -> Option<ShortcutSpec> {
    let Some(action_id) = entry.get("action_id").and_then(Value::as_str) else {
        warn!(entry = %entry, "Shortcut spec without a string action_id, skipping");
        return None;
    };

    let definitions = match entry.get("shortcuts") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| parse_definition(action_id, item))
            .collect(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => {
            warn!(action_id, value = %other, "Shortcut definitions are not a list, treating as empty");
            Vec::new()
        }
    };

    Some(ShortcutSpec::new(action_id, definitions))
}

fn parse_definition(action_id: &str, item: &Value) -> Option<ShortcutDefinition> {
    match WireDefinition::deserialize(item) {
        Ok(WireDefinition::Unknown) => {
            warn!(action_id, definition = %item, "Unknown shortcut type, skipping");
            None
        }
        Ok(wire) => {
            let definition = wire.into_definition();
            if definition.is_none() {
                warn!(action_id, definition = %item, "Empty shortcut definition, skipping");
            }
            definition
        }
        Err(e) => {
            warn!(action_id, error = %e, definition = %item, "Malformed shortcut definition, skipping");
            None
        }
    }
}
