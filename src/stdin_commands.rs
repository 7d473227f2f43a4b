//! JSONL input host: drives the shortcut engine from stdin.
//!
//! This is primarily used for testing and automation.
//!
//! # Protocol
//!
//! Commands are sent as JSON objects, one per line (JSONL format):
//!
//! ```json
//! {"type": "config", "shortcuts": [{"action_id": "save", "shortcuts": [{"type": "chord", "key": "s", "modifiers": ["ctrl"]}]}]}
//! {"type": "keydown", "key": "s", "modifiers": {"ctrl": true}}
//! {"type": "keydown", "key": "g", "targetIsEditable": true}
//! ```
//!
//! # Example Usage
//!
//! ```bash
//! printf '%s\n' \
//!   '{"type": "config", "shortcuts": [{"action_id": "top", "shortcuts": [{"type": "sequence", "keys": ["g", "g"]}]}]}' \
//!   '{"type": "keydown", "key": "g"}' \
//!   '{"type": "keydown", "key": "g"}' | ./shortcut-engine
//! ```

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::engine::MatchOutcome;
use crate::hook::{ConfigListener, InputHost, KeyListener, ListenerId};
use crate::shortcuts::KeyInput;

/// Channel capacity for parsed stdin commands.
const COMMAND_CHANNEL_CAPACITY: usize = 100;

/// Commands accepted on stdin.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StdinCommand {
    /// Replace the shortcut configuration.
    /// shortcuts: list of `{action_id, shortcuts: [...]}` entries
    Config {
        #[serde(default)]
        shortcuts: Value,
    },
    /// Deliver one keydown event.
    Keydown(KeyInput),
}

/// [`InputHost`] fed by [`StdinCommand`]s. Holds at most one key listener and one config
/// subscription.
#[derive(Default)]
pub struct StdinHost {
    next_id: u64,
    key_listener: Option<(ListenerId, KeyListener)>,
    config_listener: Option<(ListenerId, ConfigListener)>,
}

impl StdinHost {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> ListenerId {
        self.next_id += 1;
        ListenerId(self.next_id)
    }

    /// Route one command to the registered listeners.
    ///
    /// Returns the outcome for keydowns, `None` for configuration updates.
    pub fn dispatch(&mut self, command: StdinCommand) -> Option<MatchOutcome> {
        match command {
            StdinCommand::Config { shortcuts } => {
                match self.config_listener.as_mut() {
                    Some((_, listener)) => listener(&shortcuts),
                    None => warn!("Config received with no subscriber, dropping"),
                }
                None
            }
            StdinCommand::Keydown(input) => {
                let outcome = match self.key_listener.as_mut() {
                    Some((_, listener)) => listener(&input),
                    None => MatchOutcome::PassThrough,
                };
                Some(outcome)
            }
        }
    }

    pub fn has_key_listener(&self) -> bool {
        self.key_listener.is_some()
    }

    pub fn has_config_subscriber(&self) -> bool {
        self.config_listener.is_some()
    }
}

impl InputHost for StdinHost {
    fn add_key_listener(&mut self, listener: KeyListener) -> anyhow::Result<ListenerId> {
        if self.key_listener.is_some() {
            anyhow::bail!("stdin host already has a key listener");
        }
        let id = self.next_id();
        self.key_listener = Some((id, listener));
        Ok(id)
    }

    fn remove_key_listener(&mut self, id: ListenerId) -> anyhow::Result<()> {
        match &self.key_listener {
            Some((current, _)) if *current == id => {
                self.key_listener = None;
                Ok(())
            }
            _ => anyhow::bail!("no key listener registered as {:?}", id),
        }
    }

    fn subscribe_config(&mut self, listener: ConfigListener) -> anyhow::Result<ListenerId> {
        if self.config_listener.is_some() {
            anyhow::bail!("stdin host already has a config subscriber");
        }
        let id = self.next_id();
        self.config_listener = Some((id, listener));
        Ok(id)
    }

    fn unsubscribe_config(&mut self, id: ListenerId) -> anyhow::Result<()> {
        match &self.config_listener {
            Some((current, _)) if *current == id => {
                self.config_listener = None;
                Ok(())
            }
            _ => anyhow::bail!("no config subscription registered as {:?}", id),
        }
    }
}

/// Parse one stdin line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> serde_json::Result<Option<StdinCommand>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}

/// Start a thread that listens on stdin for JSONL commands.
/// Returns an async_channel::Receiver that can be awaited without polling.
///
/// The channel is bounded; when the receiver is dropped the thread exits.
pub fn start_stdin_listener() -> async_channel::Receiver<StdinCommand> {
    use std::io::BufRead;

    let (tx, rx) = async_channel::bounded(COMMAND_CHANNEL_CAPACITY);

    std::thread::spawn(move || {
        info!(event_type = "stdin", "Command listener started");
        let stdin = std::io::stdin();
        let reader = stdin.lock();

        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!(error = %e, "Error reading stdin");
                    break;
                }
            };
            match parse_command(&line) {
                Ok(Some(command)) => {
                    debug!(command = ?command, "Parsed command");
                    // send_blocking is used since we're in a sync thread
                    if tx.send_blocking(command).is_err() {
                        info!(event_type = "stdin", "Command channel closed, exiting");
                        break;
                    }
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, line = %line, "Failed to parse command"),
            }
        }
        info!(event_type = "stdin", "Command listener exiting");
    });

    rx
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shortcuts::ModifierFlags;
    use serde_json::json;

    #[test]
    fn test_config_command_deserialization() {
        let json = r#"{"type": "config", "shortcuts": [{"action_id": "save", "shortcuts": []}]}"#;
        let cmd: StdinCommand = serde_json::from_str(json).unwrap();
        match cmd {
            StdinCommand::Config { shortcuts } => {
                assert_eq!(shortcuts, json!([{"action_id": "save", "shortcuts": []}]));
            }
            _ => panic!("Expected Config command"),
        }
    }

    #[test]
    fn test_config_command_without_shortcuts() {
        let cmd: StdinCommand = serde_json::from_str(r#"{"type": "config"}"#).unwrap();
        assert_eq!(cmd, StdinCommand::Config { shortcuts: Value::Null });
    }

    #[test]
    fn test_keydown_command_deserialization() {
        let json = r#"{"type": "keydown", "key": "s", "modifiers": {"ctrl": true}}"#;
        let cmd: StdinCommand = serde_json::from_str(json).unwrap();
        assert_eq!(
            cmd,
            StdinCommand::Keydown(KeyInput::new("s").with_modifiers(ModifierFlags::ctrl()))
        );
    }

    #[test]
    fn test_keydown_editable_target() {
        let json = r#"{"type": "keydown", "key": "g", "targetIsEditable": true}"#;
        match serde_json::from_str::<StdinCommand>(json).unwrap() {
            StdinCommand::Keydown(input) => assert!(input.target_is_editable),
            _ => panic!("Expected Keydown command"),
        }
    }

    #[test]
    fn test_unknown_command_fails() {
        let result = serde_json::from_str::<StdinCommand>(r#"{"type": "unknown"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_keydown_missing_key_fails() {
        let result = serde_json::from_str::<StdinCommand>(r#"{"type": "keydown"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_command_skips_blank_lines() {
        assert!(parse_command("   ").unwrap().is_none());
        assert!(parse_command(r#"{"type": "keydown", "key": "a"}"#)
            .unwrap()
            .is_some());
        assert!(parse_command("not json").is_err());
    }

    #[test]
    fn test_dispatch_without_listeners_passes_through() {
        let mut host = StdinHost::new();
        assert_eq!(
            host.dispatch(StdinCommand::Keydown(KeyInput::new("a"))),
            Some(MatchOutcome::PassThrough)
        );
        assert_eq!(
            host.dispatch(StdinCommand::Config {
                shortcuts: Value::Null
            }),
            None
        );
    }

    #[test]
    fn test_dispatch_routes_to_listeners() {
        let mut host = StdinHost::new();
        host.add_key_listener(Box::new(|input: &KeyInput| {
            MatchOutcome::suppressed(input.key.clone())
        }))
        .unwrap();

        let received = std::sync::Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = std::sync::Arc::clone(&received);
        host.subscribe_config(Box::new(move |payload: &Value| {
            sink.lock().push(payload.clone())
        }))
        .unwrap();

        assert_eq!(
            host.dispatch(StdinCommand::Keydown(KeyInput::new("x"))),
            Some(MatchOutcome::suppressed("x"))
        );
        host.dispatch(StdinCommand::Config {
            shortcuts: json!([]),
        });
        assert_eq!(*received.lock(), vec![json!([])]);
    }

    #[test]
    fn test_single_listener_slots() {
        let mut host = StdinHost::new();
        let id = host
            .add_key_listener(Box::new(|_: &KeyInput| MatchOutcome::PassThrough))
            .unwrap();
        assert!(host
            .add_key_listener(Box::new(|_: &KeyInput| MatchOutcome::PassThrough))
            .is_err());

        host.remove_key_listener(id).unwrap();
        assert!(!host.has_key_listener());
        assert!(host.remove_key_listener(id).is_err());
    }

    #[test]
    fn test_unsubscribe_unknown_id_fails() {
        let mut host = StdinHost::new();
        host.subscribe_config(Box::new(|_: &Value| {})).unwrap();
        assert!(host.unsubscribe_config(ListenerId(99)).is_err());
        assert!(host.has_config_subscriber());
    }
}
