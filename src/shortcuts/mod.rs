//! Keyboard shortcut matching.
//!
//! This module provides:
//! - Key normalization and canonical modifier sets
//! - Stateless chord matching
//! - Stateful sequence matching with a debounce window
//! - An atomically replaceable registry of shortcut specs
//! - Tolerant decoding of the configuration payload
//!
//! # Matching order
//!
//! Chords are tried before sequences. Within each kind, specs are visited in
//! registration order and the first matching definition wins:
//! - A chord hit consumes the event; the key never reaches the sequence buffer
//! - A sequence attempt always appends the key to the buffer, hit or miss
//!
//! # Example
//!
//! ```ignore
//! use shortcut_engine::shortcuts::{ShortcutDefinition, ShortcutRegistry, ShortcutSpec};
//!
//! let registry = ShortcutRegistry::new();
//! registry.replace(vec![
//!     ShortcutSpec::new("save", vec![ShortcutDefinition::chord("s", ["ctrl"])]),
//!     ShortcutSpec::new("top", vec![ShortcutDefinition::sequence(["g", "g"])]),
//! ]);
//! ```

pub mod chord;
mod protocol;
mod registry;
pub mod sequence;
mod types;

#[cfg(test)]
#[path = "types_tests.rs"]
mod types_tests;

#[cfg(test)]
#[path = "registry_tests.rs"]
mod registry_tests;

pub use protocol::{parse_shortcut_config, parse_shortcut_config_str, WireDefinition};
pub use registry::ShortcutRegistry;
pub use sequence::SequenceMatcher;
pub use types::{
    is_editable_target, normalize_key, KeyInput, Modifier, ModifierFlags, ModifierSet,
    ShortcutDefinition, ShortcutSpec,
};
