//! Core shortcut types: key normalization, canonical modifier sets and definitions.
//!
//! This module provides:
//! - `normalize_key` - Raw key identifier to canonical lowercase name
//! - `ModifierSet` - Sorted, deduplicated modifier list (order independent)
//! - `ShortcutDefinition` - Chord or sequence, normalized once at construction
//! - `ShortcutSpec` - An action id with its ordered definitions
//! - `KeyInput` - A single keydown as delivered by the host

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Normalize a raw key identifier to its canonical lowercase name.
///
/// Known special keys map to fixed tokens; everything else is lowercased.
/// Never fails: unmapped keys simply fall through.
pub fn normalize_key(key: &str) -> String {
    match key {
        " " => "space",
        "ArrowUp" => "arrowup",
        "ArrowDown" => "arrowdown",
        "ArrowLeft" => "arrowleft",
        "ArrowRight" => "arrowright",
        "Escape" => "escape",
        "Enter" => "enter",
        "Tab" => "tab",
        "Backspace" => "backspace",
        "Delete" => "delete",
        _ => return key.to_lowercase(),
    }
    .to_string()
}

/// Whether an element with this tag / contenteditable attribute accepts typing.
///
/// Hosts that observe DOM-like targets can use this to fill
/// [`KeyInput::target_is_editable`].
pub fn is_editable_target(tag_name: &str, content_editable: Option<&str>) -> bool {
    let tag = tag_name.to_lowercase();
    tag == "input" || tag == "textarea" || content_editable == Some("true")
}

/// A single modifier key.
///
/// Variant order is the canonical (alphabetical) order. Tokens that are not one of the
/// four known modifiers are kept lowercased in `Other` and sort last, so a definition
/// that mentions them never matches a real event.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    Alt,
    Ctrl,
    Meta,
    Shift,
    Other(String),
}

impl Modifier {
    /// Parse a configuration token, accepting the usual aliases.
    pub fn parse(token: &str) -> Self {
        let lower = token.trim().to_lowercase();
        match lower.as_str() {
            "alt" | "opt" | "option" => Self::Alt,
            "ctrl" | "control" => Self::Ctrl,
            "meta" | "cmd" | "command" | "super" => Self::Meta,
            "shift" => Self::Shift,
            _ => Self::Other(lower),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Alt => "alt",
            Self::Ctrl => "ctrl",
            Self::Meta => "meta",
            Self::Shift => "shift",
            Self::Other(name) => name,
        }
    }

    fn display_name(&self) -> String {
        match self {
            Self::Alt => "Alt".to_string(),
            Self::Ctrl => "Ctrl".to_string(),
            Self::Meta => "Meta".to_string(),
            Self::Shift => "Shift".to_string(),
            Self::Other(name) => name.clone(),
        }
    }
}

/// Modifier key flags as reported by the input source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModifierFlags {
    #[serde(default)]
    pub ctrl: bool,
    #[serde(default)]
    pub shift: bool,
    #[serde(default)]
    pub alt: bool,
    #[serde(default)]
    pub meta: bool,
}

impl ModifierFlags {
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Default::default()
        }
    }

    pub fn any(&self) -> bool {
        self.ctrl || self.shift || self.alt || self.meta
    }
}

/// Canonical, order-independent set of modifiers.
///
/// Always sorted and deduplicated, so two sets built from the same modifiers in any
/// order compare equal element by element.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ModifierSet(SmallVec<[Modifier; 4]>);

impl ModifierSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the canonical set of modifiers active in an event.
    pub fn from_flags(flags: ModifierFlags) -> Self {
        let mut set = SmallVec::new();
        if flags.alt {
            set.push(Modifier::Alt);
        }
        if flags.ctrl {
            set.push(Modifier::Ctrl);
        }
        if flags.meta {
            set.push(Modifier::Meta);
        }
        if flags.shift {
            set.push(Modifier::Shift);
        }
        Self(set)
    }

    /// Canonicalize a definition-side list of modifier names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set: SmallVec<[Modifier; 4]> = names
            .into_iter()
            .map(|name| Modifier::parse(name.as_ref()))
            .collect();
        set.sort();
        set.dedup();
        Self(set)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modifier> {
        self.0.iter()
    }

    pub fn contains(&self, modifier: &Modifier) -> bool {
        self.0.contains(modifier)
    }

    /// Human readable form, e.g. `Ctrl+Shift`.
    pub fn display(&self) -> String {
        self.0
            .iter()
            .map(Modifier::display_name)
            .collect::<Vec<_>>()
            .join("+")
    }
}

/// A single way to trigger an action.
///
/// Keys are normalized and modifier sets canonicalized when the definition is built,
/// never per event.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ShortcutDefinition {
    /// One keypress with an exact set of held modifiers.
    Chord { key: String, modifiers: ModifierSet },
    /// An ordered series of keypresses inside the debounce window.
    Sequence { keys: Vec<String> },
}

impl ShortcutDefinition {
    pub fn chord<I, S>(key: &str, modifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Chord {
            key: normalize_key(key),
            modifiers: ModifierSet::from_names(modifiers),
        }
    }

    pub fn sequence<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Sequence {
            keys: keys.into_iter().map(|k| normalize_key(k.as_ref())).collect(),
        }
    }

    pub fn is_chord(&self) -> bool {
        matches!(self, Self::Chord { .. })
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Self::Sequence { .. })
    }

    /// Display form for help listings: `Ctrl+S` or `g g`.
    pub fn display(&self) -> String {
        match self {
            Self::Chord { key, modifiers } => {
                let key = key_display_text(key);
                if modifiers.is_empty() {
                    key
                } else {
                    format!("{}+{}", modifiers.display(), key)
                }
            }
            Self::Sequence { keys } => keys
                .iter()
                .map(|k| key_display_text(k))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

impl fmt::Display for ShortcutDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

fn key_display_text(key: &str) -> String {
    match key {
        "space" => "Space",
        "arrowup" => "Up",
        "arrowdown" => "Down",
        "arrowleft" => "Left",
        "arrowright" => "Right",
        "escape" => "Esc",
        "enter" => "Enter",
        "tab" => "Tab",
        "backspace" => "Backspace",
        "delete" => "Delete",
        k if k.chars().count() == 1 => return k.to_string(),
        k => return k.to_uppercase(),
    }
    .to_string()
}

/// One configured action and the definitions that trigger it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShortcutSpec {
    pub action_id: String,
    pub definitions: Vec<ShortcutDefinition>,
}

impl ShortcutSpec {
    pub fn new(action_id: impl Into<String>, definitions: Vec<ShortcutDefinition>) -> Self {
        Self {
            action_id: action_id.into(),
            definitions,
        }
    }
}

/// A keydown as handed to the engine by the input source.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyInput {
    pub key: String,
    #[serde(default, alias = "modifierFlags")]
    pub modifiers: ModifierFlags,
    #[serde(default)]
    pub target_is_editable: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    pub fn with_modifiers(mut self, modifiers: ModifierFlags) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn editable(mut self) -> Self {
        self.target_is_editable = true;
        self
    }
}
