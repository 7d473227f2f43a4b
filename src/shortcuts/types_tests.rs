use super::types::*;

// ========================================
// Key normalization
// ========================================

#[test]
fn test_normalize_space() {
    assert_eq!(normalize_key(" "), "space");
}

#[test]
fn test_normalize_special_keys() {
    assert_eq!(normalize_key("ArrowUp"), "arrowup");
    assert_eq!(normalize_key("ArrowDown"), "arrowdown");
    assert_eq!(normalize_key("ArrowLeft"), "arrowleft");
    assert_eq!(normalize_key("ArrowRight"), "arrowright");
    assert_eq!(normalize_key("Escape"), "escape");
    assert_eq!(normalize_key("Enter"), "enter");
    assert_eq!(normalize_key("Tab"), "tab");
    assert_eq!(normalize_key("Backspace"), "backspace");
    assert_eq!(normalize_key("Delete"), "delete");
}

#[test]
fn test_normalize_lowercases_everything_else() {
    assert_eq!(normalize_key("A"), "a");
    assert_eq!(normalize_key("F5"), "f5");
    assert_eq!(normalize_key("PageDown"), "pagedown");
    assert_eq!(normalize_key("?"), "?");
}

#[test]
fn test_normalize_is_idempotent() {
    for raw in [" ", "ArrowUp", "A", "Escape", "Home"] {
        let once = normalize_key(raw);
        assert_eq!(normalize_key(&once), once);
    }
}

// ========================================
// Modifier sets
// ========================================

#[test]
fn test_modifier_order_does_not_matter() {
    let a = ModifierSet::from_names(["ctrl", "shift"]);
    let b = ModifierSet::from_names(["shift", "ctrl"]);
    assert_eq!(a, b);
}

#[test]
fn test_flags_and_names_agree() {
    let from_event = ModifierSet::from_flags(ModifierFlags {
        ctrl: true,
        shift: true,
        ..Default::default()
    });
    let from_config = ModifierSet::from_names(["shift", "ctrl"]);
    assert_eq!(from_event, from_config);
}

#[test]
fn test_canonical_order_is_alphabetical() {
    let set = ModifierSet::from_flags(ModifierFlags {
        ctrl: true,
        shift: true,
        alt: true,
        meta: true,
    });
    let names: Vec<&str> = set.iter().map(Modifier::as_str).collect();
    assert_eq!(names, vec!["alt", "ctrl", "meta", "shift"]);
}

#[test]
fn test_modifier_names_are_deduplicated() {
    let set = ModifierSet::from_names(["ctrl", "Ctrl", "control"]);
    assert_eq!(set.len(), 1);
    assert!(set.contains(&Modifier::Ctrl));
}

#[test]
fn test_modifier_aliases() {
    assert_eq!(Modifier::parse("cmd"), Modifier::Meta);
    assert_eq!(Modifier::parse("Command"), Modifier::Meta);
    assert_eq!(Modifier::parse("option"), Modifier::Alt);
    assert_eq!(Modifier::parse("control"), Modifier::Ctrl);
}

#[test]
fn test_unlisted_aliases_are_not_recognized() {
    for token in ["^", "ctl", "shft", "win", "⌘", "⌥", "⇧"] {
        assert_eq!(Modifier::parse(token), Modifier::Other(token.to_lowercase()));
    }
    let chord = ShortcutDefinition::chord("k", ["win"]);
    assert_ne!(chord, ShortcutDefinition::chord("k", ["meta"]));
}

#[test]
fn test_unknown_modifier_kept_lowercased() {
    let set = ModifierSet::from_names(["Hyper", "ctrl"]);
    let names: Vec<&str> = set.iter().map(Modifier::as_str).collect();
    assert_eq!(names, vec!["ctrl", "hyper"]);
    assert_ne!(set, ModifierSet::from_flags(ModifierFlags::ctrl()));
}

#[test]
fn test_no_flags_is_empty() {
    assert!(ModifierSet::from_flags(ModifierFlags::default()).is_empty());
    assert!(!ModifierFlags::default().any());
}

// ========================================
// Definitions
// ========================================

#[test]
fn test_chord_is_normalized_on_construction() {
    let chord = ShortcutDefinition::chord("Escape", ["Shift", "Ctrl"]);
    assert_eq!(
        chord,
        ShortcutDefinition::Chord {
            key: "escape".to_string(),
            modifiers: ModifierSet::from_names(["ctrl", "shift"]),
        }
    );
}

#[test]
fn test_sequence_is_normalized_on_construction() {
    let sequence = ShortcutDefinition::sequence(["G", " ", "ArrowDown"]);
    assert_eq!(
        sequence,
        ShortcutDefinition::Sequence {
            keys: vec![
                "g".to_string(),
                "space".to_string(),
                "arrowdown".to_string()
            ],
        }
    );
}

#[test]
fn test_definition_display() {
    assert_eq!(
        ShortcutDefinition::chord("s", ["shift", "ctrl"]).display(),
        "Ctrl+Shift+s"
    );
    assert_eq!(ShortcutDefinition::chord(" ", Vec::<&str>::new()).display(), "Space");
    assert_eq!(ShortcutDefinition::sequence(["g", "g"]).display(), "g g");
    assert_eq!(ShortcutDefinition::chord("f5", ["alt"]).to_string(), "Alt+F5");
}

// ========================================
// Events
// ========================================

#[test]
fn test_editable_targets() {
    assert!(is_editable_target("INPUT", None));
    assert!(is_editable_target("textarea", None));
    assert!(is_editable_target("div", Some("true")));
    assert!(!is_editable_target("div", Some("false")));
    assert!(!is_editable_target("button", None));
}

#[test]
fn test_key_input_deserialization() {
    let json = r#"{"key": "s", "modifiers": {"ctrl": true}, "targetIsEditable": false}"#;
    let input: KeyInput = serde_json::from_str(json).unwrap();
    assert_eq!(input, KeyInput::new("s").with_modifiers(ModifierFlags::ctrl()));
}

#[test]
fn test_key_input_defaults() {
    let input: KeyInput = serde_json::from_str(r#"{"key": "g"}"#).unwrap();
    assert_eq!(input.modifiers, ModifierFlags::default());
    assert!(!input.target_is_editable);
}
