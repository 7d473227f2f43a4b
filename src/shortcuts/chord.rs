//! Stateless chord matching.

use super::types::{ModifierSet, ShortcutDefinition, ShortcutSpec};

/// Find the first chord definition matching a normalized key and canonical modifiers.
///
/// Specs are visited in registry order and definitions in declaration order; the first
/// hit wins. There is no scoring and no preference for more specific chords.
pub fn try_match<'a>(
    key: &str,
    modifiers: &ModifierSet,
    specs: &'a [ShortcutSpec],
) -> Option<&'a str> {
    specs.iter().find_map(|spec| {
        spec.definitions
            .iter()
            .any(|definition| match definition {
                ShortcutDefinition::Chord {
                    key: chord_key,
                    modifiers: chord_modifiers,
                } => chord_key == key && chord_modifiers == modifiers,
                ShortcutDefinition::Sequence { .. } => false,
            })
            .then_some(spec.action_id.as_str())
    })
}
