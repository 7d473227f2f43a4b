//! Active shortcut configuration.
//!
//! Uses an ordered slice so iteration follows registration order, which is the
//! tie-break for both chord and sequence matching.

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use super::types::ShortcutSpec;

/// Central registry of the active shortcut specs.
///
/// The whole list is swapped on every update; there is no merge or patch. Clones share
/// the same storage, so a configuration thread can call [`replace`](Self::replace) while
/// the engine reads [`current`](Self::current) snapshots.
#[derive(Clone, Default)]
pub struct ShortcutRegistry {
    specs: Arc<RwLock<Arc<[ShortcutSpec]>>>,
}

impl std::fmt::Debug for ShortcutRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShortcutRegistry")
            .field("specs", &self.len())
            .finish()
    }
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_specs(specs: Vec<ShortcutSpec>) -> Self {
        let registry = Self::new();
        registry.replace(specs);
        registry
    }

    /// Atomically replace the active configuration.
    pub fn replace(&self, specs: Vec<ShortcutSpec>) {
        let definitions: usize = specs.iter().map(|s| s.definitions.len()).sum();
        let count = specs.len();
        let next: Arc<[ShortcutSpec]> = specs.into();
        *self.specs.write() = next;
        debug!(
            event_type = "registry_replaced",
            specs = count,
            definitions,
            "Shortcut configuration replaced"
        );
    }

    /// Snapshot of the active configuration.
    ///
    /// The snapshot is immutable; a concurrent `replace` never changes it.
    pub fn current(&self) -> Arc<[ShortcutSpec]> {
        self.specs.read().clone()
    }

    pub fn clear(&self) {
        self.replace(Vec::new());
    }

    pub fn len(&self) -> usize {
        self.specs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.read().is_empty()
    }

    /// Look up a spec by action id (first registered wins).
    pub fn get(&self, action_id: &str) -> Option<ShortcutSpec> {
        self.specs
            .read()
            .iter()
            .find(|spec| spec.action_id == action_id)
            .cloned()
    }
}
