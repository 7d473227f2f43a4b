//! Stateful multi-key sequence matching with a debounce window.
//!
//! Every call appends the key to a rolling buffer, cancels the pending debounce task and
//! compares the buffer's most recent keys against each sequence definition. A miss
//! (re)starts the debounce task; when it fires with no intervening key, the buffer is
//! cleared.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::trace;

use super::types::{ShortcutDefinition, ShortcutSpec};
use crate::timer::{Scheduler, TimerHandle};

#[derive(Debug, Default)]
struct SequenceBuffer {
    keys: Vec<String>,
    /// Bumped on every mutation; a debounce task only clears the generation it was
    /// scheduled for.
    generation: u64,
}

pub struct SequenceMatcher {
    buffer: Arc<Mutex<SequenceBuffer>>,
    pending: Option<TimerHandle>,
    window: Duration,
    scheduler: Arc<dyn Scheduler>,
}

impl std::fmt::Debug for SequenceMatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SequenceMatcher")
            .field("buffer", &self.buffer.lock().keys)
            .field("pending", &self.pending)
            .field("window", &self.window)
            .finish()
    }
}

impl SequenceMatcher {
    pub fn new(window: Duration, scheduler: Arc<dyn Scheduler>) -> Self {
        Self {
            buffer: Arc::new(Mutex::new(SequenceBuffer::default())),
            pending: None,
            window,
            scheduler,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Feed one normalized key and look for a completed sequence.
    ///
    /// Always mutates state, even on a miss. Returns the action id of the first sequence
    /// (registry order) whose keys equal the buffer's suffix of the same length.
    pub fn try_match(&mut self, key: &str, specs: &[ShortcutSpec]) -> Option<String> {
        let mut buffer = self.buffer.lock();
        buffer.keys.push(key.to_string());
        buffer.generation += 1;
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }

        if let Some(action_id) = find_sequence(&buffer.keys, specs) {
            buffer.keys.clear();
            return Some(action_id.to_string());
        }

        let generation = buffer.generation;
        trace!(buffer = ?buffer.keys, "Sequence pending");
        drop(buffer);

        let shared = Arc::clone(&self.buffer);
        let handle = self.scheduler.schedule_after(
            self.window,
            Box::new(move || {
                let mut buffer = shared.lock();
                if buffer.generation == generation {
                    trace!(expired = ?buffer.keys, "Sequence buffer expired");
                    buffer.keys.clear();
                }
            }),
        );
        self.pending = Some(handle);
        None
    }

    /// Clear the buffer and cancel the pending debounce task.
    pub fn reset(&mut self) {
        let mut buffer = self.buffer.lock();
        buffer.keys.clear();
        buffer.generation += 1;
        drop(buffer);
        self.cancel_pending();
    }

    /// Keys typed so far in the in-progress sequence.
    pub fn pending_keys(&self) -> Vec<String> {
        self.buffer.lock().keys.clone()
    }

    pub fn has_pending_timer(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_cancelled())
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.cancel();
        }
    }
}

impl Drop for SequenceMatcher {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

fn find_sequence<'a>(buffer: &[String], specs: &'a [ShortcutSpec]) -> Option<&'a str> {
    specs.iter().find_map(|spec| {
        spec.definitions
            .iter()
            .any(|definition| match definition {
                ShortcutDefinition::Sequence { keys } => {
                    !keys.is_empty() && buffer.ends_with(keys)
                }
                ShortcutDefinition::Chord { .. } => false,
            })
            .then_some(spec.action_id.as_str())
    })
}
