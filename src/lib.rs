//! Shortcut Engine - keyboard chord and sequence matching
//!
//! This library turns keydown events into action ids: chords match one keypress plus an
//! exact modifier set, sequences match a series of keypresses typed within a debounce
//! window. Configuration can be replaced at any time.

pub mod config;
pub mod engine;
pub mod error;
pub mod hook;
pub mod logging;
pub mod shortcuts;
pub mod stdin_commands;
pub mod timer;
