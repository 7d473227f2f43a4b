//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Debounce window for multi-key sequences (milliseconds)
pub const DEFAULT_SEQUENCE_TIMEOUT_MS: u64 = 500;

/// Capacity of the bounded shortcut notification channel
pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 100;

/// Config file location, relative to the home directory
pub const CONFIG_DIRECTORY: &str = ".shortcut-engine";
pub const CONFIG_FILE_NAME: &str = "config.json";
