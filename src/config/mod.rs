//! Configuration module - engine settings
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - Configuration struct definitions
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::{DEFAULT_NOTIFICATION_CAPACITY, DEFAULT_SEQUENCE_TIMEOUT_MS};

pub use types::EngineConfig;

pub use loader::{default_config_path, load_config, try_load_config};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
