use thiserror::Error;
use tracing::{error, warn};

/// Error severity for the host's display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,     // informational
    Warning,  // recoverable
    Error,    // operation failed
}

/// Errors at the edges of the shortcut engine.
///
/// Matching itself never fails; these cover host subscriptions and configuration files.
#[derive(Error, Debug)]
pub enum ShortcutError {
    #[error("Failed to subscribe to {what}: {source}")]
    Subscription {
        what: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("Shortcut hook is already started")]
    AlreadyStarted,

    #[error("Failed to parse shortcut configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Failed to read configuration from '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Notification channel closed")]
    NotificationClosed,

    #[error("Notification channel full, dropped '{action_id}'")]
    NotificationFull { action_id: String },
}

impl ShortcutError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Subscription { .. } => ErrorSeverity::Error,
            Self::AlreadyStarted => ErrorSeverity::Info,
            Self::ConfigParse(_) => ErrorSeverity::Warning,
            Self::ConfigRead { .. } => ErrorSeverity::Warning,
            Self::NotificationClosed => ErrorSeverity::Warning,
            Self::NotificationFull { .. } => ErrorSeverity::Warning,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Subscription { what, .. } => format!("Could not listen for {}", what),
            Self::AlreadyStarted => "Shortcuts are already active".to_string(),
            Self::ConfigParse(e) => format!("Invalid shortcut configuration: {}", e),
            Self::ConfigRead { path, .. } => format!("Could not read configuration from {}", path),
            Self::NotificationClosed => "Shortcut notifications are no longer delivered".to_string(),
            Self::NotificationFull { action_id } => {
                format!("Shortcut '{}' fired while notifications were backed up", action_id)
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ShortcutError>;

/// Extension trait for logging recoverable errors with caller location.
///
/// # Examples
///
/// ```ignore
/// use shortcut_engine::error::ResultExt;
///
/// // Log and carry on if the notification cannot be delivered
/// tx.try_send(event).warn_on_err();
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None. Use for recoverable failures.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None. Use for expected failures.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}
