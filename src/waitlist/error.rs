//! Error types for the waitlist domain.
//!
//! [`SignupError`] is the user-facing taxonomy: its `Display` text is the
//! inline message rendered under the email field. [`StorageError`] and
//! [`DialogError`] are internal and never shown verbatim to visitors.

use serde::Serialize;
use uuid::Uuid;

/// Failure reasons a visitor can see in the signup dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum SignupError {
    /// Empty or whitespace-only input.
    #[error("Email is required")]
    MissingInput,

    /// Non-empty input that is not shaped like `local@domain.tld`.
    #[error("Please enter a valid email address")]
    MalformedEmail,

    /// The address is already recorded in the waitlist.
    #[error("This email is already on the waitlist")]
    DuplicateEmail,

    /// The waitlist could not be persisted; nothing was recorded.
    #[error("We couldn't save your signup right now. Please try again.")]
    StorageUnavailable,
}

impl SignupError {
    /// Stable machine-readable code, used in JSON bodies and metric labels.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::MissingInput => "missing_input",
            Self::MalformedEmail => "malformed_email",
            Self::DuplicateEmail => "duplicate_email",
            Self::StorageUnavailable => "storage_unavailable",
        }
    }
}

/// Errors from a [`WaitlistStorage`](super::storage::WaitlistStorage) backend.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The backend is switched off (models absent or disabled browser storage).
    #[error("storage is disabled")]
    Disabled,

    /// Key contains characters the backend cannot address.
    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    /// Filesystem failure while reading or writing a slot.
    #[error("storage i/o error on '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// The slot holds something other than a JSON array of strings.
    #[error("storage slot '{key}' is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The waitlist could not be serialized.
    #[error("failed to encode waitlist: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Errors from driving a signup dialog session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DialogError {
    /// No open dialog with this id (never opened, closed, or auto-closed).
    #[error("dialog {0} not found")]
    NotFound(Uuid),

    /// The event is not allowed in the dialog's current state.
    #[error("cannot {event} while dialog is {state}")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },

    /// Too many dialogs are open; no new one can start right now.
    #[error("too many open dialogs (limit {limit})")]
    AtCapacity { limit: usize },
}
