//! Signup dialog state machine.
//!
//! Pure transition logic; timers, storage and the session registry live in
//! [`service`](super::service).
//!
//! ```text
//! Idle ──submit──▶ Validating ──fail──▶ Rejected ──submit──┐
//!   ▲                  │                                   │
//!   │                  └──pass──▶ Submitting ──present──▶ Duplicate ──submit──┐
//!   │                                  │                                     │
//!   └──── display elapsed ◀── Accepted ◀┘ absent + saved        (back to Validating)
//! ```
//!
//! Editing the input clears `Rejected` and `Duplicate` back to `Idle`.
//! Close returns any state to `Idle`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::email::{EmailAddress, validate_email};
use super::error::{DialogError, SignupError};

/// Where a dialog session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum DialogState {
    Idle,
    Validating,
    /// Validation failed, or the entry could not be persisted.
    Rejected(SignupError),
    /// Waiting out the submission delay; one per session.
    Submitting,
    Duplicate,
    Accepted,
}

/// Inputs to [`DialogState::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogEvent {
    Submit,
    ValidationFailed(SignupError),
    ValidationPassed,
    AlreadyRegistered,
    Committed,
    CommitFailed,
    DisplayElapsed,
    /// The visitor changed the input after an error.
    Edit,
    Close,
}

impl DialogEvent {
    fn name(self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::ValidationFailed(_) => "fail validation",
            Self::ValidationPassed => "pass validation",
            Self::AlreadyRegistered => "resolve as duplicate",
            Self::Committed => "commit",
            Self::CommitFailed => "fail commit",
            Self::DisplayElapsed => "finish display",
            Self::Edit => "edit",
            Self::Close => "close",
        }
    }
}

impl DialogState {
    /// Snake-case state name, as used in JSON and logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Rejected(_) => "rejected",
            Self::Submitting => "submitting",
            Self::Duplicate => "duplicate",
            Self::Accepted => "accepted",
        }
    }

    /// Message to show under the input, if any.
    #[must_use]
    pub fn error(self) -> Option<SignupError> {
        match self {
            Self::Rejected(reason) => Some(reason),
            Self::Duplicate => Some(SignupError::DuplicateEmail),
            _ => None,
        }
    }

    /// Whether a new submission may start from here.
    #[must_use]
    pub fn accepts_submit(self) -> bool {
        matches!(self, Self::Idle | Self::Rejected(_) | Self::Duplicate)
    }

    /// Compute the next state, or refuse the event.
    pub fn apply(self, event: DialogEvent) -> Result<Self, DialogError> {
        use DialogEvent as E;

        let next = match (self, event) {
            (_, E::Close) => Self::Idle,
            (s, E::Submit) if s.accepts_submit() => Self::Validating,
            (s, E::Edit) if s.accepts_submit() => Self::Idle,
            (Self::Validating, E::ValidationFailed(reason)) => Self::Rejected(reason),
            (Self::Validating, E::ValidationPassed) => Self::Submitting,
            (Self::Submitting, E::AlreadyRegistered) => Self::Duplicate,
            (Self::Submitting, E::Committed) => Self::Accepted,
            (Self::Submitting, E::CommitFailed) => {
                Self::Rejected(SignupError::StorageUnavailable)
            }
            (Self::Accepted, E::DisplayElapsed) => Self::Idle,
            (state, event) => {
                return Err(DialogError::InvalidTransition {
                    state: state.name(),
                    event: event.name(),
                });
            }
        };
        Ok(next)
    }
}

/// Transient state of one open signup dialog.
#[derive(Debug, Clone)]
pub struct DialogSession {
    id: Uuid,
    input: String,
    state: DialogState,
    opened_at: DateTime<Utc>,
}

impl DialogSession {
    /// A freshly opened dialog.
    #[must_use]
    pub fn open() -> Self {
        Self {
            id: Uuid::new_v4(),
            input: String::new(),
            state: DialogState::Idle,
            opened_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    #[must_use]
    pub fn state(&self) -> DialogState {
        self.state
    }

    #[must_use]
    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Apply an event to this session.
    pub fn apply(&mut self, event: DialogEvent) -> Result<DialogState, DialogError> {
        self.state = self.state.apply(event)?;
        Ok(self.state)
    }

    /// Submit `input`: runs validation and leaves the session `Rejected` or
    /// `Submitting`. Returns the address to record when validation passed.
    pub fn submit(&mut self, input: &str) -> Result<Option<EmailAddress>, DialogError> {
        self.apply(DialogEvent::Submit)?;
        input.clone_into(&mut self.input);

        match validate_email(input) {
            Ok(email) => {
                self.apply(DialogEvent::ValidationPassed)?;
                Ok(Some(email))
            }
            Err(reason) => {
                self.apply(DialogEvent::ValidationFailed(reason))?;
                Ok(None)
            }
        }
    }

    /// Replace the input while no submission is in flight, clearing any
    /// inline error.
    pub fn edit(&mut self, input: &str) -> Result<DialogState, DialogError> {
        self.apply(DialogEvent::Edit)?;
        input.clone_into(&mut self.input);
        Ok(self.state)
    }

    /// Serializable view of the session.
    #[must_use]
    pub fn snapshot(&self) -> DialogSnapshot {
        DialogSnapshot {
            id: self.id,
            state: self.state,
            input: self.input.clone(),
            message: self.state.error().map(|e| e.to_string()),
            open: true,
        }
    }
}

/// What the UI and JSON API see of a dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogSnapshot {
    pub id: Uuid,
    #[serde(flatten)]
    pub state: DialogState,
    pub input: String,
    /// Inline error text, when the state carries one.
    pub message: Option<String>,
    /// Whether the modal is showing. Closed dialogs have no snapshot.
    pub open: bool,
}
