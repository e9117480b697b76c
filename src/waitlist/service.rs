//! Drives signup dialogs against the waitlist store.
//!
//! A valid submission spawns a task that waits out the submission delay,
//! then commits under the store's commit lock. Closing a dialog cancels its
//! token. The token is checked again under the commit lock, so a close
//! either lands before the commit (nothing is recorded) or after it (the
//! entry stays). A close never produces a partial entry.

use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::dialog::{DialogEvent, DialogSession, DialogSnapshot, DialogState};
use super::email::EmailAddress;
use super::error::{DialogError, StorageError};
use super::store::{Appended, WaitlistStore};
use crate::session::{DialogLimits, DialogRegistry};

/// Default latency applied to every valid submission.
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(1000);

/// Default time an accepted dialog stays up before closing itself.
pub const DEFAULT_SUCCESS_DISPLAY: Duration = Duration::from_millis(3000);

/// Timers for the dialog lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogTiming {
    pub submit_delay: Duration,
    pub success_display: Duration,
}

impl Default for DialogTiming {
    fn default() -> Self {
        Self {
            submit_delay: DEFAULT_SUBMIT_DELAY,
            success_display: DEFAULT_SUCCESS_DISPLAY,
        }
    }
}

/// Open, submit and close signup dialogs.
#[derive(Debug, Clone)]
pub struct WaitlistService {
    store: WaitlistStore,
    dialogs: DialogRegistry,
    timing: DialogTiming,
}

impl WaitlistService {
    pub fn new(store: WaitlistStore, timing: DialogTiming) -> Self {
        Self::with_limits(store, timing, DialogLimits::default())
    }

    /// Service whose dialog registry enforces `limits`.
    pub fn with_limits(store: WaitlistStore, timing: DialogTiming, limits: DialogLimits) -> Self {
        Self {
            store,
            dialogs: DialogRegistry::with_limits(limits),
            timing,
        }
    }

    #[must_use]
    pub fn dialogs(&self) -> &DialogRegistry {
        &self.dialogs
    }

    /// Open a new dialog in `Idle`.
    pub async fn open(&self) -> Result<DialogSnapshot, DialogError> {
        let session = DialogSession::open();
        let snapshot = session.snapshot();
        let id = self.dialogs.insert(session).await.inspect_err(|e| {
            warn!(name: "dialog.open.refused", error = %e, "Signup dialog refused");
        })?;
        debug!(name: "dialog.opened", dialog_id = %id, "Signup dialog opened");
        Ok(snapshot)
    }

    /// Current view of a dialog.
    pub async fn snapshot(&self, id: Uuid) -> Result<DialogSnapshot, DialogError> {
        self.dialogs
            .snapshot(id)
            .await
            .ok_or(DialogError::NotFound(id))
    }

    /// Submit `input` from the dialog's form.
    ///
    /// Returns immediately with the dialog `Rejected` (no store access) or
    /// `Submitting`; in the latter case the outcome arrives after the
    /// submission delay.
    pub async fn submit(&self, id: Uuid, input: &str) -> Result<DialogSnapshot, DialogError> {
        let (snapshot, pending) = self
            .dialogs
            .update(id, |entry| {
                let email = entry.session.submit(input)?;
                let pending = email.map(|email| (email, entry.cancel.clone()));
                Ok((entry.session.snapshot(), pending))
            })
            .await?;

        match pending {
            Some((email, cancel)) => {
                debug!(name: "dialog.submitting", dialog_id = %id, "Submission started");
                self.spawn_submission(id, email, cancel);
            }
            None => {
                if let Some(reason) = snapshot.state.error() {
                    metrics::counter!("waitlist_submissions_total", "outcome" => reason.code())
                        .increment(1);
                    debug!(
                        name: "dialog.rejected",
                        dialog_id = %id,
                        reason = reason.code(),
                        "Submission rejected by validation"
                    );
                }
            }
        }
        Ok(snapshot)
    }

    /// Record an edit of the input field. Clears a shown error.
    pub async fn edit(&self, id: Uuid, input: &str) -> Result<DialogSnapshot, DialogError> {
        self.dialogs
            .update(id, |entry| {
                entry.session.edit(input)?;
                Ok(entry.session.snapshot())
            })
            .await
    }

    /// Close a dialog, discarding its state and cancelling pending work.
    pub async fn close(&self, id: Uuid) -> Result<(), DialogError> {
        let entry = self
            .dialogs
            .remove(id)
            .await
            .ok_or(DialogError::NotFound(id))?;
        debug!(
            name: "dialog.closed",
            dialog_id = %id,
            state = entry.session.state().name(),
            open_ms = (Utc::now() - entry.session.opened_at()).num_milliseconds(),
            "Signup dialog closed"
        );
        Ok(())
    }

    /// Number of recorded signups.
    pub async fn waitlist_len(&self) -> usize {
        self.store.load().await.len()
    }

    fn spawn_submission(&self, id: Uuid, email: EmailAddress, cancel: CancellationToken) {
        let service = self.clone();
        tokio::spawn(async move {
            service.run_submission(id, email, cancel).await;
        });
    }

    async fn run_submission(&self, id: Uuid, email: EmailAddress, cancel: CancellationToken) {
        tokio::select! {
            () = cancel.cancelled() => {
                debug!(name: "dialog.submission.cancelled", dialog_id = %id, "Dialog closed before commit");
                return;
            }
            () = tokio::time::sleep(self.timing.submit_delay) => {}
        }

        let Some(event) = self.commit(id, email, &cancel).await else {
            debug!(name: "dialog.submission.cancelled", dialog_id = %id, "Dialog closed before commit");
            return;
        };

        let resolved = self
            .dialogs
            .update(id, |entry| entry.session.apply(event))
            .await;

        match resolved {
            Ok(DialogState::Accepted) => self.hold_then_close(id, &cancel).await,
            Ok(_) => {}
            // Closed between the commit and now; the commit stands.
            Err(e) => debug!(dialog_id = %id, error = %e, "Dialog gone after commit"),
        }
    }

    /// Record `email` unless the dialog was closed. `None` means cancelled.
    async fn commit(
        &self,
        id: Uuid,
        email: EmailAddress,
        cancel: &CancellationToken,
    ) -> Option<DialogEvent> {
        let _guard = self.store.lock().await;
        if cancel.is_cancelled() {
            return None;
        }

        let current = match self.store.try_load().await {
            Ok(current) => current,
            Err(e) => {
                self.record_storage_failure(id, "load", &e);
                return Some(DialogEvent::CommitFailed);
            }
        };

        let event = match current.append(email) {
            Appended::Duplicate(_) => {
                metrics::counter!("waitlist_submissions_total", "outcome" => "duplicate_email")
                    .increment(1);
                info!(name: "waitlist.duplicate", dialog_id = %id, "Email already on waitlist");
                DialogEvent::AlreadyRegistered
            }
            Appended::Added(next) => match self.store.save(&next).await {
                Ok(()) => {
                    metrics::counter!("waitlist_submissions_total", "outcome" => "accepted")
                        .increment(1);
                    info!(
                        name: "waitlist.accepted",
                        dialog_id = %id,
                        total = next.len(),
                        "Email added to waitlist"
                    );
                    DialogEvent::Committed
                }
                Err(e) => {
                    self.record_storage_failure(id, "save", &e);
                    DialogEvent::CommitFailed
                }
            },
        };
        Some(event)
    }

    fn record_storage_failure(&self, id: Uuid, step: &'static str, e: &StorageError) {
        metrics::counter!("waitlist_submissions_total", "outcome" => "storage_unavailable")
            .increment(1);
        error!(
            name: "waitlist.commit.failed",
            dialog_id = %id,
            step,
            backend = self.store.backend_name(),
            error = %e,
            "Waitlist commit failed, slot left untouched"
        );
    }

    async fn hold_then_close(&self, id: Uuid, cancel: &CancellationToken) {
        tokio::select! {
            () = cancel.cancelled() => return,
            () = tokio::time::sleep(self.timing.success_display) => {}
        }

        let finished = self
            .dialogs
            .update(id, |entry| entry.session.apply(DialogEvent::DisplayElapsed))
            .await;
        if finished.is_ok() {
            self.dialogs.remove(id).await;
            debug!(name: "dialog.auto_closed", dialog_id = %id, "Accepted dialog closed");
        }
    }
}
