//! Registry of open dialog sessions.
//!
//! Sessions that see no activity for [`DialogLimits::idle_ttl`] are evicted
//! by a background sweep, and at most [`DialogLimits::max_open`] sessions
//! exist at once. Eviction cancels the session's token like a close.

use std::collections::HashMap;
use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use uuid::Uuid;

use crate::waitlist::dialog::{DialogSession, DialogSnapshot};
use crate::waitlist::error::DialogError;

/// Default idle time before an abandoned dialog is evicted.
pub const DEFAULT_IDLE_TTL: Duration = Duration::from_secs(15 * 60);

/// Default cap on simultaneously open dialogs.
pub const DEFAULT_MAX_OPEN: usize = 10_000;

/// Bounds on how many dialogs live in memory, and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogLimits {
    pub idle_ttl: Duration,
    pub max_open: usize,
}

impl Default for DialogLimits {
    fn default() -> Self {
        Self {
            idle_ttl: DEFAULT_IDLE_TTL,
            max_open: DEFAULT_MAX_OPEN,
        }
    }
}

impl DialogLimits {
    /// How often the sweep runs: the TTL, clamped to 1..=60 seconds.
    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        self.idle_ttl
            .clamp(Duration::from_secs(1), Duration::from_secs(60))
    }
}

/// A live dialog plus the token that cancels its pending work.
#[derive(Debug)]
pub struct DialogEntry {
    pub session: DialogSession,
    /// Cancelled when the dialog closes or is evicted. Submission and
    /// auto-close tasks watch it.
    pub cancel: CancellationToken,
    last_active: Instant,
}

type Entries = RwLock<HashMap<Uuid, DialogEntry>>;

/// Thread-safe map of open dialogs, keyed by session id.
#[derive(Debug, Clone)]
pub struct DialogRegistry {
    entries: Arc<Entries>,
    limits: DialogLimits,
}

impl Default for DialogRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DialogRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(DialogLimits::default())
    }

    /// Registry with explicit limits. When called inside a Tokio runtime the
    /// idle sweep is started; it stops once every clone is dropped.
    #[must_use]
    pub fn with_limits(limits: DialogLimits) -> Self {
        let registry = Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            limits,
        };
        registry.spawn_sweeper();
        registry
    }

    #[must_use]
    pub fn limits(&self) -> DialogLimits {
        self.limits
    }

    /// Register a session and return its id. Refused when the registry is
    /// full even after dropping idle sessions.
    pub async fn insert(&self, session: DialogSession) -> Result<Uuid, DialogError> {
        let id = session.id();
        let mut entries = self.entries.write().await;
        if entries.len() >= self.limits.max_open {
            evict_expired(&mut entries, self.limits.idle_ttl);
            if entries.len() >= self.limits.max_open {
                return Err(DialogError::AtCapacity {
                    limit: self.limits.max_open,
                });
            }
        }
        entries.insert(
            id,
            DialogEntry {
                session,
                cancel: CancellationToken::new(),
                last_active: Instant::now(),
            },
        );
        Ok(id)
    }

    /// Snapshot of a session, if still open.
    pub async fn snapshot(&self, id: Uuid) -> Option<DialogSnapshot> {
        self.entries
            .read()
            .await
            .get(&id)
            .map(|entry| entry.session.snapshot())
    }

    /// Run `f` against an open session under the write lock. Counts as
    /// activity for the idle TTL.
    pub async fn update<F, R>(&self, id: Uuid, f: F) -> Result<R, DialogError>
    where
        F: FnOnce(&mut DialogEntry) -> Result<R, DialogError>,
    {
        let mut entries = self.entries.write().await;
        let entry = entries.get_mut(&id).ok_or(DialogError::NotFound(id))?;
        entry.last_active = Instant::now();
        f(entry)
    }

    /// Remove a session and cancel its pending work.
    pub async fn remove(&self, id: Uuid) -> Option<DialogEntry> {
        let entry = self.entries.write().await.remove(&id)?;
        entry.cancel.cancel();
        Some(entry)
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    fn spawn_sweeper(&self) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let entries: Weak<Entries> = Arc::downgrade(&self.entries);
        let limits = self.limits;

        runtime.spawn(async move {
            let mut ticker = tokio::time::interval(limits.sweep_interval());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick fires immediately.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(entries) = entries.upgrade() else {
                    break;
                };
                let evicted = evict_expired(&mut *entries.write().await, limits.idle_ttl);
                if evicted > 0 {
                    debug!(name: "dialog.evicted", evicted, "Idle dialogs evicted");
                }
            }
        });
    }
}

fn evict_expired(entries: &mut HashMap<Uuid, DialogEntry>, idle_ttl: Duration) -> usize {
    let expired: Vec<Uuid> = entries
        .iter()
        .filter(|(_, entry)| entry.last_active.elapsed() >= idle_ttl)
        .map(|(id, _)| *id)
        .collect();
    for id in &expired {
        if let Some(entry) = entries.remove(id) {
            entry.cancel.cancel();
        }
    }
    expired.len()
}
