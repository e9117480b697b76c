//! The waitlist: an append-only, duplicate-free list of email addresses.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, MutexGuard};
use tracing::warn;

use super::email::EmailAddress;
use super::error::StorageError;
use super::storage::WaitlistStorage;

/// Storage slot holding the serialized waitlist.
pub const WAITLIST_KEY: &str = "deadw3_waitlist";

/// Ordered waitlist entries. No two entries are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Waitlist {
    entries: Vec<EmailAddress>,
}

/// Result of [`Waitlist::append`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Appended {
    /// The address was new; holds the extended waitlist.
    Added(Waitlist),
    /// The address was already present; holds the unchanged waitlist.
    Duplicate(Waitlist),
}

impl Waitlist {
    /// Empty waitlist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from entries, keeping the first occurrence of any repeated
    /// address.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = EmailAddress>) -> Self {
        entries
            .into_iter()
            .fold(Self::new(), |waitlist, email| match waitlist.append(email) {
                Appended::Added(next) | Appended::Duplicate(next) => next,
            })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in submission order.
    #[must_use]
    pub fn entries(&self) -> &[EmailAddress] {
        &self.entries
    }

    /// Exact-match membership.
    #[must_use]
    pub fn contains(&self, email: &EmailAddress) -> bool {
        self.entries.iter().any(|e| e == email)
    }

    /// Append `email` unless it is already present.
    #[must_use]
    pub fn append(mut self, email: EmailAddress) -> Appended {
        if self.contains(&email) {
            return Appended::Duplicate(self);
        }
        self.entries.push(email);
        Appended::Added(self)
    }
}

/// Read the persisted waitlist, failing on anything but a readable,
/// well-formed slot. A slot that was never written is an empty waitlist.
///
/// Commits go through this so an unreadable slot is never overwritten.
pub async fn try_load(storage: &dyn WaitlistStorage) -> Result<Waitlist, StorageError> {
    let Some(raw) = storage.read(WAITLIST_KEY).await? else {
        return Ok(Waitlist::new());
    };
    let entries = serde_json::from_str::<Vec<EmailAddress>>(&raw).map_err(|source| {
        StorageError::Corrupt {
            key: WAITLIST_KEY.to_owned(),
            source,
        }
    })?;

    let count = entries.len();
    let waitlist = Waitlist::from_entries(entries);
    if waitlist.len() != count {
        warn!(
            name: "waitlist.load.duplicates",
            dropped = count - waitlist.len(),
            "Persisted waitlist contained repeated entries"
        );
    }
    Ok(waitlist)
}

/// Read the persisted waitlist for display.
///
/// Never fails: an unavailable backend or a corrupt value yields an empty
/// waitlist. Not for read-modify-write; use [`try_load`].
pub async fn load(storage: &dyn WaitlistStorage) -> Waitlist {
    match try_load(storage).await {
        Ok(waitlist) => waitlist,
        Err(e @ StorageError::Corrupt { .. }) => {
            warn!(
                name: "waitlist.load.corrupt",
                backend = storage.backend_name(),
                error = %e,
                "Persisted waitlist is not a JSON string array, treating as empty"
            );
            Waitlist::new()
        }
        Err(e) => {
            warn!(
                name: "waitlist.load.unavailable",
                backend = storage.backend_name(),
                error = %e,
                "Waitlist storage unreadable, treating as empty"
            );
            Waitlist::new()
        }
    }
}

/// Persist the full waitlist, replacing the previous contents.
pub async fn save(storage: &dyn WaitlistStorage, waitlist: &Waitlist) -> Result<(), StorageError> {
    let encoded = serde_json::to_string(waitlist)?;
    storage.write(WAITLIST_KEY, &encoded).await
}

/// Shared handle to the waitlist and its storage.
///
/// Every read-modify-write of the slot happens under [`WaitlistStore::lock`],
/// so two submissions in this process cannot lose each other's entries.
#[derive(Debug, Clone)]
pub struct WaitlistStore {
    storage: Arc<dyn WaitlistStorage>,
    commit: Arc<Mutex<()>>,
}

impl WaitlistStore {
    pub fn new(storage: Arc<dyn WaitlistStorage>) -> Self {
        Self {
            storage,
            commit: Arc::new(Mutex::new(())),
        }
    }

    pub async fn load(&self) -> Waitlist {
        load(self.storage.as_ref()).await
    }

    pub async fn try_load(&self) -> Result<Waitlist, StorageError> {
        try_load(self.storage.as_ref()).await
    }

    pub async fn save(&self, waitlist: &Waitlist) -> Result<(), StorageError> {
        save(self.storage.as_ref(), waitlist).await
    }

    /// Take the commit lock. Hold it across load, append and save.
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.commit.lock().await
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.storage.backend_name()
    }
}
