//! End-to-end signup dialog scenarios against in-memory storage.
//!
//! The clock is paused, so sleeping past the submission delay is instant
//! and deterministic.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use deadw3_landing::session::{DEFAULT_IDLE_TTL, DialogLimits};
use deadw3_landing::waitlist::service::{DEFAULT_SUBMIT_DELAY, DEFAULT_SUCCESS_DISPLAY};
use deadw3_landing::waitlist::storage::{MemoryStorage, WaitlistStorage};
use deadw3_landing::waitlist::store::WAITLIST_KEY;
use deadw3_landing::waitlist::{
    DialogError, DialogState, DialogTiming, SignupError, StorageError, WaitlistService,
    WaitlistStore,
};

const JUST_AFTER: Duration = Duration::from_millis(1);

fn service(storage: &MemoryStorage) -> WaitlistService {
    let storage: Arc<dyn WaitlistStorage> = Arc::new(storage.clone());
    WaitlistService::new(WaitlistStore::new(storage), DialogTiming::default())
}

async fn persisted(storage: &MemoryStorage) -> Vec<String> {
    match storage.read(WAITLIST_KEY).await.unwrap() {
        Some(raw) => serde_json::from_str(&raw).unwrap(),
        None => Vec::new(),
    }
}

async fn sleep(d: Duration) {
    tokio::time::sleep(d).await;
}

#[tokio::test(start_paused = true)]
async fn scenario_a_empty_input_is_missing() {
    let storage = MemoryStorage::new();
    let service = service(&storage);
    let id = service.open().await.unwrap().id;

    let snapshot = service.submit(id, "").await.unwrap();
    assert_eq!(snapshot.state, DialogState::Rejected(SignupError::MissingInput));

    sleep(DEFAULT_SUBMIT_DELAY * 2).await;
    assert_eq!(storage.read(WAITLIST_KEY).await.unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn scenario_b_malformed_input() {
    let storage = MemoryStorage::new();
    let service = service(&storage);
    let id = service.open().await.unwrap().id;

    let snapshot = service.submit(id, "not-an-email").await.unwrap();
    assert_eq!(snapshot.state, DialogState::Rejected(SignupError::MalformedEmail));

    sleep(DEFAULT_SUBMIT_DELAY * 2).await;
    assert_eq!(storage.read(WAITLIST_KEY).await.unwrap(), None);
}

#[tokio::test(start_paused = true)]
async fn scenario_c_new_email_is_accepted_then_auto_closes() {
    let storage = MemoryStorage::new();
    let service = service(&storage);
    let id = service.open().await.unwrap().id;

    let snapshot = service.submit(id, "a@b.com").await.unwrap();
    assert_eq!(snapshot.state, DialogState::Submitting);

    // Nothing is written before the delay elapses.
    sleep(DEFAULT_SUBMIT_DELAY - Duration::from_millis(10)).await;
    assert!(persisted(&storage).await.is_empty());
    assert_eq!(service.snapshot(id).await.unwrap().state, DialogState::Submitting);

    sleep(Duration::from_millis(10) + JUST_AFTER).await;
    assert_eq!(service.snapshot(id).await.unwrap().state, DialogState::Accepted);
    assert_eq!(persisted(&storage).await, ["a@b.com"]);

    sleep(DEFAULT_SUCCESS_DISPLAY + JUST_AFTER).await;
    assert_eq!(service.snapshot(id).await, Err(DialogError::NotFound(id)));
    assert!(service.dialogs().is_empty().await);
    assert_eq!(persisted(&storage).await, ["a@b.com"]);
}

#[tokio::test(start_paused = true)]
async fn scenario_d_existing_email_is_duplicate() {
    let storage = MemoryStorage::with_slot(WAITLIST_KEY, r#"["a@b.com"]"#);
    let service = service(&storage);
    let id = service.open().await.unwrap().id;

    service.submit(id, "a@b.com").await.unwrap();
    sleep(DEFAULT_SUBMIT_DELAY + JUST_AFTER).await;

    let snapshot = service.snapshot(id).await.unwrap();
    assert_eq!(snapshot.state, DialogState::Duplicate);
    assert_eq!(
        snapshot.message.as_deref(),
        Some("This email is already on the waitlist")
    );
    assert_eq!(persisted(&storage).await, ["a@b.com"]);

    // Still open, and recoverable with a different address.
    sleep(DEFAULT_SUCCESS_DISPLAY * 2).await;
    service.submit(id, "c@d.com").await.unwrap();
    sleep(DEFAULT_SUBMIT_DELAY + JUST_AFTER).await;
    assert_eq!(service.snapshot(id).await.unwrap().state, DialogState::Accepted);
    assert_eq!(persisted(&storage).await, ["a@b.com", "c@d.com"]);
}

#[tokio::test(start_paused = true)]
async fn scenario_e_close_while_submitting_cancels_commit() {
    let storage = MemoryStorage::new();
    let service = service(&storage);
    let id = service.open().await.unwrap().id;

    service.submit(id, "a@b.com").await.unwrap();
    sleep(DEFAULT_SUBMIT_DELAY / 2).await;
    service.close(id).await.unwrap();

    sleep(DEFAULT_SUBMIT_DELAY + DEFAULT_SUCCESS_DISPLAY).await;
    assert_eq!(service.snapshot(id).await, Err(DialogError::NotFound(id)));
    assert!(persisted(&storage).await.is_empty());
}

#[tokio::test(start_paused = true)]
async fn close_after_commit_keeps_single_entry() {
    let storage = MemoryStorage::new();
    let service = service(&storage);
    let id = service.open().await.unwrap().id;

    service.submit(id, "a@b.com").await.unwrap();
    sleep(DEFAULT_SUBMIT_DELAY + JUST_AFTER).await;
    service.close(id).await.unwrap();

    sleep(DEFAULT_SUCCESS_DISPLAY * 2).await;
    assert_eq!(persisted(&storage).await, ["a@b.com"]);
}

#[tokio::test(start_paused = true)]
async fn concurrent_dialogs_same_email_record_once() {
    let storage = MemoryStorage::new();
    let service = service(&storage);

    let mut ids = Vec::new();
    for _ in 0..5 {
        let id = service.open().await.unwrap().id;
        service.submit(id, "same@b.com").await.unwrap();
        ids.push(id);
    }
    sleep(DEFAULT_SUBMIT_DELAY + JUST_AFTER).await;

    assert_eq!(persisted(&storage).await, ["same@b.com"]);

    let mut accepted = 0;
    let mut duplicates = 0;
    for id in ids {
        match service.snapshot(id).await.unwrap().state {
            DialogState::Accepted => accepted += 1,
            DialogState::Duplicate => duplicates += 1,
            other => panic!("unexpected state {other:?}"),
        }
    }
    assert_eq!((accepted, duplicates), (1, 4));
}

#[tokio::test(start_paused = true)]
async fn concurrent_dialogs_distinct_emails_all_recorded() {
    let storage = MemoryStorage::new();
    let service = service(&storage);

    for i in 0..4 {
        let id = service.open().await.unwrap().id;
        service.submit(id, &format!("user{i}@b.com")).await.unwrap();
    }
    sleep(DEFAULT_SUBMIT_DELAY + JUST_AFTER).await;

    let mut entries = persisted(&storage).await;
    entries.sort();
    assert_eq!(entries, ["user0@b.com", "user1@b.com", "user2@b.com", "user3@b.com"]);
    assert_eq!(service.waitlist_len().await, 4);
}

/// Real clock: the file backend goes through blocking filesystem calls.
#[tokio::test]
async fn accepted_signup_survives_restart_with_file_storage() {
    use deadw3_landing::waitlist::storage::FileStorage;

    let dir = tempfile::tempdir().unwrap();
    let timing = DialogTiming {
        submit_delay: Duration::from_millis(20),
        success_display: Duration::from_millis(20),
    };

    let first = WaitlistService::new(
        WaitlistStore::new(Arc::new(FileStorage::new(dir.path()))),
        timing,
    );
    let id = first.open().await.unwrap().id;
    first.submit(id, "keep@b.com").await.unwrap();

    let mut state = DialogState::Submitting;
    for _ in 0..100 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        match first.snapshot(id).await {
            Ok(snapshot) => state = snapshot.state,
            Err(_) => {
                state = DialogState::Idle;
                break;
            }
        }
        if state != DialogState::Submitting {
            break;
        }
    }
    assert_ne!(state, DialogState::Submitting);

    let raw = std::fs::read_to_string(dir.path().join(format!("{WAITLIST_KEY}.json"))).unwrap();
    assert_eq!(raw, r#"["keep@b.com"]"#);

    // A fresh service over the same directory sees the entry.
    let second = WaitlistService::new(
        WaitlistStore::new(Arc::new(FileStorage::new(dir.path()))),
        timing,
    );
    assert_eq!(second.waitlist_len().await, 1);
    let id = second.open().await.unwrap().id;
    second.submit(id, "keep@b.com").await.unwrap();
    for _ in 0..100 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        if second.snapshot(id).await.unwrap().state != DialogState::Submitting {
            break;
        }
    }
    assert_eq!(second.snapshot(id).await.unwrap().state, DialogState::Duplicate);
}

/// Slot data is present but every read fails, as with a file that exists
/// and cannot be opened.
#[derive(Debug, Clone)]
struct UnreadableStorage {
    inner: MemoryStorage,
}

#[async_trait]
impl WaitlistStorage for UnreadableStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Io {
            key: key.to_owned(),
            source: std::io::Error::other("permission denied"),
        })
    }

    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.inner.write(key, value).await
    }

    fn backend_name(&self) -> &'static str {
        "unreadable"
    }
}

const SEEDED: &str = r#"["x@y.com","p@q.org","m@n.io"]"#;

#[tokio::test(start_paused = true)]
async fn unreadable_slot_is_never_overwritten() {
    let inner = MemoryStorage::with_slot(WAITLIST_KEY, SEEDED);
    let storage: Arc<dyn WaitlistStorage> = Arc::new(UnreadableStorage {
        inner: inner.clone(),
    });
    let service = WaitlistService::new(WaitlistStore::new(storage), DialogTiming::default());
    let id = service.open().await.unwrap().id;

    service.submit(id, "new@b.com").await.unwrap();
    sleep(DEFAULT_SUBMIT_DELAY + JUST_AFTER).await;

    let snapshot = service.snapshot(id).await.unwrap();
    assert_eq!(
        snapshot.state,
        DialogState::Rejected(SignupError::StorageUnavailable)
    );
    assert_eq!(inner.read(WAITLIST_KEY).await.unwrap().as_deref(), Some(SEEDED));
}

#[tokio::test(start_paused = true)]
async fn corrupt_slot_is_never_overwritten() {
    let corrupt = r#"["x@y.com","p@q.org",42]"#;
    let storage = MemoryStorage::with_slot(WAITLIST_KEY, corrupt);
    let service = service(&storage);
    let id = service.open().await.unwrap().id;

    service.submit(id, "new@b.com").await.unwrap();
    sleep(DEFAULT_SUBMIT_DELAY + JUST_AFTER).await;

    assert_eq!(
        service.snapshot(id).await.unwrap().state,
        DialogState::Rejected(SignupError::StorageUnavailable)
    );
    assert_eq!(storage.read(WAITLIST_KEY).await.unwrap().as_deref(), Some(corrupt));
}

/// Real clock: the file backend goes through blocking filesystem calls.
#[tokio::test]
async fn non_utf8_slot_file_is_never_overwritten() {
    use deadw3_landing::waitlist::storage::FileStorage;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(format!("{WAITLIST_KEY}.json"));
    let mut bytes = br#"["x@y.com","p@q.org"#.to_vec();
    bytes.push(0xff);
    bytes.extend_from_slice(br#"","m@n.io"]"#);
    std::fs::write(&path, &bytes).unwrap();

    let service = WaitlistService::new(
        WaitlistStore::new(Arc::new(FileStorage::new(dir.path()))),
        DialogTiming {
            submit_delay: Duration::from_millis(20),
            success_display: Duration::from_millis(20),
        },
    );
    let id = service.open().await.unwrap().id;
    service.submit(id, "new@b.com").await.unwrap();

    let mut state = DialogState::Submitting;
    for _ in 0..100 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        state = service.snapshot(id).await.unwrap().state;
        if state != DialogState::Submitting {
            break;
        }
    }
    assert_eq!(state, DialogState::Rejected(SignupError::StorageUnavailable));
    assert_eq!(std::fs::read(&path).unwrap(), bytes);
}

#[tokio::test(start_paused = true)]
async fn abandoned_dialogs_are_evicted() {
    let storage = MemoryStorage::new();
    let service = service(&storage);

    let mut ids = Vec::new();
    for _ in 0..500 {
        ids.push(service.open().await.unwrap().id);
    }
    assert_eq!(service.dialogs().len().await, 500);

    sleep(Duration::from_secs(24 * 60 * 60)).await;
    assert!(service.dialogs().is_empty().await);
    assert_eq!(service.snapshot(ids[0]).await, Err(DialogError::NotFound(ids[0])));
}

#[tokio::test(start_paused = true)]
async fn open_is_refused_at_capacity() {
    let storage: Arc<dyn WaitlistStorage> = Arc::new(MemoryStorage::new());
    let service = WaitlistService::with_limits(
        WaitlistStore::new(storage),
        DialogTiming::default(),
        DialogLimits {
            idle_ttl: DEFAULT_IDLE_TTL,
            max_open: 3,
        },
    );
    for _ in 0..3 {
        service.open().await.unwrap();
    }
    assert_eq!(service.open().await, Err(DialogError::AtCapacity { limit: 3 }));

    sleep(DEFAULT_IDLE_TTL + Duration::from_secs(61)).await;
    assert!(service.open().await.is_ok());
}
