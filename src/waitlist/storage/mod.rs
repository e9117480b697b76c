//! Key-value storage capability behind the waitlist.
//!
//! The waitlist lives in a single named slot holding a JSON array of
//! strings. Backends only move opaque string values in and out of slots;
//! encoding is the [`store`](super::store) module's concern.
//!
//! # Backends
//!
//! - [`MemoryStorage`]: process-local map, for tests and throwaway runs
//! - [`FileStorage`]: one `<key>.json` file per slot under a data directory
//! - [`DisabledStorage`]: always unavailable

mod disabled;
mod file;
mod memory;

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

pub use disabled::DisabledStorage;
pub use file::FileStorage;
pub use memory::MemoryStorage;

use super::error::StorageError;

/// A string-valued key-value store.
#[async_trait]
pub trait WaitlistStorage: Send + Sync + std::fmt::Debug {
    /// Read a slot. `Ok(None)` when the slot has never been written.
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a slot with `value`.
    async fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Short backend name for logs.
    fn backend_name(&self) -> &'static str;
}

/// Which storage backend to build at start-up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// JSON files under a data directory.
    #[default]
    File,
    /// In-process map; lost on restart.
    Memory,
    /// No storage at all; every write fails.
    Disabled,
}

/// Build the configured backend.
pub fn build(backend: StorageBackend, data_dir: &str) -> Arc<dyn WaitlistStorage> {
    match backend {
        StorageBackend::File => Arc::new(FileStorage::new(data_dir)),
        StorageBackend::Memory => Arc::new(MemoryStorage::new()),
        StorageBackend::Disabled => Arc::new(DisabledStorage),
    }
}
