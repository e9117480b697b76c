//! Storage backend that is never available.

use async_trait::async_trait;

use super::WaitlistStorage;
use crate::waitlist::error::StorageError;

/// Every read and write fails with [`StorageError::Disabled`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledStorage;

#[async_trait]
impl WaitlistStorage for DisabledStorage {
    async fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Disabled)
    }

    async fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Disabled)
    }

    fn backend_name(&self) -> &'static str {
        "disabled"
    }
}
