use crate::error::AppResult;

/// Asynchronous string key-value persistence
///
/// Implementations must treat a missing key as `Ok(None)` and make `set`
/// overwrite any prior value. Failures of the underlying service surface as
/// `AppError::StorageUnavailable`.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored at `key`
    async fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// Stores `value` at `key`, replacing whatever was there
    async fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// Backend name for logging and debugging
    fn name(&self) -> &'static str;
}
