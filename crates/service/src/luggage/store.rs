use async_trait::async_trait;
use models::LuggageItem;

use crate::errors::ServiceError;

/// Keyed record store for luggage items.
/// Implementations can be file-backed, in-memory, or remote KV. The store knows
/// nothing about lifecycle rules; `set` both creates and overwrites.
#[async_trait]
pub trait LuggageStore: Send + Sync {
    async fn contains(&self, id: &str) -> Result<bool, ServiceError>;
    /// `None` when no record exists for `id`.
    async fn get(&self, id: &str) -> Result<Option<LuggageItem>, ServiceError>;
    async fn set(&self, id: &str, item: LuggageItem) -> Result<(), ServiceError>;
    /// Returns whether a record existed. Deleting an absent id is not an error.
    async fn delete(&self, id: &str) -> Result<bool, ServiceError>;
    async fn values(&self) -> Result<Vec<LuggageItem>, ServiceError>;
    async fn count(&self) -> Result<usize, ServiceError>;
    async fn clear(&self) -> Result<(), ServiceError>;
}
