use std::collections::HashMap;

use async_trait::async_trait;
use models::LuggageItem;
use tokio::sync::RwLock;

use super::store::LuggageStore;
use crate::errors::ServiceError;

/// Process-local store. Nothing survives a restart; used by tests and the `memory` backend.
#[derive(Default)]
pub struct InMemoryLuggageStore {
    items: RwLock<HashMap<String, LuggageItem>>,
}

impl InMemoryLuggageStore {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl LuggageStore for InMemoryLuggageStore {
    async fn contains(&self, id: &str) -> Result<bool, ServiceError> {
        Ok(self.items.read().await.contains_key(id))
    }

    async fn get(&self, id: &str) -> Result<Option<LuggageItem>, ServiceError> {
        Ok(self.items.read().await.get(id).cloned())
    }

    async fn set(&self, id: &str, item: LuggageItem) -> Result<(), ServiceError> {
        self.items.write().await.insert(id.to_string(), item);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        Ok(self.items.write().await.remove(id).is_some())
    }

    async fn values(&self) -> Result<Vec<LuggageItem>, ServiceError> {
        Ok(self.items.read().await.values().cloned().collect())
    }

    async fn count(&self) -> Result<usize, ServiceError> {
        Ok(self.items.read().await.len())
    }

    async fn clear(&self) -> Result<(), ServiceError> {
        self.items.write().await.clear();
        Ok(())
    }
}
