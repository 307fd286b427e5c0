use std::sync::Arc;

use async_trait::async_trait;
use models::LuggageItem;

use crate::errors::ServiceError;
use crate::luggage::store::LuggageStore;
use crate::storage::json_map_store::JsonMapStore;

/// File-backed luggage store.
/// Keeps a map of `tag id -> LuggageItem` persisted as JSON.
#[derive(Clone)]
pub struct FileLuggageStore {
    store: Arc<JsonMapStore<String, LuggageItem>>,
}

impl FileLuggageStore {
    /// Initialize the store from the given file path. Creates the file if missing.
    pub async fn new<P: Into<std::path::PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonMapStore::<String, LuggageItem>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }
}

#[async_trait]
impl LuggageStore for FileLuggageStore {
    async fn contains(&self, id: &str) -> Result<bool, ServiceError> {
        Ok(self.store.contains_key(&id.to_string()).await)
    }

    async fn get(&self, id: &str) -> Result<Option<LuggageItem>, ServiceError> {
        Ok(self.store.get(&id.to_string()).await)
    }

    async fn set(&self, id: &str, item: LuggageItem) -> Result<(), ServiceError> {
        self.store.insert(id.to_string(), item).await
    }

    async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        self.store.remove(&id.to_string()).await
    }

    async fn values(&self) -> Result<Vec<LuggageItem>, ServiceError> {
        Ok(self.store.values().await)
    }

    async fn count(&self) -> Result<usize, ServiceError> {
        Ok(self.store.len().await)
    }

    async fn clear(&self) -> Result<(), ServiceError> {
        self.store.clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::{CheckInInput, LuggageStatus};
    use uuid::Uuid;

    fn bag(id: &str) -> LuggageItem {
        let input = CheckInInput {
            id: id.into(),
            flight_number: "EM9999".into(),
            origin: "SYD".into(),
            destination: "FCO".into(),
        };
        LuggageItem::check_in(input, "jules.near", 42).expect("check in")
    }

    #[tokio::test]
    async fn file_luggage_store_basic_crud() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("svc_luggage_{}.json", Uuid::new_v4()));
        let store = FileLuggageStore::new(&tmp).await?;

        // initially empty
        assert_eq!(store.count().await?, 0);
        assert!(store.get("my_bag").await?.is_none());

        store.set("my_bag", bag("my_bag")).await?;
        store.set("jules_bag", bag("jules_bag")).await?;
        assert!(store.contains("my_bag").await?);
        assert_eq!(store.count().await?, 2);

        let mut updated = store.get("my_bag").await?.expect("stored");
        updated.status = LuggageStatus::EnRoute;
        store.set("my_bag", updated).await?;

        assert!(store.delete("jules_bag").await?);
        assert!(!store.delete("jules_bag").await?);

        // reload store from disk to ensure persistence
        let store2 = FileLuggageStore::new(&tmp).await?;
        assert_eq!(store2.count().await?, 1);
        let reloaded = store2.get("my_bag").await?.expect("persisted");
        assert_eq!(reloaded.status, LuggageStatus::EnRoute);
        assert_eq!(reloaded.owner_identity, "jules.near");

        store2.clear().await?;
        assert!(store2.values().await?.is_empty());

        // cleanup
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
