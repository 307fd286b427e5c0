use std::{collections::HashMap, ffi::OsString, hash::Hash, path::{Path, PathBuf}, sync::Arc};
use tokio::{fs, io::AsyncWriteExt, sync::RwLock};
use tracing::debug;

use crate::errors::ServiceError;

/// Generic JSON file-backed key-value map store.
///
/// Keeps a `HashMap<K, V>` in memory and rewrites the whole JSON file on every
/// mutation before returning. The write guard is held across persistence, so
/// the file never lags behind what readers can observe, and a failed write
/// rolls the in-memory change back.
#[derive(Clone)]
pub struct JsonMapStore<K, V> {
    inner: Arc<RwLock<HashMap<K, V>>>,
    file_path: PathBuf,
}

impl<K, V> JsonMapStore<K, V>
where
    K: Eq + Hash + serde::Serialize + serde::de::DeserializeOwned + Clone,
    V: serde::Serialize + serde::de::DeserializeOwned + Clone,
{
    /// Initialize the store from a path. Creates the file with an empty map if missing.
    /// A file that exists but does not parse is an error; its contents are never discarded.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(ServiceError::storage)?;
            }
        }

        let map: HashMap<K, V> = match fs::read(&file_path).await {
            Ok(bytes) if bytes.is_empty() => HashMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|e| {
                ServiceError::Storage(format!("cannot parse {}: {e}", file_path.display()))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let empty: HashMap<K, V> = HashMap::new();
                write_atomic(&file_path, &empty).await?;
                empty
            }
            Err(e) => return Err(ServiceError::storage(e)),
        };
        debug!(path = %file_path.display(), entries = map.len(), "json map store opened");

        Ok(Arc::new(Self { inner: Arc::new(RwLock::new(map)), file_path }))
    }

    pub async fn values(&self) -> Vec<V> {
        let map = self.inner.read().await;
        map.values().cloned().collect()
    }

    /// Get value by key.
    pub async fn get(&self, key: &K) -> Option<V> {
        let map = self.inner.read().await;
        map.get(key).cloned()
    }

    pub async fn contains_key(&self, key: &K) -> bool {
        self.inner.read().await.contains_key(key)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }

    /// Insert or update a value by key and persist.
    pub async fn insert(&self, key: K, value: V) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        let previous = map.insert(key.clone(), value);
        if let Err(e) = write_atomic(&self.file_path, &*map).await {
            match previous {
                Some(old) => { map.insert(key, old); }
                None => { map.remove(&key); }
            }
            return Err(e);
        }
        Ok(())
    }

    /// Remove a key and persist; returns whether it existed.
    pub async fn remove(&self, key: &K) -> Result<bool, ServiceError> {
        let mut map = self.inner.write().await;
        let Some(old) = map.remove(key) else {
            return Ok(false);
        };
        if let Err(e) = write_atomic(&self.file_path, &*map).await {
            map.insert(key.clone(), old);
            return Err(e);
        }
        Ok(true)
    }

    /// Drop every entry and persist the empty map.
    pub async fn clear(&self) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        let old = std::mem::take(&mut *map);
        if let Err(e) = write_atomic(&self.file_path, &*map).await {
            *map = old;
            return Err(e);
        }
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write to a sibling temp file, sync it, then rename over the target.
async fn write_atomic<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ServiceError> {
    let data = serde_json::to_vec(value).map_err(ServiceError::storage)?;
    let tmp_path = temp_path(path);
    let mut file = fs::File::create(&tmp_path).await.map_err(ServiceError::storage)?;
    file.write_all(&data).await.map_err(ServiceError::storage)?;
    file.sync_all().await.map_err(ServiceError::storage)?;
    drop(file);
    fs::rename(&tmp_path, path).await.map_err(ServiceError::storage)?;
    Ok(())
}
