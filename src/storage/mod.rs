//! Link storage
//!
//! A single keyed collection: key = token, value = destination URL.
//! Backends are injected into the services as `Arc<dyn LinkStore>`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::{StorageBackend, StorageConfig};
use crate::errors::Result;

pub mod file;
pub mod memory;
pub mod models;
pub mod redis;

pub use file::FileLinkStore;
pub use memory::MemoryLinkStore;
pub use models::Link;
pub use self::redis::RedisLinkStore;

#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Store `destination_url` under `token`, replacing any previous value.
    async fn put(&self, token: &str, destination_url: &str) -> Result<()>;

    /// `Ok(None)` when the token is unknown.
    async fn get(&self, token: &str) -> Result<Option<String>>;

    /// Store only when `token` is unused. Returns `false` on conflict.
    ///
    /// The default is a plain read followed by a write; backends that can do
    /// a conditional write natively override it.
    async fn put_if_absent(&self, token: &str, destination_url: &str) -> Result<bool> {
        if self.get(token).await?.is_some() {
            return Ok(false);
        }
        self.put(token, destination_url).await?;
        Ok(true)
    }

    fn backend_name(&self) -> &'static str;
}

pub struct StorageFactory;

impl StorageFactory {
    pub async fn create(config: &StorageConfig) -> Result<Arc<dyn LinkStore>> {
        let store: Arc<dyn LinkStore> = match config.backend {
            StorageBackend::Memory => Arc::new(MemoryLinkStore::new()),
            StorageBackend::File => {
                Arc::new(FileLinkStore::open(&config.data_dir, &config.table).await?)
            }
            StorageBackend::Redis => {
                Arc::new(RedisLinkStore::connect(&config.redis_url, &config.table).await?)
            }
        };

        info!(
            "Using storage backend: {} (table: {})",
            store.backend_name(),
            config.table
        );
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_factory_builds_memory_backend() {
        let config = StorageConfig::default();
        let store = StorageFactory::create(&config).await.unwrap();
        assert_eq!(store.backend_name(), "memory");
    }

    #[tokio::test]
    async fn test_factory_builds_file_backend() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            backend: StorageBackend::File,
            table: "factory_links".to_string(),
            data_dir: dir.path().to_string_lossy().into_owned(),
            ..StorageConfig::default()
        };
        let store = StorageFactory::create(&config).await.unwrap();
        assert_eq!(store.backend_name(), "file");
        assert!(dir.path().join("factory_links.json").exists());
    }

    #[tokio::test]
    async fn test_factory_rejects_bad_redis_url() {
        let config = StorageConfig {
            backend: StorageBackend::Redis,
            redis_url: "not-a-redis-url".to_string(),
            ..StorageConfig::default()
        };
        assert!(StorageFactory::create(&config).await.is_err());
    }
}
