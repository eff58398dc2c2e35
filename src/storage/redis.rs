use std::sync::Arc;

use async_trait::async_trait;
use redis::{AsyncCommands, aio::MultiplexedConnection};
use tokio::sync::RwLock;
use tracing::{debug, error};

use super::LinkStore;
use crate::errors::{LinkgateError, Result};

/// Redis 存储，键为 `{table}:{token}`，值为目标 URL
pub struct RedisLinkStore {
    client: redis::Client,
    /// 持久化连接，使用 RwLock 保护
    connection: Arc<RwLock<Option<MultiplexedConnection>>>,
    table: String,
}

impl RedisLinkStore {
    pub async fn connect(url: &str, table: &str) -> Result<Self> {
        if table.is_empty() {
            return Err(LinkgateError::storage_config("storage table name is empty"));
        }

        let client = redis::Client::open(url).map_err(|e| {
            LinkgateError::storage_config(format!("invalid redis url {}: {}", url, e))
        })?;

        let store = Self {
            client,
            connection: Arc::new(RwLock::new(None)),
            table: table.to_string(),
        };

        let mut conn = store.get_connection().await.map_err(|e| {
            error!("Failed to connect to Redis at {}: {}", url, e);
            LinkgateError::storage_connection(format!("redis connect failed: {}", e))
        })?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        debug!("Redis connection test successful: {}", pong);

        Ok(store)
    }

    /// 获取或建立持久连接
    async fn get_connection(&self) -> std::result::Result<MultiplexedConnection, redis::RedisError> {
        {
            let conn_guard = self.connection.read().await;
            if let Some(ref conn) = *conn_guard {
                return Ok(conn.clone());
            }
        }

        let mut conn_guard = self.connection.write().await;

        // 双重检查，避免竞态条件
        if let Some(ref conn) = *conn_guard {
            return Ok(conn.clone());
        }

        let new_conn = self.client.get_multiplexed_async_connection().await?;
        *conn_guard = Some(new_conn.clone());
        debug!("Redis connection established and cached");

        Ok(new_conn)
    }

    /// 重置连接（在连接错误时调用）
    async fn reset_connection(&self) {
        let mut conn_guard = self.connection.write().await;
        *conn_guard = None;
        debug!("Redis connection reset due to error");
    }

    fn make_key(&self, token: &str) -> String {
        format!("{}:{}", self.table, token)
    }

    async fn on_error(&self, op: &str, err: redis::RedisError) -> LinkgateError {
        error!("Redis {} failed: {}", op, err);
        if err.is_connection_dropped() || err.is_io_error() {
            self.reset_connection().await;
        }
        LinkgateError::from(err)
    }
}

#[async_trait]
impl LinkStore for RedisLinkStore {
    async fn put(&self, token: &str, destination_url: &str) -> Result<()> {
        let mut conn = self.get_connection().await?;
        let result: std::result::Result<(), _> =
            conn.set(self.make_key(token), destination_url).await;
        match result {
            Ok(()) => Ok(()),
            Err(e) => Err(self.on_error("SET", e).await),
        }
    }

    async fn get(&self, token: &str) -> Result<Option<String>> {
        let mut conn = self.get_connection().await?;
        match conn.get::<_, Option<String>>(self.make_key(token)).await {
            Ok(value) => Ok(value),
            Err(e) => Err(self.on_error("GET", e).await),
        }
    }

    async fn put_if_absent(&self, token: &str, destination_url: &str) -> Result<bool> {
        let mut conn = self.get_connection().await?;
        match conn
            .set_nx::<_, _, bool>(self.make_key(token), destination_url)
            .await
        {
            Ok(inserted) => Ok(inserted),
            Err(e) => Err(self.on_error("SETNX", e).await),
        }
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
