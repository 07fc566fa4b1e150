//! Whole-state key-value persistence
//!
//! Each store persists its entire state object as one JSON blob under a
//! fixed string key. Load happens once at startup (rehydration); saves are
//! fire-and-forget after every mutation. There is no schema versioning or
//! migration logic.
//!
//! Delivery guarantee is at-most-once: a crash between a mutation and its
//! flush loses that update.

use anyhow::Result;
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{info, warn};

/// Async key-value interface for persisted state blobs
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the blob stored under `key`, if any
    async fn load(&self, key: &str) -> Result<Option<String>>;

    /// Store `blob` under `key`, replacing any previous value
    async fn save(&self, key: &str, blob: String) -> Result<()>;
}

/// Redis-backed state store
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect to Redis with graceful fallback
    ///
    /// Returns `None` if Redis is unavailable, allowing the app to run
    /// memory-only (state is lost on restart).
    pub async fn connect(url: &str) -> Option<Self> {
        info!("Connecting to Redis...");

        match redis::Client::open(url) {
            Ok(client) => match ConnectionManager::new(client).await {
                Ok(conn) => {
                    info!("Redis connection established");
                    Some(Self { conn })
                }
                Err(e) => {
                    warn!("Failed to connect to Redis: {}. State will not persist.", e);
                    None
                }
            },
            Err(e) => {
                warn!("Invalid Redis URL: {}. State will not persist.", e);
                None
            }
        }
    }
}

#[async_trait]
impl StateStore for RedisStore {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        let blob: Option<String> = conn.get(key).await?;
        Ok(blob)
    }

    async fn save(&self, key: &str, blob: String) -> Result<()> {
        let mut conn = self.conn.clone();
        conn.set::<_, _, ()>(key, blob).await?;
        Ok(())
    }
}

/// In-memory state store, used in tests and as the fallback when Redis is
/// unreachable
#[derive(Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let blobs = self.blobs.lock().expect("state store lock");
        Ok(blobs.get(key).cloned())
    }

    async fn save(&self, key: &str, blob: String) -> Result<()> {
        let mut blobs = self.blobs.lock().expect("state store lock");
        blobs.insert(key.to_string(), blob);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.load("fittrack:goals").await.unwrap(), None);

        store
            .save("fittrack:goals", r#"{"goals":[]}"#.to_string())
            .await
            .unwrap();
        assert_eq!(
            store.load("fittrack:goals").await.unwrap().as_deref(),
            Some(r#"{"goals":[]}"#)
        );
    }

    #[tokio::test]
    async fn test_memory_store_overwrites() {
        let store = MemoryStore::new();
        store.save("k", "a".to_string()).await.unwrap();
        store.save("k", "b".to_string()).await.unwrap();
        assert_eq!(store.load("k").await.unwrap().as_deref(), Some("b"));
    }
}
