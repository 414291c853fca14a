//! In-process key-value store.
//!
//! Backs tests and stands in for durable storage when it cannot be opened;
//! identifiers written here are lost when the process exits.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::KeyValueStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get() -> anyhow::Result<()> {
        let store = MemoryStore::new();
        assert!(store.is_empty().await);
        assert_eq!(store.get("k").await?, None);

        store.set("k", "v1").await?;
        store.set("k", "v2").await?;
        assert_eq!(store.get("k").await?.as_deref(), Some("v2"));
        assert_eq!(store.len().await, 1);
        Ok(())
    }
}
