//! Integration tests for the SQLite identity store.
//!
//! These tests verify that:
//! - Values round-trip through the `client_kv` table
//! - Identifiers survive reconnecting to the same database file
//! - Removing a slot makes the next lookup create a fresh identifier

use quikr_core::{DEVICE_ID_KEY, IdentityManager, Identifier, KeyValueStore, SESSION_ID_KEY};
use quikr_storage::SqliteStore;

#[tokio::test]
async fn test_set_overwrites_and_get_reads_back() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = SqliteStore::connect(&dir.path().join("identity.db")).await?;

    assert_eq!(store.get("missing").await?, None);

    store.set("slot", "first").await?;
    store.set("slot", "second").await?;
    assert_eq!(store.get("slot").await?.as_deref(), Some("second"));
    assert_eq!(store.list_keys().await?, vec!["slot".to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_identifiers_survive_reconnect() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("nested").join("identity.db");

    let first = {
        let manager = IdentityManager::new(SqliteStore::connect(&path).await?);
        manager.client_identity().await
    };
    assert!(Identifier::is_well_formed(first.session_id.as_str()));
    assert!(Identifier::is_well_formed(first.device_id.as_str()));

    let manager = IdentityManager::new(SqliteStore::connect(&path).await?);
    let second = manager.client_identity().await;
    assert_eq!(first, second);

    let mut keys = manager.store().list_keys().await?;
    keys.sort();
    assert_eq!(keys, vec![DEVICE_ID_KEY.to_string(), SESSION_ID_KEY.to_string()]);
    Ok(())
}

#[tokio::test]
async fn test_remove_forgets_identifier() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let store = SqliteStore::connect(&dir.path().join("identity.db")).await?;
    let manager = IdentityManager::new(store);

    let before = manager.get_or_create(SESSION_ID_KEY).await;
    assert!(manager.store().remove(SESSION_ID_KEY).await?);
    assert!(!manager.store().remove(SESSION_ID_KEY).await?);

    let after = manager.get_or_create(SESSION_ID_KEY).await;
    assert_ne!(before, after);
    Ok(())
}

#[tokio::test]
async fn test_in_memory_url() -> anyhow::Result<()> {
    let store = SqliteStore::connect_url("sqlite::memory:").await?;
    store.set(DEVICE_ID_KEY, "device").await?;
    assert_eq!(store.get(DEVICE_ID_KEY).await?.as_deref(), Some("device"));
    Ok(())
}
