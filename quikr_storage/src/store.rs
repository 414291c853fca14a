use async_trait::async_trait;
use quikr_core::KeyValueStore;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, DbErr, EntityTrait, Schema,
    Set,
};
use std::path::Path;
use tracing::{debug, info};

use crate::entity::client_kv;

fn is_table_already_exists_error(err: &DbErr) -> bool {
    err.to_string().contains("table") && err.to_string().contains("already exists")
}

/// SQLite-backed [`KeyValueStore`].
///
/// Values survive process restarts, which is what keeps the session and
/// device identifiers stable between runs.
pub struct SqliteStore {
    db: DatabaseConnection,
}

impl SqliteStore {
    /// Open (creating if needed) the database file at `path`.
    pub async fn connect(path: &Path) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        Self::connect_url(&format!("sqlite://{}?mode=rwc", path.display())).await
    }

    /// Open any sqlite URL understood by sqlx, e.g. `sqlite::memory:`.
    pub async fn connect_url(db_url: &str) -> anyhow::Result<Self> {
        info!("Connecting to identity store: {}", db_url);

        let db = Database::connect(db_url).await?;

        let backend = db.get_database_backend();
        let schema = Schema::new(backend);
        let stmt = schema.create_table_from_entity(client_kv::Entity);
        match db
            .execute_unprepared(&backend.build(&stmt).to_string())
            .await
        {
            Ok(_) => {}
            Err(e) if is_table_already_exists_error(&e) => {
                debug!("Table client_kv already exists, skipping creation");
            }
            Err(e) => return Err(e.into()),
        }

        info!("Identity store initialized");
        Ok(Self { db })
    }

    /// Delete a slot. The widget never does this itself; it is the
    /// storage-management action that makes the next lookup create a new
    /// identifier.
    pub async fn remove(&self, key: &str) -> anyhow::Result<bool> {
        let result = client_kv::Entity::delete_by_id(key.to_owned())
            .exec(&self.db)
            .await?;

        info!("Removed slot {}: {} row(s)", key, result.rows_affected);
        Ok(result.rows_affected > 0)
    }

    pub async fn list_keys(&self) -> anyhow::Result<Vec<String>> {
        let models = client_kv::Entity::find().all(&self.db).await?;

        Ok(models.into_iter().map(|m| m.key).collect())
    }
}

#[async_trait]
impl KeyValueStore for SqliteStore {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        let model = client_kv::Entity::find_by_id(key.to_owned())
            .one(&self.db)
            .await?;

        Ok(model.map(|m| m.value))
    }

    async fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let now = chrono::Utc::now().naive_utc();

        let existing = client_kv::Entity::find_by_id(key.to_owned())
            .one(&self.db)
            .await?;

        if let Some(model) = existing {
            client_kv::Entity::update(client_kv::ActiveModel {
                key: Set(model.key),
                value: Set(value.to_owned()),
                created_at: Set(model.created_at),
                updated_at: Set(now),
            })
            .exec(&self.db)
            .await?;
        } else {
            client_kv::ActiveModel {
                key: Set(key.to_owned()),
                value: Set(value.to_owned()),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(&self.db)
            .await?;
        }

        debug!("Stored slot {}", key);
        Ok(())
    }
}
