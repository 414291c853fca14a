use quikr_config::Config;
use quikr_core::{DEVICE_ID_KEY, IdentityManager, SESSION_ID_KEY};
use quikr_storage::SqliteStore;
use tracing::info;

/// Input parameters for the Identity command strategy.
#[derive(Debug, Clone, Copy)]
pub struct IdentityInput {
    /// Remove both slots before reading them
    pub reset: bool,
}

/// Strategy for showing the persisted identifiers.
///
/// Unlike the chat command this requires the durable store: an identifier
/// that is not persisted is not worth printing.
#[derive(Debug, Clone, Copy)]
pub struct IdentityStrategy;

impl super::CommandStrategy for IdentityStrategy {
    type Input = IdentityInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let path = config.storage_path()?;
        let store = SqliteStore::connect(&path).await?;

        if input.reset {
            for key in [SESSION_ID_KEY, DEVICE_ID_KEY] {
                store.remove(key).await?;
            }
            info!("Identifiers reset");
        }

        let identity = IdentityManager::new(store).client_identity().await;

        println!("Store:   {}", path.display());
        println!("Session: {}", identity.session_id);
        println!("Device:  {}", identity.device_id);
        Ok(())
    }
}
