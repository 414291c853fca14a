//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type, dispatched
//! statically from `main`.

use quikr_config::Config;
use quikr_core::{ClientIdentity, IdentityManager, KeyValueStore, MemoryStore};
use quikr_providers::WebhookProvider;
use quikr_storage::SqliteStore;
use std::sync::Arc;
use tracing::{info, warn};

mod chat;
mod identity;
mod info;
mod init;
mod version;

pub use chat::{ChatInput, ChatStrategy};
pub use identity::{IdentityInput, IdentityStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use version::VersionStrategy;

/// Components shared by the commands that talk to the webhook.
struct CommonComponents {
    config: Config,
    provider: WebhookProvider,
    identity: ClientIdentity,
}

/// Open the durable identity store, or fall back to an in-memory one whose
/// identifiers only last for this run.
async fn open_identity_store(config: &Config) -> Arc<dyn KeyValueStore> {
    let path = match config.storage_path() {
        Ok(path) => path,
        Err(e) => {
            warn!("Cannot resolve identity store path: {e}. Identifiers will not persist");
            return Arc::new(MemoryStore::new());
        }
    };

    match SqliteStore::connect(&path).await {
        Ok(store) => {
            info!("Identity store: {}", path.display());
            Arc::new(store)
        }
        Err(e) => {
            warn!(
                "Identity store unavailable at {}: {e}. Identifiers will not persist",
                path.display()
            );
            Arc::new(MemoryStore::new())
        }
    }
}

async fn init_common_components() -> anyhow::Result<CommonComponents> {
    let config = Config::load()?;
    info!("Loaded config from ~/quikr/config.json");

    let store = open_identity_store(&config).await;
    let identity = IdentityManager::new(store).client_identity().await;

    let provider = WebhookProvider::new(config.webhook.url.clone());

    Ok(CommonComponents {
        config,
        provider,
        identity,
    })
}

/// Core trait defining the contract for all command strategies.
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}
