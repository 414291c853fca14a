#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

mod command;

use clap::{Parser, Subcommand};
use command::{
    ChatInput, ChatStrategy, CommandStrategy, IdentityInput, IdentityStrategy, InfoStrategy,
    InitStrategy, VersionStrategy,
};
use quikr_config::Config;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "quikr")]
#[command(about = "quikr chat widget", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the chat widget in the terminal
    Chat {
        /// Single message to send
        #[arg(short = 'm', long)]
        message: Option<String>,
    },
    /// Show the persisted session and device identifiers
    Identity {
        /// Forget both identifiers before reading them again
        #[arg(long)]
        reset: bool,
    },
    /// Initialize configuration
    Init,
    /// Show configuration and storage status
    Info,
    /// Show version
    Version,
}

fn init_tracing() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| {
        let level = Config::config_path()
            .ok()
            .filter(|p| p.exists())
            .and_then(|p| Config::load_from(&p).ok())
            .map_or_else(|| "warn".to_string(), |c| c.log_level);
        EnvFilter::try_new(level)
    })?;

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat { message } => ChatStrategy.execute(ChatInput { message }).await,
        Commands::Identity { reset } => IdentityStrategy.execute(IdentityInput { reset }).await,
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
    }
}
