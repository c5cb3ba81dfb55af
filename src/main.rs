//! botlogd - HTTP data service for bot log files and usage statistics
//!
//! Serves a bot's log files by date or date range, a user-list snapshot, and
//! read-only aggregate statistics from the bot's database.

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use botlogd::api::run_server;
use botlogd::Config;

#[derive(Parser)]
#[command(name = "botlogd")]
#[command(about = "HTTP data service for bot log files and usage statistics")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(short, long, default_value = "config.toml")]
        config: String,

        /// Override listen address
        #[arg(short, long)]
        listen: Option<String>,
    },

    /// Validate configuration file
    Check {
        /// Path to configuration file
        #[arg(short, long, default_value = "config.toml")]
        config: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "botlogd=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, listen } => {
            tracing::info!(config = %config, "Loading configuration");
            let mut config = Config::from_file(&config)?;

            if let Some(addr) = listen {
                tracing::info!(listen = %addr, "Override listen address");
                config.server.listen = addr;
            }

            run_server(config).await
        }

        Commands::Check { config } => {
            tracing::info!(config = %config, "Checking configuration");
            let config = Config::from_file(&config)?;

            tracing::info!(
                bot_log_dir = %config.storage.bot_log_dir,
                service_log_dir = %config.storage.service_log_dir,
                user_list_dir = %config.storage.user_list_dir,
                interval_days = config.storage.default_interval_days,
                database = config.database.is_some(),
                "Configuration is valid"
            );
            Ok(())
        }
    }
}
