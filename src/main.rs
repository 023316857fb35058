//! Binary entrypoint for the Skylands CLI.
//!
//! Commands:
//! - `start` - enable the systems and run the event loop until interrupted
//! - `init` - create a starter `config.toml`
//! - `status` - print catalog counts from the configured database
//!
//! See the library crate docs for module-level details: `skylands::`.

use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use sqlx::Row;

use skylands::config::Config;
use skylands::core::database::DatabaseManager;
use skylands::plugin::Skylands;

#[derive(Parser)]
#[command(name = "skylands")]
#[command(about = "Persistent item and npc catalog systems for voxel game servers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the systems and run until interrupted
    Start,
    /// Initialize a new configuration file
    Init,
    /// Show catalog counts
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).await.ok(),
    };
    init_logging(&config, cli.verbose);

    match cli.command {
        Commands::Start => {
            let config = match config {
                Some(config) => config,
                None => {
                    eprintln!(
                        "No config found at {}. Run `skylands init` first.",
                        cli.config
                    );
                    std::process::exit(1);
                }
            };
            info!("Starting Skylands v{}", env!("CARGO_PKG_VERSION"));
            let plugin = Skylands::enable(config).await?;

            // The host feeds events through this channel; standalone runs
            // idle until ctrl-c closes it.
            let (tx, rx) = tokio::sync::mpsc::channel(64);
            tokio::spawn(async move {
                let _ = tokio::signal::ctrl_c().await;
                info!("Shutdown signal received");
                drop(tx);
            });
            plugin.run(rx).await?;
        }
        Commands::Init => {
            if tokio::fs::metadata(&cli.config).await.is_ok() {
                eprintln!("Config file {} already exists.", cli.config);
                std::process::exit(1);
            }
            Config::create_default(&cli.config).await?;
            println!("Created {}. Edit it, then run `skylands start`.", cli.config);
        }
        Commands::Status => {
            let config = match config {
                Some(config) => config,
                None => {
                    eprintln!(
                        "No config found at {}. Run `skylands init` first.",
                        cli.config
                    );
                    std::process::exit(1);
                }
            };
            let database =
                DatabaseManager::open(std::path::Path::new(&config.plugin.data_dir)).await?;
            let items: i64 = sqlx::query("SELECT COUNT(*) AS n FROM item")
                .fetch_one(database.pool())
                .await
                .map(|row| row.get("n"))
                .unwrap_or(0);
            let npcs: i64 = sqlx::query("SELECT COUNT(*) AS n FROM npc")
                .fetch_one(database.pool())
                .await
                .map(|row| row.get("n"))
                .unwrap_or(0);
            println!("{}", config.plugin.name);
            println!("  items: {}", items);
            println!("  npcs:  {}", npcs);
        }
    }
    Ok(())
}

fn init_logging(config: &Option<Config>, verbose: u8) {
    let level = match verbose {
        0 => config
            .as_ref()
            .map(|c| c.logging.level.clone())
            .unwrap_or_else(|| "info".to_string()),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    };
    let env = env_logger::Env::default().default_filter_or(level);
    let _ = env_logger::Builder::from_env(env).try_init();
}
