//! feedwatch - terminal console for the candle ingestion service.

use anyhow::Result;
use clap::{Parser, Subcommand};
use feedwatch_console::{AppConfig, Application};
use tracing::info;

/// Monitoring console for the candle ingestion service
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via FEEDWATCH_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll the service and report status until interrupted (default)
    Watch,
    /// Show the WebSocket connection status
    Status,
    /// Show system metrics
    Metrics,
    /// List active candle subscriptions
    Subscriptions,
    /// Show reconnection history
    History {
        /// Number of records to fetch
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Show aggregate reconnection statistics
    Stats,
    /// Fetch recent candles
    Candles {
        /// Instrument symbol (e.g. BTC-USDT)
        #[arg(short, long)]
        symbol: String,
        /// Candle interval (e.g. 1m)
        #[arg(short, long)]
        interval: String,
        /// Number of candles to fetch
        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Trigger a manual reconnect
    Reconnect,
    /// Add a candle subscription
    Subscribe {
        #[arg(short, long)]
        symbol: String,
        #[arg(short, long)]
        interval: String,
    },
    /// Remove a candle subscription
    Unsubscribe {
        #[arg(short, long)]
        symbol: String,
        #[arg(short, long)]
        interval: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    feedwatch_telemetry::init_logging()?;
    info!("Starting feedwatch v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load(args.config.as_deref())?;
    info!(base_url = %config.api.base_url, "Configuration loaded");

    let app = Application::new(config)?;

    match args.command.unwrap_or(Command::Watch) {
        Command::Watch => app.watch().await?,
        Command::Status => app.status().await?,
        Command::Metrics => app.metrics().await?,
        Command::Subscriptions => app.subscriptions().await?,
        Command::History { limit } => app.history(limit).await?,
        Command::Stats => app.stats().await?,
        Command::Candles {
            symbol,
            interval,
            limit,
        } => app.candles(&symbol, &interval, limit).await?,
        Command::Reconnect => app.reconnect().await?,
        Command::Subscribe { symbol, interval } => app.subscribe(&symbol, &interval).await?,
        Command::Unsubscribe { symbol, interval } => app.unsubscribe(&symbol, &interval).await?,
    }

    Ok(())
}
