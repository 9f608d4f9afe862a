//! tianji: deterministic time-based signal server

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tianji::{
    calendar::{self, ChineseLunisolar},
    config::Config,
    create_router, AppState, SignalEngine,
};

#[derive(Parser)]
#[command(name = "tianji")]
#[command(about = "Time-based deterministic entropy signal for automated agents")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "tianji.toml")]
    config: PathBuf,

    /// IP address to bind (overrides config file)
    #[arg(long, env = "TIANJI_HOST")]
    host: Option<String>,

    /// HTTP port (overrides config file)
    #[arg(short, long, env = "TIANJI_PORT")]
    port: Option<u16>,

    /// Fixed UTC offset in minutes for the signal clock (overrides config file)
    #[arg(long, env = "TIANJI_UTC_OFFSET_MINUTES", allow_hyphen_values = true)]
    utc_offset_minutes: Option<i32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "TIANJI_LOG_LEVEL")]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)?;

    // Apply CLI overrides
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(offset) = cli.utc_offset_minutes {
        config.signal.utc_offset_minutes = Some(offset);
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("tianji={},tower_http=info", config.logging.level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if let Err(e) = config.validate() {
        error!("Configuration error: {:#}", e);
        std::process::exit(1);
    }

    info!("Starting tianji v{}", env!("CARGO_PKG_VERSION"));
    info!("Config file: {}", cli.config.display());
    match config.signal.utc_offset_minutes {
        Some(minutes) => info!("Signal clock: UTC{:+} minutes", minutes),
        None => info!("Signal clock: host local time"),
    }

    // Fail fast if lunar conversion is unusable
    let lunar = Arc::new(ChineseLunisolar::new());
    if let Err(e) = calendar::probe(lunar.as_ref()) {
        error!("Lunar calendar check failed: {}", e);
        std::process::exit(1);
    }
    info!("Lunar calendar check passed");

    let state = AppState::new(
        SignalEngine::new(lunar),
        Arc::new(config.signal.clock()?),
    );
    let app = create_router(state);

    let addr = config.listen_addr()?;
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
