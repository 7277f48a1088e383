//! Postal-code weather pipeline (v1)
//!
//! One binary, two stages, selected by subcommand.
//!
//! # Architecture Overview
//!
//! ```text
//!   client                gateway (:8080)              enrichment (:8081)
//!   ──────  POST / ──────▶ decode, validate ─ POST ───▶ decode, validate
//!                          inject traceparent /weather  extract traceparent
//!                                                         │
//!                                                         ├─▶ directory (ViaCEP)
//!                                                         │     cep → city
//!                                                         ├─▶ weather (WeatherAPI
//!                                                         │     or simulated 25 °C)
//!                                                         ▼
//!   ◀──── relay status/body ─────────────────────────── {"city","temp_C","temp_F","temp_K"}
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use cep_weather::config::load_config_with;
use cep_weather::lifecycle::signals::spawn_signal_listener;
use cep_weather::lifecycle::{run_stage, Shutdown, Stage};
use cep_weather::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "cep-weather")]
#[command(about = "Postal-code weather lookup pipeline", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults apply when omitted.
    #[arg(short, long, env = "CEP_WEATHER_CONFIG")]
    config: Option<PathBuf>,

    /// Override the selected stage's bind address.
    #[arg(short, long)]
    bind: Option<String>,

    #[command(subcommand)]
    stage: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Client-facing stage: validates and forwards to the enrichment stage
    Gateway,
    /// Resolves the postal code and attaches the current temperature
    Enrichment,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let stage = match cli.stage {
        Command::Gateway => Stage::Gateway,
        Command::Enrichment => Stage::Enrichment,
    };

    let bind = cli.bind;
    let config = load_config_with(cli.config.as_deref(), |config| {
        if let Some(bind) = bind {
            stage.listener_mut(config).bind_address = bind;
        }
    })?;

    init_logging(&config.observability)?;
    tracing::info!(stage = stage.name(), version = env!("CARGO_PKG_VERSION"), "cep-weather starting");

    let shutdown = Shutdown::new();
    spawn_signal_listener(&shutdown);

    run_stage(stage, config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
