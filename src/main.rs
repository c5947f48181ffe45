//! renew-sim entry point: CLI wiring, config load, model load, HTTP serve.

use std::net::IpAddr;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use renew_sim::api::{self, AppState};
use renew_sim::config::ServiceConfig;
use renew_sim::forecast::Forecaster;

/// Renewable generation simulator and forecast service.
#[derive(Debug, Parser)]
#[command(name = "renew-sim", version, about)]
struct Cli {
    /// Load service configuration from a TOML file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Model artifact path (overrides `model.path`)
    #[arg(long, value_name = "PATH")]
    model: Option<PathBuf>,

    /// Interface address to bind (overrides `server.bind`)
    #[arg(long, value_name = "IP")]
    bind: Option<IpAddr>,

    /// API server port (overrides `server.port`)
    #[arg(long, value_name = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("renew_sim=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(ref path) => {
            info!(path = %path.display(), "Loading configuration");
            match ServiceConfig::from_toml_file(path) {
                Ok(cfg) => cfg,
                Err(e) => {
                    eprintln!("{e}");
                    process::exit(1);
                }
            }
        }
        None => ServiceConfig::default(),
    };

    if let Some(path) = cli.model {
        config.model.path = path;
    }
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let forecaster = Forecaster::load(&config.model.path)
        .with_context(|| format!("loading model from {}", config.model.path.display()))?;

    let state = Arc::new(AppState {
        plant: config.plant,
        forecaster,
    });
    api::serve(state, config.server.socket_addr()).await?;
    Ok(())
}
