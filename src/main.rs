//! translate-dispatch
//!
//! Races translation requests across a pool of interchangeable backends and
//! returns the first usable answer.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client                 ┌──────────────────────────────────────────────┐
//!     POST /translate ──────▶│ http ──▶ dispatch::Dispatcher                │
//!                            │              │                               │
//!                            │              ▼                               │
//!                            │         FanOutRacer ── N attempts ──┐        │
//!                            │              ▲                      │        │
//!                            │              │ pick / feedback      ▼        │      Backend 1
//!                            │         load_balancer::BackendPool  transport├────▶ Backend 2
//!                            │                                              │      ...
//!                            └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use translate_dispatch::config::{read_config, validate_config, ConfigError, DispatcherConfig};
use translate_dispatch::lifecycle::{signals, startup, Shutdown};
use translate_dispatch::observability::logging;

#[derive(Parser)]
#[command(name = "translate-dispatch")]
#[command(about = "Load-balancing dispatcher for translation backends", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides `listener.bind_address`.
    #[arg(short, long)]
    bind: Option<String>,

    /// Backend translate URL; repeat for several. Replaces the configured list.
    #[arg(long = "backend")]
    backends: Vec<String>,

    /// Backends raced per request, overrides `dispatch.fan_out`.
    #[arg(long)]
    fan_out: Option<usize>,

    /// Log level, overrides `observability.log_level`.
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn into_config(self) -> Result<DispatcherConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => DispatcherConfig::default(),
        };

        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if !self.backends.is_empty() {
            config.dispatch.backends = self.backends;
        }
        if let Some(fan_out) = self.fan_out {
            config.dispatch.fan_out = fan_out;
        }
        if let Some(level) = self.log_level {
            config.observability.log_level = level;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init(&config.observability.log_level);
    tracing::info!("translate-dispatch v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        backends = config.dispatch.backends.len(),
        fan_out = config.dispatch.fan_out,
        request_timeout_secs = config.transport.request_timeout_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    tokio::spawn(signals::forward_signals(shutdown.clone()));

    startup::run(config, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
