use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use cadenza::config::{Config, ConfigStore, FileConfigStore};
use cadenza::server::{self, ApiState};
use cadenza::telemetry::RequestStats;
use clap::Parser;
use log::info;

/// deterministic typing cadence scoring over HTTP
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Scores typing cadence from keystroke timestamps against fixed fast/steady/slow templates and returns a typing mood with particle rendering hints."
)]
pub struct Cli {
    /// address to bind the API server to
    #[clap(short = 'b', long)]
    bind: Option<String>,

    /// artificial delay in milliseconds applied when clients request server mode
    #[clap(long)]
    delay_ms: Option<u64>,

    /// comma separated list of allowed CORS origins, or * for any
    #[clap(long)]
    cors_origin: Option<String>,

    /// path to a JSON config file (defaults to the platform config dir)
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// disable per-request debug logging
    #[clap(long)]
    quiet: bool,
}

impl Cli {
    /// Layer CLI overrides on top of the loaded config.
    fn apply(&self, mut cfg: Config) -> Config {
        if let Some(bind) = &self.bind {
            cfg.bind_addr = bind.clone();
        }
        if let Some(delay) = self.delay_ms {
            cfg.server_mode_delay_ms = delay;
        }
        if let Some(origin) = &self.cors_origin {
            cfg.cors_origin = origin.clone();
        }
        if self.quiet {
            cfg.log_requests = false;
        }
        cfg
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let store = match &cli.config {
        Some(path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    };
    let config = cli.apply(store.load());

    let state = ApiState {
        stats: Arc::new(RequestStats::new()),
        server_mode_delay_ms: config.server_mode_delay_ms,
        log_requests: config.log_requests,
    };

    info!(
        "cadenza {} starting on {}",
        env!("CARGO_PKG_VERSION"),
        config.bind_addr
    );
    server::serve(config.bind_addr, state, config.cors_origin).await
}
