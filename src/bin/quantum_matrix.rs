//! CLI entrypoint: composition root for the refresh session and dashboard.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use rand::{rngs::StdRng, SeedableRng};
use std::path::PathBuf;

use quantum_matrix::config::Config;
use quantum_matrix::dashboard::{self, DashboardState};
use quantum_matrix::market::{regenerate, seed_snapshot};
use quantum_matrix::refresh::{RefreshSession, WallClock};
use quantum_matrix::store::SnapshotStore;
use quantum_matrix::utils::logging::{init_logging, BOOTSTRAP_LEVEL};

#[derive(Debug, Parser)]
#[command(name = "quantum-matrix", author, version, about = "Quantum Trade Matrix telemetry service", long_about = None)]
struct Args {
    /// Path to the configuration file (TOML)
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Print the default configuration to stdout and exit
    #[arg(long)]
    print_default_config: bool,

    /// Command to execute
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Start the refresh session and dashboard server (default)
    Serve,
    /// Print the seed snapshot after N refresh ticks as JSON
    Snapshot {
        /// Number of regenerations to apply
        #[arg(long, default_value_t = 0)]
        ticks: u32,
        /// RNG seed (overrides the config file)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let bootstrap = std::env::var("QTM_LOG_LEVEL").unwrap_or_else(|_| BOOTSTRAP_LEVEL.to_string());
    let logging = init_logging(&bootstrap);

    if args.print_default_config {
        println!("{}", Config::default_toml()?);
        return Ok(());
    }

    if let Some(Command::Init { force }) = &args.command {
        if args.config.exists() && !force {
            anyhow::bail!("{} already exists. Use --force to overwrite.", args.config.display());
        }
        Config::default().save_to_file(&args.config).context("Failed to write configuration")?;
        println!("✅ Wrote default config to {}", args.config.display());
        return Ok(());
    }

    let config = Config::load_or_default(&args.config).context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;
    if let Some(handle) = &logging {
        handle.set_level(&config.app.log_level)?;
    }

    match args.command {
        | Some(Command::Snapshot { ticks, seed }) => print_snapshot(&config, ticks, seed),
        | Some(Command::Serve) | None => run_service(config).await,
        | Some(Command::Init { .. }) => Ok(()),
    }
}

fn print_snapshot(config: &Config, ticks: u32, seed: Option<u64>) -> Result<()> {
    let mut rng = match seed.or(config.refresh.seed) {
        | Some(s) => StdRng::seed_from_u64(s),
        | None => StdRng::from_entropy(),
    };
    let mut snapshot = seed_snapshot(Utc::now());
    for _ in 0..ticks {
        snapshot = regenerate(&snapshot, &mut rng);
    }
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

async fn run_service(config: Config) -> Result<()> {
    if let Err(e) = quantum_matrix::metrics::init() {
        log::warn!("Prometheus recorder not installed: {}", e);
    }

    let store = SnapshotStore::new(seed_snapshot(Utc::now()));
    let clock = WallClock::default();
    let state = DashboardState::new(store.clone(), clock.clone(), config.risk);

    let mut session = RefreshSession::new(store, clock, &config.refresh);
    session.start();

    let listener = dashboard::bind(config.dashboard.socket_addr()?)?;
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::error!("Failed to listen for shutdown signal: {}", e);
        }
        log::info!("Shutdown signal received. Stopping...");
    };
    let served = dashboard::serve(listener, state, shutdown).await;

    session.stop();
    served.context("Dashboard server failed")
}
