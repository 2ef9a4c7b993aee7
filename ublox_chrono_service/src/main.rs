//! # u-blox Chrono Service Binary
//!
//! Reads receiver positions, times laps and sectors against the configured
//! gates and publishes the result at `/dev/shm/ubloxchrono`.
//!
//! # Usage
//!
//! ```bash
//! # Default config path
//! ublox_chrono_service
//!
//! # Replay a recorded feed with debug logging. The device must be
//! # pollable, so feed the recording through a FIFO.
//! mkfifo /tmp/lap.fifo
//! cat lap.raw > /tmp/lap.fifo &
//! ublox_chrono_service --config ubloxchrono.toml --device /tmp/lap.fifo -v
//! ```

use chrono_common::config::{ConfigLoader, LogLevel};
use chrono_shm::SnapshotWriter;
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;
use ublox_chrono_service::{
    ChronoService, MonotonicInstant, RawCoordFeed, ServiceConfig, ServiceError, SignalShutdown,
    TimingContext,
};

/// u-blox Chrono Service - GNSS lap and sector timing
#[derive(Parser, Debug)]
#[command(name = "ublox_chrono_service")]
#[command(version)]
#[command(about = "GNSS lap and sector timing published over shared memory")]
#[command(long_about = None)]
struct Args {
    /// Path to the service configuration file
    #[arg(short, long, default_value = "/etc/ubloxchrono/ubloxchrono.toml")]
    config: PathBuf,

    /// Override the GNSS device from the configuration
    #[arg(short, long)]
    device: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();

    let config = load_config(&args);
    let level = match &config {
        Ok(config) => config.shared.log_level,
        Err(_) => LogLevel::Info,
    };
    setup_tracing(&args, level);

    let result = config.and_then(run);
    match result {
        Ok(()) => info!("Bye :)"),
        Err(e) => {
            error!("FATAL: {e}");
            std::process::exit(1);
        }
    }
}

fn load_config(args: &Args) -> Result<ServiceConfig, ServiceError> {
    let mut config = ServiceConfig::load(&args.config)?;
    if let Some(device) = &args.device {
        config.gnss.device = device.clone();
    }
    config.validate()?;
    Ok(config)
}

fn run(config: ServiceConfig) -> Result<(), ServiceError> {
    info!(
        "{} v{} starting ({} gates)",
        config.shared.service_name,
        env!("CARGO_PKG_VERSION"),
        config.gates.len()
    );

    // Block the signals before anything else can be spawned.
    let shutdown = SignalShutdown::install()?;

    let gates = config.gate_table()?;
    let device = File::open(&config.gnss.device).map_err(|source| ServiceError::Device {
        path: config.gnss.device.display().to_string(),
        source,
    })?;
    let source = RawCoordFeed::new(device);

    let writer = SnapshotWriter::create(&config.snapshot.dir, &config.snapshot.name)?;
    let ctx = TimingContext::starting_at(gates, MonotonicInstant::now()?);

    let report = ChronoService::new(ctx, writer, source, shutdown)?.run()?;
    info!(
        samples = report.stats.samples,
        crossings = report.stats.crossings,
        laps = report.last.current_lap_n,
        "Stopped on {}",
        report.reason
    );
    Ok(())
}

/// Setup tracing subscriber based on CLI arguments and configured level.
fn setup_tracing(args: &Args, configured: LogLevel) {
    let level = if args.verbose {
        Level::DEBUG
    } else {
        configured.as_tracing_level()
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }
}
