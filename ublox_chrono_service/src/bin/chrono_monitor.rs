//! # Chrono Monitor
//!
//! Attaches to the published snapshot and prints it whenever it changes.
//!
//! ```bash
//! chrono_monitor                    # follow /dev/shm/ubloxchrono
//! chrono_monitor --once --json      # one JSON record and exit
//! ```

use chrono_common::consts::{SHM_DIR, SNAPSHOT_NAME};
use chrono_common::record::{Chrono, format_tenths};
use chrono_shm::{ShmError, SnapshotReader};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{Level, debug, error};
use tracing_subscriber::EnvFilter;

/// Chrono Monitor - print the published lap timing snapshot
#[derive(Parser, Debug)]
#[command(name = "chrono_monitor")]
#[command(version)]
#[command(about = "Print the lap timing snapshot published by ublox_chrono_service")]
struct Args {
    /// Snapshot region name
    #[arg(short, long, default_value = SNAPSHOT_NAME)]
    name: String,

    /// Directory holding the region
    #[arg(short, long, default_value = SHM_DIR)]
    dir: PathBuf,

    /// Poll interval in milliseconds
    #[arg(short, long, default_value_t = 100)]
    interval_ms: u64,

    /// Print the current snapshot once and exit
    #[arg(long)]
    once: bool,

    /// Print records as JSON lines
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    setup_tracing(&args);

    if let Err(e) = run(&args) {
        error!("FATAL: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), ShmError> {
    let mut reader = SnapshotReader::attach(&args.dir, &args.name)?;
    debug!("Attached to {}", reader.path().display());

    let chrono = reader.read()?;
    debug!("Publication {}", reader.publications());
    print_record(&chrono, args.json);
    if args.once {
        return Ok(());
    }

    let interval = Duration::from_millis(args.interval_ms);
    loop {
        std::thread::sleep(interval);
        if !reader.has_changed() {
            continue;
        }
        let chrono = reader.read()?;
        debug!("Publication {}", reader.publications());
        print_record(&chrono, args.json);
    }
}

fn print_record(chrono: &Chrono, json: bool) {
    if json {
        match serde_json::to_string(chrono) {
            Ok(line) => println!("{line}"),
            Err(e) => error!("Failed to encode snapshot: {e}"),
        }
        return;
    }

    let best = if chrono.has_best_lap() {
        format!("{} (lap {})", format_tenths(chrono.best_lap_time), chrono.best_lap_n)
    } else {
        "--:--:-".to_string()
    };
    let delta = chrono.previous_sector_delta_time;
    let sign = if delta < 0 { '-' } else { '+' };

    println!(
        "lap {:>3}  current {}  previous {}  best {}  sector {}{}",
        chrono.current_lap_n,
        format_tenths(chrono.current_lap_time),
        format_tenths(chrono.previous_lap_time),
        best,
        sign,
        format_tenths(delta.unsigned_abs()),
    );
}

fn setup_tracing(args: &Args) {
    let level = if args.verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
