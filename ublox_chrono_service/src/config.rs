//! Service configuration.
//!
//! # TOML Example
//!
//! ```toml
//! [shared]
//! log_level = "info"
//! service_name = "ubloxchrono"
//!
//! [snapshot]
//! name = "ubloxchrono"
//! dir = "/dev/shm"
//!
//! [gnss]
//! device = "/dev/ttyACM0"
//!
//! # Ordered; the last gate is the start/finish line.
//! [[gates]]
//! a = { lon = 1, lat = 2 }
//! b = { lon = 3, lat = 4 }
//! ```

use crate::gates::{GateTable, GateTableError};
use chrono_common::config::{ConfigError, SharedConfig};
use chrono_common::consts::{MAX_GATES, SHM_DIR, SNAPSHOT_NAME};
use chrono_common::coord::Coordinate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the snapshot is published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotSection {
    #[serde(default = "default_snapshot_name")]
    pub name: String,

    #[serde(default = "default_shm_dir")]
    pub dir: PathBuf,
}

fn default_snapshot_name() -> String {
    SNAPSHOT_NAME.to_string()
}

fn default_shm_dir() -> PathBuf {
    PathBuf::from(SHM_DIR)
}

impl Default for SnapshotSection {
    fn default() -> Self {
        Self {
            name: default_snapshot_name(),
            dir: default_shm_dir(),
        }
    }
}

/// Receiver feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GnssSection {
    /// Byte stream read by the position feed.
    pub device: PathBuf,
}

/// One gate as two endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateConfig {
    pub a: Coordinate,
    pub b: Coordinate,
}

/// Full configuration of `ublox_chrono_service`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub shared: SharedConfig,

    #[serde(default)]
    pub snapshot: SnapshotSection,

    pub gnss: GnssSection,

    /// Ordered gates; the last is start/finish.
    #[serde(default)]
    pub gates: Vec<GateConfig>,
}

impl ServiceConfig {
    /// Semantic checks beyond what TOML parsing enforces.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;

        if self.gnss.device.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "gnss.device cannot be empty".to_string(),
            ));
        }

        chrono_shm::platform::region_path(&self.snapshot.dir, &self.snapshot.name)
            .map_err(|e| ConfigError::ValidationError(format!("snapshot.name: {e}")))?;

        if self.gates.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one gate is required".to_string(),
            ));
        }
        if self.gates.len() > MAX_GATES {
            return Err(ConfigError::ValidationError(format!(
                "{} gates configured, max {MAX_GATES}",
                self.gates.len()
            )));
        }
        if let Some(index) = self.gates.iter().position(|g| g.a == g.b) {
            return Err(ConfigError::ValidationError(format!(
                "gates[{index}] has identical endpoints"
            )));
        }

        Ok(())
    }

    /// Build the gate table in configured order.
    pub fn gate_table(&self) -> Result<GateTable, GateTableError> {
        GateTable::new(self.gates.iter().map(|g| (g.a, g.b)))
    }
}
