//! Prelude module for common re-exports.
//!
//! # Usage
//!
//! ```rust
//! use chrono_common::prelude::*;
//! ```

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, LogLevel, SharedConfig};

// ─── Data Model ─────────────────────────────────────────────────────
pub use crate::coord::Coordinate;
pub use crate::record::{CHRONO_RECORD_SIZE, Chrono, format_tenths};

// ─── Well-Known Names ───────────────────────────────────────────────
pub use crate::consts::{MAX_GATES, SHM_DIR, SNAPSHOT_NAME};
