//! The published timing record.
//!
//! `Chrono` is what external readers see. Its byte layout is fixed and
//! shared with non-Rust dashboard clients, so it is defined explicitly
//! (little-endian, no implicit padding) rather than relying on the
//! in-memory `repr(C)` representation:
//!
//! | offset | width | field                        |
//! |--------|-------|------------------------------|
//! | 0      | u32   | `best_lap_time`              |
//! | 4      | u32   | `previous_lap_time`          |
//! | 8      | u32   | `current_lap_time`           |
//! | 12     | i32   | `previous_sector_delta_time` |
//! | 16     | u16   | `best_lap_n`                 |
//! | 18     | u16   | `current_lap_n`              |
//!
//! All times are tenths of a second. A zero `best_lap_time` means no lap
//! has been completed yet; readers depend on this sentinel, so it is kept
//! instead of an `Option`.

use serde::{Deserialize, Serialize};
use static_assertions::const_assert_eq;

/// Size of the encoded record in bytes.
pub const CHRONO_RECORD_SIZE: usize = 20;

/// Lap and sector timing state as published to readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(C)]
pub struct Chrono {
    /// Fastest completed lap (0 = none yet).
    pub best_lap_time: u32,
    /// Most recently completed lap.
    pub previous_lap_time: u32,
    /// Live time since the last start/finish crossing.
    pub current_lap_time: u32,
    /// Last sector time minus the previous pass through the same gate.
    /// Negative means faster.
    pub previous_sector_delta_time: i32,
    /// Lap number (0-based) of `best_lap_time`.
    pub best_lap_n: u16,
    /// Completed lap count.
    pub current_lap_n: u16,
}

const_assert_eq!(core::mem::size_of::<Chrono>(), CHRONO_RECORD_SIZE);
const_assert_eq!(core::mem::align_of::<Chrono>(), 4);

impl Chrono {
    /// Whether a best lap has been recorded.
    #[inline]
    pub const fn has_best_lap(&self) -> bool {
        self.best_lap_time != 0
    }

    /// Encode into the published byte layout.
    pub fn to_le_bytes(&self) -> [u8; CHRONO_RECORD_SIZE] {
        let mut buf = [0u8; CHRONO_RECORD_SIZE];
        buf[0..4].copy_from_slice(&self.best_lap_time.to_le_bytes());
        buf[4..8].copy_from_slice(&self.previous_lap_time.to_le_bytes());
        buf[8..12].copy_from_slice(&self.current_lap_time.to_le_bytes());
        buf[12..16].copy_from_slice(&self.previous_sector_delta_time.to_le_bytes());
        buf[16..18].copy_from_slice(&self.best_lap_n.to_le_bytes());
        buf[18..20].copy_from_slice(&self.current_lap_n.to_le_bytes());
        buf
    }

    /// Decode from the published byte layout.
    pub fn from_le_bytes(buf: &[u8; CHRONO_RECORD_SIZE]) -> Self {
        let u32_at = |i: usize| u32::from_le_bytes([buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]);
        let u16_at = |i: usize| u16::from_le_bytes([buf[i], buf[i + 1]]);

        Self {
            best_lap_time: u32_at(0),
            previous_lap_time: u32_at(4),
            current_lap_time: u32_at(8),
            previous_sector_delta_time: u32_at(12) as i32,
            best_lap_n: u16_at(16),
            current_lap_n: u16_at(18),
        }
    }
}

/// Render tenths of a second as `MM:SS:T`.
pub fn format_tenths(tenths: u32) -> String {
    let minutes = tenths / 600;
    let seconds = (tenths % 600) / 10;
    let tenth = tenths % 10;
    format!("{minutes:02}:{seconds:02}:{tenth}")
}
