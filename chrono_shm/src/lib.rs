//! # Lap Timing Snapshot Transport
//!
//! Publishes the `Chrono` record of the timing service through a named
//! POSIX shared memory region that any number of external processes can
//! map read-only.
//!
//! ## Region Layout
//!
//! ```text
//! offset  0 ┌──────────────────────────────┐
//!           │ Chrono record (20 bytes, LE) │  ← legacy readers stop here
//! offset 20 ├──────────────────────────────┤
//!           │ reserved (4 bytes)           │
//! offset 24 ├──────────────────────────────┤
//!           │ sequence counter (u64)       │  odd = write in progress
//! offset 32 └──────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use chrono_common::record::Chrono;
//! use chrono_shm::{SnapshotReader, SnapshotWriter};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let dir = tempfile::tempdir()?;
//!
//! // Producer
//! let mut writer = SnapshotWriter::create(dir.path(), "ubloxchrono")?;
//! writer.publish(&Chrono { current_lap_n: 1, ..Chrono::default() });
//!
//! // Consumer
//! let mut reader = SnapshotReader::attach(dir.path(), "ubloxchrono")?;
//! if reader.has_changed() {
//!     assert_eq!(reader.read()?.current_lap_n, 1);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! - **SnapshotWriter**: single writer per region
//! - **SnapshotReader**: any number of readers, in any process

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod platform;
pub mod reader;
pub mod slot;
pub mod version;
pub mod writer;

pub use error::{ShmError, ShmResult};
pub use reader::SnapshotReader;
pub use slot::{SLOT_SIZE, SnapshotSlot};
pub use writer::SnapshotWriter;
