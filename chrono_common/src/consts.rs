//! Well-known constants shared by the timing service and its readers.
//!
//! These are the single source of truth; readers and the writer must not
//! hard-code their own copies.

/// Name of the published snapshot region.
///
/// Matches the POSIX shm name `/ubloxchrono` that dashboard clients open.
pub const SNAPSHOT_NAME: &str = "ubloxchrono";

/// Directory backing POSIX shared memory on Linux.
pub const SHM_DIR: &str = "/dev/shm";

/// Maximum number of gates (sector boundaries) in one track layout.
pub const MAX_GATES: usize = 32;

/// Timing resolution of every published time field: tenths of a second.
pub const TENTHS_PER_SECOND: i64 = 10;
