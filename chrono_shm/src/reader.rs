//! Lock-free reader implementation

use crate::error::{ShmError, ShmResult};
use crate::platform::{attach_region_mmap, region_path};
use crate::slot::SnapshotSlot;
use crate::version;
use chrono_common::record::Chrono;
use memmap2::Mmap;
use std::path::{Path, PathBuf};

/// Attempts before a read gives up with `VersionConflict`
pub const MAX_READ_RETRIES: usize = 64;

/// Read-only view of the published snapshot with conflict detection
pub struct SnapshotReader {
    mmap: Mmap,
    path: PathBuf,
    last_seen_sequence: u64,
}

impl SnapshotReader {
    /// Attach to region `name` inside `dir`
    pub fn attach(dir: &Path, name: &str) -> ShmResult<Self> {
        let path = region_path(dir, name)?;
        let mmap = attach_region_mmap(&path, name)?;

        Ok(Self {
            mmap,
            path,
            last_seen_sequence: 0,
        })
    }

    fn slot(&self) -> &SnapshotSlot {
        // SAFETY: the mapping is at least SLOT_SIZE bytes and page aligned.
        unsafe { &*(self.mmap.as_ptr() as *const SnapshotSlot) }
    }

    /// Read a consistent snapshot
    pub fn read(&mut self) -> ShmResult<Chrono> {
        for _attempt in 0..MAX_READ_RETRIES {
            if let Some((sequence, chrono)) = self.slot().try_load() {
                self.last_seen_sequence = sequence;
                return Ok(chrono);
            }
            std::hint::spin_loop();
        }

        Err(ShmError::VersionConflict)
    }

    /// Sequence of the last successful read
    pub fn version(&self) -> u64 {
        self.last_seen_sequence
    }

    /// Records published before the last successful read, creation included
    pub fn publications(&self) -> u64 {
        version::publications(self.last_seen_sequence)
    }

    /// Check if a newer snapshot has been committed since the last read
    pub fn has_changed(&self) -> bool {
        let current = self.slot().sequence();
        current != self.last_seen_sequence && version::is_stable(current)
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}
