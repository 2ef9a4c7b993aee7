//! Single writer owning the published region

use crate::error::ShmResult;
use crate::platform::{create_region_mmap, region_path, remove_region};
use crate::slot::{SLOT_SIZE, SnapshotSlot};
use chrono_common::record::Chrono;
use memmap2::MmapMut;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Single writer with exclusive ownership of the snapshot region.
///
/// The region is created on [`SnapshotWriter::create`] and removed when the
/// writer is dropped.
pub struct SnapshotWriter {
    mmap: MmapMut,
    path: PathBuf,
    name: String,
}

impl SnapshotWriter {
    /// Create the region `name` inside `dir` and publish an all-zero record.
    ///
    /// A region left behind by a previous run is reused.
    pub fn create(dir: &Path, name: &str) -> ShmResult<Self> {
        let path = region_path(dir, name)?;
        let (mut mmap, existed) = create_region_mmap(&path, SLOT_SIZE)?;

        if existed {
            warn!("Reusing stale snapshot region {}", path.display());
        }

        // The file may hold a stale record or an odd sequence from a crashed
        // writer; restart the protocol from a clean state.
        unsafe {
            std::ptr::write(mmap.as_mut_ptr() as *mut SnapshotSlot, SnapshotSlot::new());
        }

        let writer = Self {
            mmap,
            path,
            name: name.to_string(),
        };
        writer.slot().store(&Chrono::default());

        debug!("Snapshot region {} created", writer.path.display());
        Ok(writer)
    }

    fn slot(&self) -> &SnapshotSlot {
        // SAFETY: the mapping is SLOT_SIZE bytes, page aligned, and lives as
        // long as `self`.
        unsafe { &*(self.mmap.as_ptr() as *const SnapshotSlot) }
    }

    /// Publish a snapshot. Never blocks and never fails.
    #[inline]
    pub fn publish(&mut self, chrono: &Chrono) {
        self.slot().store(chrono);
        trace!(sequence = self.slot().sequence(), "snapshot published");
    }

    /// Current sequence value (even once `create` returned)
    pub fn sequence(&self) -> u64 {
        self.slot().sequence()
    }

    /// Region name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for SnapshotWriter {
    fn drop(&mut self) {
        match remove_region(&self.path) {
            Ok(()) => debug!("Snapshot region {} removed", self.path.display()),
            Err(e) => warn!("Failed to remove snapshot region {}: {e}", self.path.display()),
        }
    }
}
