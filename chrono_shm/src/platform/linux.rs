//! Linux-specific shared memory operations
//!
//! POSIX shm objects are files under `/dev/shm`; the region is created and
//! mapped through that directory so tests can point it at a temporary one.

use crate::error::{ShmError, ShmResult};
use memmap2::{Mmap, MmapMut, MmapOptions};
use std::fs::OpenOptions;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

/// Permissions of a freshly created region: owner writes, everyone reads
pub const REGION_MODE: u32 = 0o644;

/// Resolve the backing file of region `name` inside `dir`.
///
/// Accepts either the bare name or the POSIX form with a leading `/`.
pub fn region_path(dir: &Path, name: &str) -> ShmResult<PathBuf> {
    let bare = name.strip_prefix('/').unwrap_or(name);
    if bare.is_empty() || bare.contains('/') || bare == "." || bare == ".." {
        return Err(ShmError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(dir.join(bare))
}

/// Create (or reuse) and map a region of `size` bytes for writing.
///
/// Returns the mapping and whether the file already existed.
pub fn create_region_mmap(path: &Path, size: usize) -> ShmResult<(MmapMut, bool)> {
    let existed = path.exists();

    let file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .mode(REGION_MODE)
        .open(path)?;

    file.set_len(size as u64)?;

    let mmap = unsafe { MmapOptions::new().len(size).populate().map_mut(&file)? };
    Ok((mmap, existed))
}

/// Map an existing region read-only
pub fn attach_region_mmap(path: &Path, name: &str) -> ShmResult<Mmap> {
    let file = OpenOptions::new()
        .read(true)
        .open(path)
        .map_err(|e| ShmError::from_open(name, e))?;

    let size = file.metadata()?.len() as usize;
    if size < crate::slot::SLOT_SIZE {
        return Err(ShmError::InvalidSize {
            size,
            expected: crate::slot::SLOT_SIZE,
        });
    }

    let mmap = unsafe { MmapOptions::new().len(crate::slot::SLOT_SIZE).map(&file)? };
    Ok(mmap)
}

/// Remove the backing file of a region
pub fn remove_region(path: &Path) -> ShmResult<()> {
    std::fs::remove_file(path)?;
    Ok(())
}
