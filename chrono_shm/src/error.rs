//! Error types for snapshot region operations

use thiserror::Error;

/// Errors that can occur while creating, attaching or reading the region
#[derive(Error, Debug)]
pub enum ShmError {
    /// Region not found
    #[error("Snapshot region not found: {name}")]
    NotFound {
        /// Region name
        name: String,
    },

    /// Region name is not a single path component
    #[error("Invalid snapshot region name: {name:?}")]
    InvalidName {
        /// Offending name
        name: String,
    },

    /// Mapped file is too small to hold the snapshot slot
    #[error("Invalid region size: {size} bytes (need at least {expected})")]
    InvalidSize {
        /// Actual size in bytes
        size: usize,
        /// Required size in bytes
        expected: usize,
    },

    /// Writer kept the slot busy across every read attempt
    #[error("Version conflict detected - retry recommended")]
    VersionConflict,

    /// Permission denied
    #[error("Permission denied accessing region: {name}")]
    PermissionDenied {
        /// Region name
        name: String,
    },

    /// IO error
    #[error("IO error: {source}")]
    Io {
        /// Source IO error
        #[from]
        source: std::io::Error,
    },
}

impl ShmError {
    /// Classify an IO error raised while opening region `name`.
    pub(crate) fn from_open(name: &str, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound {
                name: name.to_string(),
            },
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied {
                name: name.to_string(),
            },
            _ => Self::Io { source },
        }
    }
}

/// Result type for snapshot region operations
pub type ShmResult<T> = Result<T, ShmError>;
