//! Service error type.

use crate::gates::GateTableError;
use crate::source::SourceError;
use chrono_common::config::ConfigError;
use chrono_shm::ShmError;
use thiserror::Error;

/// Anything that stops the service.
///
/// Every variant is fatal; the loop has no partial-failure recovery.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid gate table: {0}")]
    Gates(#[from] GateTableError),

    #[error("snapshot region error: {0}")]
    Shm(#[from] ShmError),

    #[error(transparent)]
    Source(#[from] SourceError),

    /// Setup or wait syscall failure.
    #[error("system call failed: {0}")]
    Sys(#[from] nix::Error),

    #[error("failed to open GNSS device {path}: {source}")]
    Device {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The position source cannot be waited on with `epoll`.
    #[error("GNSS device is not pollable; use a tty, FIFO or socket instead of a regular file")]
    NotPollable,

    /// The multiplexer returned something other than one readable source.
    #[error("unexpected epoll event: {0}")]
    UnexpectedEvent(String),

    #[error("unexpected signal {0}")]
    UnexpectedSignal(u32),

    /// The signal descriptor was readable but held nothing.
    #[error("signal descriptor ready without a pending signal")]
    NoSignalPending,
}
