//! Position sources: where decoded samples come from.
//!
//! The loop only needs a readable descriptor to wait on and a way to turn
//! "readable" into zero or more samples. Receiver protocols live behind
//! [`PositionSource`].

use crate::timespec::MonotonicInstant;
use crate::timing::TimestampedPosition;
use chrono_common::coord::Coordinate;
use std::io::{self, Read};
use std::os::fd::{AsFd, BorrowedFd};
use thiserror::Error;
use tracing::trace;

/// Size of one raw record: `lon: i32 LE`, `lat: i32 LE`.
pub const RAW_RECORD_SIZE: usize = 8;

const READ_CHUNK: usize = 4096;

/// Errors raised while pulling samples from a source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The channel reached end of file.
    #[error("position source closed")]
    Closed,

    #[error("position source I/O error: {0}")]
    Io(#[from] io::Error),

    /// The monotonic clock could not be read.
    #[error("clock error: {0}")]
    Clock(#[from] nix::Error),
}

/// A readable channel yielding decoded positions.
pub trait PositionSource: AsFd {
    /// Decode whatever is readable now, handing each sample to `sink` in
    /// arrival order. Returns the number of samples delivered.
    fn read_positions(
        &mut self,
        sink: &mut dyn FnMut(TimestampedPosition),
    ) -> Result<usize, SourceError>;
}

/// Clock used to stamp samples as they are decoded.
pub type ClockFn = fn() -> nix::Result<MonotonicInstant>;

/// Replay feed of raw 8-byte coordinate records.
///
/// Each complete record is stamped with the clock when decoded. A partial
/// record is kept until the rest of it arrives.
pub struct RawCoordFeed<R> {
    reader: R,
    buf: [u8; READ_CHUNK],
    filled: usize,
    clock: ClockFn,
}

impl<R: Read + AsFd> RawCoordFeed<R> {
    /// Feed stamped with `CLOCK_MONOTONIC_RAW`.
    pub fn new(reader: R) -> Self {
        Self::with_clock(reader, MonotonicInstant::now)
    }

    /// Feed stamped with a custom clock.
    pub fn with_clock(reader: R, clock: ClockFn) -> Self {
        Self {
            reader,
            buf: [0; READ_CHUNK],
            filled: 0,
            clock,
        }
    }

    /// Bytes of an incomplete record waiting for the rest.
    pub fn pending(&self) -> usize {
        self.filled
    }
}

impl<R: Read + AsFd> AsFd for RawCoordFeed<R> {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.reader.as_fd()
    }
}

impl<R: Read + AsFd> PositionSource for RawCoordFeed<R> {
    fn read_positions(
        &mut self,
        sink: &mut dyn FnMut(TimestampedPosition),
    ) -> Result<usize, SourceError> {
        let n = match self.reader.read(&mut self.buf[self.filled..]) {
            Ok(0) => return Err(SourceError::Closed),
            Ok(n) => n,
            Err(e) if matches!(e.kind(), io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock) => {
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };

        let total = self.filled + n;
        let mut delivered = 0;

        let mut records = self.buf[..total].chunks_exact(RAW_RECORD_SIZE);
        for record in records.by_ref() {
            let lon = i32::from_le_bytes([record[0], record[1], record[2], record[3]]);
            let lat = i32::from_le_bytes([record[4], record[5], record[6], record[7]]);
            let timestamp = (self.clock)()?;
            sink(TimestampedPosition::new(Coordinate::new(lon, lat), timestamp));
            delivered += 1;
        }
        let rest = records.remainder().len();

        self.buf.copy_within(total - rest..total, 0);
        self.filled = rest;

        trace!(bytes = n, delivered, pending = rest, "raw feed read");
        Ok(delivered)
    }
}

/// Encode one raw record, as read by [`RawCoordFeed`].
pub fn encode_raw(coord: Coordinate) -> [u8; RAW_RECORD_SIZE] {
    let mut out = [0u8; RAW_RECORD_SIZE];
    out[..4].copy_from_slice(&coord.lon.to_le_bytes());
    out[4..].copy_from_slice(&coord.lat.to_le_bytes());
    out
}
