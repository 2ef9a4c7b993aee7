//! # u-blox Chrono Service
//!
//! Lap and sector timing from a stream of receiver positions. Every decoded
//! position is tested against the next expected gate; the resulting
//! [`Chrono`](chrono_common::record::Chrono) record is published to shared
//! memory after every sample.
//!
//! # Module Structure
//!
//! - [`geometry`] - Exact segment crossing test
//! - [`timespec`] - Monotonic instants and tenths conversion
//! - [`gates`] - Gate table and per-gate sector memory
//! - [`timing`] - Sector/lap state machine
//! - [`source`] - Position sources
//! - [`signal`] - Shutdown sources
//! - [`service`] - The `epoll` integration loop
//! - [`config`] - TOML configuration
//! - [`error`] - Service error type
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐  readable  ┌──────────────────────────────┐
//! │ GNSS source │───────────►│        ChronoService         │
//! └─────────────┘            │  epoll ─► TimingContext      │   publish
//! ┌─────────────┐  readable  │           on_position()  ────┼──────────►  /dev/shm/ubloxchrono
//! │  signalfd   │───────────►│                              │
//! └─────────────┘            └──────────────────────────────┘
//! ```

#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod gates;
pub mod geometry;
pub mod service;
pub mod signal;
pub mod source;
pub mod timespec;
pub mod timing;

pub use crate::config::ServiceConfig;
pub use crate::error::ServiceError;
pub use crate::gates::{GateSegment, GateTable, GateTableError};
pub use crate::service::{ChronoService, LoopStats, ServiceReport};
pub use crate::signal::{ShutdownRequest, ShutdownSource, SignalShutdown};
pub use crate::source::{PositionSource, RawCoordFeed, SourceError};
pub use crate::timespec::MonotonicInstant;
pub use crate::timing::{TimestampedPosition, TimingContext};
