//! Common library for the u-blox lap timing workspace.
//!
//! This crate holds everything the timing service and the snapshot readers
//! must agree on.
//!
//! # Module Structure
//!
//! - [`coord`] - Receiver coordinates
//! - [`record`] - The published `Chrono` record and its byte layout
//! - [`consts`] - Well-known names and limits
//! - [`config`] - Configuration loading traits and types
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use chrono_common::prelude::*;
//!
//! let chrono = Chrono::default();
//! assert_eq!(chrono.to_le_bytes(), [0u8; CHRONO_RECORD_SIZE]);
//! ```

pub mod config;
pub mod consts;
pub mod coord;
pub mod prelude;
pub mod record;
