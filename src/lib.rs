//! TimeGuard - timezone and temporal edge-case toolkit
//!
//! This library classifies anomalous temporal behavior around civil-time
//! discontinuities: DST gaps and overlaps, leap-second dataset lookups,
//! leap-second smear curves, and timestamp irregularities in log streams.
//! Offsets come from the IANA zone database bundled by `chrono-tz`.

pub mod cli;
pub mod convert;
pub mod datetime;
pub mod dst;
pub mod error;
pub mod leap;
pub mod smear;
pub mod validate;
pub mod zone;

pub use error::{Result, TimeguardError};
