//! Service modules around the conversion core.
//!
//! The core converter is pure; services here own the file I/O that brackets it.

pub mod batch;
