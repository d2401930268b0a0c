//! Shared text utilities.

pub mod label;
