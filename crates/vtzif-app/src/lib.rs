//! Plumbing for the `vtzif` binary.

pub mod convert;
pub mod error;
