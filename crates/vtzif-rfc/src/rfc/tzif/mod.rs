//! Time Zone Information Format (TZif), RFC 8536.
//!
//! Encodes a location [`Template`](vtzif_core::types::Template) as a version 2 or 3
//! TZif file with a POSIX TZ string footer.

mod build;
mod posix;

pub use build::{TzifVersion, encode};
pub use posix::parse_standard_zone;
