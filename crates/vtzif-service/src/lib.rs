//! The VTIMEZONE to location template transform.

pub mod error;
pub mod vtimezone;
