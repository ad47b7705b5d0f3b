//! iCalendar core models (RFC 5545).
//!
//! Property values are kept as raw strings. Consumers validate the values they
//! read, which keeps malformed input reportable in the consumer's own terms.

mod component;
mod parameter;
mod property;

pub use component::{Component, ComponentKind, ICalendar};
pub use parameter::Parameter;
pub use property::{ContentLine, Property, names};
