//! iCalendar implementation (RFC 5545), limited to what a VTIMEZONE conversion reads.
//!
//! ## Submodules
//!
//! - [`core`] - Component tree (`ICalendar`, `Component`, `Property`, `Parameter`)
//! - [`parse`] - Line unfolding, content-line lexing and tree building

pub mod core;
pub mod parse;

pub use core::{Component, ComponentKind, ICalendar, Parameter, Property};
pub use parse::{ParseError, ParseErrorKind, ParseResult, parse, parse_stream};
