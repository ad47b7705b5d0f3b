//! RFC formats used by vtzif: iCalendar input (RFC 5545) and TZif output (RFC 8536).

pub mod error;
pub mod rfc;
