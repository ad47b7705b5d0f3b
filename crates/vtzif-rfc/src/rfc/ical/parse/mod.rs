//! iCalendar parsing (RFC 5545 §3.1, §3.4, §3.6).

mod error;
mod lexer;
mod parser;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{parse_content_line, split_lines};
pub use parser::{parse, parse_stream};
