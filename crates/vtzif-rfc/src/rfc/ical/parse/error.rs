//! iCalendar parse error types.

use std::fmt;

/// Result type for iCalendar parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error that occurred during iCalendar parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Line number where the error occurred (1-based).
    pub line: usize,
    /// Column where the error occurred (1-based).
    pub column: usize,
    /// Additional context.
    pub context: Option<String>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, line: usize, column: usize) -> Self {
        Self {
            kind,
            line,
            column,
            context: None,
        }
    }

    /// Attaches context to the error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}: {}", self.line, self.column, self.kind)?;
        if let Some(context) = &self.context {
            write!(f, " ({context})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Input does not start with a BEGIN line.
    MissingBegin,
    /// Component is not closed.
    MissingEnd,
    /// END name does not match BEGIN name.
    MismatchedComponent,
    /// Content line has no name.
    MissingPropertyName,
    /// Property name contains invalid characters.
    InvalidPropertyName,
    /// Malformed parameter.
    InvalidParameter,
    /// Quoted parameter value is not closed.
    UnclosedQuote,
    /// Content line has no `:` separating the value.
    MissingColon,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBegin => write!(f, "missing BEGIN"),
            Self::MissingEnd => write!(f, "missing END"),
            Self::MismatchedComponent => write!(f, "mismatched component"),
            Self::MissingPropertyName => write!(f, "missing property name"),
            Self::InvalidPropertyName => write!(f, "invalid property name"),
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::UnclosedQuote => write!(f, "unclosed quote"),
            Self::MissingColon => write!(f, "missing colon"),
        }
    }
}
