use thiserror::Error;

use crate::rfc::ical::parse::ParseError;

/// RFC parsing and encoding errors
#[derive(Error, Debug)]
pub enum RfcError {
    #[error("iCalendar parse error: {0}")]
    ParseError(#[from] ParseError),

    #[error("TZif encoding error: {0}")]
    EncodeError(String),

    #[error(transparent)]
    CoreError(#[from] vtzif_core::error::CoreError),
}

pub type RfcResult<T> = std::result::Result<T, RfcError>;
