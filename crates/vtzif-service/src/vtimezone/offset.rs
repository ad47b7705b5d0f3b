//! UTC offset values (RFC 5545 §3.3.14).

use thiserror::Error;
use vtzif_core::types::UtcOffset;

/// Which group of an offset failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetField {
    Hours,
    Minutes,
    Seconds,
}

impl OffsetField {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Hours => "hours",
            Self::Minutes => "minutes",
            Self::Seconds => "seconds",
        }
    }

    const fn max(self) -> u8 {
        match self {
            Self::Hours => 23,
            Self::Minutes | Self::Seconds => 59,
        }
    }
}

impl std::fmt::Display for OffsetField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OffsetError {
    #[error("invalid time offset: {0:?}")]
    Malformed(String),

    #[error("invalid {field} in time offset {offset:?}")]
    InvalidDigits { field: OffsetField, offset: String },

    #[error("invalid {field} in time offset {offset:?}")]
    OutOfRange { field: OffsetField, offset: String },
}

/// ## Summary
/// Parses a `[+-]HHMM[SS]` UTC offset.
///
/// The sign is optional and defaults to positive.
///
/// ## Errors
/// Returns `OffsetError::Malformed` unless exactly 4 or 6 bytes follow the sign. A group
/// that is not two ASCII digits gives `OffsetError::InvalidDigits`, and one above its
/// maximum gives `OffsetError::OutOfRange`. Both name the group.
pub fn parse_offset(offset: &str) -> Result<UtcOffset, OffsetError> {
    let (negative, digits) = if let Some(rest) = offset.strip_prefix('-') {
        (true, rest)
    } else {
        (false, offset.strip_prefix('+').unwrap_or(offset))
    };

    if !matches!(digits.len(), 4 | 6) {
        return Err(OffsetError::Malformed(offset.to_string()));
    }

    let group = |field: OffsetField, at: usize| -> Result<u8, OffsetError> {
        let bytes = &digits.as_bytes()[at..at + 2];
        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(OffsetError::InvalidDigits {
                field,
                offset: offset.to_string(),
            });
        }
        let value = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
        if value > field.max() {
            return Err(OffsetError::OutOfRange {
                field,
                offset: offset.to_string(),
            });
        }
        Ok(value)
    };

    let hours = group(OffsetField::Hours, 0)?;
    let minutes = group(OffsetField::Minutes, 2)?;
    let seconds = if digits.len() == 6 {
        group(OffsetField::Seconds, 4)?
    } else {
        0
    };

    UtcOffset::from_hms(negative, hours, minutes, seconds)
        .map_err(|e| OffsetError::Malformed(format!("{offset} ({e})")))
}
