//! Minimal reader for the standard-time part of a POSIX TZ string.

use vtzif_core::types::{UtcOffset, Zone};

use crate::error::{RfcError, RfcResult};

/// ## Summary
/// Reads the leading `std offset` part of a POSIX TZ string as a zone.
///
/// The abbreviation is either `<quoted>` or a run of ASCII letters. The offset is
/// `[+-]hh[:mm[:ss]]` west of UTC, so its sign is inverted for the returned zone.
/// Anything after the offset (a DST part, rules) is ignored.
///
/// ## Errors
/// Returns `RfcError::EncodeError` if the abbreviation or offset is malformed.
pub fn parse_standard_zone(tz: &str) -> RfcResult<Zone> {
    let (name, rest) = parse_abbreviation(tz)?;
    let (west, _rest) = parse_offset(rest).map_err(|reason| {
        RfcError::EncodeError(format!("invalid offset in POSIX TZ string {tz:?}: {reason}"))
    })?;

    Ok(Zone {
        name: name.to_string(),
        offset: -west,
        is_dst: false,
    })
}

fn parse_abbreviation(tz: &str) -> RfcResult<(&str, &str)> {
    if let Some(quoted) = tz.strip_prefix('<') {
        let end = quoted.find('>').ok_or_else(|| {
            RfcError::EncodeError(format!("unclosed '<' in POSIX TZ string {tz:?}"))
        })?;
        return Ok((&quoted[..end], &quoted[end + 1..]));
    }

    let end = tz
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(tz.len());
    if end == 0 {
        return Err(RfcError::EncodeError(format!(
            "missing abbreviation in POSIX TZ string {tz:?}"
        )));
    }
    Ok(tz.split_at(end))
}

fn parse_offset(s: &str) -> Result<(UtcOffset, &str), String> {
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (hours, mut rest) = take_number(s, 2).ok_or("missing hours")?;
    let (mut minutes, mut seconds) = (0, 0);
    if let Some(after) = rest.strip_prefix(':') {
        (minutes, rest) = take_number(after, 2).ok_or("missing minutes")?;
        if let Some(after) = rest.strip_prefix(':') {
            (seconds, rest) = take_number(after, 2).ok_or("missing seconds")?;
        }
    }
    if hours > 23 || minutes > 59 || seconds > 59 {
        return Err(format!("{hours}:{minutes}:{seconds} out of range"));
    }

    let offset = UtcOffset::from_hms(negative, hours, minutes, seconds)
        .map_err(|e| e.to_string())?;
    Ok((offset, rest))
}

/// Takes 1 to `max_digits` leading ASCII digits.
fn take_number(s: &str, max_digits: usize) -> Option<(u8, &str)> {
    let len = s
        .bytes()
        .take(max_digits)
        .take_while(u8::is_ascii_digit)
        .count();
    if len == 0 {
        return None;
    }
    let value = s[..len].parse().ok()?;
    Some((value, &s[len..]))
}
