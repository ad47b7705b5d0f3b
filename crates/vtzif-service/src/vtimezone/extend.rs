//! POSIX TZ extended rule strings from unbounded rules.
//!
//! Only the `Mm.w.d/time` form is produced, so the supported recurrences are exactly
//! yearly rules with one `BYMONTH` and one `BYDAY` value.

use std::collections::BTreeSet;

use chrono::Timelike;
use vtzif_core::types::UtcOffset;

use super::rule::{RuleField, ZoneRule};
use crate::error::{ServiceError, ServiceResult};

/// Weekday number used in the `d` part of `Mm.w.d`.
const fn weekday_number(code: &[u8]) -> Option<u8> {
    match code {
        [b'S', b'U'] => Some(0),
        [b'M', b'O'] => Some(1),
        [b'T', b'U'] => Some(2),
        [b'W', b'E'] => Some(3),
        [b'T', b'H'] => Some(4),
        [b'F', b'R'] => Some(5),
        [b'S', b'A'] => Some(6),
        _ => None,
    }
}

/// Week number used in the `w` part of `Mm.w.d`. Week 5 means the last one.
const fn week_number(offset: i64) -> Option<u8> {
    match offset {
        -1 => Some(5),
        1 => Some(1),
        2 => Some(2),
        3 => Some(3),
        4 => Some(4),
        _ => None,
    }
}

/// ## Summary
/// Builds the extended rule string for the unbounded rules of a VTIMEZONE.
///
/// No standard rule gives an empty string. A standard rule alone gives `<std>offset`.
/// With a daylight rule the string is `<std>offset<dst>offset`, then the daylight start
/// rule, then the standard start rule.
///
/// ## Errors
/// Returns `ServiceError::DaylightWithoutStandard` for a lone daylight rule, and an error
/// describing the first name, field set or value that the grammar cannot express.
pub fn extend_string(
    standard: Option<&ZoneRule>,
    daylight: Option<&ZoneRule>,
) -> ServiceResult<String> {
    let Some(standard) = standard else {
        if daylight.is_some() {
            return Err(ServiceError::DaylightWithoutStandard);
        }
        return Ok(String::new());
    };

    let mut out = String::new();
    write_name(&mut out, &standard.name)?;
    write_offset(&mut out, -standard.offset_to);

    if let Some(daylight) = daylight {
        write_name(&mut out, &daylight.name)?;
        write_offset(&mut out, -daylight.offset_to);
        // Daylight first: the first rule is the switch from standard to daylight time.
        write_rule(&mut out, daylight)?;
        write_rule(&mut out, standard)?;
    }

    tracing::debug!(extend = %out, "Built extend string");

    Ok(out)
}

fn write_name(out: &mut String, name: &str) -> ServiceResult<()> {
    if name.contains('>') {
        return Err(ServiceError::InvalidZoneName(name.to_string()));
    }
    out.push('<');
    out.push_str(name);
    out.push('>');
    Ok(())
}

/// Writes `[-]HH:MM:SS`. Positive offsets carry no sign.
fn write_offset(out: &mut String, offset: UtcOffset) {
    let formatted = offset.to_string();
    out.push_str(formatted.strip_prefix('+').unwrap_or(&formatted));
}

fn write_rule(out: &mut String, rule: &ZoneRule) -> ServiceResult<()> {
    check_signature(rule)?;

    let by_day = rule.fields.field(RuleField::ByDay).unwrap_or_default();
    let (week, weekday) = parse_by_day(by_day)?;
    let by_month = rule.fields.field(RuleField::ByMonth).unwrap_or_default();
    let month = parse_by_month(by_month)?;

    let start = rule.local_start;
    out.push_str(&format!(
        "M{month}.{week}.{weekday}/{:02}:{:02}:{:02}",
        start.hour(),
        start.minute(),
        start.second()
    ));
    Ok(())
}

/// Checks `FREQ=YEARLY`, `INTERVAL=1` and that exactly `BYMONTH` and `BYDAY` remain.
fn check_signature(rule: &ZoneRule) -> ServiceResult<()> {
    let freq = rule.fields.field(RuleField::Freq).unwrap_or_default();
    if freq != "YEARLY" {
        return Err(ServiceError::UnsupportedRule(format!("freq {freq:?}")));
    }
    if let Some(interval) = rule.fields.field(RuleField::Interval)
        && interval != "1"
    {
        return Err(ServiceError::UnsupportedRule(format!(
            "interval {interval:?}"
        )));
    }

    let mut known = BTreeSet::new();
    let mut unknown = Vec::new();
    for (name, _) in rule.fields.parts() {
        match RuleField::from_name(name) {
            Some(RuleField::Freq | RuleField::Interval) => {}
            Some(field) => {
                known.insert(field);
            }
            None => unknown.push(name),
        }
    }

    if unknown.is_empty() && known == BTreeSet::from([RuleField::ByMonth, RuleField::ByDay]) {
        return Ok(());
    }

    let mut names: Vec<&str> = known.iter().map(|&field| field.name()).chain(unknown).collect();
    names.sort_unstable();
    Err(ServiceError::UnsupportedRule(format!(
        "unsupported combination of rule properties: {}",
        names.join(", ")
    )))
}

/// Parses a single `BYDAY` token such as `-1SU` into `(week, weekday)`.
fn parse_by_day(by_day: &str) -> ServiceResult<(u8, u8)> {
    if by_day.contains(',') {
        return Err(ServiceError::UnsupportedRule(
            "only a single element is supported in BYDAY".to_string(),
        ));
    }

    let split = by_day
        .len()
        .checked_sub(2)
        .filter(|&at| by_day.is_char_boundary(at))
        .ok_or_else(|| {
            ServiceError::InvalidRuleValue(format!(
                "BYDAY rule must include day and offset: {by_day:?}"
            ))
        })?;
    let (offset, code) = by_day.split_at(split);

    let offset: i64 = offset.parse().map_err(|e| {
        ServiceError::InvalidRuleValue(format!("parse BYDAY rule {by_day:?}: {e}"))
    })?;
    let week = week_number(offset).ok_or_else(|| {
        ServiceError::InvalidRuleValue(format!(
            "parse BYDAY rule {by_day:?}: unsupported offset {offset}"
        ))
    })?;
    let weekday = weekday_number(code.as_bytes()).ok_or_else(|| {
        ServiceError::InvalidRuleValue(format!(
            "parse BYDAY rule {by_day:?}: unknown week day {code:?}"
        ))
    })?;

    Ok((week, weekday))
}

fn parse_by_month(by_month: &str) -> ServiceResult<u8> {
    if by_month.contains(',') {
        return Err(ServiceError::UnsupportedRule(
            "only a single element is supported in BYMONTH".to_string(),
        ));
    }
    let month: u8 = by_month.parse().map_err(|e| {
        ServiceError::InvalidRuleValue(format!("parse BYMONTH rule {by_month:?}: {e}"))
    })?;
    if !(1..=12).contains(&month) {
        return Err(ServiceError::InvalidRuleValue(format!(
            "parse BYMONTH rule {by_month:?}: month out of range"
        )));
    }
    Ok(month)
}
