//! STANDARD / DAYLIGHT sub-components read into zone rules.

use chrono::NaiveDateTime;
use vtzif_core::types::UtcOffset;
use vtzif_rfc::rfc::ical::core::{Component, names};

use super::offset::parse_offset;
use crate::error::{ServiceError, ServiceResult};

/// `DTSTART` in local date-time form, e.g. `19701025T030000`.
pub const LOCAL_DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";
const LOCAL_DATE_TIME_LEN: usize = "YYYYMMDDTHHMMSS".len();

/// Whether a rule describes standard or daylight saving time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    Standard,
    Daylight,
}

impl Polarity {
    #[must_use]
    pub const fn is_dst(self) -> bool {
        matches!(self, Self::Daylight)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Daylight => "daylight",
        }
    }
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recurrence rule parts (RFC 5545 §3.3.10).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RuleField {
    Freq,
    Until,
    Count,
    Interval,
    BySecond,
    ByMinute,
    ByHour,
    ByDay,
    ByMonthDay,
    ByYearDay,
    ByWeekNo,
    ByMonth,
    BySetPos,
    Wkst,
}

impl RuleField {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Freq => "FREQ",
            Self::Until => "UNTIL",
            Self::Count => "COUNT",
            Self::Interval => "INTERVAL",
            Self::BySecond => "BYSECOND",
            Self::ByMinute => "BYMINUTE",
            Self::ByHour => "BYHOUR",
            Self::ByDay => "BYDAY",
            Self::ByMonthDay => "BYMONTHDAY",
            Self::ByYearDay => "BYYEARDAY",
            Self::ByWeekNo => "BYWEEKNO",
            Self::ByMonth => "BYMONTH",
            Self::BySetPos => "BYSETPOS",
            Self::Wkst => "WKST",
        }
    }

    /// Looks up a part by its exact name. Names are matched case-sensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "FREQ" => Self::Freq,
            "UNTIL" => Self::Until,
            "COUNT" => Self::Count,
            "INTERVAL" => Self::Interval,
            "BYSECOND" => Self::BySecond,
            "BYMINUTE" => Self::ByMinute,
            "BYHOUR" => Self::ByHour,
            "BYDAY" => Self::ByDay,
            "BYMONTHDAY" => Self::ByMonthDay,
            "BYYEARDAY" => Self::ByYearDay,
            "BYWEEKNO" => Self::ByWeekNo,
            "BYMONTH" => Self::ByMonth,
            "BYSETPOS" => Self::BySetPos,
            "WKST" => Self::Wkst,
            _ => return None,
        })
    }
}

/// RRULE parts in order of appearance, kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleFields(Vec<(String, String)>);

impl RuleFields {
    /// ## Summary
    /// Splits an RRULE value on `;` into `NAME=value` parts.
    ///
    /// ## Errors
    /// Returns `ServiceError::InvalidRRule` if a part does not have exactly one `=`, has an
    /// empty value, or repeats an earlier name.
    pub fn parse(rrule: &str) -> ServiceResult<Self> {
        let mut fields: Vec<(String, String)> = Vec::new();
        for part in rrule.split(';') {
            let mut pieces = part.split('=');
            let (Some(key), Some(value), None) = (pieces.next(), pieces.next(), pieces.next())
            else {
                return Err(ServiceError::InvalidRRule(format!(
                    "rule part does not have single =: {part:?}"
                )));
            };
            if value.is_empty() {
                return Err(ServiceError::InvalidRRule(format!(
                    "rule option {key} has no value"
                )));
            }
            if fields.iter().any(|(name, _)| name == key) {
                return Err(ServiceError::InvalidRRule(format!(
                    "rule option {key} is repeated"
                )));
            }
            fields.push((key.to_string(), value.to_string()));
        }
        Ok(Self(fields))
    }

    /// Returns the raw value of a part.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find_map(|(key, value)| (key == name).then_some(value.as_str()))
    }

    #[must_use]
    pub fn field(&self, field: RuleField) -> Option<&str> {
        self.get(field.name())
    }

    #[must_use]
    pub fn contains(&self, field: RuleField) -> bool {
        self.field(field).is_some()
    }

    /// Parts as `(name, value)` in order of appearance.
    pub fn parts(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }
}

/// One STANDARD or DAYLIGHT sub-component, validated and normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRule {
    pub polarity: Polarity,
    /// Naive `DTSTART`, read against `offset_from`.
    pub local_start: NaiveDateTime,
    pub offset_from: UtcOffset,
    pub offset_to: UtcOffset,
    /// `TZNAME`, or empty.
    pub name: String,
    /// Raw `RRULE` value.
    pub rrule: String,
    pub fields: RuleFields,
}

impl ZoneRule {
    /// A rule with neither `COUNT` nor `UNTIL` repeats forever.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        !self.fields.contains(RuleField::Count) && !self.fields.contains(RuleField::Until)
    }
}

fn required<'a>(component: &'a Component, name: &'static str) -> ServiceResult<&'a str> {
    component
        .get_property(name)
        .map(vtzif_rfc::rfc::ical::Property::value)
        .ok_or(ServiceError::MissingProperty(name))
}

/// Parses a local `YYYYMMDDTHHMMSS` date-time.
pub(crate) fn parse_local_date_time(value: &str) -> ServiceResult<NaiveDateTime> {
    if value.len() != LOCAL_DATE_TIME_LEN {
        return Err(ServiceError::InvalidDateTime(format!(
            "dtstart must be specified in local date time format: {value:?}"
        )));
    }
    NaiveDateTime::parse_from_str(value, LOCAL_DATE_TIME_FORMAT)
        .map_err(|e| ServiceError::InvalidDateTime(format!("{value:?}: {e}")))
}

/// ## Summary
/// Reads a STANDARD or DAYLIGHT sub-component into a [`ZoneRule`].
///
/// `DTSTART`, `TZOFFSETFROM`, `TZOFFSETTO` and `RRULE` are required, `TZNAME` is optional.
///
/// ## Errors
/// Returns a `ServiceError` naming the missing property, the malformed offset, the bad
/// `DTSTART` or the RRULE syntax problem.
pub fn parse_rule(component: &Component, polarity: Polarity) -> ServiceResult<ZoneRule> {
    let local_start = parse_local_date_time(required(component, names::DTSTART)?)?;

    let offset_from = parse_offset(required(component, names::TZOFFSETFROM)?).map_err(|source| {
        ServiceError::InvalidOffset {
            property: names::TZOFFSETFROM,
            source,
        }
    })?;
    let offset_to = parse_offset(required(component, names::TZOFFSETTO)?).map_err(|source| {
        ServiceError::InvalidOffset {
            property: names::TZOFFSETTO,
            source,
        }
    })?;

    let name = component
        .get_property(names::TZNAME)
        .map(|p| p.value().to_string())
        .unwrap_or_default();

    let rrule = required(component, names::RRULE)?.to_string();
    let fields = RuleFields::parse(&rrule)?;

    tracing::trace!(
        %polarity,
        %local_start,
        %offset_from,
        %offset_to,
        name = %name,
        rrule = %rrule,
        "Parsed zone rule"
    );

    Ok(ZoneRule {
        polarity,
        local_start,
        offset_from,
        offset_to,
        name,
        rrule,
        fields,
    })
}
