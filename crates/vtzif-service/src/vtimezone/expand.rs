//! Expansion of bounded rules into concrete changes.

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use rrule::{RRule, Tz, Unvalidated};
use vtzif_core::types::{Change, Template, Zone};

use super::rule::{LOCAL_DATE_TIME_FORMAT, ZoneRule, parse_local_date_time};
use crate::error::{ServiceError, ServiceResult};

const UTC_DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%SZ";
const UTC_DATE_TIME_LEN: usize = "YYYYMMDDTHHMMSSZ".len();

/// An RRULE rewritten so that it can be evaluated in UTC.
///
/// The recurrence is anchored in a fixed zone at `offset_from`. A fixed zone has no
/// transitions, so evaluating with local wall-clock values treated as UTC and then
/// subtracting the offset gives the same instants.
#[derive(Debug)]
struct ShiftedRule {
    text: String,
    start: NaiveDateTime,
    until: Option<NaiveDateTime>,
    offset: TimeDelta,
}

impl ShiftedRule {
    fn new(rule: &ZoneRule) -> ServiceResult<Self> {
        let offset = rule.offset_from.as_duration();
        let mut start = rule.local_start;
        let mut until = None;
        let mut parts = Vec::new();

        for (name, value) in rule.fields.parts() {
            match name {
                "DTSTART" => start = rule_start(value, offset)?,
                "UNTIL" => {
                    let shifted = shift(parse_until(value)?, offset)?;
                    parts.push(format!("{name}={}", shifted.format(UTC_DATE_TIME_FORMAT)));
                    until = Some(shifted);
                }
                _ => parts.push(format!("{name}={value}")),
            }
        }

        Ok(Self {
            text: parts.join(";"),
            start,
            until,
            offset,
        })
    }

    /// The rule ends before it starts, so it has no occurrences.
    fn is_empty(&self) -> bool {
        self.until.is_some_and(|until| until < self.start)
    }

    fn instant(&self, occurrence: &DateTime<Tz>) -> ServiceResult<DateTime<Utc>> {
        occurrence
            .with_timezone(&Utc)
            .checked_sub_signed(self.offset)
            .ok_or_else(|| {
                ServiceError::InvalidDateTime(format!("occurrence {occurrence} out of range"))
            })
    }
}

/// A `DTSTART` part inside the RRULE overrides the component's start.
///
/// A `TZID` parameter cannot appear here: the part would hold a second `=` and is
/// rejected when the rule fields are parsed.
fn rule_start(value: &str, offset: TimeDelta) -> ServiceResult<NaiveDateTime> {
    if value.len() == UTC_DATE_TIME_LEN {
        let utc = NaiveDateTime::parse_from_str(value, UTC_DATE_TIME_FORMAT)
            .map_err(|e| ServiceError::InvalidDateTime(format!("RRULE DTSTART {value:?}: {e}")))?;
        return shift(utc, offset);
    }
    parse_local_date_time(value)
}

fn parse_until(value: &str) -> ServiceResult<NaiveDateTime> {
    if value.len() != UTC_DATE_TIME_LEN {
        return Err(ServiceError::InvalidRRule(format!(
            "until in timezone must be specified as UTC time: {value:?}"
        )));
    }
    NaiveDateTime::parse_from_str(value, UTC_DATE_TIME_FORMAT)
        .map_err(|e| ServiceError::InvalidRRule(format!("UNTIL {value:?}: {e}")))
}

fn shift(value: NaiveDateTime, offset: TimeDelta) -> ServiceResult<NaiveDateTime> {
    value.checked_add_signed(offset).ok_or_else(|| {
        ServiceError::InvalidDateTime(format!(
            "{} out of range",
            value.format(LOCAL_DATE_TIME_FORMAT)
        ))
    })
}

/// ## Summary
/// Expands a bounded rule into the template.
///
/// Appends one zone for the rule and one change per occurrence. A rule with no
/// occurrences still appends its zone.
///
/// ## Errors
/// Returns `ServiceError::InvalidRRule` for a non-UTC `UNTIL`, and
/// `ServiceError::Recurrence` when the recurrence cannot be parsed or validated.
/// Nothing is appended on error.
#[tracing::instrument(skip(template, rule), fields(name = %rule.name, polarity = %rule.polarity))]
pub fn expand_bounded(template: &mut Template, rule: &ZoneRule) -> ServiceResult<()> {
    let shifted = ShiftedRule::new(rule)?;

    let rrule: RRule<Unvalidated> = shifted.text.parse()?;

    let instants = if shifted.is_empty() {
        tracing::debug!(rrule = %rule.rrule, "UNTIL precedes start, no occurrences");
        Vec::new()
    } else {
        let rrule_set = rrule.build(shifted.start.and_utc().with_timezone(&Tz::UTC))?;

        let result = rrule_set.all(u16::MAX);
        if result.limited {
            return Err(ServiceError::InvalidRRule(format!(
                "rule {:?} has more than {} occurrences",
                rule.rrule,
                u16::MAX
            )));
        }
        result
            .dates
            .iter()
            .map(|occurrence| shifted.instant(occurrence))
            .collect::<ServiceResult<Vec<_>>>()?
    };

    let zone_index = template.push_zone(Zone {
        name: rule.name.clone(),
        offset: rule.offset_to,
        is_dst: rule.polarity.is_dst(),
    });
    let occurrences = instants.len();
    template
        .changes
        .extend(instants.into_iter().map(|instant| Change {
            instant,
            zone_index,
        }));

    tracing::debug!(zone_index, occurrences, "Expanded bounded rule");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vtimezone::rule::{Polarity, RuleFields};
    use chrono::{NaiveDate, TimeZone};
    use vtzif_core::types::UtcOffset;

    fn rule(rrule: &str, local_start: &str, offset_from: i32, offset_to: i32) -> ZoneRule {
        ZoneRule {
            polarity: Polarity::Daylight,
            local_start: NaiveDateTime::parse_from_str(local_start, LOCAL_DATE_TIME_FORMAT)
                .unwrap(),
            offset_from: UtcOffset::from_seconds(offset_from).unwrap(),
            offset_to: UtcOffset::from_seconds(offset_to).unwrap(),
            name: "CEST".to_string(),
            rrule: rrule.to_string(),
            fields: RuleFields::parse(rrule).unwrap(),
        }
    }

    #[test_log::test]
    fn count_one_yields_local_start_minus_offset() {
        let mut template = Template::new("test");
        let rule = rule("FREQ=YEARLY;COUNT=1", "19810329T020000", 3600, 7200);

        expand_bounded(&mut template, &rule).unwrap();

        assert_eq!(
            template.zones,
            vec![Zone {
                name: "CEST".to_string(),
                offset: UtcOffset::from_seconds(7200).unwrap(),
                is_dst: true,
            }]
        );
        assert_eq!(
            template.changes,
            vec![Change {
                instant: Utc.with_ymd_and_hms(1981, 3, 29, 1, 0, 0).unwrap(),
                zone_index: 0,
            }]
        );
    }

    #[test]
    fn yearly_rule_with_until() {
        let mut template = Template::new("test");
        let rule = rule(
            "FREQ=YEARLY;BYMONTH=3;BYDAY=-1SU;UNTIL=19830327T010000Z",
            "19810329T020000",
            3600,
            7200,
        );

        expand_bounded(&mut template, &rule).unwrap();

        let instants: Vec<_> = template.changes.iter().map(|c| c.instant).collect();
        assert_eq!(
            instants,
            vec![
                Utc.with_ymd_and_hms(1981, 3, 29, 1, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(1982, 3, 28, 1, 0, 0).unwrap(),
                Utc.with_ymd_and_hms(1983, 3, 27, 1, 0, 0).unwrap(),
            ]
        );
        assert!(template.changes.iter().all(|c| c.zone_index == 0));
    }

    #[test]
    fn negative_offset_shifts_forward() {
        let mut template = Template::new("test");
        let rule = rule("FREQ=YEARLY;COUNT=2", "20000402T020000", -5 * 3600, -4 * 3600);

        expand_bounded(&mut template, &rule).unwrap();

        assert_eq!(
            template.changes[0].instant,
            Utc.with_ymd_and_hms(2000, 4, 2, 7, 0, 0).unwrap()
        );
        assert_eq!(
            template.changes[1].instant,
            Utc.with_ymd_and_hms(2001, 4, 2, 7, 0, 0).unwrap()
        );
    }

    #[test]
    fn rrule_dtstart_part_replaces_start() {
        let mut template = Template::new("test");
        let rule = rule(
            "FREQ=YEARLY;COUNT=1;DTSTART=19900325T020000",
            "19810329T020000",
            3600,
            7200,
        );

        expand_bounded(&mut template, &rule).unwrap();

        assert_eq!(
            template.changes[0].instant,
            NaiveDate::from_ymd_opt(1990, 3, 25)
                .unwrap()
                .and_hms_opt(1, 0, 0)
                .unwrap()
                .and_utc()
        );
    }

    #[test_log::test]
    fn until_before_start_appends_zone_only() {
        let mut template = Template::new("test");
        let rule = rule(
            "FREQ=YEARLY;BYMONTH=3;BYDAY=-1SU;UNTIL=19800101T000000Z",
            "19810329T020000",
            3600,
            7200,
        );

        expand_bounded(&mut template, &rule).unwrap();

        assert_eq!(template.zones.len(), 1);
        assert_eq!(template.zones[0].name, "CEST");
        assert!(template.changes.is_empty());
    }

    #[test]
    fn never_matching_rule_appends_zone_only() {
        let mut template = Template::new("test");
        let rule = rule(
            "FREQ=YEARLY;BYMONTH=2;BYMONTHDAY=30;COUNT=1",
            "19810329T020000",
            3600,
            7200,
        );

        expand_bounded(&mut template, &rule).unwrap();

        assert_eq!(template.zones.len(), 1);
        assert!(template.changes.is_empty());
    }

    #[test]
    fn until_must_be_utc() {
        let mut template = Template::new("test");
        let rule = rule(
            "FREQ=YEARLY;UNTIL=19830327T010000",
            "19810329T020000",
            3600,
            7200,
        );

        let err = expand_bounded(&mut template, &rule).unwrap_err();

        assert!(err.to_string().contains("must be specified as UTC time"));
        assert!(template.zones.is_empty());
    }

    #[test]
    fn recurrence_errors_are_surfaced() {
        let mut template = Template::new("test");
        let rule = rule("FREQ=SOMETIMES;COUNT=1", "19810329T020000", 3600, 7200);

        let err = expand_bounded(&mut template, &rule).unwrap_err();

        assert!(matches!(err, ServiceError::Recurrence(_)), "{err}");
        assert!(template.zones.is_empty());
    }
}
