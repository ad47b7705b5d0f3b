//! iCalendar document parser (RFC 5545).
//!
//! Builds the component tree from content lines.

use std::iter::Peekable;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{parse_content_line, split_lines};
use crate::rfc::ical::core::{Component, ComponentKind, ContentLine, ICalendar, Property};

/// Parses a single iCalendar document from a string.
///
/// ## Errors
///
/// Returns an error if the input is not a single valid VCALENDAR object.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ParseResult<ICalendar> {
    let mut calendars = parse_stream(input)?;
    if calendars.len() > 1 {
        return Err(ParseError::new(ParseErrorKind::MismatchedComponent, 1, 1)
            .with_context(format!("expected one VCALENDAR, found {}", calendars.len())));
    }
    calendars
        .pop()
        .ok_or_else(|| ParseError::new(ParseErrorKind::MissingBegin, 1, 1))
}

/// Parses a stream of concatenated VCALENDAR objects.
///
/// ## Errors
///
/// Returns an error if the input is empty, if any object is malformed, or if a
/// top-level object is not a VCALENDAR.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse_stream(input: &str) -> ParseResult<Vec<ICalendar>> {
    let lines = split_lines(input);

    if lines.is_empty() {
        tracing::warn!("Empty iCalendar input");
        return Err(ParseError::new(ParseErrorKind::MissingBegin, 1, 1)
            .with_context("empty input"));
    }

    tracing::debug!(count = lines.len(), "Split lines");

    let content_lines: Vec<(usize, ContentLine)> = lines
        .into_iter()
        .map(|(line_num, line)| parse_content_line(&line, line_num).map(|cl| (line_num, cl)))
        .collect::<ParseResult<_>>()?;

    let mut iter = content_lines.into_iter().peekable();
    let mut calendars = Vec::new();

    while let Some((line_num, begin_line)) = iter.next() {
        if begin_line.name != "BEGIN" {
            return Err(ParseError::new(ParseErrorKind::MissingBegin, line_num, 1)
                .with_context(format!("unexpected {} outside a component", begin_line.name)));
        }

        let root = parse_component(&mut iter, line_num, &begin_line.raw_value)?;
        if root.kind != ComponentKind::Calendar {
            tracing::warn!(name = %root.name, "Root component is not VCALENDAR");
            return Err(ParseError::new(ParseErrorKind::MissingBegin, line_num, 1)
                .with_context(format!("expected VCALENDAR, got {}", root.name)));
        }
        calendars.push(ICalendar { root });
    }

    tracing::debug!(count = calendars.len(), "iCalendar stream parsed");

    Ok(calendars)
}

/// Parses a component whose BEGIN line has already been consumed.
fn parse_component(
    iter: &mut Peekable<impl Iterator<Item = (usize, ContentLine)>>,
    begin_line_num: usize,
    component_name: &str,
) -> ParseResult<Component> {
    let mut component = Component::named(component_name);
    let mut last_line_num = begin_line_num;

    loop {
        let Some((line_num, content_line)) = iter.next() else {
            return Err(
                ParseError::new(ParseErrorKind::MissingEnd, last_line_num, 1)
                    .with_context(format!("missing END:{}", component.name)),
            );
        };
        last_line_num = line_num;

        match content_line.name.as_str() {
            "BEGIN" => {
                let nested = parse_component(iter, line_num, &content_line.raw_value)?;
                component.children.push(nested);
            }
            "END" => {
                let end_name = content_line.raw_value.to_ascii_uppercase();
                if end_name != component.name {
                    return Err(
                        ParseError::new(ParseErrorKind::MismatchedComponent, line_num, 1)
                            .with_context(format!(
                                "expected END:{}, got END:{end_name}",
                                component.name
                            )),
                    );
                }
                break;
            }
            _ => component
                .properties
                .push(Property::from_content_line(content_line)),
        }
    }

    tracing::trace!(
        name = %component.name,
        properties = component.properties.len(),
        children = component.children.len(),
        "Parsed component"
    );

    Ok(component)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRAGUE: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Test//Test//EN\r\n\
BEGIN:VTIMEZONE\r\n\
TZID:Europe/Prague\r\n\
BEGIN:DAYLIGHT\r\n\
TZOFFSETFROM:+0100\r\n\
TZOFFSETTO:+0200\r\n\
TZNAME:CEST\r\n\
DTSTART:19700329T020000\r\n\
RRULE:FREQ=YEARLY;BYMONTH=3;BYDAY=-1SU\r\n\
END:DAYLIGHT\r\n\
BEGIN:STANDARD\r\n\
TZOFFSETFROM:+0200\r\n\
TZOFFSETTO:+0100\r\n\
TZNAME:CET\r\n\
DTSTART:19701025T030000\r\n\
RRULE:FREQ=YEARLY;BYMONTH=10;BYDAY=-1SU\r\n\
END:STANDARD\r\n\
END:VTIMEZONE\r\n\
END:VCALENDAR\r\n";

    #[test_log::test]
    fn parse_vtimezone() {
        let ical = parse(PRAGUE).unwrap();
        let timezones = ical.timezones();
        assert_eq!(timezones.len(), 1);

        let tz = timezones[0];
        assert_eq!(tz.tzid(), Some("Europe/Prague"));
        assert_eq!(tz.children.len(), 2);
        assert_eq!(tz.children[0].kind, ComponentKind::Daylight);
        assert_eq!(tz.children[1].kind, ComponentKind::Standard);

        let rrule = tz.children[1].get_property("RRULE").unwrap();
        assert_eq!(rrule.value(), "FREQ=YEARLY;BYMONTH=10;BYDAY=-1SU");
    }

    #[test]
    fn parse_stream_reads_concatenated_calendars() {
        let input = format!("{PRAGUE}{PRAGUE}");
        let calendars = parse_stream(&input).unwrap();
        assert_eq!(calendars.len(), 2);
        assert!(parse(&input).is_err());
    }

    #[test]
    fn parse_empty_input() {
        let err = parse_stream("\r\n\r\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingBegin);
    }

    #[test]
    fn parse_missing_begin() {
        let err = parse("VERSION:2.0\r\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingBegin);
    }

    #[test]
    fn parse_root_must_be_vcalendar() {
        let input = "BEGIN:VTIMEZONE\r\nTZID:X\r\nEND:VTIMEZONE\r\n";
        let err = parse(input).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingBegin);
    }

    #[test]
    fn parse_mismatched_end() {
        let input = "\
BEGIN:VCALENDAR\r\n\
BEGIN:VTIMEZONE\r\n\
END:STANDARD\r\n";
        let err = parse(input).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MismatchedComponent);
        assert_eq!(err.line, 3);
    }

    #[test]
    fn parse_missing_end() {
        let input = "BEGIN:VCALENDAR\r\nBEGIN:VTIMEZONE\r\nTZID:X\r\n";
        let err = parse(input).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingEnd);
    }
}
