//! Content line lexer for iCalendar (RFC 5545 §3.1).
//!
//! Handles line unfolding and tokenization of content lines.

use std::iter::Peekable;
use std::str::CharIndices;

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::ical::core::{ContentLine, Parameter};

/// Splits input into content lines, merging folded continuations.
///
/// Handles both CRLF and bare LF line endings. Lines starting with SP/HTAB are
/// continuations of the previous line; unfolding removes the line break and the
/// single whitespace character (no space is inserted). Returns 1-based line numbers.
#[must_use]
pub fn split_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (i, raw_line) in input.lines().enumerate() {
        let line = raw_line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        if let Some(continuation) = line.strip_prefix([' ', '\t']) {
            if let Some((_, prev)) = lines.last_mut() {
                prev.push_str(continuation);
            } else {
                lines.push((i + 1, continuation.to_string()));
            }
        } else if !line.contains(':') {
            // Lenient: a line without a colon continues the previous one.
            if let Some((_, prev)) = lines.last_mut() {
                prev.push_str(line);
            } else {
                lines.push((i + 1, line.to_string()));
            }
        } else {
            lines.push((i + 1, line.to_string()));
        }
    }

    lines
}

/// Parses a single content line.
///
/// Format: `name *(";" param) ":" value`
///
/// ## Errors
/// Returns an error if the line is malformed or contains invalid characters.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    let mut chars = line.char_indices().peekable();
    let mut name_end = None;

    // The property name ends at ';' or ':'
    while let Some(&(i, c)) = chars.peek() {
        if c == ';' || c == ':' {
            name_end = Some(i);
            break;
        }
        if !c.is_ascii_alphanumeric() && c != '-' {
            return Err(ParseError::new(
                ParseErrorKind::InvalidPropertyName,
                line_num,
                i + 1,
            ));
        }
        chars.next();
    }

    let Some(name_end) = name_end else {
        return Err(ParseError::new(
            ParseErrorKind::MissingColon,
            line_num,
            line.len(),
        ));
    };
    if name_end == 0 {
        return Err(ParseError::new(
            ParseErrorKind::MissingPropertyName,
            line_num,
            1,
        ));
    }

    let name = line[..name_end].to_ascii_uppercase();

    let mut params = Vec::new();
    let colon_pos = if line[name_end..].starts_with(':') {
        name_end
    } else {
        chars.next(); // consume the ';'
        loop {
            let (param, colon) = parse_parameter(&mut chars, line, line_num)?;
            params.push(param);
            if let Some(colon) = colon {
                break colon;
            }
        }
    };

    Ok(ContentLine {
        name,
        params,
        raw_value: line[colon_pos + 1..].to_string(),
    })
}

/// Parses a single parameter from the character stream.
///
/// Returns the parameter and, if the parameter list ended, the byte index of the ':'.
fn parse_parameter(
    chars: &mut Peekable<CharIndices<'_>>,
    line: &str,
    line_num: usize,
) -> ParseResult<(Parameter, Option<usize>)> {
    let start = chars.peek().map_or(line.len(), |&(i, _)| i);

    // Parameter name runs up to '='
    let mut name_end = start;
    while let Some(&(i, c)) = chars.peek() {
        if c == '=' {
            name_end = i;
            chars.next();
            break;
        }
        if !c.is_ascii_alphanumeric() && c != '-' {
            return Err(ParseError::new(
                ParseErrorKind::InvalidParameter,
                line_num,
                i + 1,
            ));
        }
        chars.next();
    }

    if name_end == start {
        return Err(ParseError::new(
            ParseErrorKind::InvalidParameter,
            line_num,
            start + 1,
        ));
    }

    let param_name = line[start..name_end].to_ascii_uppercase();

    // Values are comma-separated and may be quoted
    let mut values = Vec::new();
    loop {
        values.push(parse_param_value(chars, line, line_num)?);

        match chars.next() {
            Some((_, ',')) => {}
            Some((_, ';')) => return Ok((Parameter::with_values(param_name, values), None)),
            Some((i, ':')) => return Ok((Parameter::with_values(param_name, values), Some(i))),
            Some((i, c)) => {
                return Err(
                    ParseError::new(ParseErrorKind::InvalidParameter, line_num, i + 1)
                        .with_context(format!("unexpected character '{c}'")),
                );
            }
            None => {
                return Err(ParseError::new(
                    ParseErrorKind::MissingColon,
                    line_num,
                    line.len(),
                ));
            }
        }
    }
}

/// Parses a parameter value (possibly quoted, with RFC 6868 caret encoding).
fn parse_param_value(
    chars: &mut Peekable<CharIndices<'_>>,
    line: &str,
    line_num: usize,
) -> ParseResult<String> {
    let Some(&(start, first)) = chars.peek() else {
        return Err(ParseError::new(
            ParseErrorKind::InvalidParameter,
            line_num,
            line.len(),
        ));
    };

    if first != '"' {
        // Unquoted value ends at ',' ';' or ':'
        let mut end = start;
        while let Some(&(i, c)) = chars.peek() {
            if c == ',' || c == ';' || c == ':' {
                break;
            }
            end = i + c.len_utf8();
            chars.next();
        }
        return Ok(line[start..end].to_string());
    }

    chars.next(); // opening quote
    let mut value = String::new();
    while let Some((_, c)) = chars.next() {
        match c {
            '"' => return Ok(value),
            '^' => match chars.peek() {
                Some(&(_, '^')) => {
                    value.push('^');
                    chars.next();
                }
                Some(&(_, 'n')) => {
                    value.push('\n');
                    chars.next();
                }
                Some(&(_, '\'')) => {
                    value.push('"');
                    chars.next();
                }
                // Unknown escapes are kept verbatim
                _ => value.push('^'),
            },
            _ => value.push(c),
        }
    }

    Err(ParseError::new(
        ParseErrorKind::UnclosedQuote,
        line_num,
        start + 1,
    ))
}
