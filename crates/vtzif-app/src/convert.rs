use vtzif_core::config::Settings;
use vtzif_rfc::error::RfcError;
use vtzif_rfc::rfc::ical::{ICalendar, parse_stream};
use vtzif_rfc::rfc::tzif::{TzifVersion, encode};
use vtzif_service::vtimezone::to_location_template;

use crate::error::{AppError, AppResult};

/// ## Summary
/// Converts the single VTIMEZONE found in an iCalendar stream into TZif bytes.
///
/// The template is named after `template.name` when configured, otherwise after the
/// VTIMEZONE's `TZID`.
///
/// ## Errors
/// Returns an error if the input does not parse, does not hold exactly one VTIMEZONE,
/// or the VTIMEZONE cannot be converted or encoded.
#[tracing::instrument(skip(input, settings), fields(input_len = input.len()))]
pub fn convert(input: &str, settings: &Settings) -> AppResult<Vec<u8>> {
    let calendars = parse_stream(input).map_err(RfcError::from)?;

    let mut timezones = calendars.into_iter().flat_map(ICalendar::into_timezones);
    let vtimezone = timezones.next().ok_or(AppError::NoTimezone)?;
    if timezones.next().is_some() {
        return Err(AppError::MultipleTimezones);
    }

    let name = settings
        .template
        .name
        .clone()
        .or_else(|| vtimezone.tzid().map(str::to_string))
        .unwrap_or_default();

    let template = to_location_template(&name, &vtimezone)?;
    let version = TzifVersion::from_number(settings.output.version)?;
    let data = encode(&template, version)?;

    tracing::info!(
        name = %template.name,
        zones = template.zones.len(),
        changes = template.changes.len(),
        bytes = data.len(),
        "Converted VTIMEZONE"
    );

    Ok(data)
}
