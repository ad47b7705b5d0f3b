//! VTIMEZONE to location template conversion.
//!
//! Rules bounded by `COUNT` or `UNTIL` are expanded into explicit zones and changes.
//! Rules that repeat forever become the template's POSIX extend string.

pub mod expand;
pub mod extend;
pub mod offset;
pub mod rule;
pub mod slot;

use vtzif_core::types::Template;
use vtzif_rfc::rfc::ical::{Component, ComponentKind};

use self::expand::expand_bounded;
use self::extend::extend_string;
use self::rule::{Polarity, parse_rule};
use self::slot::UnboundedSlot;
use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Converts a VTIMEZONE component into a location template.
///
/// Children are processed in order. Each must be STANDARD or DAYLIGHT. Zones keep the
/// order in which bounded rules appear and changes are sorted by instant.
///
/// ## Errors
/// Returns the first error raised by any child. No partial template is returned.
#[tracing::instrument(skip(vtimezone), fields(children = vtimezone.children.len()))]
pub fn to_location_template(name: &str, vtimezone: &Component) -> ServiceResult<Template> {
    let mut template = Template::new(name);
    let mut standard = UnboundedSlot::new(Polarity::Standard);
    let mut daylight = UnboundedSlot::new(Polarity::Daylight);

    for child in &vtimezone.children {
        let polarity = match child.kind {
            ComponentKind::Standard => Polarity::Standard,
            ComponentKind::Daylight => Polarity::Daylight,
            _ => return Err(ServiceError::UnsupportedComponent(child.name.clone())),
        };

        let rule = parse_rule(child, polarity)?;
        if rule.is_unbounded() {
            tracing::debug!(%polarity, name = %rule.name, "Unbounded rule");
            match polarity {
                Polarity::Standard => standard.set(rule)?,
                Polarity::Daylight => daylight.set(rule)?,
            }
        } else {
            tracing::debug!(%polarity, name = %rule.name, "Bounded rule");
            expand_bounded(&mut template, &rule)?;
        }
    }

    template.extend = extend_string(standard.rule(), daylight.rule())?;
    template.sort_changes();
    template.validate()?;

    tracing::debug!(
        zones = template.zones.len(),
        changes = template.changes.len(),
        extend = %template.extend,
        "Built location template"
    );

    Ok(template)
}
