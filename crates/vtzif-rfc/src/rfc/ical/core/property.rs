//! iCalendar property and content line types (RFC 5545 §3.1, §3.8).

use super::Parameter;

/// A raw content line as parsed from iCalendar text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<Parameter>,
    /// Raw value string (after unfolding, before unescaping).
    pub raw_value: String,
}

impl ContentLine {
    /// Creates a new content line.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            raw_value: value.into(),
        }
    }

    /// Returns the parameter with the given name.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&Parameter> {
        let name_upper = name.to_ascii_uppercase();
        self.params.iter().find(|p| p.name == name_upper)
    }

    /// Returns the TZID parameter if present.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        self.get_param("TZID")?.value()
    }
}

/// An iCalendar property.
///
/// The value is kept exactly as written; consumers parse the properties they need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<Parameter>,
    /// Raw value string.
    pub raw_value: String,
}

impl Property {
    /// Creates a property with a raw value.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            raw_value: value.into(),
        }
    }

    /// Creates a property from a parsed content line.
    #[must_use]
    pub fn from_content_line(cl: ContentLine) -> Self {
        Self {
            name: cl.name,
            params: cl.params,
            raw_value: cl.raw_value,
        }
    }

    /// Returns the parameter with the given name.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&Parameter> {
        let name_upper = name.to_ascii_uppercase();
        self.params.iter().find(|p| p.name == name_upper)
    }

    /// Returns the value of a parameter.
    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        self.get_param(name)?.value()
    }

    /// Adds a parameter to this property.
    pub fn add_param(&mut self, param: Parameter) {
        self.params.push(param);
    }

    /// Returns the raw value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.raw_value
    }
}

/// Property names read from VTIMEZONE components.
pub mod names {
    pub const DTSTART: &str = "DTSTART";
    pub const RRULE: &str = "RRULE";
    pub const TZID: &str = "TZID";
    pub const TZNAME: &str = "TZNAME";
    pub const TZOFFSETFROM: &str = "TZOFFSETFROM";
    pub const TZOFFSETTO: &str = "TZOFFSETTO";
}
