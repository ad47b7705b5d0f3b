//! iCalendar component types (RFC 5545 §3.4, §3.6.5).

use super::Property;
use super::property::names;

/// Component kind for iCalendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    /// VCALENDAR wrapper component.
    Calendar,
    /// VTIMEZONE component.
    Timezone,
    /// STANDARD sub-component of VTIMEZONE.
    Standard,
    /// DAYLIGHT sub-component of VTIMEZONE.
    Daylight,
    /// Any other component (VEVENT, VTODO, X-components, ...).
    Unknown,
}

impl ComponentKind {
    /// Returns the string name for this component kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Calendar => "VCALENDAR",
            Self::Timezone => "VTIMEZONE",
            Self::Standard => "STANDARD",
            Self::Daylight => "DAYLIGHT",
            Self::Unknown => "X-UNKNOWN",
        }
    }

    /// Parses a component kind from a string (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "VCALENDAR" => Self::Calendar,
            "VTIMEZONE" => Self::Timezone,
            "STANDARD" => Self::Standard,
            "DAYLIGHT" => Self::Daylight,
            _ => Self::Unknown,
        }
    }
}

impl std::fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An iCalendar component.
///
/// Components can contain properties and nested sub-components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    /// Component type.
    pub kind: ComponentKind,
    /// Original component name, uppercased (preserved for unknown components).
    pub name: String,
    /// Properties in order of appearance.
    pub properties: Vec<Property>,
    /// Nested sub-components in order of appearance.
    pub children: Vec<Component>,
}

impl Component {
    /// Creates a new component with the given kind.
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            name: kind.as_str().to_string(),
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates a component from its name as written in `BEGIN:`.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into().to_ascii_uppercase();
        Self {
            kind: ComponentKind::parse(&name),
            name,
            properties: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates a VTIMEZONE component.
    #[must_use]
    pub fn timezone() -> Self {
        Self::new(ComponentKind::Timezone)
    }

    /// Creates a STANDARD sub-component.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(ComponentKind::Standard)
    }

    /// Creates a DAYLIGHT sub-component.
    #[must_use]
    pub fn daylight() -> Self {
        Self::new(ComponentKind::Daylight)
    }

    /// Adds a property to this component.
    pub fn add_property(&mut self, prop: Property) {
        self.properties.push(prop);
    }

    /// Adds a child component.
    pub fn add_child(&mut self, child: Component) {
        self.children.push(child);
    }

    /// Returns the first property with the given name.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&Property> {
        let name_upper = name.to_ascii_uppercase();
        self.properties.iter().find(|p| p.name == name_upper)
    }

    /// Returns the TZID property value if present.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        Some(self.get_property(names::TZID)?.value())
    }

    /// Returns children of a specific kind.
    #[must_use]
    pub fn children_of_kind(&self, kind: ComponentKind) -> Vec<&Component> {
        self.children.iter().filter(|c| c.kind == kind).collect()
    }

    /// Returns all VTIMEZONE children.
    #[must_use]
    pub fn timezones(&self) -> Vec<&Component> {
        self.children_of_kind(ComponentKind::Timezone)
    }
}

/// Top-level iCalendar object wrapping a VCALENDAR component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ICalendar {
    /// The root VCALENDAR component.
    pub root: Component,
}

impl ICalendar {
    /// Returns all VTIMEZONE components.
    #[must_use]
    pub fn timezones(&self) -> Vec<&Component> {
        self.root.timezones()
    }

    /// Consumes the calendar and returns its VTIMEZONE components.
    #[must_use]
    pub fn into_timezones(self) -> Vec<Component> {
        self.root
            .children
            .into_iter()
            .filter(|c| c.kind == ComponentKind::Timezone)
            .collect()
    }
}

impl Default for ICalendar {
    fn default() -> Self {
        Self {
            root: Component::new(ComponentKind::Calendar),
        }
    }
}
