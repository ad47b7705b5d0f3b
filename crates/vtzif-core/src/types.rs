//! Location template model shared by the transform and the TZif encoder.

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::{CoreError, CoreResult};

/// A fixed UTC offset in whole seconds east of UTC, limited to ±23:59:59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct UtcOffset(i32);

impl UtcOffset {
    /// Largest magnitude an offset may have, in seconds.
    pub const MAX_SECONDS: i32 = 24 * 3600 - 1;

    pub const UTC: Self = Self(0);

    /// ## Summary
    /// Creates an offset from seconds east of UTC.
    ///
    /// ## Errors
    /// Returns `CoreError::OffsetOutOfRange` if the magnitude exceeds 23:59:59.
    pub fn from_seconds(seconds: i32) -> CoreResult<Self> {
        if seconds.unsigned_abs() > Self::MAX_SECONDS.unsigned_abs() {
            return Err(CoreError::OffsetOutOfRange(i64::from(seconds)));
        }
        Ok(Self(seconds))
    }

    /// ## Summary
    /// Builds an offset from its clock components. The components must already be in range.
    ///
    /// ## Errors
    /// Returns `CoreError::OffsetOutOfRange` if the combined value exceeds 23:59:59.
    pub fn from_hms(negative: bool, hours: u8, minutes: u8, seconds: u8) -> CoreResult<Self> {
        let total = i32::from(hours) * 3600 + i32::from(minutes) * 60 + i32::from(seconds);
        Self::from_seconds(if negative { -total } else { total })
    }

    #[must_use]
    pub const fn seconds(self) -> i32 {
        self.0
    }

    #[must_use]
    pub fn as_duration(self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.0))
    }

    /// Returns the offset with its sign flipped. The range is symmetric, so this cannot fail.
    #[must_use]
    pub const fn negate(self) -> Self {
        Self(-self.0)
    }
}

impl std::ops::Neg for UtcOffset {
    type Output = Self;

    fn neg(self) -> Self {
        self.negate()
    }
}

impl std::fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { '-' } else { '+' };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{sign}{:02}:{:02}:{:02}",
            abs / 3600,
            abs % 3600 / 60,
            abs % 60
        )
    }
}

/// One local time type a transition can switch into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Zone {
    /// Abbreviation, e.g. `CEST`. May be empty.
    pub name: String,
    /// Offset of local time from UTC.
    pub offset: UtcOffset,
    /// Whether this is daylight saving time.
    pub is_dst: bool,
}

/// One concrete transition into a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Change {
    /// Absolute instant at which the zone takes effect.
    pub instant: DateTime<Utc>,
    /// Index into [`Template::zones`].
    pub zone_index: usize,
}

/// Explicit description of a location's time-zone history.
///
/// `changes` is sorted by instant and every `zone_index` points into `zones`.
/// `extend` is a POSIX TZ string describing time after the last change, or empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    pub name: String,
    pub zones: Vec<Zone>,
    pub changes: Vec<Change>,
    pub extend: String,
}

impl Template {
    /// Creates an empty template with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Appends a zone and returns its index.
    pub fn push_zone(&mut self, zone: Zone) -> usize {
        self.zones.push(zone);
        self.zones.len() - 1
    }

    /// Returns the zone a change switches into.
    #[must_use]
    pub fn zone_of(&self, change: &Change) -> Option<&Zone> {
        self.zones.get(change.zone_index)
    }

    /// Sorts changes by instant, keeping the input order of equal instants.
    pub fn sort_changes(&mut self) {
        self.changes.sort_by_key(|change| change.instant);
    }

    /// ## Summary
    /// Checks the ordering and reference invariants.
    ///
    /// ## Errors
    /// Returns `CoreError::InvariantViolation` if changes are unsorted or reference a missing zone.
    pub fn validate(&self) -> CoreResult<()> {
        if self
            .changes
            .iter()
            .any(|change| change.zone_index >= self.zones.len())
        {
            return Err(CoreError::InvariantViolation(
                "change references a zone outside the zone list",
            ));
        }
        if self
            .changes
            .windows(2)
            .any(|pair| pair[0].instant > pair[1].instant)
        {
            return Err(CoreError::InvariantViolation(
                "changes are not sorted by instant",
            ));
        }
        Ok(())
    }
}
