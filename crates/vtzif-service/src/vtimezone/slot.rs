use super::rule::{Polarity, ZoneRule};
use crate::error::{ServiceError, ServiceResult};

/// Holds the single unbounded rule allowed for one polarity.
#[derive(Debug)]
pub struct UnboundedSlot {
    polarity: Polarity,
    rule: Option<ZoneRule>,
}

impl UnboundedSlot {
    #[must_use]
    pub const fn new(polarity: Polarity) -> Self {
        Self {
            polarity,
            rule: None,
        }
    }

    /// ## Summary
    /// Stores the slot's rule.
    ///
    /// ## Errors
    /// Returns `ServiceError::DuplicateUnboundedRule` if the slot is already occupied.
    pub fn set(&mut self, rule: ZoneRule) -> ServiceResult<()> {
        if self.rule.is_some() {
            return Err(ServiceError::DuplicateUnboundedRule(self.polarity));
        }
        self.rule = Some(rule);
        Ok(())
    }

    #[must_use]
    pub const fn rule(&self) -> Option<&ZoneRule> {
        self.rule.as_ref()
    }
}
