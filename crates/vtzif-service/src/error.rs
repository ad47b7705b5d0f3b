use thiserror::Error;

use crate::vtimezone::offset::OffsetError;
use crate::vtimezone::rule::Polarity;

/// Errors raised while converting a VTIMEZONE into a location template.
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("missing {0}")]
    MissingProperty(&'static str),

    #[error("invalid {property}: {source}")]
    InvalidOffset {
        property: &'static str,
        #[source]
        source: OffsetError,
    },

    #[error("invalid local date-time: {0}")]
    InvalidDateTime(String),

    #[error("invalid RRULE: {0}")]
    InvalidRRule(String),

    #[error("more than one unbounded {0} rule is not supported")]
    DuplicateUnboundedRule(Polarity),

    #[error("daylight saving rule without standard rule is not supported")]
    DaylightWithoutStandard,

    #[error("unsupported extend rule: {0}")]
    UnsupportedRule(String),

    #[error("invalid extend rule value: {0}")]
    InvalidRuleValue(String),

    #[error("zone name contains >: {0:?}")]
    InvalidZoneName(String),

    #[error("recurrence error: {0}")]
    Recurrence(#[from] rrule::RRuleError),

    #[error("unsupported component type {0:?}")]
    UnsupportedComponent(String),

    #[error(transparent)]
    RfcError(#[from] vtzif_rfc::error::RfcError),

    #[error(transparent)]
    CoreError(#[from] vtzif_core::error::CoreError),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
