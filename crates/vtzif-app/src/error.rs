use thiserror::Error;

/// Application-level errors (CLI layer)
#[derive(Error, Debug)]
pub enum AppError {
    #[error("no VTIMEZONE found")]
    NoTimezone,

    #[error("only one VTIMEZONE can be present")]
    MultipleTimezones,

    #[error(transparent)]
    ServiceError(#[from] vtzif_service::error::ServiceError),

    #[error(transparent)]
    RfcError(#[from] vtzif_rfc::error::RfcError),

    #[error(transparent)]
    CoreError(#[from] vtzif_core::error::CoreError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
