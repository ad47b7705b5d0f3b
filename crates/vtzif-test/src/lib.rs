//! vtzif integration test support.
//!
//! Re-exports the workspace crates under one path for the tests in `tests/`.

pub mod component {
    pub use vtzif_app::convert;
    pub use vtzif_core::{config, types};
    pub use vtzif_rfc::rfc::{ical, tzif};
    pub use vtzif_service::vtimezone;

    pub mod error {
        pub use vtzif_app::error::{AppError, AppResult};
        pub use vtzif_core::error::{CoreError, CoreResult};
        pub use vtzif_rfc::error::{RfcError, RfcResult};
        pub use vtzif_service::error::{ServiceError, ServiceResult};
    }
}
