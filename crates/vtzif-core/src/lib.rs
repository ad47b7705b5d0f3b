//! Shared types, errors and configuration for the vtzif workspace.

pub mod config;
pub mod error;
pub mod types;
