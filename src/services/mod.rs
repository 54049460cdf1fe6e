//! Service layer for business logic.
//!
//! Separates business logic from UI handlers for better testability and maintainability.

pub mod import_service;

pub use import_service::{ImportService, ImportSummary};
