//! HaloWarga - registry access and household grouping engine
//!
//! Derives the citizen registry view of the village portal from a snapshot
//! fetched by the data layer: who may edit which row, which records form a
//! household, and what the current filter and sort leave visible.

pub mod models;
pub mod services;
pub mod utils;

// Re-exports
pub use models::*;
pub use services::{
    apply_filters, can_access, group_households, record_permissions, RegistryFilter, RegistryPage,
    SortState,
};
pub use utils::{AppError, AppResult};
