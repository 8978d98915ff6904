//! Registry engine and the smaller portal rules around it
//!
//! Everything here is a pure function of its inputs: snapshots in, derived
//! views out. Nothing is cached between calls.

pub mod access;
pub mod announcement;
pub mod aspiration;
pub mod dashboard;
pub mod filter;
pub mod household;
pub mod ledger;
pub mod registry;
pub mod sort;

pub use access::{
    can_access, lock_territory, prepare_citizen_update, prepare_new_citizen, record_permissions,
    Capabilities, RecordPermissions,
};
pub use dashboard::{Dashboard, DashboardStats, PopulationBar};
pub use filter::{apply_filters, district_options, sub_district_options, RegistryFilter, Selection};
pub use household::{group_households, Household, HouseholdView};
pub use ledger::{summarize, LedgerSummary};
pub use registry::{HouseholdRows, RegistryPage, RegistryRow};
pub use sort::{sort_records, SortDirection, SortField, SortState};
