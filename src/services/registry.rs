//! Everything the registry screen needs for one render

use serde::Serialize;

use super::access::{record_permissions, Capabilities, RecordPermissions};
use super::filter::{apply_filters, RegistryFilter};
use super::household::{group_households, Household};
use super::sort::{sort_records, SortState};
use crate::models::{CitizenRecord, UserScope};

/// A record with its action flags
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistryRow {
    #[serde(flatten)]
    pub record: CitizenRecord,
    #[serde(flatten)]
    pub permissions: RecordPermissions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseholdRows {
    pub family_card_id: String,
    /// Head first
    pub members: Vec<RegistryRow>,
}

impl HouseholdRows {
    pub fn head(&self) -> Option<&RegistryRow> {
        self.members.first()
    }
}

/// Derived view of the registry for one user, filter and sort order.
///
/// `rows` is the flat, sorted table. `households` and `standalone` group the
/// same filtered records in snapshot order, so the fallback head doesn't move
/// when the user changes the sort column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegistryPage {
    pub breadcrumb: String,
    pub capabilities: Capabilities,
    pub rows: Vec<RegistryRow>,
    pub households: Vec<HouseholdRows>,
    pub standalone: Vec<RegistryRow>,
}

impl RegistryPage {
    pub fn build(
        records: &[CitizenRecord],
        scope: Option<&UserScope>,
        filter: &RegistryFilter,
        sort: &SortState,
    ) -> Self {
        let visible = apply_filters(records, filter);
        let row = |record: &CitizenRecord| RegistryRow {
            permissions: record_permissions(scope, record),
            record: record.clone(),
        };

        let grouped = group_households(&visible);
        let households = grouped
            .households
            .iter()
            .map(|h: &Household| HouseholdRows {
                family_card_id: h.family_card_id.clone(),
                members: h.members.iter().map(row).collect(),
            })
            .collect();
        let standalone = grouped.standalone.iter().map(row).collect();

        let mut sorted = visible;
        sort_records(&mut sorted, sort);
        let rows = sorted.iter().map(row).collect();

        Self {
            breadcrumb: filter.breadcrumb(),
            capabilities: Capabilities::for_scope(scope),
            rows,
            households,
            standalone,
        }
    }

    pub fn visible_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows the user may change
    pub fn editable_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| !r.permissions.is_read_only())
            .count()
    }
}
