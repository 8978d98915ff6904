//! Territory filter and free-text search over the registry snapshot

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

use super::sort::compare_codes;
use crate::models::CitizenRecord;

/// Sentinel used by the UI for "no restriction"
pub const ALL: &str = "All";

/// One level of the territory filter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// "All" (or a blank value) means no restriction
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == ALL {
            Self::All
        } else {
            Self::Only(trimmed.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    /// Exact match against a record's raw territory value
    fn admits(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(code) => value == code,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "{}", ALL),
            Self::Only(code) => write!(f, "{}", code),
        }
    }
}

impl Serialize for Selection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Selection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::parse).unwrap_or_default())
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// Filter state of the registry screen.
///
/// The two territory levels depend on each other: picking an RW always resets
/// the RT level, otherwise a stale RT from another RW would silently empty the
/// result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegistryFilter {
    #[serde(rename = "rw")]
    district: Selection,
    #[serde(rename = "rt")]
    sub_district: Selection,
    pub query: String,
}

impl RegistryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn district(&self) -> &Selection {
        &self.district
    }

    /// RT level; only meaningful while an RW is selected
    pub fn sub_district(&self) -> &Selection {
        &self.sub_district
    }

    /// Select an RW and reset the RT level to "All"
    pub fn select_district(&mut self, selection: impl Into<Selection>) {
        self.district = selection.into();
        self.sub_district = Selection::All;
    }

    /// Select an RT within the current RW. Ignored while no RW is selected.
    pub fn select_sub_district(&mut self, selection: impl Into<Selection>) {
        if self.district.is_all() {
            return;
        }
        self.sub_district = selection.into();
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Search term with surrounding whitespace removed; `None` if blank
    pub fn search_term(&self) -> Option<&str> {
        let term = self.query.trim();
        (!term.is_empty()).then_some(term)
    }

    pub fn is_active(&self) -> bool {
        !self.district.is_all() || self.search_term().is_some()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Breadcrumb as shown above the table ("Desa > RW 05 > RT 01")
    pub fn breadcrumb(&self) -> String {
        let mut parts = vec!["Desa".to_string()];
        if let Selection::Only(rw) = &self.district {
            parts.push(format!("RW {}", rw));
            if let Selection::Only(rt) = &self.sub_district {
                parts.push(format!("RT {}", rt));
            }
        }
        parts.join(" > ")
    }

    fn admits_territory(&self, record: &CitizenRecord) -> bool {
        if self.district.is_all() {
            return true;
        }
        self.district.admits(&record.district) && self.sub_district.admits(&record.sub_district)
    }

    /// Name case-insensitively, NIK and KK literally
    fn admits_query(term: &str, lowered: &str, record: &CitizenRecord) -> bool {
        record.full_name.to_lowercase().contains(lowered)
            || record.national_id.contains(term)
            || record
                .family_card_id
                .as_deref()
                .is_some_and(|kk| kk.contains(term))
    }
}

/// Narrow the snapshot to what the current filter lets through.
///
/// Runs before grouping, so households only contain visible members.
pub fn apply_filters(records: &[CitizenRecord], filter: &RegistryFilter) -> Vec<CitizenRecord> {
    let term = filter.search_term();
    let lowered = term.map(str::to_lowercase);

    let filtered: Vec<CitizenRecord> = records
        .iter()
        .filter(|record| filter.admits_territory(record))
        .filter(|record| match (term, lowered.as_deref()) {
            (Some(term), Some(lowered)) => RegistryFilter::admits_query(term, lowered, record),
            _ => true,
        })
        .cloned()
        .collect();

    tracing::debug!(
        "Filter {} kept {} of {} records",
        filter.breadcrumb(),
        filtered.len(),
        records.len()
    );

    filtered
}

fn distinct_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<Selection> {
    let mut codes: Vec<&str> = values
        .filter(|v| !v.trim().is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    codes.sort_by(|a, b| compare_codes(a, b));

    std::iter::once(Selection::All)
        .chain(codes.into_iter().map(|c| Selection::Only(c.to_string())))
        .collect()
}

/// RW buttons: "All" followed by every RW present in the snapshot
pub fn district_options(records: &[CitizenRecord]) -> Vec<Selection> {
    distinct_sorted(records.iter().map(|r| r.district.as_str()))
}

/// RT buttons for the selected RW; empty while no RW is selected
pub fn sub_district_options(records: &[CitizenRecord], district: &Selection) -> Vec<Selection> {
    if district.is_all() {
        return Vec::new();
    }
    distinct_sorted(
        records
            .iter()
            .filter(|r| district.admits(&r.district))
            .map(|r| r.sub_district.as_str()),
    )
}
