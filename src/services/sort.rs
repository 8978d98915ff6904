//! Column sorting for the flat registry table

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::{CitizenRecord, TerritoryCode};

/// Sortable registry column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortField {
    #[serde(rename = "id")]
    Id,
    #[serde(rename = "nik")]
    NationalId,
    #[default]
    #[serde(rename = "nama")]
    FullName,
    #[serde(rename = "no_kk")]
    FamilyCard,
    #[serde(rename = "rw")]
    District,
    #[serde(rename = "rt")]
    SubDistrict,
}

impl SortField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Id => "ID",
            Self::NationalId => "NIK",
            Self::FullName => "Nama",
            Self::FamilyCard => "No. KK",
            Self::District => "RW",
            Self::SubDistrict => "Lokasi",
        }
    }

    /// Parse a column key as used by the table headers ("nik", "nama", ...)
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_lowercase().as_str() {
            "id" => Some(Self::Id),
            "nik" => Some(Self::NationalId),
            "nama" => Some(Self::FullName),
            "no_kk" | "kk" => Some(Self::FamilyCard),
            "rw" => Some(Self::District),
            "rt" => Some(Self::SubDistrict),
            _ => None,
        }
    }

    fn compare(&self, a: &CitizenRecord, b: &CitizenRecord) -> Ordering {
        match self {
            Self::Id => a.id.compare(&b.id),
            Self::NationalId => a.national_id.cmp(&b.national_id),
            Self::FullName => a.full_name.cmp(&b.full_name),
            Self::FamilyCard => a
                .family_card_id
                .as_deref()
                .unwrap_or("")
                .cmp(b.family_card_id.as_deref().unwrap_or("")),
            Self::District => compare_codes(&a.district, &b.district),
            Self::SubDistrict => compare_codes(&a.sub_district, &b.sub_district),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Active sort column and direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SortState {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortState {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Header click: same column while ascending flips to descending,
    /// anything else starts ascending on the requested column
    pub fn request(&mut self, field: SortField) {
        self.direction = if self.field == field && self.direction == SortDirection::Asc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        };
        self.field = field;
    }
}

/// Territory codes compare numerically when both parse
pub(crate) fn compare_codes(a: &str, b: &str) -> Ordering {
    match (TerritoryCode::parse(a), TerritoryCode::parse(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}

/// Stable sort; records with equal keys keep their input order
pub fn sort_records(records: &mut [CitizenRecord], state: &SortState) {
    records.sort_by(|a, b| {
        let ordering = state.field.compare(a, b);
        match state.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RecordId;

    fn names(records: &[CitizenRecord]) -> Vec<&str> {
        records.iter().map(|r| r.full_name.as_str()).collect()
    }

    fn sample() -> Vec<CitizenRecord> {
        vec![
            CitizenRecord::new(1, "333", "Citra", "05", "10"),
            CitizenRecord::new(2, "111", "Adi", "05", "2"),
            CitizenRecord::new(3, "222", "Budi", "04", "02"),
            CitizenRecord::new(4, "444", "Adi", "06", "01"),
        ]
    }

    #[test]
    fn test_request_toggles() {
        let mut state = SortState::default();
        assert_eq!(state.field, SortField::FullName);
        assert_eq!(state.direction, SortDirection::Asc);

        state.request(SortField::FullName);
        assert_eq!(state.direction, SortDirection::Desc);

        state.request(SortField::FullName);
        assert_eq!(state.direction, SortDirection::Asc);

        state.request(SortField::FullName);
        state.request(SortField::NationalId);
        assert_eq!(state, SortState::new(SortField::NationalId, SortDirection::Asc));
    }

    #[test]
    fn test_sort_by_name_is_stable() {
        let mut records = sample();
        sort_records(&mut records, &SortState::default());
        assert_eq!(names(&records), vec!["Adi", "Adi", "Budi", "Citra"]);
        // Equal names keep input order
        assert_eq!(records[0].id, RecordId::from(2));
        assert_eq!(records[1].id, RecordId::from(4));

        sort_records(&mut records, &SortState::new(SortField::FullName, SortDirection::Desc));
        assert_eq!(names(&records), vec!["Citra", "Budi", "Adi", "Adi"]);
    }

    #[test]
    fn test_sort_territory_numerically() {
        let mut records = sample();
        sort_records(&mut records, &SortState::new(SortField::SubDistrict, SortDirection::Asc));
        let rts: Vec<&str> = records.iter().map(|r| r.sub_district.as_str()).collect();
        assert_eq!(rts, vec!["01", "2", "02", "10"]);
    }

    #[test]
    fn test_from_key() {
        assert_eq!(SortField::from_key("NIK"), Some(SortField::NationalId));
        assert_eq!(SortField::from_key("lokasi"), None);
    }
}
