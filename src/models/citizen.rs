use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use super::wire::{lenient_string, optional_label, optional_lenient_string, wire_label_serde, WireLabel};

/// Opaque record identifier; the backend sends numbers, older exports strings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl Default for RecordId {
    fn default() -> Self {
        Self::Text(String::new())
    }
}

impl RecordId {
    /// Numeric when both sides are numbers, otherwise by display string
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a.cmp(b),
            _ => self.to_string().cmp(&other.to_string()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for RecordId {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Male => "Laki-laki",
            Self::Female => "Perempuan",
        }
    }
}

impl WireLabel for Gender {
    fn from_wire(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "" | "l" | "laki-laki" | "male" => Self::Male,
            _ => Self::Female,
        }
    }

    fn wire(&self) -> &'static str {
        match self {
            Self::Male => "L",
            Self::Female => "P",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResidencyStatus {
    #[default]
    Permanent,
    Leased,
    Temporary,
}

impl ResidencyStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Permanent => "Warga Tetap",
            Self::Leased => "Kontrak",
            Self::Temporary => "Sementara",
        }
    }

    pub fn all() -> &'static [Self] {
        &[Self::Permanent, Self::Leased, Self::Temporary]
    }
}

impl WireLabel for ResidencyStatus {
    fn from_wire(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "kontrak" | "leased" => Self::Leased,
            "sementara" | "temporary" => Self::Temporary,
            _ => Self::Permanent,
        }
    }

    fn wire(&self) -> &'static str {
        match self {
            Self::Permanent => "Tetap",
            Self::Leased => "Kontrak",
            Self::Temporary => "Sementara",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HouseholdRelation {
    Head,
    Spouse,
    Child,
    Parent,
    #[default]
    Other,
}

impl HouseholdRelation {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Head => "Kepala Keluarga",
            Self::Spouse => "Suami/Istri",
            Self::Child => "Anak",
            Self::Parent => "Orang Tua",
            Self::Other => "Lainnya",
        }
    }
}

impl WireLabel for HouseholdRelation {
    fn from_wire(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "kepala keluarga" | "kepala" | "head" => Self::Head,
            "istri" | "suami" | "suami/istri" | "spouse" => Self::Spouse,
            "anak" | "child" => Self::Child,
            "orang tua" | "parent" => Self::Parent,
            _ => Self::Other,
        }
    }

    fn wire(&self) -> &'static str {
        self.label()
    }
}

wire_label_serde!(Gender, ResidencyStatus, HouseholdRelation);

/// One row of the citizen registry (warga), as served by the backend
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CitizenRecord {
    pub id: RecordId,
    /// NIK; immutable once the record exists
    #[serde(rename = "nik", deserialize_with = "lenient_string")]
    pub national_id: String,
    /// Family card number (no_kk); shared by everyone in one household
    #[serde(
        rename = "no_kk",
        deserialize_with = "optional_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub family_card_id: Option<String>,
    #[serde(rename = "nama", deserialize_with = "lenient_string")]
    pub full_name: String,
    #[serde(rename = "rw", deserialize_with = "lenient_string")]
    pub district: String,
    #[serde(rename = "rt", deserialize_with = "lenient_string")]
    pub sub_district: String,
    #[serde(rename = "jenis_kelamin")]
    pub gender: Gender,
    #[serde(rename = "status_hunian")]
    pub residency_status: ResidencyStatus,
    #[serde(
        rename = "hubungan_keluarga",
        deserialize_with = "optional_label",
        skip_serializing_if = "Option::is_none"
    )]
    pub household_relation: Option<HouseholdRelation>,
    #[serde(
        rename = "no_hp",
        deserialize_with = "optional_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
}

impl CitizenRecord {
    pub fn new(
        id: impl Into<RecordId>,
        national_id: impl Into<String>,
        full_name: impl Into<String>,
        district: impl Into<String>,
        sub_district: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            national_id: national_id.into(),
            full_name: full_name.into(),
            district: district.into(),
            sub_district: sub_district.into(),
            ..Default::default()
        }
    }

    pub fn with_family_card(mut self, family_card_id: impl Into<String>) -> Self {
        let id = family_card_id.into();
        self.family_card_id = if id.trim().is_empty() { None } else { Some(id) };
        self
    }

    pub fn with_relation(mut self, relation: HouseholdRelation) -> Self {
        self.household_relation = Some(relation);
        self
    }

    /// Family card id, if the record belongs to a household
    pub fn household_key(&self) -> Option<&str> {
        self.family_card_id
            .as_deref()
            .filter(|id| !id.trim().is_empty())
    }

    /// Relation within the household; members without one count as `Other`
    pub fn relation(&self) -> HouseholdRelation {
        self.household_relation.unwrap_or_default()
    }

    pub fn is_marked_head(&self) -> bool {
        self.household_relation == Some(HouseholdRelation::Head)
    }

    pub fn location_label(&self) -> String {
        format!("RT {} / RW {}", self.sub_district, self.district)
    }

    /// Check the fields the registry form requires before submitting
    pub fn validate(&self) -> Result<(), CitizenValidationError> {
        let nik = self.national_id.trim();
        if nik.len() != NIK_LENGTH || !nik.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CitizenValidationError::InvalidNik(self.national_id.clone()));
        }

        if self.full_name.trim().is_empty() {
            return Err(CitizenValidationError::MissingName);
        }

        if self.sub_district.trim().is_empty() || self.district.trim().is_empty() {
            return Err(CitizenValidationError::MissingTerritory);
        }

        Ok(())
    }

    /// Validate an edit of `original`; the NIK may not change
    pub fn validate_update(&self, original: &CitizenRecord) -> Result<(), CitizenValidationError> {
        if self.national_id.trim() != original.national_id.trim() {
            return Err(CitizenValidationError::NikChanged);
        }
        self.validate()
    }
}

pub const NIK_LENGTH: usize = 16;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CitizenValidationError {
    #[error("NIK harus 16 digit angka (diterima: '{0}')")]
    InvalidNik(String),
    #[error("Nama lengkap wajib diisi")]
    MissingName,
    #[error("RT dan RW wajib diisi")]
    MissingTerritory,
    #[error("NIK tidak dapat diubah setelah data dibuat")]
    NikChanged,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn budi() -> CitizenRecord {
        CitizenRecord::new(1, "3201010101010001", "Budi Santoso", "05", "01")
    }

    #[test]
    fn test_deserialize_backend_row() {
        let json = r#"{
            "id": 7,
            "nik": "3201010101010001",
            "nama": "Sari",
            "rt": "01",
            "rw": 5,
            "no_kk": "900",
            "jenis_kelamin": "P",
            "status_hunian": "Kontrak",
            "hubungan_keluarga": "Kepala Keluarga",
            "no_hp": null
        }"#;

        let record: CitizenRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, RecordId::Number(7));
        assert_eq!(record.full_name, "Sari");
        assert_eq!(record.district, "5");
        assert_eq!(record.sub_district, "01");
        assert_eq!(record.household_key(), Some("900"));
        assert_eq!(record.gender, Gender::Female);
        assert_eq!(record.residency_status, ResidencyStatus::Leased);
        assert!(record.is_marked_head());
        assert_eq!(record.phone, None);
    }

    #[test]
    fn test_missing_fields_are_not_errors() {
        let record: CitizenRecord = serde_json::from_str(r#"{"id": "a", "nama": null, "no_kk": "  "}"#).unwrap();
        assert_eq!(record.full_name, "");
        assert_eq!(record.national_id, "");
        assert_eq!(record.household_key(), None);
        assert_eq!(record.household_relation, None);
        assert_eq!(record.relation(), HouseholdRelation::Other);
    }

    #[test]
    fn test_unknown_relation_is_other() {
        let record: CitizenRecord = serde_json::from_str(r#"{"hubungan_keluarga": "Sepupu"}"#).unwrap();
        assert_eq!(record.household_relation, Some(HouseholdRelation::Other));
    }

    #[test]
    fn test_serialize_uses_wire_labels() {
        let record = budi().with_family_card("900").with_relation(HouseholdRelation::Head);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["nik"], "3201010101010001");
        assert_eq!(value["no_kk"], "900");
        assert_eq!(value["jenis_kelamin"], "L");
        assert_eq!(value["status_hunian"], "Tetap");
        assert_eq!(value["hubungan_keluarga"], "Kepala Keluarga");
        assert!(value.get("no_hp").is_none());
    }

    #[test]
    fn test_validation() {
        assert!(budi().validate().is_ok());

        let short_nik = CitizenRecord {
            national_id: "123".into(),
            ..budi()
        };
        assert!(matches!(
            short_nik.validate(),
            Err(CitizenValidationError::InvalidNik(_))
        ));

        let no_name = CitizenRecord {
            full_name: "  ".into(),
            ..budi()
        };
        assert_eq!(no_name.validate(), Err(CitizenValidationError::MissingName));

        let no_rt = CitizenRecord {
            sub_district: String::new(),
            ..budi()
        };
        assert_eq!(no_rt.validate(), Err(CitizenValidationError::MissingTerritory));
    }

    #[test]
    fn test_nik_is_immutable() {
        let original = budi();
        let renamed = CitizenRecord {
            full_name: "Budi S.".into(),
            ..original.clone()
        };
        assert!(renamed.validate_update(&original).is_ok());

        let new_nik = CitizenRecord {
            national_id: "3201010101010002".into(),
            ..original.clone()
        };
        assert_eq!(
            new_nik.validate_update(&original),
            Err(CitizenValidationError::NikChanged)
        );
    }

    #[test]
    fn test_record_id_compare() {
        assert_eq!(RecordId::from(2).compare(&RecordId::from(10)), Ordering::Less);
        assert_eq!(RecordId::from("b").compare(&RecordId::from("a")), Ordering::Greater);
    }
}
