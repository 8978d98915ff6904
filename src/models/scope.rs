use serde::{Deserialize, Serialize};

use super::citizen::RecordId;
use super::territory::TerritoryCode;
use super::wire::{optional_lenient_string, wire_label_serde, WireLabel};

/// Portal role, ordered from least to most privileged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Role {
    /// Ordinary citizen (warga); read-only
    #[default]
    Resident,
    /// Head of an RT
    SubdistrictOfficer,
    /// Head of an RW
    DistrictOfficer,
    /// Village administration (desa)
    VillageAdmin,
    Superadmin,
}

impl Role {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Resident => "Warga",
            Self::SubdistrictOfficer => "Ketua RT",
            Self::DistrictOfficer => "Ketua RW",
            Self::VillageAdmin => "Admin Desa",
            Self::Superadmin => "Admin",
        }
    }

    /// Village-wide roles that bypass territory checks
    pub fn is_village_wide(&self) -> bool {
        matches!(self, Self::VillageAdmin | Self::Superadmin)
    }

    pub fn all() -> &'static [Self] {
        &[
            Self::Resident,
            Self::SubdistrictOfficer,
            Self::DistrictOfficer,
            Self::VillageAdmin,
            Self::Superadmin,
        ]
    }
}

impl WireLabel for Role {
    /// Unknown roles get the least privilege
    fn from_wire(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "rt" => Self::SubdistrictOfficer,
            "rw" => Self::DistrictOfficer,
            "desa" => Self::VillageAdmin,
            "admin" => Self::Superadmin,
            _ => Self::Resident,
        }
    }

    fn wire(&self) -> &'static str {
        match self {
            Self::Resident => "warga",
            Self::SubdistrictOfficer => "rt",
            Self::DistrictOfficer => "rw",
            Self::VillageAdmin => "desa",
            Self::Superadmin => "admin",
        }
    }
}

wire_label_serde!(Role);

/// The logged-in user's role and the territory they administer
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserScope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    pub role: Role,
    /// RW the user administers; only meaningful for RT/RW officers.
    /// Account rows from the user list call it `rw`.
    #[serde(
        rename = "rw_scope",
        alias = "rw",
        deserialize_with = "optional_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub district_scope: Option<String>,
    /// RT the user administers; only meaningful for RT officers
    #[serde(
        rename = "rt_scope",
        alias = "rt",
        deserialize_with = "optional_lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub sub_district_scope: Option<String>,
}

impl UserScope {
    pub fn resident() -> Self {
        Self::default()
    }

    pub fn village_admin() -> Self {
        Self {
            role: Role::VillageAdmin,
            ..Default::default()
        }
    }

    pub fn superadmin() -> Self {
        Self {
            role: Role::Superadmin,
            ..Default::default()
        }
    }

    pub fn district_officer(rw: impl Into<String>) -> Self {
        Self {
            role: Role::DistrictOfficer,
            district_scope: Some(rw.into()),
            ..Default::default()
        }
    }

    pub fn subdistrict_officer(rw: impl Into<String>, rt: impl Into<String>) -> Self {
        Self {
            role: Role::SubdistrictOfficer,
            district_scope: Some(rw.into()),
            sub_district_scope: Some(rt.into()),
            ..Default::default()
        }
    }

    /// Territory shown next to an account in account management
    pub fn scope_label(&self) -> String {
        let rw = self.district_scope.as_deref().unwrap_or("?");
        let rt = self.sub_district_scope.as_deref().unwrap_or("?");
        match self.role {
            Role::VillageAdmin | Role::Superadmin => "Seluruh Desa".to_string(),
            Role::DistrictOfficer => format!("RW {}", rw),
            Role::SubdistrictOfficer => format!("RT {} / RW {}", rt, rw),
            Role::Resident => "-".to_string(),
        }
    }

    /// An officer account needs the territory codes its role is bound to
    pub fn validate(&self) -> Result<(), ScopeValidationError> {
        let has = |code: &Option<String>| code.as_deref().and_then(TerritoryCode::parse).is_some();

        match self.role {
            Role::SubdistrictOfficer => {
                if !has(&self.district_scope) {
                    return Err(ScopeValidationError::MissingDistrict);
                }
                if !has(&self.sub_district_scope) {
                    return Err(ScopeValidationError::MissingSubDistrict);
                }
            }
            Role::DistrictOfficer => {
                if !has(&self.district_scope) {
                    return Err(ScopeValidationError::MissingDistrict);
                }
            }
            _ => {}
        }

        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScopeValidationError {
    #[error("Akun RT/RW wajib memiliki nomor RW yang valid")]
    MissingDistrict,
    #[error("Akun RT wajib memiliki nomor RT yang valid")]
    MissingSubDistrict,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_session_user() {
        let json = r#"{"id": 3, "full_name": "Pak RT", "role": "rt", "rt_scope": 1, "rw_scope": "05"}"#;
        let scope: UserScope = serde_json::from_str(json).unwrap();
        assert_eq!(scope.role, Role::SubdistrictOfficer);
        assert_eq!(scope.sub_district_scope.as_deref(), Some("1"));
        assert_eq!(scope.district_scope.as_deref(), Some("05"));
    }

    #[test]
    fn test_account_row_territory() {
        let json = r#"{"id": 7, "full_name": "Pak RW", "username": "rw05", "role": "rw", "rw": "05"}"#;
        let account: UserScope = serde_json::from_str(json).unwrap();
        assert_eq!(account.scope_label(), "RW 05");

        let json = r#"{"role": "rt", "rt": 1, "rw": "05"}"#;
        let account: UserScope = serde_json::from_str(json).unwrap();
        assert_eq!(account.scope_label(), "RT 1 / RW 05");
        assert!(account.validate().is_ok());
    }

    #[test]
    fn test_blank_scope_is_none() {
        let json = r#"{"role": "rw", "rw_scope": "7", "rt_scope": ""}"#;
        let scope: UserScope = serde_json::from_str(json).unwrap();
        assert_eq!(scope.district_scope.as_deref(), Some("7"));
        assert_eq!(scope.sub_district_scope, None);
    }

    #[test]
    fn test_unknown_role_is_resident() {
        let scope: UserScope = serde_json::from_str(r#"{"role": "lurah"}"#).unwrap();
        assert_eq!(scope.role, Role::Resident);

        let scope: UserScope = serde_json::from_str(r#"{"role": null}"#).unwrap();
        assert_eq!(scope.role, Role::Resident);
    }

    #[test]
    fn test_role_wire_round_trip() {
        for role in Role::all() {
            assert_eq!(Role::from_wire(role.wire()), *role);
        }
    }

    #[test]
    fn test_scope_label() {
        assert_eq!(UserScope::village_admin().scope_label(), "Seluruh Desa");
        assert_eq!(UserScope::district_officer("05").scope_label(), "RW 05");
        assert_eq!(
            UserScope::subdistrict_officer("05", "01").scope_label(),
            "RT 01 / RW 05"
        );
        assert_eq!(UserScope::resident().scope_label(), "-");
    }

    #[test]
    fn test_validate() {
        assert!(UserScope::subdistrict_officer("05", "01").validate().is_ok());
        assert_eq!(
            UserScope::subdistrict_officer("05", "x").validate(),
            Err(ScopeValidationError::MissingSubDistrict)
        );
        assert_eq!(
            UserScope {
                role: Role::DistrictOfficer,
                ..Default::default()
            }
            .validate(),
            Err(ScopeValidationError::MissingDistrict)
        );
        assert!(UserScope::resident().validate().is_ok());
    }
}
