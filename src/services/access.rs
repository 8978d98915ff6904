//! Who may change which citizen rows
//!
//! Visibility is not decided here: everyone who can open the registry sees the
//! rows the territory filter lets through. This module only answers whether a
//! row may be edited or deleted by the acting user.

use serde::Serialize;

use crate::models::{CitizenRecord, Role, TerritoryCode, UserScope};
use crate::utils::{AppError, AppResult};

/// Static per-role capabilities of the portal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Capabilities {
    pub view_registry: bool,
    pub create_citizen: bool,
    pub edit_citizen: bool,
    pub delete_citizen: bool,
    pub manage_ledger: bool,
    pub manage_aspirations: bool,
    pub submit_aspiration: bool,
    pub manage_announcements: bool,
    pub view_audit_log: bool,
    pub manage_accounts: bool,
}

impl Capabilities {
    /// Capabilities of a logged-in user. Every role sees the registry;
    /// residents only read it.
    pub fn for_role(role: Role) -> Self {
        let officer = role != Role::Resident;
        Self {
            view_registry: true,
            create_citizen: officer,
            edit_citizen: officer,
            delete_citizen: officer,
            manage_ledger: officer,
            manage_aspirations: officer,
            submit_aspiration: !officer,
            manage_announcements: officer,
            view_audit_log: matches!(
                role,
                Role::DistrictOfficer | Role::VillageAdmin | Role::Superadmin
            ),
            manage_accounts: role.is_village_wide(),
        }
    }

    /// Capabilities of an optional session; no session means none at all
    pub fn for_scope(scope: Option<&UserScope>) -> Self {
        scope
            .map(|s| Self::for_role(s.role))
            .unwrap_or_default()
    }
}

/// Whether `scope` administers the territory `record` lives in.
///
/// Village-wide roles cover everything. RW officers need a matching RW, RT
/// officers a matching RW and RT. Residents, a missing session and any
/// unparseable territory code all deny.
pub fn can_access(scope: Option<&UserScope>, record: &CitizenRecord) -> bool {
    let Some(scope) = scope else {
        return false;
    };

    match scope.role {
        Role::VillageAdmin | Role::Superadmin => true,
        Role::DistrictOfficer => {
            TerritoryCode::matches_scope(&record.district, scope.district_scope.as_deref())
        }
        Role::SubdistrictOfficer => {
            TerritoryCode::matches_scope(&record.district, scope.district_scope.as_deref())
                && TerritoryCode::matches_scope(
                    &record.sub_district,
                    scope.sub_district_scope.as_deref(),
                )
        }
        Role::Resident => false,
    }
}

/// Row-level action flags handed to the rendering layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RecordPermissions {
    pub can_edit: bool,
    pub can_delete: bool,
}

impl RecordPermissions {
    /// Row shown as "Read Only"
    pub fn is_read_only(&self) -> bool {
        !self.can_edit && !self.can_delete
    }
}

/// Territory check combined with the role's static capabilities
pub fn record_permissions(scope: Option<&UserScope>, record: &CitizenRecord) -> RecordPermissions {
    if !can_access(scope, record) {
        return RecordPermissions::default();
    }

    let caps = Capabilities::for_scope(scope);
    RecordPermissions {
        can_edit: caps.edit_citizen,
        can_delete: caps.delete_citizen,
    }
}

/// Force the territory fields an officer doesn't control onto a new record.
///
/// RT officers can only register citizens in their own RT, RW officers only in
/// their own RW. Village-wide roles keep whatever was entered.
pub fn lock_territory(scope: &UserScope, draft: &mut CitizenRecord) {
    match scope.role {
        Role::SubdistrictOfficer => {
            if let Some(rw) = &scope.district_scope {
                draft.district = rw.clone();
            }
            if let Some(rt) = &scope.sub_district_scope {
                draft.sub_district = rt.clone();
            }
        }
        Role::DistrictOfficer => {
            if let Some(rw) = &scope.district_scope {
                draft.district = rw.clone();
            }
        }
        _ => {}
    }
}

/// Check and complete a citizen the acting user is about to register
pub fn prepare_new_citizen(scope: Option<&UserScope>, mut draft: CitizenRecord) -> AppResult<CitizenRecord> {
    let scope = scope.ok_or_else(|| AppError::forbidden("silakan login terlebih dahulu"))?;
    if !Capabilities::for_role(scope.role).create_citizen {
        return Err(AppError::forbidden(format!(
            "{} tidak dapat menambah warga",
            scope.role.display_name()
        )));
    }
    scope.validate()?;

    lock_territory(scope, &mut draft);
    draft.validate()?;
    Ok(draft)
}

/// Check an edit of `original` before it is sent
pub fn prepare_citizen_update(
    scope: Option<&UserScope>,
    original: &CitizenRecord,
    updated: CitizenRecord,
) -> AppResult<CitizenRecord> {
    if !record_permissions(scope, original).can_edit {
        return Err(AppError::forbidden(format!(
            "warga {} berada di luar wilayah Anda",
            original.full_name
        )));
    }
    updated.validate_update(original)?;

    // An officer can't move a citizen out of their own territory
    let mut updated = updated;
    if let Some(scope) = scope {
        lock_territory(scope, &mut updated);
    }
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn citizen(rw: &str, rt: &str) -> CitizenRecord {
        CitizenRecord::new(1, "3201010101010001", "Budi", rw, rt)
    }

    #[test]
    fn test_village_wide_roles_access_everything() {
        for scope in [UserScope::village_admin(), UserScope::superadmin()] {
            assert!(can_access(Some(&scope), &citizen("05", "01")));
            assert!(can_access(Some(&scope), &citizen("", "")));
            assert!(can_access(Some(&scope), &citizen("abc", "x")));
        }
    }

    #[test]
    fn test_district_officer() {
        let scope = UserScope::district_officer("5");
        assert!(can_access(Some(&scope), &citizen("5", "01")));
        assert!(can_access(Some(&scope), &citizen("05", "07")));
        assert!(!can_access(Some(&scope), &citizen("6", "01")));
        assert!(!can_access(Some(&scope), &citizen("", "01")));
    }

    #[test]
    fn test_subdistrict_officer() {
        let scope = UserScope::subdistrict_officer("05", "1");
        assert!(can_access(Some(&scope), &citizen("5", "01")));
        assert!(!can_access(Some(&scope), &citizen("5", "02")));
        assert!(!can_access(Some(&scope), &citizen("6", "01")));
    }

    #[test]
    fn test_denies_by_default() {
        assert!(!can_access(None, &citizen("05", "01")));
        assert!(!can_access(Some(&UserScope::resident()), &citizen("05", "01")));

        let broken = UserScope {
            role: Role::DistrictOfficer,
            district_scope: Some("lima".into()),
            ..Default::default()
        };
        assert!(!can_access(Some(&broken), &citizen("lima", "01")));

        let no_scope = UserScope {
            role: Role::SubdistrictOfficer,
            ..Default::default()
        };
        assert!(!can_access(Some(&no_scope), &citizen("05", "01")));
    }

    #[test]
    fn test_record_permissions() {
        let rw = UserScope::district_officer("05");
        let own = record_permissions(Some(&rw), &citizen("05", "01"));
        assert!(own.can_edit && own.can_delete);

        let other = record_permissions(Some(&rw), &citizen("06", "01"));
        assert!(other.is_read_only());

        let resident = record_permissions(Some(&UserScope::resident()), &citizen("05", "01"));
        assert!(resident.is_read_only());

        assert!(record_permissions(None, &citizen("05", "01")).is_read_only());
    }

    #[test]
    fn test_capability_table() {
        let warga = Capabilities::for_role(Role::Resident);
        assert!(warga.view_registry);
        assert!(!warga.edit_citizen && !warga.manage_ledger && !warga.manage_announcements);
        assert!(warga.submit_aspiration);

        let rt = Capabilities::for_role(Role::SubdistrictOfficer);
        assert!(rt.view_registry && rt.create_citizen && rt.manage_aspirations);
        assert!(rt.manage_announcements);
        assert!(!rt.view_audit_log && !rt.manage_accounts && !rt.submit_aspiration);

        let rw = Capabilities::for_role(Role::DistrictOfficer);
        assert!(rw.view_audit_log && !rw.manage_accounts);

        for role in [Role::VillageAdmin, Role::Superadmin] {
            let caps = Capabilities::for_role(role);
            assert!(caps.manage_accounts && caps.view_audit_log && caps.delete_citizen);
        }

        assert_eq!(Capabilities::for_scope(None), Capabilities::default());
    }

    #[test]
    fn test_lock_territory() {
        let mut draft = citizen("09", "09");
        lock_territory(&UserScope::subdistrict_officer("05", "01"), &mut draft);
        assert_eq!((draft.district.as_str(), draft.sub_district.as_str()), ("05", "01"));

        let mut draft = citizen("09", "09");
        lock_territory(&UserScope::district_officer("05"), &mut draft);
        assert_eq!((draft.district.as_str(), draft.sub_district.as_str()), ("05", "09"));

        let mut draft = citizen("09", "09");
        lock_territory(&UserScope::village_admin(), &mut draft);
        assert_eq!((draft.district.as_str(), draft.sub_district.as_str()), ("09", "09"));
    }

    #[test]
    fn test_prepare_new_citizen() {
        let rt = UserScope::subdistrict_officer("05", "01");
        let draft = citizen("09", "09");
        let prepared = prepare_new_citizen(Some(&rt), draft.clone()).unwrap();
        assert_eq!((prepared.district.as_str(), prepared.sub_district.as_str()), ("05", "01"));

        let err = prepare_new_citizen(Some(&UserScope::resident()), draft.clone()).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert!(matches!(prepare_new_citizen(None, draft.clone()).unwrap_err(), AppError::Forbidden(_)));

        let mut short_nik = draft.clone();
        short_nik.national_id = "123".into();
        let err = prepare_new_citizen(Some(&rt), short_nik).unwrap_err();
        assert!(matches!(err, AppError::Citizen(_)));

        let incomplete = UserScope {
            role: Role::DistrictOfficer,
            ..Default::default()
        };
        let err = prepare_new_citizen(Some(&incomplete), draft).unwrap_err();
        assert!(matches!(err, AppError::Scope(_)));
    }

    #[test]
    fn test_prepare_citizen_update() {
        let rw = UserScope::district_officer("05");
        let original = citizen("05", "01");

        let mut renamed = original.clone();
        renamed.full_name = "Budi Santoso".into();
        let saved = prepare_citizen_update(Some(&rw), &original, renamed).unwrap();
        assert_eq!(saved.full_name, "Budi Santoso");

        let mut moved = original.clone();
        moved.district = "06".into();
        let saved = prepare_citizen_update(Some(&rw), &original, moved).unwrap();
        assert_eq!(saved.district, "05");

        let mut new_nik = original.clone();
        new_nik.national_id = "3201010101010002".into();
        let err = prepare_citizen_update(Some(&rw), &original, new_nik).unwrap_err();
        assert!(matches!(err, AppError::Citizen(_)));

        let foreign = citizen("06", "01");
        let err = prepare_citizen_update(Some(&rw), &foreign, foreign.clone()).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
