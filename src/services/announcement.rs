//! Public announcement ("Info Publik") rules

use crate::models::{Announcement, RecordId, UserScope};
use crate::utils::{AppError, AppResult};

use super::access::Capabilities;

/// Officers publish, edit and delete; everyone reads
pub fn can_manage(scope: Option<&UserScope>) -> bool {
    Capabilities::for_scope(scope).manage_announcements
}

/// Detail page lookup
pub fn find_by_id<'a>(items: &'a [Announcement], id: &RecordId) -> AppResult<&'a Announcement> {
    items
        .iter()
        .find(|item| item.id.compare(id).is_eq())
        .ok_or_else(|| AppError::not_found(format!("info {}", id)))
}

/// Check a draft before it is published or saved. The author is always the
/// acting officer, whoever wrote the original.
pub fn prepare_draft(scope: Option<&UserScope>, mut draft: Announcement) -> AppResult<Announcement> {
    if !can_manage(scope) {
        return Err(AppError::forbidden("hanya pengurus yang dapat menerbitkan berita"));
    }
    draft.validate()?;

    let author = scope.and_then(|s| s.full_name.as_deref());
    if let Some(name) = author.filter(|n| !n.trim().is_empty()) {
        draft.author = name.to_string();
    }
    tracing::debug!("Prepared announcement '{}' by {}", draft.title, draft.author);
    Ok(draft)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn items() -> Vec<Announcement> {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        vec![
            Announcement {
                id: RecordId::from(1),
                ..Announcement::new("Kerja Bakti", "Minggu pagi", date)
            },
            Announcement {
                id: RecordId::from("7"),
                ..Announcement::new("Posyandu", "Balai desa", date)
            },
        ]
    }

    #[test]
    fn test_can_manage() {
        assert!(can_manage(Some(&UserScope::subdistrict_officer("05", "01"))));
        assert!(can_manage(Some(&UserScope::village_admin())));
        assert!(!can_manage(Some(&UserScope::resident())));
        assert!(!can_manage(None));
    }

    #[test]
    fn test_find_by_id() {
        let items = items();
        assert_eq!(find_by_id(&items, &RecordId::from(1)).unwrap().title, "Kerja Bakti");
        assert_eq!(find_by_id(&items, &RecordId::from(7)).unwrap().title, "Posyandu");
        assert!(matches!(
            find_by_id(&items, &RecordId::from(3)),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_prepare_draft() {
        let draft = items().remove(0);

        let mut officer = UserScope::district_officer("05");
        officer.full_name = Some("Pak RW".into());
        let saved = prepare_draft(Some(&officer), draft.clone()).unwrap();
        assert_eq!(saved.author, "Pak RW");

        let err = prepare_draft(Some(&UserScope::resident()), draft.clone()).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        let blank = Announcement {
            title: String::new(),
            ..draft
        };
        assert!(matches!(
            prepare_draft(Some(&officer), blank),
            Err(AppError::Validation(_))
        ));
    }
}
