//! Aspiration (citizen feedback) handling rules

use crate::models::{Aspiration, AspirationStatus, UserScope};

use super::access::Capabilities;

/// Officers move an aspiration forward to `Proses` or `Selesai`; nothing is
/// ever set back to `Pending`
pub fn can_set_status(scope: Option<&UserScope>, status: AspirationStatus) -> bool {
    Capabilities::for_scope(scope).manage_aspirations && status != AspirationStatus::Pending
}

pub fn can_submit(scope: Option<&UserScope>) -> bool {
    Capabilities::for_scope(scope).submit_aspiration
}

/// Deleting is an officer action too; it ends up in the audit log
pub fn can_delete(scope: Option<&UserScope>) -> bool {
    Capabilities::for_scope(scope).manage_aspirations
}

/// Dashboard counter: everything not yet picked up
pub fn count_pending(items: &[Aspiration]) -> usize {
    items
        .iter()
        .filter(|a| a.status == AspirationStatus::Pending)
        .count()
}

/// Content must be non-blank before it is sent
pub fn is_submittable(content: &str) -> bool {
    !content.trim().is_empty()
}
