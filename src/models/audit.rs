use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One line of the audit trail (riwayat aktivitas)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub actor_name: String,
    #[serde(default)]
    pub action: String,
}

impl AuditEntry {
    pub fn new(actor_name: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            created_at: Utc::now(),
            actor_name: actor_name.into(),
            action: action.into(),
        }
    }
}

/// Newest first, ties kept in input order
pub fn recent_first(entries: &mut [AuditEntry]) {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_first() {
        let json = r#"[
            {"created_at": "2024-01-01T08:00:00Z", "actor_name": "admin", "action": "Hapus warga 3"},
            {"created_at": "2024-02-01T08:00:00Z", "actor_name": "rt01", "action": "Tambah warga 9"}
        ]"#;
        let mut entries: Vec<AuditEntry> = serde_json::from_str(json).unwrap();
        recent_first(&mut entries);
        assert_eq!(entries[0].actor_name, "rt01");
        assert_eq!(entries[1].actor_name, "admin");
    }
}
