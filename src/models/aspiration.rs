use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::citizen::RecordId;
use super::wire::{lenient_string, wire_label_serde, WireLabel};

/// Handling status of a citizen aspiration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AspirationStatus {
    #[default]
    Pending,
    /// Being handled by an officer
    Proses,
    Selesai,
}

impl AspirationStatus {
    pub fn all() -> &'static [Self] {
        &[Self::Pending, Self::Proses, Self::Selesai]
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Selesai)
    }
}

impl WireLabel for AspirationStatus {
    fn from_wire(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "proses" => Self::Proses,
            "selesai" => Self::Selesai,
            _ => Self::Pending,
        }
    }

    fn wire(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Proses => "Proses",
            Self::Selesai => "Selesai",
        }
    }
}

wire_label_serde!(AspirationStatus);

/// Feedback or complaint submitted by a resident
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Aspiration {
    pub id: RecordId,
    #[serde(deserialize_with = "lenient_string")]
    pub author_name: String,
    #[serde(deserialize_with = "lenient_string")]
    pub content: String,
    pub status: AspirationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Aspiration {
    /// Initial shown in the avatar bubble
    pub fn author_initial(&self) -> char {
        self.author_name.chars().next().unwrap_or('?')
    }
}
