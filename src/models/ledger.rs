use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::citizen::RecordId;
use super::wire::{lenient_amount, lenient_string, optional_label, wire_label_serde, WireLabel};

/// Direction of a kas transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntryKind {
    /// Pemasukan (debit)
    #[default]
    In,
    /// Pengeluaran (kredit)
    Out,
}

impl WireLabel for EntryKind {
    fn from_wire(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "out" | "keluar" => Self::Out,
            _ => Self::In,
        }
    }

    fn wire(&self) -> &'static str {
        match self {
            Self::In => "in",
            Self::Out => "out",
        }
    }
}

/// Administrative level a kas book belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KasLevel {
    Rt,
    Rw,
    Desa,
}

impl WireLabel for KasLevel {
    fn from_wire(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "rt" => Self::Rt,
            "rw" => Self::Rw,
            _ => Self::Desa,
        }
    }

    fn wire(&self) -> &'static str {
        match self {
            Self::Rt => "rt",
            Self::Rw => "rw",
            Self::Desa => "desa",
        }
    }
}

wire_label_serde!(EntryKind, KasLevel);

/// One transaction in the communal cash ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KasEntry {
    #[serde(default)]
    pub id: RecordId,
    #[serde(rename = "type", default)]
    pub kind: EntryKind,
    /// Amount in whole rupiah
    #[serde(deserialize_with = "lenient_amount")]
    pub amount: i64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    pub date: NaiveDate,
    #[serde(default, deserialize_with = "optional_label", skip_serializing_if = "Option::is_none")]
    pub level: Option<KasLevel>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rw: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub rt: String,
}

impl KasEntry {
    pub fn new(kind: EntryKind, amount: i64, description: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: RecordId::default(),
            kind,
            amount,
            description: description.into(),
            date,
            level: None,
            rw: String::new(),
            rt: String::new(),
        }
    }

    /// Amount with sign applied (expenses negative)
    pub fn signed_amount(&self) -> i64 {
        match self.kind {
            EntryKind::In => self.amount,
            EntryKind::Out => -self.amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_entry() {
        let json = r#"{"id": 1, "type": "out", "amount": 25000, "description": "Sapu", "date": "2024-03-01", "level": "rw", "rw": 5}"#;
        let entry: KasEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.kind, EntryKind::Out);
        assert_eq!(entry.level, Some(KasLevel::Rw));
        assert_eq!(entry.rw, "5");
        assert_eq!(entry.rt, "");
        assert_eq!(entry.signed_amount(), -25000);
    }

    #[test]
    fn test_amount_as_string() {
        let json = r#"{"type": "in", "amount": "150000.00", "date": "2024-03-02"}"#;
        let entry: KasEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.amount, 150_000);
        assert_eq!(entry.level, None);

        let bad = r#"{"type": "in", "amount": "banyak", "date": "2024-03-02"}"#;
        assert!(serde_json::from_str::<KasEntry>(bad).is_err());
    }
}
