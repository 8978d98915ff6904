use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::citizen::RecordId;
use super::wire::{lenient_string, wire_label_serde, WireLabel};
use crate::utils::{AppError, AppResult};

/// Topic of a public announcement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InfoCategory {
    #[default]
    Umum,
    Kesehatan,
    Lingkungan,
    Keamanan,
    Kegiatan,
}

impl InfoCategory {
    pub fn all() -> &'static [Self] {
        &[
            Self::Umum,
            Self::Kesehatan,
            Self::Lingkungan,
            Self::Keamanan,
            Self::Kegiatan,
        ]
    }
}

impl WireLabel for InfoCategory {
    /// Categories the form doesn't offer are shown as `Umum`
    fn from_wire(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "kesehatan" => Self::Kesehatan,
            "lingkungan" => Self::Lingkungan,
            "keamanan" => Self::Keamanan,
            "kegiatan" => Self::Kegiatan,
            _ => Self::Umum,
        }
    }

    fn wire(&self) -> &'static str {
        match self {
            Self::Umum => "Umum",
            Self::Kesehatan => "Kesehatan",
            Self::Lingkungan => "Lingkungan",
            Self::Keamanan => "Keamanan",
            Self::Kegiatan => "Kegiatan",
        }
    }
}

wire_label_serde!(InfoCategory);

/// Village news item ("Info Publik")
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Announcement {
    pub id: RecordId,
    #[serde(deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(deserialize_with = "lenient_string")]
    pub content: String,
    pub category: InfoCategory,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(deserialize_with = "lenient_string")]
    pub author: String,
}

impl Announcement {
    pub fn new(title: impl Into<String>, content: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            date: Some(date),
            ..Default::default()
        }
    }

    /// Title, content and date are required by the publish form
    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::validation("judul berita wajib diisi"));
        }
        if self.content.trim().is_empty() {
            return Err(AppError::validation("isi berita wajib diisi"));
        }
        if self.date.is_none() {
            return Err(AppError::validation("tanggal berita wajib diisi"));
        }
        Ok(())
    }

    /// Date line under the title ("1 Mei 2024")
    pub fn date_label(&self) -> String {
        const MONTHS: [&str; 12] = [
            "Januari", "Februari", "Maret", "April", "Mei", "Juni", "Juli", "Agustus",
            "September", "Oktober", "November", "Desember",
        ];

        match self.date {
            Some(date) => {
                use chrono::Datelike;
                format!("{} {} {}", date.day(), MONTHS[date.month0() as usize], date.year())
            }
            None => "-".to_string(),
        }
    }
}
