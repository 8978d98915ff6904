use thiserror::Error;

use crate::models::{CitizenValidationError, ScopeValidationError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Could not write config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),

    #[error(transparent)]
    Citizen(#[from] CitizenValidationError),

    #[error(transparent)]
    Scope(#[from] ScopeValidationError),

    #[error("Data tidak valid: {0}")]
    Validation(String),

    #[error("Tidak ditemukan: {0}")]
    NotFound(String),

    #[error("Akses ditolak: {0}")]
    Forbidden(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }
}

pub type AppResult<T> = Result<T, AppError>;
