//! Reading snapshots saved from the backend API

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::error::AppResult;
use crate::models::UserScope;

/// List responses come as `{ "success": true, "data": [...] }`; exports are
/// sometimes saved as a bare array
#[derive(Deserialize)]
#[serde(untagged)]
enum ListPayload<T> {
    Envelope { data: Vec<T> },
    Bare(Vec<T>),
}

/// The login endpoint puts the user under `data` or `user`
#[derive(Deserialize)]
#[serde(untagged)]
enum ScopePayload {
    Data { data: UserScope },
    User { user: UserScope },
    Bare(UserScope),
}

pub fn parse_list<T: DeserializeOwned>(json: &str) -> AppResult<Vec<T>> {
    let payload: ListPayload<T> = serde_json::from_str(json)?;
    Ok(match payload {
        ListPayload::Envelope { data } => data,
        ListPayload::Bare(items) => items,
    })
}

pub fn parse_scope(json: &str) -> AppResult<UserScope> {
    let payload: ScopePayload = serde_json::from_str(json)?;
    Ok(match payload {
        ScopePayload::Data { data } => data,
        ScopePayload::User { user } => user,
        ScopePayload::Bare(scope) => scope,
    })
}

/// Load a list snapshot (registry, kas, aspirations) from disk
pub fn load_list<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Could not read snapshot: {:?}", path))?;
    let items = parse_list(&content)
        .with_context(|| format!("Could not parse snapshot: {:?}", path))?;
    tracing::info!("Loaded {} items from {:?}", items.len(), path);
    Ok(items)
}

/// Load the session user saved from a login response
pub fn load_scope(path: &Path) -> Result<UserScope> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Could not read session: {:?}", path))?;
    let scope = parse_scope(&content)
        .with_context(|| format!("Could not parse session: {:?}", path))?;

    if let Err(e) = scope.validate() {
        // Still usable: the access checks deny whatever the scope can't prove
        tracing::warn!("Session scope is incomplete: {}", e);
    }

    Ok(scope)
}
