use axum::{
    Json,
    extract::{Path, State},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::types::SettingDto;
use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpsertSettingRequest {
    #[serde(default)]
    pub value: String,
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SettingValueResponse {
    pub key: String,
    pub value: String,
}

/// GET /api/settings
/// All keys folded into one flat `{key: value}` object.
pub async fn get_all_settings(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let settings = state.store.all_settings().await?;

    let mut map = serde_json::Map::new();
    for setting in settings {
        map.insert(setting.key, serde_json::Value::String(setting.value));
    }

    Ok(Json(serde_json::Value::Object(map)))
}

/// GET /api/settings/:key
pub async fn get_setting(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> Result<Json<SettingValueResponse>, ApiError> {
    let setting = state
        .store
        .get_setting(&key)
        .await?
        .ok_or_else(|| ApiError::not_found("Setting"))?;

    Ok(Json(SettingValueResponse {
        key: setting.key,
        value: setting.value,
    }))
}

/// PUT /api/settings/:key (admin only)
/// Upsert: creates the key when absent, otherwise updates in place.
pub async fn upsert_setting(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Json(payload): Json<UpsertSettingRequest>,
) -> Result<Json<SettingDto>, ApiError> {
    if payload.value.trim().is_empty() {
        return Err(ApiError::validation("Value is required"));
    }

    let setting = state
        .store
        .upsert_setting(&key, &payload.value, payload.description.as_deref())
        .await?;

    Ok(Json(SettingDto::from(setting)))
}
