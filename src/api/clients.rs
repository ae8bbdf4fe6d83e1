use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use super::types::{ClientDto, MessageResponse};
use super::validation::present;
use super::{ApiError, AppState};
use crate::db::{ClientChanges, NewClient};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateClientRequest {
    #[serde(default)]
    pub name: String,
    pub logo: Option<String>,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateClientRequest {
    pub name: Option<String>,
    pub logo: Option<String>,
    pub order: Option<i32>,
    pub active: Option<bool>,
}

/// GET /api/clients
pub async fn list_clients(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ClientDto>>, ApiError> {
    let clients = state.store.list_clients().await?;
    Ok(Json(clients.into_iter().map(ClientDto::from).collect()))
}

/// GET /api/clients/:id
pub async fn get_client(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ClientDto>, ApiError> {
    let client = state
        .store
        .get_client(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Client"))?;

    Ok(Json(ClientDto::from(client)))
}

/// POST /api/clients
pub async fn create_client(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateClientRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.name.trim().is_empty() {
        return Err(ApiError::validation("Please provide all required fields"));
    }

    let client = state
        .store
        .create_client(NewClient {
            name: payload.name,
            logo: present(payload.logo),
            sort_order: payload.order,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(ClientDto::from(client))))
}

/// PUT /api/clients/:id
/// Partial merge: absent or empty fields keep their stored values.
pub async fn update_client(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateClientRequest>,
) -> Result<Json<ClientDto>, ApiError> {
    let changes = ClientChanges {
        name: present(payload.name),
        logo: present(payload.logo),
        sort_order: payload.order,
        active: payload.active,
    };

    let client = state
        .store
        .update_client(id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Client"))?;

    Ok(Json(ClientDto::from(client)))
}

/// DELETE /api/clients/:id
pub async fn delete_client(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.store.delete_client(id).await? {
        return Err(ApiError::not_found("Client"));
    }

    Ok(Json(MessageResponse::new("Client deleted successfully")))
}
