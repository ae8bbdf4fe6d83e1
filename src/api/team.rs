use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use super::types::{MessageResponse, TeamMemberDto};
use super::validation::present;
use super::{ApiError, AppState};
use crate::db::{NewTeamMember, TeamMemberChanges};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateTeamMemberRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub image: String,
    pub tagline: Option<String>,
    pub accent_color: Option<String>,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateTeamMemberRequest {
    pub name: Option<String>,
    pub position: Option<String>,
    pub image: Option<String>,
    pub tagline: Option<String>,
    pub accent_color: Option<String>,
    pub order: Option<i32>,
    pub active: Option<bool>,
}

/// GET /api/team
pub async fn list_team(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TeamMemberDto>>, ApiError> {
    let team = state.store.list_team_members().await?;
    Ok(Json(team.into_iter().map(TeamMemberDto::from).collect()))
}

/// GET /api/team/:id
pub async fn get_team_member(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<TeamMemberDto>, ApiError> {
    let member = state
        .store
        .get_team_member(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Team member"))?;

    Ok(Json(TeamMemberDto::from(member)))
}

/// POST /api/team
pub async fn create_team_member(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateTeamMemberRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let required = [&payload.name, &payload.position, &payload.image];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Err(ApiError::validation("Please provide all required fields"));
    }

    let member = state
        .store
        .create_team_member(NewTeamMember {
            name: payload.name,
            position: payload.position,
            image: payload.image,
            tagline: present(payload.tagline),
            accent_color: present(payload.accent_color),
            sort_order: payload.order,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(TeamMemberDto::from(member))))
}

/// PUT /api/team/:id
/// Partial merge: absent or empty fields keep their stored values.
pub async fn update_team_member(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateTeamMemberRequest>,
) -> Result<Json<TeamMemberDto>, ApiError> {
    let changes = TeamMemberChanges {
        name: present(payload.name),
        position: present(payload.position),
        image: present(payload.image),
        tagline: present(payload.tagline),
        accent_color: present(payload.accent_color),
        sort_order: payload.order,
        active: payload.active,
    };

    let member = state
        .store
        .update_team_member(id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Team member"))?;

    Ok(Json(TeamMemberDto::from(member)))
}

/// DELETE /api/team/:id
pub async fn delete_team_member(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.store.delete_team_member(id).await? {
        return Err(ApiError::not_found("Team member"));
    }

    Ok(Json(MessageResponse::new("Team member deleted successfully")))
}
