use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use super::types::{FilmDto, MessageResponse};
use super::validation::{present, validate_tagline};
use super::{ApiError, AppState};
use crate::db::{FilmChanges, NewFilm};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateFilmRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub video_url: String,
    #[serde(default)]
    pub order: i32,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateFilmRequest {
    pub title: Option<String>,
    pub category: Option<String>,
    pub tagline: Option<String>,
    pub thumbnail: Option<String>,
    pub video_url: Option<String>,
    pub order: Option<i32>,
}

/// GET /api/films
pub async fn list_films(State(state): State<Arc<AppState>>) -> Result<Json<Vec<FilmDto>>, ApiError> {
    let films = state.store.list_films().await?;
    Ok(Json(films.into_iter().map(FilmDto::from).collect()))
}

/// GET /api/films/:id
pub async fn get_film(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<FilmDto>, ApiError> {
    let film = state
        .store
        .get_film(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Film"))?;

    Ok(Json(FilmDto::from(film)))
}

/// POST /api/films
pub async fn create_film(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateFilmRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let required = [
        &payload.title,
        &payload.category,
        &payload.tagline,
        &payload.thumbnail,
        &payload.video_url,
    ];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Err(ApiError::validation("Please provide all required fields"));
    }
    validate_tagline(&payload.tagline)?;

    let film = state
        .store
        .create_film(NewFilm {
            title: payload.title,
            category: payload.category,
            tagline: payload.tagline,
            thumbnail: payload.thumbnail,
            video_url: payload.video_url,
            sort_order: payload.order,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(FilmDto::from(film))))
}

/// PUT /api/films/:id
/// Partial merge: absent or empty fields keep their stored values.
pub async fn update_film(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateFilmRequest>,
) -> Result<Json<FilmDto>, ApiError> {
    let tagline = present(payload.tagline);
    if let Some(tagline) = &tagline {
        validate_tagline(tagline)?;
    }

    let changes = FilmChanges {
        title: present(payload.title),
        category: present(payload.category),
        tagline,
        thumbnail: present(payload.thumbnail),
        video_url: present(payload.video_url),
        sort_order: payload.order,
    };

    let film = state
        .store
        .update_film(id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found("Film"))?;

    Ok(Json(FilmDto::from(film)))
}

/// DELETE /api/films/:id
pub async fn delete_film(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.store.delete_film(id).await? {
        return Err(ApiError::not_found("Film"));
    }

    Ok(Json(MessageResponse::new("Film deleted successfully")))
}
