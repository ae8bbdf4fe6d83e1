use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use std::sync::Arc;

use super::types::{MessageResponse, SubscriberDto};
use super::{ApiError, AppState};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubscribeRequest {
    #[serde(default)]
    pub email: String,
}

/// GET /api/subscribers (admin only)
pub async fn list_subscribers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<SubscriberDto>>, ApiError> {
    let subscribers = state.store.list_subscribers().await?;
    Ok(Json(
        subscribers.into_iter().map(SubscriberDto::from).collect(),
    ))
}

/// POST /api/subscribers (public)
pub async fn subscribe(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SubscribeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let email = payload.email.trim();
    if email.is_empty() {
        return Err(ApiError::validation("Email is required"));
    }

    // Fast-path check for the friendlier message; the unique index on the
    // email column is what actually guards concurrent duplicates.
    if state.store.find_subscriber_by_email(email).await?.is_some() {
        return Err(ApiError::validation("Email already subscribed"));
    }

    let Some(_subscriber) = state.store.create_subscriber(email).await? else {
        return Err(ApiError::validation("Email already subscribed"));
    };

    state.notifications.subscriber_joined(email).await;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Successfully subscribed!")),
    ))
}

/// DELETE /api/subscribers/:id (admin only)
pub async fn delete_subscriber(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.store.delete_subscriber(id).await? {
        return Err(ApiError::not_found("Subscriber"));
    }

    Ok(Json(MessageResponse::new("Subscriber deleted successfully")))
}
