use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::types::{ContactDto, MessageResponse};
use super::validation::is_valid_email;
use super::{ApiError, AppState};
use crate::db::NewContact;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct CreateContactResponse {
    pub message: String,
    pub contact: ContactDto,
}

/// GET /api/contacts (admin only)
pub async fn list_contacts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ContactDto>>, ApiError> {
    let contacts = state.store.list_contacts().await?;
    Ok(Json(contacts.into_iter().map(ContactDto::from).collect()))
}

/// GET /api/contacts/:id (admin only)
/// Viewing a submission transitions it `new` -> `read`.
pub async fn get_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ContactDto>, ApiError> {
    let contact = state
        .store
        .mark_contact_read(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contact"))?;

    Ok(Json(ContactDto::from(contact)))
}

/// POST /api/contacts (public form submission)
/// The notification emails are sent after the write commits; their outcome
/// never changes the response.
pub async fn create_contact(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateContactRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let required = [
        &payload.name,
        &payload.email,
        &payload.subject,
        &payload.message,
    ];
    if required.iter().any(|field| field.trim().is_empty()) {
        return Err(ApiError::validation("Please provide all fields"));
    }

    if !is_valid_email(&payload.email) {
        return Err(ApiError::validation("Invalid email format"));
    }

    let contact = state
        .store
        .create_contact(NewContact {
            name: payload.name,
            email: payload.email,
            subject: payload.subject,
            message: payload.message,
        })
        .await?;

    state.notifications.contact_received(&contact).await;

    Ok((
        StatusCode::CREATED,
        Json(CreateContactResponse {
            message: "Thank you for contacting us! We'll get back to you soon. \
                      Check your email for confirmation."
                .to_string(),
            contact: ContactDto::from(contact),
        }),
    ))
}

/// PATCH /api/contacts/:id/read (admin only, idempotent)
pub async fn mark_contact_read(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ContactDto>, ApiError> {
    let contact = state
        .store
        .mark_contact_read(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Contact"))?;

    Ok(Json(ContactDto::from(contact)))
}

/// DELETE /api/contacts/:id (admin only)
pub async fn delete_contact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    if !state.store.delete_contact(id).await? {
        return Err(ApiError::not_found("Contact"));
    }

    Ok(Json(MessageResponse::new("Contact deleted successfully")))
}
