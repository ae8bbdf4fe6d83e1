use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::token;
use super::types::AdminDto;
use super::{ApiError, AppState};
use crate::db::Admin;

/// Resolved admin identity, attached to the request by [`auth_middleware`]
/// for downstream role checks.
#[derive(Debug, Clone)]
pub struct CurrentAdmin(pub Admin);

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub admin: AdminDto,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub admin: AdminDto,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    pub role: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub admin: AdminDto,
}

// ============================================================================
// Middleware
// ============================================================================

/// Bearer-token guard applied per-route to the protected sub-router.
/// Resolves the token to a stored admin and attaches it to the request.
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = bearer_token(request.headers()) else {
        return Err(ApiError::unauthorized("No token, authorization denied"));
    };

    let claims = token::verify_token(&token, &state.config.auth)
        .map_err(|_| ApiError::unauthorized("Token is not valid"))?;

    let admin = state
        .store
        .get_admin_by_id(claims.sub)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Token is not valid"))?;

    request.extensions_mut().insert(CurrentAdmin(admin));

    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_header = headers.get("Authorization")?;
    let auth_str = auth_header.to_str().ok()?;
    let token = auth_str.strip_prefix("Bearer ")?.trim();

    (!token.is_empty()).then(|| token.to_string())
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/auth/login
/// Exchange username+password for a signed bearer token.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::validation(
            "Please provide username and password",
        ));
    }

    // Unknown username and wrong password produce the same response so the
    // endpoint cannot be used to enumerate accounts.
    let admin = state
        .store
        .authenticate_admin(&payload.username, &payload.password)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    let token = token::issue_token(&admin, &state.config.auth)
        .map_err(|e| ApiError::internal(format!("Failed to sign token: {e}")))?;

    tracing::info!("Admin '{}' logged in", admin.username);

    Ok(Json(LoginResponse {
        token,
        admin: AdminDto::from(admin),
    }))
}

/// GET /api/auth/verify
/// Return the admin resolved from the presented token.
pub async fn verify(
    axum::Extension(CurrentAdmin(admin)): axum::Extension<CurrentAdmin>,
) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        admin: AdminDto::from(admin),
    })
}

/// POST /api/auth/register
/// Create a new admin account. Superadmin only.
pub async fn register(
    State(state): State<Arc<AppState>>,
    axum::Extension(CurrentAdmin(requester)): axum::Extension<CurrentAdmin>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !requester.is_superadmin() {
        return Err(ApiError::Forbidden(
            "Access denied. Superadmin only.".to_string(),
        ));
    }

    if payload.username.trim().is_empty()
        || payload.email.trim().is_empty()
        || payload.password.is_empty()
    {
        return Err(ApiError::validation("Please provide all required fields"));
    }

    if state
        .store
        .admin_exists(&payload.username, &payload.email)
        .await?
    {
        return Err(ApiError::validation("Admin already exists"));
    }

    let role = match payload.role.as_deref() {
        None | Some("admin") => "admin",
        Some("superadmin") => "superadmin",
        Some(other) => {
            return Err(ApiError::validation(format!("Unknown role '{other}'")));
        }
    };

    let admin = state
        .store
        .create_admin(&payload.username, &payload.email, &payload.password, role)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Admin created successfully".to_string(),
            admin: AdminDto::from(admin),
        }),
    )
        .into_response())
}
