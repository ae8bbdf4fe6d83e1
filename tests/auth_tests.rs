use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use rainbow_films::config::Config;
use tower::ServiceExt;

/// Credentials seeded by migration (must match m20250102_seed_admin.rs)
const SEED_USERNAME: &str = "admin";
const SEED_PASSWORD: &str = "admin123";

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_url = "sqlite::memory:".to_string();

    let state = rainbow_films::api::create_app_state(config)
        .await
        .expect("Failed to create app state");
    rainbow_films::api::router(state)
}

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn login_as(app: &Router, username: &str, password: &str) -> String {
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            &serde_json::json!({ "username": username, "password": password }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    json["token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_login_returns_token_and_sanitized_admin() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            &serde_json::json!({ "username": SEED_USERNAME, "password": SEED_PASSWORD }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(!json["token"].as_str().unwrap().is_empty());
    assert_eq!(json["admin"]["username"], "admin");
    assert_eq!(json["admin"]["role"], "superadmin");
    assert!(json["admin"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    let app = spawn_app().await;

    let wrong_password = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            &serde_json::json!({ "username": SEED_USERNAME, "password": "nope" }),
        ))
        .await
        .unwrap();
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    let unknown_user = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            &serde_json::json!({ "username": "ghost", "password": "nope" }),
        ))
        .await
        .unwrap();
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    // Both failure modes must be indistinguishable to the caller.
    let first = body_json(wrong_password).await;
    let second = body_json(unknown_user).await;
    assert_eq!(first["message"], "Invalid credentials");
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_login_missing_fields() {
    let app = spawn_app().await;

    let response = app
        .clone()
        .oneshot(post_json("/api/auth/login", &serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Please provide username and password");
}

#[tokio::test]
async fn test_protected_routes_reject_missing_and_bad_tokens() {
    let app = spawn_app().await;

    let no_token = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/contacts")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(no_token.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(no_token).await;
    assert_eq!(json["message"], "No token, authorization denied");

    let bad_token = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/contacts")
                .header("Authorization", "Bearer not-a-real-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(bad_token.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(bad_token).await;
    assert_eq!(json["message"], "Token is not valid");
}

#[tokio::test]
async fn test_verify_resolves_token_to_admin() {
    let app = spawn_app().await;
    let token = login_as(&app, SEED_USERNAME, SEED_PASSWORD).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/auth/verify")
                .header("Authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["admin"]["username"], "admin");
}

#[tokio::test]
async fn test_register_is_superadmin_only() {
    let app = spawn_app().await;
    let super_token = login_as(&app, SEED_USERNAME, SEED_PASSWORD).await;

    let new_admin = serde_json::json!({
        "username": "editor",
        "email": "editor@rainbowfilms.com",
        "password": "s3cret-enough"
    });

    let mut request = post_json("/api/auth/register", &new_admin);
    request.headers_mut().insert(
        "Authorization",
        format!("Bearer {super_token}").parse().unwrap(),
    );
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Admin created successfully");
    assert_eq!(json["admin"]["role"], "admin");

    // Same username again is rejected.
    let mut request = post_json("/api/auth/register", &new_admin);
    request.headers_mut().insert(
        "Authorization",
        format!("Bearer {super_token}").parse().unwrap(),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Admin already exists");

    // The freshly created admin can log in but cannot register others.
    let editor_token = login_as(&app, "editor", "s3cret-enough").await;
    let mut request = post_json(
        "/api/auth/register",
        &serde_json::json!({
            "username": "another",
            "email": "another@rainbowfilms.com",
            "password": "pw-pw-pw"
        }),
    );
    request.headers_mut().insert(
        "Authorization",
        format!("Bearer {editor_token}").parse().unwrap(),
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Access denied. Superadmin only.");
}

#[tokio::test]
async fn test_register_missing_fields() {
    let app = spawn_app().await;
    let token = login_as(&app, SEED_USERNAME, SEED_PASSWORD).await;

    let mut request = post_json(
        "/api/auth/register",
        &serde_json::json!({ "username": "incomplete" }),
    );
    request
        .headers_mut()
        .insert("Authorization", format!("Bearer {token}").parse().unwrap());
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Please provide all required fields");
}
