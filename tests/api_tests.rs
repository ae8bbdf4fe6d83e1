use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use rainbow_films::config::Config;
use rainbow_films::services::{Mailer, MailerError, OutboundEmail};
use tower::ServiceExt;

/// Credentials seeded by migration (must match m20250102_seed_admin.rs)
const SEED_USERNAME: &str = "admin";
const SEED_PASSWORD: &str = "admin123";

/// Records every send attempt instead of talking to a provider.
#[derive(Default)]
struct CountingMailer {
    sent: AtomicUsize,
}

#[async_trait]
impl Mailer for CountingMailer {
    async fn send(&self, _email: &OutboundEmail) -> Result<(), MailerError> {
        self.sent.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

async fn spawn_app() -> Router {
    spawn_app_with(Config::default()).await.0
}

async fn spawn_app_with(mut config: Config) -> (Router, Arc<CountingMailer>) {
    config.general.database_url = "sqlite::memory:".to_string();

    let mailer = Arc::new(CountingMailer::default());
    let state = rainbow_films::api::create_app_state_with_mailer(config, mailer.clone())
        .await
        .expect("Failed to create app state");

    (rainbow_films::api::router(state), mailer)
}

fn json_request(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", mime::APPLICATION_JSON.as_ref())
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

fn authed(mut request: Request<Body>, token: &str) -> Request<Body> {
    request
        .headers_mut()
        .insert("Authorization", format!("Bearer {token}").parse().unwrap());
    request
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            &serde_json::json!({ "username": SEED_USERNAME, "password": SEED_PASSWORD }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["token"]
        .as_str()
        .unwrap()
        .to_string()
}

#[tokio::test]
async fn test_health_probe() {
    let app = spawn_app().await;

    let response = app.clone().oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
}

// ============================================================================
// Films
// ============================================================================

#[tokio::test]
async fn test_films_crud() {
    let app = spawn_app().await;
    let token = login(&app).await;

    // Missing required fields never persist anything.
    let response = app
        .clone()
        .oneshot(authed(
            json_request(
                "POST",
                "/api/films",
                &serde_json::json!({ "title": "Orphan" }),
            ),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Please provide all required fields");

    let response = app.clone().oneshot(get("/api/films")).await.unwrap();
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 0);

    // Full create round-trips through the public read path.
    let new_film = serde_json::json!({
        "title": "Monsoon Letters",
        "category": "Documentary",
        "tagline": "Four cities, one storm",
        "thumbnail": "/uploads/monsoon.jpg",
        "videoUrl": "https://vimeo.com/123456",
        "order": 2
    });
    let response = app
        .clone()
        .oneshot(authed(json_request("POST", "/api/films", &new_film), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(get(&format!("/api/films/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched = body_json(response).await;
    assert_eq!(fetched["title"], "Monsoon Letters");
    assert_eq!(fetched["videoUrl"], "https://vimeo.com/123456");
    assert_eq!(fetched["order"], 2);

    // Partial update: untouched fields keep their stored values.
    let response = app
        .clone()
        .oneshot(authed(
            json_request(
                "PUT",
                &format!("/api/films/{id}"),
                &serde_json::json!({ "title": "Monsoon Letters (Director's Cut)" }),
            ),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["title"], "Monsoon Letters (Director's Cut)");
    assert_eq!(updated["category"], "Documentary");
    assert_eq!(updated["thumbnail"], "/uploads/monsoon.jpg");

    let response = app
        .clone()
        .oneshot(authed(
            json_request("PUT", "/api/films/9999", &serde_json::json!({})),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(authed(delete(&format!("/api/films/{id}")), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Film deleted successfully");

    let response = app
        .clone()
        .oneshot(get(&format!("/api/films/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Film not found");
}

#[tokio::test]
async fn test_film_tagline_limits() {
    let app = spawn_app().await;
    let token = login(&app).await;

    let response = app
        .clone()
        .oneshot(authed(
            json_request(
                "POST",
                "/api/films",
                &serde_json::json!({
                    "title": "Long One",
                    "category": "Drama",
                    "tagline": "x".repeat(201),
                    "thumbnail": "/uploads/t.jpg",
                    "videoUrl": "https://vimeo.com/1"
                }),
            ),
            &token,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Team & clients
// ============================================================================

#[tokio::test]
async fn test_team_crud_and_ordering() {
    let app = spawn_app().await;
    let token = login(&app).await;

    for (name, order) in [("Second Billed", 2), ("First Billed", 1)] {
        let response = app
            .clone()
            .oneshot(authed(
                json_request(
                    "POST",
                    "/api/team",
                    &serde_json::json!({
                        "name": name,
                        "position": "Producer",
                        "image": "/uploads/face.jpg",
                        "order": order
                    }),
                ),
                &token,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Listing sorts by display order, not insertion order.
    let response = app.clone().oneshot(get("/api/team")).await.unwrap();
    let list = body_json(response).await;
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["First Billed", "Second Billed"]);

    let id = list[0]["id"].as_i64().unwrap();
    let response = app
        .clone()
        .oneshot(authed(
            json_request(
                "PUT",
                &format!("/api/team/{id}"),
                &serde_json::json!({ "accentColor": "#ff00aa" }),
            ),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["accentColor"], "#ff00aa");
    assert_eq!(updated["name"], "First Billed");

    let response = app
        .clone()
        .oneshot(authed(delete(&format!("/api/team/{id}")), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Team member deleted successfully");
}

#[tokio::test]
async fn test_clients_crud() {
    let app = spawn_app().await;
    let token = login(&app).await;

    let response = app
        .clone()
        .oneshot(authed(
            json_request("POST", "/api/clients", &serde_json::json!({ "name": "" })),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(authed(
            json_request(
                "POST",
                "/api/clients",
                &serde_json::json!({ "name": "Acme Studios" }),
            ),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();
    assert!(created.get("logo").is_none());

    let response = app
        .clone()
        .oneshot(authed(
            json_request(
                "PUT",
                &format!("/api/clients/{id}"),
                &serde_json::json!({ "logo": "/uploads/acme.png" }),
            ),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["logo"], "/uploads/acme.png");
    assert_eq!(updated["name"], "Acme Studios");

    let response = app
        .clone()
        .oneshot(authed(delete(&format!("/api/clients/{id}")), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get(&format!("/api/clients/{id}")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Contacts
// ============================================================================

#[tokio::test]
async fn test_contact_submission_flow() {
    let (app, mailer) = spawn_app_with(Config::default()).await;
    let token = login(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/contacts",
            &serde_json::json!({ "name": "A", "email": "a@b.com", "subject": "S" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Please provide all fields");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/contacts",
            &serde_json::json!({
                "name": "A", "email": "not-an-email", "subject": "S", "message": "M"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid email format");

    assert_eq!(mailer.sent.load(Ordering::SeqCst), 0);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/contacts",
            &serde_json::json!({
                "name": "A", "email": "a@b.com", "subject": "S", "message": "M"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["contact"]["status"], "new");
    let id = created["contact"]["id"].as_i64().unwrap();

    // One admin notification plus one submitter confirmation.
    assert_eq!(mailer.sent.load(Ordering::SeqCst), 2);

    let response = app
        .clone()
        .oneshot(authed(get("/api/contacts"), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["status"], "new");

    // Viewing a submission marks it read, and re-marking stays read.
    let response = app
        .clone()
        .oneshot(authed(get(&format!("/api/contacts/{id}")), &token))
        .await
        .unwrap();
    assert_eq!(body_json(response).await["status"], "read");

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(authed(
                Request::builder()
                    .method("PATCH")
                    .uri(format!("/api/contacts/{id}/read"))
                    .body(Body::empty())
                    .unwrap(),
                &token,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "read");
    }

    let response = app
        .clone()
        .oneshot(authed(delete(&format!("/api/contacts/{id}")), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Contact deleted successfully");

    let response = app
        .clone()
        .oneshot(authed(get(&format!("/api/contacts/{id}")), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Subscribers
// ============================================================================

#[tokio::test]
async fn test_subscriber_flow() {
    let (app, mailer) = spawn_app_with(Config::default()).await;
    let token = login(&app).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/subscribers",
            &serde_json::json!({ "email": "" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Email is required");

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/subscribers",
            &serde_json::json!({ "email": "fan@example.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Successfully subscribed!");
    assert_eq!(mailer.sent.load(Ordering::SeqCst), 1);

    // Second subscription with the same address is rejected and does not
    // grow the list.
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/subscribers",
            &serde_json::json!({ "email": "fan@example.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Email already subscribed");
    assert_eq!(mailer.sent.load(Ordering::SeqCst), 1);

    let response = app
        .clone()
        .oneshot(authed(get("/api/subscribers"), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    let id = list[0]["id"].as_i64().unwrap();

    let response = app
        .clone()
        .oneshot(authed(delete(&format!("/api/subscribers/{id}")), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(authed(delete(&format!("/api/subscribers/{id}")), &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Settings
// ============================================================================

#[tokio::test]
async fn test_settings_upsert() {
    let app = spawn_app().await;
    let token = login(&app).await;

    let response = app.clone().oneshot(get("/api/settings")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!({}));

    // Writes require auth.
    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/settings/hero_video_url",
            &serde_json::json!({ "value": "https://cdn.example.com/hero.mp4" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .clone()
        .oneshot(authed(
            json_request(
                "PUT",
                "/api/settings/hero_video_url",
                &serde_json::json!({ "value": "" }),
            ),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Value is required");

    // First PUT creates the key.
    let response = app
        .clone()
        .oneshot(authed(
            json_request(
                "PUT",
                "/api/settings/hero_video_url",
                &serde_json::json!({ "value": "https://cdn.example.com/hero.mp4" }),
            ),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get("/api/settings/hero_video_url"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["key"], "hero_video_url");
    assert_eq!(json["value"], "https://cdn.example.com/hero.mp4");

    // Second PUT updates in place, no duplicate key appears.
    let response = app
        .clone()
        .oneshot(authed(
            json_request(
                "PUT",
                "/api/settings/hero_video_url",
                &serde_json::json!({ "value": "https://cdn.example.com/hero-v2.mp4" }),
            ),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.clone().oneshot(get("/api/settings")).await.unwrap();
    let all = body_json(response).await;
    assert_eq!(
        all,
        serde_json::json!({ "hero_video_url": "https://cdn.example.com/hero-v2.mp4" })
    );

    let response = app
        .clone()
        .oneshot(get("/api/settings/missing_key"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Setting not found");
}

// ============================================================================
// Upload
// ============================================================================

fn multipart_body(field_name: &str) -> (String, Body) {
    let boundary = "----rainbow-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"{field_name}\"; filename=\"poster.png\"\r\n\
         Content-Type: image/png\r\n\r\n\
         fake-png-bytes\r\n\
         --{boundary}--\r\n"
    );
    (
        format!("multipart/form-data; boundary={boundary}"),
        Body::from(body),
    )
}

#[tokio::test]
async fn test_upload_image() {
    let mut config = Config::default();
    config.general.uploads_path =
        std::env::temp_dir().join(format!("rainbow-uploads-{}", std::process::id()));
    let uploads_path = config.general.uploads_path.clone();

    let (app, _mailer) = spawn_app_with(config).await;
    let token = login(&app).await;

    let (content_type, body) = multipart_body("image");
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/upload/image")
                .header("Content-Type", &content_type)
                .body(body)
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let (content_type, body) = multipart_body("image");
    let response = app
        .clone()
        .oneshot(authed(
            Request::builder()
                .method("POST")
                .uri("/api/upload/image")
                .header("Content-Type", &content_type)
                .body(body)
                .unwrap(),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["message"], "File uploaded successfully");
    let filename = json["filename"].as_str().unwrap();
    assert!(filename.starts_with("image-"));
    assert!(filename.ends_with(".png"));
    assert_eq!(json["url"], format!("/uploads/{filename}"));

    let stored = tokio::fs::read(uploads_path.join(filename)).await.unwrap();
    assert_eq!(stored, b"fake-png-bytes");

    // A multipart body without an `image` field is not an upload.
    let (content_type, body) = multipart_body("attachment");
    let response = app
        .clone()
        .oneshot(authed(
            Request::builder()
                .method("POST")
                .uri("/api/upload/image")
                .header("Content-Type", &content_type)
                .body(body)
                .unwrap(),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "No file uploaded");
}
