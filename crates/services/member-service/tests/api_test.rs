//! HTTP tests for the member and trainer routes.
//!
//! The router runs in-process via `tower::ServiceExt::oneshot` over an
//! in-memory SQLite database and the in-process cache.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sea_orm::ConnectOptions;
use serde_json::{json, Value};
use tower::ServiceExt;

use domain::Locale;
use member_service_lib::api::middleware::{Claims, TokenCodec};
use member_service_lib::api::{create_router, AppState};
use member_service_lib::config::MemberServiceConfig;
use member_service_lib::infra::{Database, MemoryCache};

const SECRET: &str = "api-test-secret-key-minimum-32-chars";

// =============================================================================
// Helpers
// =============================================================================

async fn app() -> Router {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let database = Database::connect_with(options).await.unwrap();
    database.run_migrations().await.unwrap();

    let mut config = MemberServiceConfig::default();
    config.jwt.secret = SECRET.to_string();
    config.locale = Locale::En;

    create_router(AppState::from_config(
        database,
        Arc::new(MemoryCache::new()),
        &config,
    ))
}

fn make_jwt(roles: &[&str]) -> String {
    let claims = Claims::new(
        "test-user",
        roles.iter().map(|r| r.to_string()).collect(),
        chrono::Duration::hours(1),
    );
    TokenCodec::new(SECRET).encode(&claims).unwrap()
}

fn admin_token() -> String {
    make_jwt(&["admin"])
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

fn member_body(identity_number: &str) -> Value {
    json!({
        "identity_number": identity_number,
        "first_name": "Ayse",
        "last_name": "Yilmaz",
        "email": "ayse@example.com",
        "phone_number": "+905551112233",
        "birth_date": "1990-05-17",
        "trainer_id": null
    })
}

fn trainer_body(email: &str) -> Value {
    json!({
        "first_name": "Mehmet",
        "last_name": "Demir",
        "email": email,
        "phone_number": "+905550001122",
        "specialty": "Strength training"
    })
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_reports_dependencies() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/health", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["database"]["status"], "healthy");
    assert_eq!(body["services"]["cache"]["status"], "healthy");
}

#[tokio::test]
async fn test_openapi_document_carries_schema_examples() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/members"].is_object());
    assert_eq!(
        body["components"]["schemas"]["CreateMember"]["properties"]["identity_number"]["example"],
        "12345678901"
    );
    assert!(body["components"]["securitySchemes"]["bearer_auth"].is_object());
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn test_reads_are_open_to_anonymous_callers() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/members", None, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_add_without_token_is_unauthorized() {
    let app = app().await;

    let (status, body) =
        send(&app, Method::POST, "/members", None, Some(member_body("A1"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["kind"], "unauthorized");
    assert_eq!(body["message"], "You are not authorized for this operation");
}

#[tokio::test]
async fn test_add_with_wrong_role_is_unauthorized() {
    let app = app().await;
    let token = make_jwt(&["trainer.admin"]);

    let (status, body) = send(
        &app,
        Method::POST,
        "/members",
        Some(&token),
        Some(member_body("A1")),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "unauthorized");
}

#[tokio::test]
async fn test_invalid_token_is_rejected() {
    let app = app().await;

    let (status, body) = send(&app, Method::GET, "/members", Some("not-a-jwt"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "AUTH_ERROR");
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_rejected() {
    let app = app().await;
    let claims = Claims::new("intruder", vec!["admin".to_string()], chrono::Duration::hours(1));
    let forged = TokenCodec::new("another-secret-key-minimum-32-chars")
        .encode(&claims)
        .unwrap();

    let (status, _) = send(&app, Method::POST, "/members", Some(&forged), Some(member_body("A1"))).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Members
// =============================================================================

#[tokio::test]
async fn test_add_member_returns_created() {
    let app = app().await;
    let token = make_jwt(&["member.admin"]);

    let (status, body) = send(
        &app,
        Method::POST,
        "/members",
        Some(&token),
        Some(member_body("A1")),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Member added successfully.");
    assert_eq!(body["data"]["identity_number"], "A1");
    assert!(body["data"]["id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_duplicate_identity_number_is_conflict() {
    let app = app().await;
    let token = admin_token();

    send(&app, Method::POST, "/members", Some(&token), Some(member_body("A1"))).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/members",
        Some(&token),
        Some(member_body("A1")),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["kind"], "duplicate_key");
    assert_eq!(body["message"], "Identity number already exists");
}

#[tokio::test]
async fn test_invalid_fields_are_bad_request() {
    let app = app().await;
    let mut payload = member_body("A1");
    payload["email"] = json!("not-an-email");
    payload["first_name"] = json!("");

    let (status, body) = send(
        &app,
        Method::POST,
        "/members",
        Some(&admin_token()),
        Some(payload),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation_failed");
    assert_eq!(
        body["message"],
        "Email must be a valid address; First name must be between 1 and 50 characters"
    );
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/members")
        .header(header::AUTHORIZATION, format!("Bearer {}", admin_token()))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"identity_number\": "))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_update_uses_path_id() {
    let app = app().await;
    let token = admin_token();
    let (_, created) = send(&app, Method::POST, "/members", Some(&token), Some(member_body("A1"))).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let mut payload = created["data"].clone();
    payload["id"] = json!(id + 100);
    payload["identity_number"] = json!("A2");

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/members/{}", id),
        Some(&token),
        Some(payload),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Member updated.");
    assert_eq!(body["data"]["id"], id);

    let (_, fetched) = send(&app, Method::GET, &format!("/members/{}", id), None, None).await;
    assert_eq!(fetched["data"]["identity_number"], "A2");
}

#[tokio::test]
async fn test_update_body_may_omit_id() {
    let app = app().await;
    let token = admin_token();
    let (_, created) = send(&app, Method::POST, "/members", Some(&token), Some(member_body("A1"))).await;
    let id = created["data"]["id"].as_i64().unwrap();

    let mut payload = member_body("A1");
    payload["first_name"] = json!("Fatma");

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/members/{}", id),
        Some(&token),
        Some(payload),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], id);
    assert_eq!(body["data"]["first_name"], "Fatma");
}

#[tokio::test]
async fn test_add_with_unknown_trainer_is_not_found() {
    let app = app().await;
    let mut payload = member_body("A1");
    payload["trainer_id"] = json!(404);

    let (status, body) = send(
        &app,
        Method::POST,
        "/members",
        Some(&admin_token()),
        Some(payload),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
    assert_eq!(body["message"], "Trainer not found");
}

#[tokio::test]
async fn test_update_missing_member_is_not_found() {
    let app = app().await;
    let mut payload = member_body("A1");
    payload["id"] = json!(0);

    let (status, body) = send(
        &app,
        Method::PUT,
        "/members/42",
        Some(&admin_token()),
        Some(payload),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["kind"], "not_found");
    assert_eq!(body["message"], "Member not found");
}

#[tokio::test]
async fn test_delete_member_then_lookup_is_empty() {
    let app = app().await;
    let token = admin_token();
    let (_, created) = send(&app, Method::POST, "/members", Some(&token), Some(member_body("A1"))).await;
    let uri = format!("/members/{}", created["data"]["id"]);

    let (status, body) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Member deleted.");

    let (status, body) = send(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], Value::Null);

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_member_list_reflects_mutations() {
    let app = app().await;
    let token = admin_token();

    let (_, before) = send(&app, Method::GET, "/members", None, None).await;
    assert_eq!(before["data"].as_array().map(Vec::len), Some(0));

    send(&app, Method::POST, "/members", Some(&token), Some(member_body("A1"))).await;

    let (_, after) = send(&app, Method::GET, "/members", None, None).await;
    assert_eq!(after["data"].as_array().map(Vec::len), Some(1));
}

// =============================================================================
// Trainers
// =============================================================================

#[tokio::test]
async fn test_trainer_lifecycle() {
    let app = app().await;
    let token = make_jwt(&["trainer.admin"]);

    let (status, created) = send(
        &app,
        Method::POST,
        "/trainers",
        Some(&token),
        Some(trainer_body("coach@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "Trainer added successfully.");
    let id = created["data"]["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::POST,
        "/trainers",
        Some(&token),
        Some(trainer_body("coach@example.com")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "Trainer email already exists");

    let mut member = member_body("A1");
    member["trainer_id"] = json!(id);
    send(&app, Method::POST, "/members", Some(&admin_token()), Some(member)).await;

    let (status, details) = send(&app, Method::GET, "/trainers/details", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details["data"][0]["member_count"], 1);

    let (_, member_details) = send(&app, Method::GET, "/members/details", None, None).await;
    assert_eq!(member_details["data"][0]["trainer_first_name"], "Mehmet");

    let (status, body) = send(
        &app,
        Method::DELETE,
        &format!("/trainers/{}", id),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Trainer deleted.");

    // Member reads embed trainer names and are refreshed too
    let (_, member_details) = send(&app, Method::GET, "/members/details", None, None).await;
    assert_eq!(member_details["data"][0]["trainer_first_name"], Value::Null);
}

#[tokio::test]
async fn test_member_admin_cannot_manage_trainers() {
    let app = app().await;
    let token = make_jwt(&["member.admin"]);

    let (status, body) = send(
        &app,
        Method::POST,
        "/trainers",
        Some(&token),
        Some(trainer_body("coach@example.com")),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "unauthorized");
}
