use std::time::Duration;

use axum::extract::{Form, Path};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use ems::api::{ApiClient, ApiError, AuthApi, UsersApi};
use ems::models::UserUpdate;
use serde::Deserialize;
use serde_json::{json, Value};

#[derive(Deserialize)]
struct LoginFields {
    grant_type: String,
    username: String,
    password: String,
}

fn authorized(headers: &HeaderMap) -> bool {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "Bearer good-token" || v == "Bearer viewer-token")
}

fn is_admin(headers: &HeaderMap) -> bool {
    headers.get("authorization").and_then(|v| v.to_str().ok()) == Some("Bearer good-token")
}

/// In-process stand-in for the employee management API.
fn stub_api() -> Router {
    Router::new()
        .route("/auth/health", get(|| async { Json(json!({"status": "ok"})) }))
        .route(
            "/auth/login",
            post(|Form(f): Form<LoginFields>| async move {
                if f.grant_type == "password" && f.username == "jane" && f.password == "s3cret!" {
                    Json(json!({"access_token": "good-token", "token_type": "bearer"})).into_response()
                } else {
                    (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Incorrect username or password"}))).into_response()
                }
            }),
        )
        .route(
            "/auth/register",
            post(|Json(body): Json<Value>| async move {
                if body["email"] == "taken@example.com" {
                    (StatusCode::BAD_REQUEST, Json(json!({"detail": "Email already registered"}))).into_response()
                } else if body["email"] == "bad" {
                    let detail = json!([{"loc": ["body", "email"], "msg": "value is not a valid email address", "type": "value_error"}]);
                    (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "detail": detail }))).into_response()
                } else {
                    (StatusCode::CREATED, Json(json!({"id": "u9", "username": body["username"]}))).into_response()
                }
            }),
        )
        .route(
            "/auth/reset-password/confirm",
            post(|Json(body): Json<Value>| async move {
                if body["otp"] == "123456" && body["new_password"].is_string() {
                    (StatusCode::OK, Json(json!({"message": "Password reset"}))).into_response()
                } else {
                    (StatusCode::BAD_REQUEST, Json(json!({"detail": "Invalid or expired OTP"}))).into_response()
                }
            }),
        )
        .route(
            "/users/",
            get(|headers: HeaderMap| async move {
                if !authorized(&headers) {
                    return StatusCode::UNAUTHORIZED.into_response();
                }
                if !is_admin(&headers) {
                    return (StatusCode::FORBIDDEN, Json(json!({"detail": "Not enough permissions"}))).into_response();
                }
                Json(json!([
                    {"id": "u1", "username": "jane", "email": "jane@example.com", "roles": ["admin"]},
                    {"id": "u2", "username": "omar", "email": "omar@example.com"}
                ]))
                .into_response()
            }),
        )
        .route(
            "/users/:id",
            put(|Path(id): Path<String>, Json(body): Json<Value>| async move {
                if id == "u1" && body["roles"] == json!(["admin", "viewer"]) {
                    (StatusCode::OK, Json(body)).into_response()
                } else {
                    (StatusCode::NOT_FOUND, Json(json!({"detail": "User not found"}))).into_response()
                }
            })
            .delete(|Path(id): Path<String>| async move {
                match id.as_str() {
                    "u2" => StatusCode::NO_CONTENT,
                    // A 200 is not an acknowledged deletion
                    "u3" => StatusCode::OK,
                    _ => StatusCode::NOT_FOUND,
                }
            }),
        )
        .route("/auth/me", get(|| async { Json(json!({"id": "u1", "username": "jane"})) }))
}

async fn spawn_stub() -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, stub_api()).await.unwrap();
    });
    ApiClient::new(&format!("http://{}/", addr), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_health() {
    let client = spawn_stub().await;
    client.health().await.unwrap();
}

#[tokio::test]
async fn test_login_sends_form_and_returns_token() {
    let client = spawn_stub().await;
    let token = client.login("jane", "s3cret!").await.unwrap();
    assert_eq!(token.access_token, "good-token");
    assert_eq!(token.token_type, "bearer");
}

#[tokio::test]
async fn test_login_rejected_carries_detail() {
    let client = spawn_stub().await;
    let err = client.login("jane", "wrong!").await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { .. }));
    assert_eq!(err.user_message("Login failed"), "Incorrect username or password");
}

#[tokio::test]
async fn test_register_outcomes() {
    let client = spawn_stub().await;
    client.register("jane", "jane@example.com", "s3cret!").await.unwrap();

    let err = client.register("jane", "taken@example.com", "s3cret!").await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected { status: 400, .. }));
    assert_eq!(err.detail(), Some("Email already registered"));

    let err = client.register("jane", "bad", "s3cret!").await.unwrap_err();
    assert_eq!(err.detail(), Some("value is not a valid email address"));
}

#[tokio::test]
async fn test_confirm_reset() {
    let client = spawn_stub().await;
    client.confirm_reset("jane@example.com", "123456", "n3wpass").await.unwrap();
    let err = client.confirm_reset("jane@example.com", "000000", "n3wpass").await.unwrap_err();
    assert_eq!(err.user_message("Reset failed"), "Invalid or expired OTP");
}

#[tokio::test]
async fn test_list_users_with_bearer_token() {
    let client = spawn_stub().await;
    let users = client.list_users("good-token").await.unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].roles, vec!["admin"]);
    // Missing roles decode as empty
    assert!(users[1].roles.is_empty());
}

#[tokio::test]
async fn test_list_users_status_classification() {
    let client = spawn_stub().await;
    let err = client.list_users("viewer-token").await.unwrap_err();
    assert!(matches!(err, ApiError::Forbidden { .. }));

    let err = client.list_users("expired").await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { detail: None }));
}

#[tokio::test]
async fn test_update_user_sends_role_list() {
    let client = spawn_stub().await;
    let update = UserUpdate {
        email: "jane@example.com".into(),
        roles: vec!["admin".into(), "viewer".into()],
    };
    client.update_user("good-token", "u1", &update).await.unwrap();

    let err = client.update_user("good-token", "nobody", &update).await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected { status: 404, .. }));
}

#[tokio::test]
async fn test_delete_requires_no_content() {
    let client = spawn_stub().await;
    client.delete_user("good-token", "u2").await.unwrap();

    let err = client.delete_user("good-token", "u3").await.unwrap_err();
    assert!(matches!(err, ApiError::Rejected { status: 200, .. }));
    assert_eq!(err.user_message("Delete failed"), "Delete failed");
}

#[tokio::test]
async fn test_undecodable_body_is_invalid_response() {
    let client = spawn_stub().await;
    // The stub omits `email`
    let err = client.current_user("good-token").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_unreachable_api_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap();
    let err = client.login("jane", "s3cret!").await.unwrap_err();
    assert!(err.is_network());
    assert_eq!(err.user_message("Login failed"), "Network error");
}
