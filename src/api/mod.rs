// Employee management API client
pub mod client;
pub mod error;
pub mod auth;
pub mod users;

use async_trait::async_trait;

use crate::models::{CurrentUser, TokenResponse, UserRecord, UserUpdate};

// Re-export commonly used items
pub use client::{set_trace_http, ApiClient, Payload};
pub use error::{extract_detail, ApiError, NETWORK_ERROR_MESSAGE};

/// Unauthenticated account operations.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn register(&self, username: &str, email: &str, password: &str) -> Result<(), ApiError>;

    /// Exchange credentials for a session token.
    async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError>;

    async fn reset_password(&self, email: &str) -> Result<(), ApiError>;

    async fn confirm_reset(&self, email: &str, otp: &str, new_password: &str) -> Result<(), ApiError>;
}

/// User administration, authenticated with a bearer token.
#[async_trait]
pub trait UsersApi: Send + Sync {
    async fn list_users(&self, token: &str) -> Result<Vec<UserRecord>, ApiError>;

    async fn update_user(&self, token: &str, id: &str, update: &UserUpdate) -> Result<(), ApiError>;

    /// Succeeds only on `204 No Content`.
    async fn delete_user(&self, token: &str, id: &str) -> Result<(), ApiError>;

    async fn current_user(&self, token: &str) -> Result<CurrentUser, ApiError>;
}
