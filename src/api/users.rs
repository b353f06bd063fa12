use async_trait::async_trait;
use reqwest::{Method, StatusCode};

use crate::models::{CurrentUser, UserRecord, UserUpdate};

use super::auth::ME_PATH;
use super::{ApiClient, ApiError, Payload, UsersApi};

pub const USERS_PATH: &str = "/users/";

pub fn user_path(id: &str) -> String {
    format!("/users/{}", id)
}

#[async_trait]
impl UsersApi for ApiClient {
    async fn list_users(&self, token: &str) -> Result<Vec<UserRecord>, ApiError> {
        self.send_json(Method::GET, USERS_PATH, Some(token), Payload::None).await
    }

    async fn update_user(&self, token: &str, id: &str, update: &UserUpdate) -> Result<(), ApiError> {
        let body = serde_json::to_value(update).map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
        self.send(Method::PUT, &user_path(id), Some(token), Payload::Json(body)).await?;
        Ok(())
    }

    async fn delete_user(&self, token: &str, id: &str) -> Result<(), ApiError> {
        self.send_expecting(Method::DELETE, &user_path(id), Some(token), StatusCode::NO_CONTENT).await
    }

    async fn current_user(&self, token: &str) -> Result<CurrentUser, ApiError> {
        self.send_json(Method::GET, ME_PATH, Some(token), Payload::None).await
    }
}
