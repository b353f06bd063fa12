use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;

use crate::models::TokenResponse;

use super::{ApiClient, ApiError, AuthApi, Payload};

pub const REGISTER_PATH: &str = "/auth/register";
pub const LOGIN_PATH: &str = "/auth/login";
pub const RESET_PASSWORD_PATH: &str = "/auth/reset-password";
pub const CONFIRM_RESET_PATH: &str = "/auth/reset-password/confirm";
pub const ME_PATH: &str = "/auth/me";
pub const HEALTH_PATH: &str = "/auth/health";

impl ApiClient {
    /// Ping the API's health endpoint.
    pub async fn health(&self) -> Result<(), ApiError> {
        self.send(Method::GET, HEALTH_PATH, None, Payload::None).await?;
        Ok(())
    }
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn register(&self, username: &str, email: &str, password: &str) -> Result<(), ApiError> {
        let body = json!({
            "username": username,
            "email": email,
            "password": password,
        });
        self.send(Method::POST, REGISTER_PATH, None, Payload::Json(body)).await?;
        Ok(())
    }

    async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        // OAuth2 password flow form
        let fields = [("grant_type", "password"), ("username", username), ("password", password)];
        let token: TokenResponse = self
            .send_json(Method::POST, LOGIN_PATH, None, Payload::Form(&fields))
            .await?;
        if token.access_token.trim().is_empty() {
            return Err(ApiError::InvalidResponse("empty access_token".into()));
        }
        Ok(token)
    }

    async fn reset_password(&self, email: &str) -> Result<(), ApiError> {
        let body = json!({ "email": email });
        self.send(Method::POST, RESET_PASSWORD_PATH, None, Payload::Json(body)).await?;
        Ok(())
    }

    async fn confirm_reset(&self, email: &str, otp: &str, new_password: &str) -> Result<(), ApiError> {
        let body = json!({
            "email": email,
            "otp": otp,
            "new_password": new_password,
        });
        self.send(Method::POST, CONFIRM_RESET_PATH, None, Payload::Json(body)).await?;
        Ok(())
    }
}
