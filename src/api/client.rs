use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use yansi::Paint;

use super::error::ApiError;

static TRACE_HTTP: AtomicBool = AtomicBool::new(false);

/// Echo every request as a curl command on stdout (CLI `--trace-http`).
pub fn set_trace_http(enabled: bool) {
    TRACE_HTTP.store(enabled, Ordering::Relaxed);
}

/// Request body variants accepted by the API.
pub enum Payload<'a> {
    None,
    Json(Value),
    /// `application/x-www-form-urlencoded`, used by the OAuth2 login endpoint
    Form(&'a [(&'a str, &'a str)]),
}

/// HTTP client for the employee management API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .user_agent(format!("ems/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a request and return the response when its status is a success.
    ///
    /// Transport failures become [`ApiError::Network`], unsuccessful statuses
    /// are classified by [`ApiError::from_status`]. Nothing is retried.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        payload: Payload<'_>,
    ) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        if TRACE_HTTP.load(Ordering::Relaxed) {
            println!("{}", curl_line(&method, &url, token.is_some(), &payload));
        }

        let mut req = self.client.request(method.clone(), &url);
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        req = match payload {
            Payload::None => req,
            Payload::Json(body) => req.json(&body),
            Payload::Form(fields) => req.form(fields),
        };

        let started = Instant::now();
        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(%method, path, error = %e, "API request failed");
                return Err(ApiError::Network(e.to_string()));
            }
        };
        let status = resp.status();
        tracing::info!(%method, path, status = status.as_u16(), elapsed_ms = started.elapsed().as_millis() as u64, "API response");

        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ApiError::from_status(status.as_u16(), &body))
    }

    /// Like [`ApiClient::send`] but decodes the success body as JSON.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        payload: Payload<'_>,
    ) -> Result<T, ApiError> {
        let resp = self.send(method, path, token, payload).await?;
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }

    /// Send and require one exact status, e.g. 204 for deletions.
    pub async fn send_expecting(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        expected: StatusCode,
    ) -> Result<(), ApiError> {
        let resp = self.send(method, path, token, Payload::None).await?;
        if resp.status() == expected {
            return Ok(());
        }
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        Err(ApiError::from_status(status, &body))
    }
}

fn curl_line(method: &Method, url: &str, with_token: bool, payload: &Payload<'_>) -> String {
    let mut parts = Vec::new();
    parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
    parts.push(format!("-X {}", Paint::new(method.as_str()).fg(yansi::Color::Yellow).bold()));
    parts.push(format!("'{}'", Paint::new(url).fg(yansi::Color::Cyan)));
    if with_token {
        parts.push(format!("{} {}",
            Paint::new("-H").fg(yansi::Color::Magenta),
            Paint::new("'Authorization: Bearer ***'").fg(yansi::Color::Magenta)
        ));
    }
    match payload {
        Payload::None => {}
        Payload::Json(body) => {
            let json_str = serde_json::to_string(body).unwrap_or_default();
            parts.push(format!("{} {}",
                Paint::new("-H").fg(yansi::Color::Magenta),
                Paint::new("'Content-Type: application/json'").fg(yansi::Color::Magenta)
            ));
            parts.push(format!("{} '{}'", Paint::new("-d").fg(yansi::Color::Blue), redact_json(&json_str)));
        }
        Payload::Form(fields) => {
            for (k, v) in fields.iter() {
                let shown = if k.contains("password") { "***" } else { v };
                parts.push(format!("{} '{}={}'", Paint::new("--data-urlencode").fg(yansi::Color::Blue), k, shown));
            }
        }
    }
    parts.join(" ")
}

fn redact_json(json: &str) -> String {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(mut obj)) => {
            for (key, value) in obj.iter_mut() {
                if key.contains("password") {
                    *value = Value::String("***".into());
                }
            }
            Value::Object(obj).to_string()
        }
        _ => json.to_string(),
    }
}
