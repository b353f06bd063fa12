use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

// Default configuration constants
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5173;
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_TOKEN_FILE_NAME: &str = "token";

pub const MIN_PASSWORD_LENGTH: usize = 6;
pub const REMEMBER_ME_DAYS: i64 = 30;
pub const REGISTER_REDIRECT_DELAY: Duration = Duration::from_millis(1500);
pub const RESET_REDIRECT_DELAY: Duration = Duration::from_millis(2000);
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(3);

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(&env::var("API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()))
}

pub fn get_api_timeout() -> Duration {
    let secs = env::var("API_TIMEOUT_SECS")
        .ok()
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_API_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

/// Token supplied out of band to the CLI, bypassing the token file.
pub fn get_env_token() -> Option<String> {
    env::var("EMS_TOKEN")
        .ok()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

pub fn get_token_file_path() -> PathBuf {
    if let Ok(path) = env::var("EMS_TOKEN_FILE") {
        if !path.trim().is_empty() {
            return PathBuf::from(path.trim());
        }
    }
    match env::var("HOME") {
        Ok(home) if !home.trim().is_empty() => Path::new(&home).join(".ems").join(DEFAULT_TOKEN_FILE_NAME),
        _ => PathBuf::from(".ems").join(DEFAULT_TOKEN_FILE_NAME),
    }
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}
