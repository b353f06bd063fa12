use ems::config;
use once_cell::sync::Lazy;
use std::env;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

// Tests in this file mutate process-wide environment variables
static ENV_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));

#[test]
fn test_sanitize_base_url_removes_trailing_slash() {
    assert_eq!(config::sanitize_base_url("https://ems.example.com/api/"), "https://ems.example.com/api");
}

#[test]
fn test_sanitize_base_url_no_trailing_slash() {
    assert_eq!(config::sanitize_base_url("https://ems.example.com/api"), "https://ems.example.com/api");
}

#[test]
fn test_sanitize_base_url_multiple_trailing_slashes() {
    assert_eq!(config::sanitize_base_url("https://ems.example.com/api///"), "https://ems.example.com/api");
}

#[test]
fn test_sanitize_base_url_with_whitespace() {
    assert_eq!(config::sanitize_base_url("  http://10.0.0.5:8000/  "), "http://10.0.0.5:8000");
}

#[test]
fn test_sanitize_base_url_empty_falls_back_to_default() {
    assert_eq!(config::sanitize_base_url(""), "http://localhost:8000");
    assert_eq!(config::sanitize_base_url("   "), "http://localhost:8000");
}

#[test]
fn test_get_api_base_url_from_env() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
    env::set_var("API_BASE_URL", "https://ems.example.com/api/");

    assert_eq!(config::get_api_base_url(), "https://ems.example.com/api");

    env::remove_var("API_BASE_URL");
}

#[test]
fn test_get_api_base_url_uses_default() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
    env::remove_var("API_BASE_URL");

    assert_eq!(config::get_api_base_url(), config::DEFAULT_API_BASE_URL);
}

#[test]
fn test_get_api_timeout() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
    env::remove_var("API_TIMEOUT_SECS");
    assert_eq!(config::get_api_timeout(), Duration::from_secs(config::DEFAULT_API_TIMEOUT_SECS));

    env::set_var("API_TIMEOUT_SECS", "3");
    assert_eq!(config::get_api_timeout(), Duration::from_secs(3));

    // Zero and garbage both fall back to the default
    env::set_var("API_TIMEOUT_SECS", "0");
    assert_eq!(config::get_api_timeout(), Duration::from_secs(config::DEFAULT_API_TIMEOUT_SECS));
    env::set_var("API_TIMEOUT_SECS", "soon");
    assert_eq!(config::get_api_timeout(), Duration::from_secs(config::DEFAULT_API_TIMEOUT_SECS));

    env::remove_var("API_TIMEOUT_SECS");
}

#[test]
fn test_get_env_token_ignores_blank() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
    env::set_var("EMS_TOKEN", "  ");
    assert_eq!(config::get_env_token(), None);

    env::set_var("EMS_TOKEN", " abc.def ");
    assert_eq!(config::get_env_token().as_deref(), Some("abc.def"));

    env::remove_var("EMS_TOKEN");
}

#[test]
fn test_get_token_file_path() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|p| p.into_inner());
    env::set_var("EMS_TOKEN_FILE", "/tmp/ems-test/token");
    assert_eq!(config::get_token_file_path(), PathBuf::from("/tmp/ems-test/token"));

    env::remove_var("EMS_TOKEN_FILE");
    let original_home = env::var("HOME").ok();
    env::set_var("HOME", "/home/jane");
    assert_eq!(config::get_token_file_path(), PathBuf::from("/home/jane/.ems/token"));

    match original_home {
        Some(home) => env::set_var("HOME", home),
        None => env::remove_var("HOME"),
    }
}
