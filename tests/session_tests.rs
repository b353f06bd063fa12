use axum_extra::extract::cookie::{Cookie, CookieJar};
use ems::session::{
    has_session, CookieSessionStore, FileTokenStore, TokenStore, PERSISTENT_TOKEN_COOKIE, SESSION_TOKEN_COOKIE,
};

fn live_value(jar: &CookieJar, name: &str) -> Option<String> {
    jar.get(name).map(|c| c.value().to_string()).filter(|v| !v.is_empty())
}

#[test]
fn test_cookie_store_persistent_save() {
    let mut store = CookieSessionStore::new(CookieJar::new());
    store.save("tok-1", true).unwrap();

    let jar = store.jar();
    let cookie = jar.get(PERSISTENT_TOKEN_COOKIE).expect("persistent cookie");
    assert_eq!(cookie.value(), "tok-1");
    assert_eq!(cookie.max_age(), Some(time::Duration::days(30)));
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(live_value(jar, SESSION_TOKEN_COOKIE), None);
    assert_eq!(store.read().as_deref(), Some("tok-1"));
}

#[test]
fn test_cookie_store_session_save_replaces_persistent() {
    let jar = CookieJar::new().add(Cookie::new(PERSISTENT_TOKEN_COOKIE, "old"));
    let mut store = CookieSessionStore::new(jar);
    store.save("tok-2", false).unwrap();

    let jar = store.jar();
    let cookie = jar.get(SESSION_TOKEN_COOKIE).expect("session cookie");
    assert_eq!(cookie.value(), "tok-2");
    assert_eq!(cookie.max_age(), None);
    assert_eq!(live_value(jar, PERSISTENT_TOKEN_COOKIE), None);
    assert_eq!(store.read().as_deref(), Some("tok-2"));
}

#[test]
fn test_cookie_store_clear_removes_both() {
    let jar = CookieJar::new()
        .add(Cookie::new(PERSISTENT_TOKEN_COOKIE, "a"))
        .add(Cookie::new(SESSION_TOKEN_COOKIE, "b"));
    let mut store = CookieSessionStore::new(jar);
    store.clear().unwrap();

    assert_eq!(store.read(), None);
    assert!(!has_session(store.jar()));
}

#[test]
fn test_has_session_checks_either_scope() {
    assert!(!has_session(&CookieJar::new()));
    assert!(has_session(&CookieJar::new().add(Cookie::new(SESSION_TOKEN_COOKIE, "x"))));
    assert!(has_session(&CookieJar::new().add(Cookie::new(PERSISTENT_TOKEN_COOKIE, "y"))));
    assert!(!has_session(&CookieJar::new().add(Cookie::new(PERSISTENT_TOKEN_COOKIE, " "))));
}

#[test]
fn test_file_store_persistent_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("token");

    let mut store = FileTokenStore::new(&path);
    store.save("tok-file", true).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "tok-file");

    // A fresh store (next process) still sees it
    let reopened = FileTokenStore::new(&path);
    assert_eq!(reopened.read().as_deref(), Some("tok-file"));
}

#[cfg(unix)]
#[test]
fn test_file_store_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("token");
    FileTokenStore::new(&path).save("tok", true).unwrap();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_file_store_scoped_save_never_touches_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("token");
    std::fs::write(&path, "stale\n").unwrap();

    let mut store = FileTokenStore::new(&path);
    store.save("tok-mem", false).unwrap();

    assert!(!path.exists());
    assert_eq!(store.read().as_deref(), Some("tok-mem"));
    assert_eq!(FileTokenStore::new(&path).read(), None);
}

#[test]
fn test_file_store_clear() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("token");

    let mut store = FileTokenStore::new(&path);
    store.save("tok", true).unwrap();
    store.clear().unwrap();
    assert!(!path.exists());
    assert_eq!(store.read(), None);

    // Clearing twice is fine
    store.clear().unwrap();
}
