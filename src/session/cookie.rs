use std::io;

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::config::REMEMBER_ME_DAYS;

use super::TokenStore;

/// Durable scope: carries a `Max-Age`.
pub const PERSISTENT_TOKEN_COOKIE: &str = "ems_token";
/// Scoped storage: a browser-session cookie.
pub const SESSION_TOKEN_COOKIE: &str = "ems_session_token";

/// Session store backed by the request's cookie jar. Hand the jar from
/// [`CookieSessionStore::into_jar`] back with the response so the browser
/// applies the changes.
#[derive(Debug, Clone)]
pub struct CookieSessionStore {
    jar: CookieJar,
}

impl CookieSessionStore {
    pub fn new(jar: CookieJar) -> Self {
        Self { jar }
    }

    pub fn into_jar(self) -> CookieJar {
        self.jar
    }

    pub fn jar(&self) -> &CookieJar {
        &self.jar
    }

    fn update(&mut self, f: impl FnOnce(CookieJar) -> CookieJar) {
        let jar = std::mem::replace(&mut self.jar, CookieJar::new());
        self.jar = f(jar);
    }
}

impl TokenStore for CookieSessionStore {
    fn save(&mut self, token: &str, persistent: bool) -> io::Result<()> {
        let (keep, drop) = if persistent {
            (PERSISTENT_TOKEN_COOKIE, SESSION_TOKEN_COOKIE)
        } else {
            (SESSION_TOKEN_COOKIE, PERSISTENT_TOKEN_COOKIE)
        };
        let mut cookie = token_cookie(keep, token.to_string());
        if persistent {
            cookie.set_max_age(time::Duration::days(REMEMBER_ME_DAYS));
        }
        self.update(|jar| jar.remove(removal_cookie(drop)).add(cookie));
        Ok(())
    }

    fn read(&self) -> Option<String> {
        token_from_jar(&self.jar)
    }

    fn clear(&mut self) -> io::Result<()> {
        self.update(|jar| {
            jar.remove(removal_cookie(PERSISTENT_TOKEN_COOKIE))
                .remove(removal_cookie(SESSION_TOKEN_COOKIE))
        });
        Ok(())
    }
}

/// Whether the request carries a session token in either scope. The token
/// is trusted on presence; the API rejects it if it is stale.
pub fn has_session(jar: &CookieJar) -> bool {
    token_from_jar(jar).is_some()
}

fn token_from_jar(jar: &CookieJar) -> Option<String> {
    [PERSISTENT_TOKEN_COOKIE, SESSION_TOKEN_COOKIE]
        .iter()
        .filter_map(|name| jar.get(name))
        .map(|c| c.value().trim().to_string())
        .find(|v| !v.is_empty())
}

fn token_cookie(name: &'static str, value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie
}

fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, "");
    cookie.set_path("/");
    cookie
}
