//! Where the session token lives between requests.
//!
//! A token is kept in exactly one of two scopes: durable storage that
//! survives restarts ("remember me"), or storage scoped to the current
//! browsing context / process.

pub mod cookie;
pub mod file;

use std::io;

pub use cookie::{has_session, CookieSessionStore, PERSISTENT_TOKEN_COOKIE, SESSION_TOKEN_COOKIE};
pub use file::FileTokenStore;

pub trait TokenStore {
    /// Store `token` in the durable scope when `persistent`, otherwise in the
    /// scoped one. The other scope is emptied.
    fn save(&mut self, token: &str, persistent: bool) -> io::Result<()>;

    fn read(&self) -> Option<String>;

    /// Remove the token from both scopes.
    fn clear(&mut self) -> io::Result<()>;
}
