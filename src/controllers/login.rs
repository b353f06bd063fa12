use crate::api::AuthApi;
use crate::session::TokenStore;
use crate::validation::validate_login;

use super::{DelayedRedirect, FormPhase, FormState};

pub const LOGIN_FAILED: &str = "Login failed";

#[derive(Debug, Clone, Default)]
pub struct LoginController {
    /// Username or email.
    pub username: String,
    pub password: String,
    pub remember: bool,
    pub state: FormState,
}

impl LoginController {
    pub fn new(username: impl Into<String>, password: impl Into<String>, remember: bool) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            remember,
            state: FormState::default(),
        }
    }

    /// Exchange the credentials for a token and keep it in `store`, in the
    /// durable scope when "remember me" is set.
    pub async fn submit<A, S>(&mut self, api: &A, store: &mut S) -> FormPhase
    where
        A: AuthApi + ?Sized,
        S: TokenStore + ?Sized,
    {
        let username = self.username.trim().to_string();
        if !self.state.begin(validate_login(&username, &self.password)) {
            return self.state.phase;
        }
        match api.login(&username, &self.password).await {
            Ok(token) => {
                if let Err(e) = store.save(&token.access_token, self.remember) {
                    tracing::error!(error = %e, "Failed to store session token");
                    self.state.fail_with("Could not save the session".into());
                    return self.state.phase;
                }
                tracing::info!(remember = self.remember, "Signed in");
                self.password.clear();
                self.state.succeed(None, Some(DelayedRedirect { to: "/", after: Default::default() }));
            }
            Err(e) => self.state.fail(&e, LOGIN_FAILED),
        }
        self.state.phase
    }
}
