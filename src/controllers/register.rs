use crate::api::AuthApi;
use crate::config::REGISTER_REDIRECT_DELAY;
use crate::validation::validate_registration;

use super::{DelayedRedirect, FormPhase, FormState};

pub const REGISTER_SUCCESS: &str = "Registration successful! Please log in.";
pub const REGISTER_FAILED: &str = "Registration failed";

#[derive(Debug, Clone, Default)]
pub struct RegisterController {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub state: FormState,
}

impl RegisterController {
    pub async fn submit<A: AuthApi + ?Sized>(&mut self, api: &A) -> FormPhase {
        let username = self.username.trim().to_string();
        let email = self.email.trim().to_string();
        let errors = validate_registration(&username, &email, &self.password, &self.confirm_password);
        if !self.state.begin(errors) {
            return self.state.phase;
        }
        match api.register(&username, &email, &self.password).await {
            Ok(()) => {
                tracing::info!(%username, "Account registered");
                *self = Self { state: std::mem::take(&mut self.state), ..Self::default() };
                self.state.succeed(
                    Some(REGISTER_SUCCESS),
                    Some(DelayedRedirect { to: "/login", after: REGISTER_REDIRECT_DELAY }),
                );
            }
            Err(e) => self.state.fail(&e, REGISTER_FAILED),
        }
        self.state.phase
    }
}
