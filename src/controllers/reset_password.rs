use crate::api::AuthApi;
use crate::config::{REGISTER_REDIRECT_DELAY, RESET_REDIRECT_DELAY};
use crate::validation::{validate_reset_confirm, validate_reset_request};

use super::{DelayedRedirect, FormPhase, FormState};

/// Shown on every accepted request, whether or not the account exists.
pub const RESET_REQUESTED: &str = "If this email is registered, you will receive a password reset link.";
pub const RESET_CONFIRMED: &str = "Password reset successful. Please log in.";
pub const RESET_FAILED: &str = "Reset failed";

#[derive(Debug, Clone, Default)]
pub struct ResetPasswordController {
    pub email: String,
    pub state: FormState,
}

impl ResetPasswordController {
    pub fn new(email: impl Into<String>) -> Self {
        Self { email: email.into(), state: FormState::default() }
    }

    pub async fn submit<A: AuthApi + ?Sized>(&mut self, api: &A) -> FormPhase {
        let email = self.email.trim().to_string();
        if !self.state.begin(validate_reset_request(&email)) {
            return self.state.phase;
        }
        match api.reset_password(&email).await {
            Ok(()) => {
                self.email.clear();
                self.state.succeed(
                    Some(RESET_REQUESTED),
                    Some(DelayedRedirect { to: "/login", after: RESET_REDIRECT_DELAY }),
                );
            }
            Err(e) => self.state.fail(&e, RESET_FAILED),
        }
        self.state.phase
    }
}

/// Second step of the reset: the emailed code plus the new password.
#[derive(Debug, Clone, Default)]
pub struct ResetConfirmController {
    pub email: String,
    pub otp: String,
    pub new_password: String,
    pub confirm_password: String,
    pub state: FormState,
}

impl ResetConfirmController {
    pub async fn submit<A: AuthApi + ?Sized>(&mut self, api: &A) -> FormPhase {
        let email = self.email.trim().to_string();
        let otp = self.otp.trim().to_string();
        let errors = validate_reset_confirm(&email, &otp, &self.new_password, &self.confirm_password);
        if !self.state.begin(errors) {
            return self.state.phase;
        }
        match api.confirm_reset(&email, &otp, &self.new_password).await {
            Ok(()) => {
                *self = Self { state: std::mem::take(&mut self.state), ..Self::default() };
                self.state.succeed(
                    Some(RESET_CONFIRMED),
                    Some(DelayedRedirect { to: "/login", after: REGISTER_REDIRECT_DELAY }),
                );
            }
            Err(e) => self.state.fail(&e, RESET_FAILED),
        }
        self.state.phase
    }
}
