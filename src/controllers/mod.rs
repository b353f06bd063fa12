//! Page controllers: form state and the API calls a submission triggers.
//!
//! Every form goes `Idle -> Submitting -> (Success | FieldError | ServerError)`.
//! Validation failures never reach the network, and a controller that is
//! already submitting ignores further submissions.

pub mod login;
pub mod register;
pub mod reset_password;
pub mod users_page;

use std::time::Duration;

use crate::api::ApiError;
use crate::validation::FieldErrors;

pub use login::LoginController;
pub use register::RegisterController;
pub use reset_password::{ResetConfirmController, ResetPasswordController};
pub use users_page::{EditDialog, UsersPage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Submitting,
    Success,
    FieldError,
    ServerError,
}

/// Navigation scheduled after a successful submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayedRedirect {
    pub to: &'static str,
    pub after: Duration,
}

impl DelayedRedirect {
    /// Value for a `<meta http-equiv="refresh">` tag.
    pub fn refresh_content(&self) -> String {
        format!("{};url={}", self.after.as_secs_f32(), self.to)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormState {
    pub phase: FormPhase,
    pub field_errors: FieldErrors,
    pub error: Option<String>,
    pub success: Option<String>,
    pub redirect: Option<DelayedRedirect>,
}

impl FormState {
    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    /// Run validation and, when it passes, enter `Submitting`.
    /// Returns false when no request may be issued.
    pub(crate) fn begin(&mut self, errors: FieldErrors) -> bool {
        if self.is_submitting() {
            return false;
        }
        self.error = None;
        self.success = None;
        self.redirect = None;
        if !errors.is_empty() {
            self.field_errors = errors;
            self.phase = FormPhase::FieldError;
            return false;
        }
        self.field_errors.clear();
        self.phase = FormPhase::Submitting;
        true
    }

    pub(crate) fn succeed(&mut self, message: Option<&str>, redirect: Option<DelayedRedirect>) {
        self.phase = FormPhase::Success;
        self.success = message.map(str::to_string);
        self.redirect = redirect;
    }

    pub(crate) fn fail(&mut self, err: &ApiError, fallback: &str) {
        tracing::warn!(error = %err, "Form submission failed");
        self.fail_with(err.user_message(fallback));
    }

    pub(crate) fn fail_with(&mut self, message: String) {
        self.phase = FormPhase::ServerError;
        self.error = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_content() {
        let r = DelayedRedirect { to: "/login", after: Duration::from_millis(1500) };
        assert_eq!(r.refresh_content(), "1.5;url=/login");
        let r = DelayedRedirect { to: "/login", after: Duration::from_secs(2) };
        assert_eq!(r.refresh_content(), "2;url=/login");
    }

    #[test]
    fn test_begin_blocks_while_submitting() {
        let mut state = FormState::default();
        assert!(state.begin(FieldErrors::new()));
        assert!(!state.begin(FieldErrors::new()));
        assert_eq!(state.phase, FormPhase::Submitting);
    }

    #[test]
    fn test_begin_with_errors_enters_field_error() {
        let mut state = FormState::default();
        let mut errors = FieldErrors::new();
        errors.insert("email", "Email is required".into());
        assert!(!state.begin(errors));
        assert_eq!(state.phase, FormPhase::FieldError);
        assert_eq!(state.field_errors.get("email").map(String::as_str), Some("Email is required"));
    }
}
