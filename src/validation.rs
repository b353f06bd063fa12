//! Field validation for the authentication forms.
//!
//! Every validator returns a [`FieldErrors`] map keyed by the form field name.
//! An empty map means the input may be submitted.

use std::collections::BTreeMap;

use crate::config::MIN_PASSWORD_LENGTH;

pub type FieldErrors = BTreeMap<&'static str, String>;

pub const EMAIL: &str = "email";
pub const PASSWORD: &str = "password";
pub const CONFIRM_PASSWORD: &str = "confirm_password";
pub const USERNAME: &str = "username";
pub const OTP: &str = "otp";

pub const PASSWORDS_DO_NOT_MATCH: &str = "Passwords do not match";

/// Returns the message for a bad email, or `None` when it looks deliverable.
pub fn validate_email(email: &str) -> Option<String> {
    let email = email.trim();
    if email.is_empty() {
        return Some("Email is required".into());
    }
    if !is_plausible_email(email) {
        return Some("Enter a valid email address".into());
    }
    None
}

pub fn validate_password(password: &str) -> Option<String> {
    if password.is_empty() {
        return Some("Password is required".into());
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Some(format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH));
    }
    None
}

/// Sign-in accepts a username or an email. The email rule applies only to
/// identifiers containing `@`.
pub fn validate_identifier(identifier: &str) -> Option<String> {
    let identifier = identifier.trim();
    if identifier.is_empty() {
        return Some("Username or email is required".into());
    }
    if identifier.contains('@') {
        return validate_email(identifier);
    }
    None
}

pub fn validate_login(identifier: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Some(msg) = validate_identifier(identifier) {
        errors.insert(USERNAME, msg);
    }
    if let Some(msg) = validate_password(password) {
        errors.insert(PASSWORD, msg);
    }
    errors
}

fn validate_email_and_password(email: &str, password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Some(msg) = validate_email(email) {
        errors.insert(EMAIL, msg);
    }
    if let Some(msg) = validate_password(password) {
        errors.insert(PASSWORD, msg);
    }
    errors
}

pub fn validate_registration(username: &str, email: &str, password: &str, confirm_password: &str) -> FieldErrors {
    let mut errors = validate_email_and_password(email, password);
    if username.trim().is_empty() {
        errors.insert(USERNAME, "Username is required".into());
    }
    if password != confirm_password {
        errors.insert(CONFIRM_PASSWORD, PASSWORDS_DO_NOT_MATCH.into());
    }
    errors
}

pub fn validate_reset_request(email: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Some(msg) = validate_email(email) {
        errors.insert(EMAIL, msg);
    }
    errors
}

pub fn validate_reset_confirm(email: &str, otp: &str, new_password: &str, confirm_password: &str) -> FieldErrors {
    let mut errors = validate_email_and_password(email, new_password);
    if otp.trim().is_empty() {
        errors.insert(OTP, "Reset code is required".into());
    }
    if new_password != confirm_password {
        errors.insert(CONFIRM_PASSWORD, PASSWORDS_DO_NOT_MATCH.into());
    }
    errors
}

/// Split a comma separated role list as typed into the edit dialog.
pub fn parse_roles(raw: &str) -> Vec<String> {
    let mut roles: Vec<String> = Vec::new();
    for role in raw.split(',').map(str::trim) {
        if role.is_empty() || roles.iter().any(|r| r == role) {
            continue;
        }
        roles.push(role.to_string());
    }
    roles
}

pub fn join_roles(roles: &[String]) -> String {
    roles.join(", ")
}

fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return false,
    };
    if local.is_empty() || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| !label.is_empty())
}
