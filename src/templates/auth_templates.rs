use askama::Template;

use crate::validation::FieldErrors;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub api_hostname: String,
    pub username: String,
    pub remember: bool,
    pub field_errors: FieldErrors,
    pub error: Option<String>,
    pub refresh: Option<String>,
}

#[derive(Template)]
#[template(path = "register.html")]
pub struct RegisterTemplate {
    pub api_hostname: String,
    pub username: String,
    pub email: String,
    pub field_errors: FieldErrors,
    pub error: Option<String>,
    pub success: Option<String>,
    pub refresh: Option<String>,
}

#[derive(Template)]
#[template(path = "reset_password.html")]
pub struct ResetPasswordTemplate {
    pub api_hostname: String,
    pub email: String,
    pub field_errors: FieldErrors,
    pub error: Option<String>,
    pub success: Option<String>,
    pub refresh: Option<String>,
}

#[derive(Template)]
#[template(path = "reset_confirm.html")]
pub struct ResetConfirmTemplate {
    pub api_hostname: String,
    pub email: String,
    pub otp: String,
    pub field_errors: FieldErrors,
    pub error: Option<String>,
    pub success: Option<String>,
    pub refresh: Option<String>,
}
