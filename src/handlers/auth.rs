use axum::{
    extract::{Form, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::controllers::{
    FormPhase, LoginController, RegisterController, ResetConfirmController, ResetPasswordController,
};
use crate::models::AppState;
use crate::session::{has_session, CookieSessionStore, TokenStore};
use crate::templates::{LoginTemplate, RegisterTemplate, ResetConfirmTemplate, ResetPasswordTemplate};

use super::helpers::{render_template, session_token, FormView};

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Checkbox: present only when ticked.
    pub remember: Option<String>,
}

#[derive(Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Deserialize)]
pub struct ResetPasswordForm {
    #[serde(default)]
    pub email: String,
}

#[derive(Deserialize)]
pub struct ResetConfirmForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub otp: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Deserialize, Default)]
pub struct ResetConfirmQuery {
    pub email: Option<String>,
}

pub async fn login_get(State(state): State<AppState>, jar: CookieJar) -> Response {
    if has_session(&jar) {
        return Redirect::to("/").into_response();
    }
    render_template(LoginTemplate {
        api_hostname: state.api_hostname.clone(),
        username: String::new(),
        remember: false,
        field_errors: Default::default(),
        error: None,
        refresh: None,
    })
}

pub async fn login_post(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    let mut controller = LoginController::new(form.username, form.password, form.remember.is_some());
    let mut store = CookieSessionStore::new(jar);
    if controller.submit(&state.api, &mut store).await == FormPhase::Success {
        return (store.into_jar(), Redirect::to("/")).into_response();
    }
    let view = FormView::from(&controller.state);
    render_template(LoginTemplate {
        api_hostname: state.api_hostname.clone(),
        username: controller.username,
        remember: controller.remember,
        field_errors: view.field_errors,
        error: view.error,
        refresh: view.refresh,
    })
}

/// End the session: both token scopes are cleared before leaving.
pub async fn logout_post(State(state): State<AppState>, jar: CookieJar) -> Response {
    if let Some(token) = session_token(&jar) {
        state.notices.discard(&token);
    }
    let mut store = CookieSessionStore::new(jar);
    if let Err(e) = store.clear() {
        tracing::error!(%e, "Failed to clear session");
    }
    tracing::info!("Signed out");
    (store.into_jar(), Redirect::to("/login")).into_response()
}

pub async fn register_get(State(state): State<AppState>) -> impl IntoResponse {
    render_register(&state, &RegisterController::default())
}

pub async fn register_post(State(state): State<AppState>, Form(form): Form<RegisterForm>) -> impl IntoResponse {
    let mut controller = RegisterController {
        username: form.username,
        email: form.email,
        password: form.password,
        confirm_password: form.confirm_password,
        ..Default::default()
    };
    controller.submit(&state.api).await;
    render_register(&state, &controller)
}

fn render_register(state: &AppState, controller: &RegisterController) -> Response {
    let view = FormView::from(&controller.state);
    render_template(RegisterTemplate {
        api_hostname: state.api_hostname.clone(),
        username: controller.username.clone(),
        email: controller.email.clone(),
        field_errors: view.field_errors,
        error: view.error,
        success: view.success,
        refresh: view.refresh,
    })
}

pub async fn reset_password_get(State(state): State<AppState>) -> impl IntoResponse {
    render_reset_password(&state, &ResetPasswordController::default())
}

pub async fn reset_password_post(
    State(state): State<AppState>,
    Form(form): Form<ResetPasswordForm>,
) -> impl IntoResponse {
    let mut controller = ResetPasswordController::new(form.email);
    controller.submit(&state.api).await;
    render_reset_password(&state, &controller)
}

fn render_reset_password(state: &AppState, controller: &ResetPasswordController) -> Response {
    let view = FormView::from(&controller.state);
    render_template(ResetPasswordTemplate {
        api_hostname: state.api_hostname.clone(),
        email: controller.email.clone(),
        field_errors: view.field_errors,
        error: view.error,
        success: view.success,
        refresh: view.refresh,
    })
}

pub async fn reset_confirm_get(
    State(state): State<AppState>,
    Query(query): Query<ResetConfirmQuery>,
) -> impl IntoResponse {
    let controller = ResetConfirmController {
        email: query.email.unwrap_or_default(),
        ..Default::default()
    };
    render_reset_confirm(&state, &controller)
}

pub async fn reset_confirm_post(
    State(state): State<AppState>,
    Form(form): Form<ResetConfirmForm>,
) -> impl IntoResponse {
    let mut controller = ResetConfirmController {
        email: form.email,
        otp: form.otp,
        new_password: form.new_password,
        confirm_password: form.confirm_password,
        ..Default::default()
    };
    controller.submit(&state.api).await;
    render_reset_confirm(&state, &controller)
}

fn render_reset_confirm(state: &AppState, controller: &ResetConfirmController) -> Response {
    let view = FormView::from(&controller.state);
    render_template(ResetConfirmTemplate {
        api_hostname: state.api_hostname.clone(),
        email: controller.email.clone(),
        otp: controller.otp.clone(),
        field_errors: view.field_errors,
        error: view.error,
        success: view.success,
        refresh: view.refresh,
    })
}
