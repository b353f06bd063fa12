use axum::{
    extract::{OriginalUri, State},
    response::IntoResponse,
};
use axum_extra::extract::cookie::CookieJar;

use crate::api::UsersApi;
use crate::models::AppState;
use crate::routes::nav_item;
use crate::templates::{ComingSoonTemplate, DashboardTemplate};

use super::helpers::{build_template_globals, render_template, session_token, TemplateGlobals};

pub async fn dashboard_get(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    // Greeting only; a failure here must not keep the dashboard from rendering.
    let current_user = match session_token(&jar) {
        Some(token) => match state.api.current_user(&token).await {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::debug!(error = %e, "Could not resolve current user");
                None
            }
        },
        None => None,
    };
    let TemplateGlobals { api_hostname, nav, current_path } = build_template_globals(&state, "/");
    render_template(DashboardTemplate {
        api_hostname,
        nav,
        current_path,
        current_user,
    })
}

pub async fn placeholder_get(State(state): State<AppState>, OriginalUri(uri): OriginalUri) -> impl IntoResponse {
    let path = uri.path();
    let feature_name = nav_item(path).map(|item| item.label).unwrap_or("This module").to_string();
    let TemplateGlobals { api_hostname, nav, current_path } = build_template_globals(&state, path);
    render_template(ComingSoonTemplate {
        api_hostname,
        nav,
        current_path,
        feature_name,
    })
}
