use std::time::Instant;

use axum::{
    extract::{Form, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::controllers::UsersPage;
use crate::models::AppState;
use crate::session::{CookieSessionStore, TokenStore};
use crate::templates::UsersPageTemplate;

use super::helpers::{build_template_globals, render_template, session_token, TemplateGlobals};

#[derive(Deserialize, Default)]
pub struct UsersQuery {
    /// Open the edit dialog for this user id.
    pub edit: Option<String>,
    /// Ask for confirmation before deleting this user id.
    pub delete: Option<String>,
}

#[derive(Deserialize)]
pub struct EditUserForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub roles: String,
}

pub async fn users_list(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<UsersQuery>,
) -> Response {
    let Some(token) = session_token(&jar) else {
        return Redirect::to("/login").into_response();
    };
    let mut page = UsersPage::new();
    page.refresh(&state.api, &token).await;
    if page.session_expired {
        return end_session(&state, jar, &token);
    }
    if let Some(id) = query.edit.as_deref() {
        page.open_edit(id);
    } else if let Some(id) = query.delete.as_deref() {
        page.request_delete(id);
    }
    page.notification = state.notices.take(&token);
    render_page(&state, &mut page)
}

pub async fn users_edit(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
    Form(form): Form<EditUserForm>,
) -> Response {
    let Some(token) = session_token(&jar) else {
        return Redirect::to("/login").into_response();
    };
    let mut page = UsersPage::new();
    page.refresh(&state.api, &token).await;
    if page.session_expired {
        return end_session(&state, jar, &token);
    }
    if !page.open_edit(&id) {
        state.notices.push(&token, crate::models::Notification::error("User not found"));
        return Redirect::to("/users").into_response();
    }
    page.set_edit_fields(&form.email, &form.roles);
    if page.save_edit(&state.api, &token).await {
        if let Some(notice) = page.notification.take() {
            state.notices.push(&token, notice);
        }
        return Redirect::to("/users").into_response();
    }
    if page.session_expired {
        return end_session(&state, jar, &token);
    }
    // Keep the dialog open with what was typed.
    render_page(&state, &mut page)
}

pub async fn users_delete(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<String>,
) -> Response {
    let Some(token) = session_token(&jar) else {
        return Redirect::to("/login").into_response();
    };
    let mut page = UsersPage::new();
    page.request_delete(&id);
    page.confirm_delete(&state.api, &token).await;
    if page.session_expired {
        return end_session(&state, jar, &token);
    }
    if let Some(notice) = page.notification.take() {
        state.notices.push(&token, notice);
    }
    Redirect::to("/users").into_response()
}

fn render_page(state: &AppState, page: &mut UsersPage) -> Response {
    page.dismiss_expired(Instant::now());
    let TemplateGlobals { api_hostname, nav, current_path } = build_template_globals(state, "/users");
    render_template(UsersPageTemplate::from_page(page, api_hostname, nav, current_path))
}

/// The API no longer accepts the token: forget it and start over.
fn end_session(state: &AppState, jar: CookieJar, token: &str) -> Response {
    tracing::info!("Session rejected by API, signing out");
    state.notices.discard(token);
    let mut store = CookieSessionStore::new(jar);
    if let Err(e) = store.clear() {
        tracing::error!(%e, "Failed to clear session");
    }
    (store.into_jar(), Redirect::to("/login")).into_response()
}
