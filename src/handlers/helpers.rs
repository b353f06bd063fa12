use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::controllers::FormState;
use crate::models::AppState;
use crate::routes::{NavItem, NAV_ITEMS};
use crate::session::{CookieSessionStore, TokenStore};
use crate::validation::FieldErrors;

/// Values every page template needs.
#[derive(Default)]
pub struct TemplateGlobals {
    pub api_hostname: String,
    pub nav: &'static [NavItem],
    pub current_path: String,
}

pub fn build_template_globals(state: &AppState, current_path: &str) -> TemplateGlobals {
    TemplateGlobals {
        api_hostname: state.api_hostname.clone(),
        nav: NAV_ITEMS,
        current_path: current_path.to_string(),
    }
}

/// Messages and errors of a form, split out for its template.
pub struct FormView {
    pub field_errors: FieldErrors,
    pub error: Option<String>,
    pub success: Option<String>,
    pub refresh: Option<String>,
}

impl From<&FormState> for FormView {
    fn from(state: &FormState) -> Self {
        Self {
            field_errors: state.field_errors.clone(),
            error: state.error.clone(),
            success: state.success.clone(),
            refresh: state
                .redirect
                .filter(|r| !r.after.is_zero())
                .map(|r| r.refresh_content()),
        }
    }
}

pub fn session_token(jar: &CookieJar) -> Option<String> {
    CookieSessionStore::new(jar.clone()).read()
}

pub fn render_template<T: askama::Template>(t: T) -> Response {
    match t.render() {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            tracing::error!(%e, "Template render error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}
