use axum::http::header::{CACHE_CONTROL, CONTENT_TYPE};
use axum::http::HeaderValue;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::models::AppState;

// Embed the default stylesheet in the binary
const DEFAULT_STYLESHEET: &str = include_str!("../static/styles.css");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteStatus {
    Implemented,
    /// Listed in the navigation, renders a "coming soon" page.
    Placeholder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub status: RouteStatus,
}

impl NavItem {
    pub fn is_placeholder(&self) -> bool {
        self.status == RouteStatus::Placeholder
    }
}

/// Sidebar of the dashboard shell.
pub const NAV_ITEMS: &[NavItem] = &[
    NavItem { label: "Dashboard", path: "/", status: RouteStatus::Implemented },
    NavItem { label: "Users", path: "/users", status: RouteStatus::Implemented },
    NavItem { label: "Tasks", path: "/tasks", status: RouteStatus::Placeholder },
    NavItem { label: "Payroll", path: "/payroll", status: RouteStatus::Placeholder },
    NavItem { label: "Documents", path: "/documents", status: RouteStatus::Placeholder },
];

pub fn nav_item(path: &str) -> Option<&'static NavItem> {
    NAV_ITEMS.iter().find(|item| item.path == path)
}

pub fn build_app(state: AppState) -> Router {
    let mut protected_routes = Router::new()
        .route("/", get(handlers::dashboard::dashboard_get))
        .route("/users", get(handlers::users::users_list))
        .route("/users/:id/edit", post(handlers::users::users_edit))
        .route("/users/:id/delete", post(handlers::users::users_delete));
    for item in NAV_ITEMS.iter().filter(|item| item.is_placeholder()) {
        protected_routes = protected_routes.route(item.path, get(handlers::dashboard::placeholder_get));
    }
    let protected_routes = protected_routes
        .route_layer(axum::middleware::from_fn(handlers::middleware::auth_middleware));

    // Serve the custom stylesheet when one was provided, otherwise the embedded default
    let stylesheet_content = state.custom_css.clone().unwrap_or_else(|| DEFAULT_STYLESHEET.to_string());

    Router::new()
        .route("/login", get(handlers::auth::login_get).post(handlers::auth::login_post))
        .route("/register", get(handlers::auth::register_get).post(handlers::auth::register_post))
        .route(
            "/reset-password",
            get(handlers::auth::reset_password_get).post(handlers::auth::reset_password_post),
        )
        .route(
            "/reset-password/confirm",
            get(handlers::auth::reset_confirm_get).post(handlers::auth::reset_confirm_post),
        )
        .route("/logout", post(handlers::auth::logout_post))
        .route(
            "/static/styles.css",
            get(move || {
                let css = stylesheet_content.clone();
                async move { ([(CONTENT_TYPE, "text/css")], css) }
            })
            .layer(
                ServiceBuilder::new().layer(SetResponseHeaderLayer::if_not_present(
                    CACHE_CONTROL,
                    HeaderValue::from_static("public, max-age=3600"),
                )),
            ),
        )
        .merge(protected_routes)
        .fallback(handlers::middleware::unknown_path)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_table_marks_placeholders() {
        let placeholders: Vec<&str> = NAV_ITEMS.iter().filter(|i| i.is_placeholder()).map(|i| i.path).collect();
        assert_eq!(placeholders, vec!["/tasks", "/payroll", "/documents"]);
        assert_eq!(nav_item("/").map(|i| i.label), Some("Dashboard"));
        assert!(nav_item("/nowhere").is_none());
    }
}
