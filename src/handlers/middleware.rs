use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::session::has_session;

/// Gate for the dashboard area, evaluated on every request.
pub async fn auth_middleware(jar: CookieJar, request: Request, next: Next) -> Response {
    if has_session(&jar) {
        next.run(request).await
    } else {
        tracing::debug!(path = %request.uri().path(), "No session, redirecting to login");
        Redirect::to("/login").into_response()
    }
}

/// Any path without a route: signed-in users land on the dashboard,
/// everyone else on the sign-in page.
pub async fn unknown_path(jar: CookieJar, request: Request) -> Redirect {
    if has_session(&jar) {
        tracing::debug!(path = %request.uri().path(), "Unknown path, redirecting to dashboard");
        Redirect::to("/")
    } else {
        Redirect::to("/login")
    }
}
