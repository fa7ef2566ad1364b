use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::SignedCookieJar;

use crate::app::AppState;
use crate::error::PortalResult;
use crate::session::{LoginState, SESSION_COOKIE};

/// Where anonymous clients are sent
pub const LOGIN_PATH: &str = "/login";

/// Work out the login state of the client behind `jar`.
///
/// A cookie that fails signature verification is treated as absent, as is one
/// naming a session the store no longer knows.
pub async fn login_state(state: &AppState, jar: &SignedCookieJar) -> PortalResult<LoginState> {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return Ok(LoginState::Anonymous);
    };

    if state.sessions.is_authenticated(cookie.value()).await? {
        Ok(LoginState::Authenticated)
    } else {
        Ok(LoginState::Anonymous)
    }
}

/// Gate for the dashboard and every app route: anonymous requests are
/// redirected to the login form before any handler runs.
pub async fn require_session(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    request: Request,
    next: Next,
) -> Response {
    match login_state(&state, &jar).await {
        Ok(LoginState::Authenticated) => next.run(request).await,
        Ok(LoginState::Anonymous) => {
            tracing::debug!("Redirecting anonymous request for {} to login", request.uri().path());
            Redirect::to(LOGIN_PATH).into_response()
        }
        Err(e) => e.into_response(),
    }
}
