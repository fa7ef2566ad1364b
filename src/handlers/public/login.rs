// handlers/public/login.rs - GET/POST /login, GET /logout

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    SignedCookieJar,
};
use serde::Deserialize;

use crate::app::AppState;
use crate::error::PortalResult;
use crate::middleware::{login_state, LOGIN_PATH};
use crate::session::{LoginState, SessionId, SESSION_COOKIE};
use crate::templates::{render_html, LoginTemplate};

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    password: String,
}

/// GET /login - show the password form, or skip it for a live session
pub async fn login_page(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> PortalResult<Response> {
    if login_state(&state, &jar).await?.is_authenticated() {
        return Ok(Redirect::to("/").into_response());
    }

    Ok(render_html(&LoginTemplate { error: None })?.into_response())
}

/// POST /login - check the class password and start a session
pub async fn login_submit(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> PortalResult<Response> {
    match LoginState::submit(&form.password, &state.config.class_password) {
        Ok(_) => {
            // Always issue a fresh id on login
            if let Some(previous) = jar.get(SESSION_COOKIE) {
                state.sessions.destroy(previous.value()).await?;
            }
            let session_id = state.sessions.create().await?;
            tracing::info!("Student signed in");

            let jar = jar.add(session_cookie(session_id));
            Ok((jar, Redirect::to("/")).into_response())
        }
        Err(err) => {
            tracing::warn!("Rejected login attempt with wrong class password");
            let page = render_html(&LoginTemplate {
                error: Some(err.to_string()),
            })?;
            Ok(page.into_response())
        }
    }
}

/// GET /logout - end the session and clear the cookie
pub async fn logout(State(state): State<AppState>, jar: SignedCookieJar) -> PortalResult<Response> {
    let current = login_state(&state, &jar).await?;
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.destroy(cookie.value()).await?;
    }
    let next = current.logout();
    tracing::info!(from = ?current, to = ?next, "Student signed out");

    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/"));
    Ok((jar, Redirect::to(LOGIN_PATH)).into_response())
}

fn session_cookie(session_id: SessionId) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session_id))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}
