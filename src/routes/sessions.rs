use crate::model::{session::Token, user, AppState, Session};
use axum::{
    extract::{State, TypedHeader},
    headers::Cookie,
    http::{header::SET_COOKIE, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_macros::debug_handler;
use log::{debug, error};
use std::{sync::Arc, time::Duration};

const COOKIE_NAME: &str = "session";

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoginForm {
    email: String,
    password: String,
}

#[debug_handler]
pub async fn login_get(State(state): State<Arc<AppState>>) -> Response {
    state.templates.form("login.html", "Please login")
}

#[debug_handler]
pub async fn login_post(
    State(state): State<Arc<AppState>>,
    Form(form): Form<LoginForm>,
) -> Response {
    debug!("Got login request for {}", form.email);

    let database = state.database.lock().await;
    let user = match user::login(&database, &form.email, &form.password) {
        Ok(Some(user)) => user,
        Ok(None) => return state.templates.form("login.html", "login failed"),
        Err(err) => {
            error!("Failed to check credentials: {}", err);
            return state.templates.form("login.html", "login failed");
        }
    };

    let session = Session::generate(user.email, state.session_ttl);
    if let Err(err) = database.add_session(&session) {
        error!("Failed to add session to database: {}", err);
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }

    debug!("Logged in user {}", user.id);

    // 303 so the browser follows up with a GET
    with_cookie(
        Redirect::to("/").into_response(),
        make_cookie(session.token, state.session_ttl),
    )
}

#[debug_handler]
pub async fn logout(
    State(state): State<Arc<AppState>>,
    cookies: Option<TypedHeader<Cookie>>,
) -> Response {
    if let Some(token) = session_token(cookies.as_ref()) {
        let database = state.database.lock().await;
        if let Err(err) = database.delete_session(token) {
            error!("Failed to delete session from database: {}", err);
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    }

    with_cookie(Redirect::to("/").into_response(), clear_cookie())
}

/// The session token the browser sent, if it sent a well-formed one.
pub(super) fn session_token(cookies: Option<&TypedHeader<Cookie>>) -> Option<Token> {
    cookies?.get(COOKIE_NAME)?.parse().ok()
}

pub(super) fn has_session_cookie(cookies: Option<&TypedHeader<Cookie>>) -> bool {
    cookies.map_or(false, |cookies| cookies.get(COOKIE_NAME).is_some())
}

fn make_cookie(token: Token, ttl: Duration) -> String {
    format!(
        // In production, the secure flag should be present
        "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        COOKIE_NAME,
        token,
        ttl.as_secs(),
    )
}

pub(super) fn clear_cookie() -> String {
    format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", COOKIE_NAME)
}

pub(super) fn with_cookie(mut response: Response, cookie: String) -> Response {
    match HeaderValue::from_str(&cookie) {
        Ok(value) => {
            response.headers_mut().insert(SET_COOKIE, value);
            response
        }
        Err(err) => {
            error!("Invalid cookie header: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
