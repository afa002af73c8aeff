use axum::{
    extract::{State, TypedHeader},
    headers::Cookie,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use log::{error, trace};
use std::sync::Arc;

use super::sessions::{clear_cookie, has_session_cookie, session_token, with_cookie};
use crate::{auth, model::AppState};

/// Session gate for the protected routes.
///
/// Resolves the `session` cookie to a [`User`](crate::model::User) and
/// stores it in the request extensions for the handler. Callers without a
/// usable session are sent to `/login`; a storage failure is a 500.
pub async fn authenticate<B>(
    State(state): State<Arc<AppState>>,
    cookies: Option<TypedHeader<Cookie>>,
    mut request: Request<B>,
    next: Next<B>,
) -> Response {
    let Some(token) = session_token(cookies.as_ref()) else {
        let redirect = Redirect::to("/login").into_response();
        if has_session_cookie(cookies.as_ref()) {
            trace!("Malformed session cookie, clearing it");
            return with_cookie(redirect, clear_cookie());
        }
        trace!("No session cookie, redirecting to login");
        return redirect;
    };

    let user = {
        let database = state.database.lock().await;
        match auth::verify_session(token, &database) {
            Ok(user) => user,
            Err(auth::Error::NoSession) => {
                return with_cookie(Redirect::to("/login").into_response(), clear_cookie());
            }
            Err(auth::Error::UserNotFound) => {
                // Stale session, drop it so the browser stops sending it
                if let Err(err) = database.delete_session(token) {
                    error!("Failed to delete stale session: {}", err);
                }
                return with_cookie(Redirect::to("/login").into_response(), clear_cookie());
            }
            Err(auth::Error::LookupFailed) => {
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        }
    };

    trace!("Request authenticated as user {}", user.id);
    request.extensions_mut().insert(user);

    next.run(request).await
}
