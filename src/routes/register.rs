use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_macros::debug_handler;
use log::{debug, error};

use crate::model::{user, AppState};

const TEMPLATE: &str = "register.html";

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RegisterForm {
    pub email: String,
    pub name: String,
    pub password: String,
    pub password2: String,
}

#[debug_handler]
pub async fn register_get(State(state): State<Arc<AppState>>) -> Response {
    state.templates.form(TEMPLATE, "")
}

#[debug_handler]
pub async fn register_post(
    State(state): State<Arc<AppState>>,
    Form(form): Form<RegisterForm>,
) -> Response {
    if form.password != form.password2 {
        debug!("Registration for {} with mismatched passwords", form.email);
        return state.templates.form(TEMPLATE, "The passwords do not match");
    }

    let Some(id) = super::next_id(&state) else {
        return state.templates.form(TEMPLATE, "Registration failed.");
    };

    // Hash before taking the lock
    let user = match user::new_user(id, &form.name, &form.email, &form.password) {
        Ok(Some(user)) => user,
        Ok(None) => return state.templates.form(TEMPLATE, "Registration failed."),
        Err(err) => {
            error!("Failed to prepare user: {}", err);
            return state.templates.form(TEMPLATE, "Registration failed.");
        }
    };

    let database = state.database.lock().await;
    match user::register(&database, &user) {
        Ok(true) => Redirect::to("/login").into_response(),
        Ok(false) => state.templates.form(TEMPLATE, "Registration failed."),
        Err(err) => {
            error!("Failed to add user to database: {}", err);
            state.templates.form(TEMPLATE, "Registration failed.")
        }
    }
}
