use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension,
};
use axum_macros::debug_handler;
use log::error;
use tera::Context;

use crate::model::{AppState, User};

#[debug_handler]
pub async fn home(State(state): State<Arc<AppState>>, Extension(user): Extension<User>) -> Response {
    let products = {
        let database = state.database.lock().await;
        match database.get_listings() {
            Ok(listings) => listings,
            Err(err) => {
                error!("Failed to get listings from database: {}", err);
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        }
    };

    let mut context = Context::new();
    context.insert("user", &user);
    context.insert("products", &products);
    state.templates.render("index.html", &context)
}
