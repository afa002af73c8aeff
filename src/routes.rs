mod auth;
mod home;
mod listings;
mod register;
mod sessions;


use axum::{middleware, routing::get, Router};
use log::{error, warn};
use std::{path::Path, sync::Arc};
use tower_http::services::ServeDir;

use crate::model::{self, AppState, Snowflake};

pub fn router(state: Arc<AppState>, static_dir: impl AsRef<Path>) -> Router {
    // Everything in here only runs for a logged in user
    let protected = Router::new()
        .route("/", get(home::home))
        .route(
            "/create_listing",
            get(listings::create_listing_get).post(listings::create_listing_post),
        )
        .route(
            "/update_listing",
            get(listings::update_listing_get).post(listings::update_listing_post),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::authenticate,
        ));

    Router::new()
        .merge(protected)
        .route("/login", get(sessions::login_get).post(sessions::login_post))
        .route("/logout", get(sessions::logout))
        .route(
            "/register",
            get(register::register_get).post(register::register_post),
        )
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

/// Allocate an id, logging why when the generator refuses.
fn next_id(state: &AppState) -> Option<Snowflake> {
    match state.next_id() {
        Ok(id) => Some(id),
        Err(model::Error::Snowflake(err @ snowcloud::Error::SequenceMaxReached(_))) => {
            warn!("Snowflake sequence max reached: {}", err);
            None
        }
        Err(err) => {
            error!("Failed to generate snowflake: {}", err);
            None
        }
    }
}
