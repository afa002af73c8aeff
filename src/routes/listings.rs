use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Extension, Form,
};
use axum_macros::debug_handler;
use log::{debug, error};

use crate::model::{listing, AppState, User};

/// Listings cheaper than this are turned away before reaching the model.
pub const MIN_PRICE: i64 = 10;

const CREATE_TEMPLATE: &str = "create_listing.html";
const UPDATE_TEMPLATE: &str = "update_listing.html";

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct ListingForm {
    /// Only read by the update form.
    pub listing_id: String,
    pub title: String,
    pub description: String,
    pub price: String,
}

fn parse_price(price: &str) -> Result<i64, &'static str> {
    let Ok(price) = price.trim().parse::<i64>() else {
        return Err("The price must be a whole number.");
    };
    if price < MIN_PRICE {
        return Err("The price cannot be less than 10.");
    }
    Ok(price)
}

#[debug_handler]
pub async fn create_listing_get(
    State(state): State<Arc<AppState>>,
    Extension(_user): Extension<User>,
) -> Response {
    state.templates.form(CREATE_TEMPLATE, "")
}

#[debug_handler]
pub async fn create_listing_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Form(form): Form<ListingForm>,
) -> Response {
    let price = match parse_price(&form.price) {
        Ok(price) => price,
        Err(message) => return state.templates.form(CREATE_TEMPLATE, message),
    };

    let Some(id) = super::next_id(&state) else {
        return state.templates.form(CREATE_TEMPLATE, "Listing creation failed.");
    };

    let database = state.database.lock().await;
    match listing::create_listing(
        &database,
        id,
        user.id,
        &form.title,
        &form.description,
        price,
    ) {
        Ok(true) => Redirect::to("/").into_response(),
        Ok(false) => state.templates.form(CREATE_TEMPLATE, "Listing creation failed."),
        Err(err) => {
            error!("Failed to add listing to database: {}", err);
            state.templates.form(CREATE_TEMPLATE, "Listing creation failed.")
        }
    }
}

#[debug_handler]
pub async fn update_listing_get(
    State(state): State<Arc<AppState>>,
    Extension(_user): Extension<User>,
) -> Response {
    state.templates.form(UPDATE_TEMPLATE, "")
}

#[debug_handler]
pub async fn update_listing_post(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<User>,
    Form(form): Form<ListingForm>,
) -> Response {
    let price = match parse_price(&form.price) {
        Ok(price) => price,
        Err(message) => return state.templates.form(UPDATE_TEMPLATE, message),
    };

    let Ok(id) = form.listing_id.parse::<listing::Id>() else {
        debug!("Bad listing id {:?}", form.listing_id);
        return state.templates.form(UPDATE_TEMPLATE, "Listing update failed.");
    };

    let database = state.database.lock().await;
    match listing::update_listing(
        &database,
        id,
        user.id,
        &form.title,
        &form.description,
        price,
    ) {
        Ok(true) => Redirect::to("/").into_response(),
        Ok(false) => state.templates.form(UPDATE_TEMPLATE, "Listing update failed."),
        Err(err) => {
            error!("Failed to update listing {}: {}", id, err);
            state.templates.form(UPDATE_TEMPLATE, "Listing update failed.")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_floor() {
        assert_eq!(parse_price("10"), Ok(10));
        assert_eq!(parse_price(" 250 "), Ok(250));
        assert_eq!(parse_price("9"), Err("The price cannot be less than 10."));
        assert_eq!(parse_price("-3"), Err("The price cannot be less than 10."));
        assert_eq!(parse_price("ten"), Err("The price must be a whole number."));
        assert_eq!(parse_price(""), Err("The price must be a whole number."));
    }
}
