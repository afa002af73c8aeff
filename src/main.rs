use log::{error, info};
use std::{process, sync::Arc};

use config::Config;
use model::{AppState, Database};
use templates::Templates;

mod auth;
mod config;
mod logger;
mod model;
mod routes;
mod templates;

#[tokio::main]
async fn main() {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid configuration: {}", err);
            process::exit(1);
        }
    };

    if let Err(err) = logger::init(config.log_level) {
        eprintln!("Failed to set up logging: {}", err);
        process::exit(1);
    }

    let database = match Database::build(&config.database) {
        Ok(database) => database,
        Err(err) => {
            error!("Failed to open database {}: {}", config.database.display(), err);
            process::exit(1);
        }
    };

    let templates = match Templates::load(&config.templates) {
        Ok(templates) => templates,
        Err(err) => {
            error!("Failed to parse templates: {:?}", err);
            process::exit(1);
        }
    };

    let state = match AppState::new(database, templates, config.session_ttl) {
        Ok(state) => Arc::new(state),
        Err(err) => {
            error!("Failed to build app state: {}", err);
            process::exit(1);
        }
    };

    let app = routes::router(state, &config.static_dir);

    info!("Starting qbay server at {}", config.addr);

    if let Err(err) = axum::Server::bind(&config.addr)
        .serve(app.into_make_service())
        .await
    {
        error!("Server error: {}", err);
        process::exit(1);
    }
}
