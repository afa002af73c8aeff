mod database;
pub mod listing;
pub mod session;
mod snowflake;
pub mod user;

use std::time::Duration;

use tokio::sync::Mutex;

use crate::templates::Templates;

pub use database::Database;
pub use listing::Listing;
pub use session::Session;
pub use snowflake::Snowflake;
pub use user::User;

type Snowcloud = snowcloud::MultiThread<43, 8, 12>;
const EPOCH: u64 = 1650667342;
const PRIMARY_ID: i64 = 1;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("failed to hash password: {0}")]
    Hash(argon2::password_hash::Error),
    #[error("failed to generate id: {0}")]
    Snowflake(#[from] snowcloud::Error),
}

pub struct AppState {
    pub database: Mutex<Database>,
    pub templates: Templates,
    pub session_ttl: Duration,
    snowcloud: Snowcloud,
}

impl AppState {
    pub fn new(
        database: Database,
        templates: Templates,
        session_ttl: Duration,
    ) -> Result<AppState, Error> {
        Ok(AppState {
            database: Mutex::new(database),
            templates,
            session_ttl,
            snowcloud: Snowcloud::new(PRIMARY_ID, EPOCH)?,
        })
    }

    /// Allocate a fresh id for a user or listing.
    pub fn next_id(&self) -> Result<Snowflake, Error> {
        Ok(self.snowcloud.next_id()?.into())
    }
}

#[cfg(test)]
pub(crate) fn test_database() -> Database {
    Database::build(":memory:").expect("in-memory database opens")
}

/// Hash and store a user in one go; `false` when it was refused.
#[cfg(test)]
pub(crate) fn test_user(database: &Database, id: i64, name: &str, email: &str, password: &str) -> bool {
    match user::new_user(id.into(), name, email, password).unwrap() {
        Some(user) => user::register(database, &user).unwrap(),
        None => false,
    }
}
