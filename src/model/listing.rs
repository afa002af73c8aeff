use log::debug;
use std::time::SystemTime;

use super::{user, Database, Error, Snowflake};

pub type Id = Snowflake;

#[derive(Clone, Debug, serde::Serialize)]
pub struct Listing {
    pub id: Id,
    pub owner: user::Id,
    pub title: String,
    pub description: String,
    pub price: i64,
    /// RFC 3339, seconds precision.
    pub last_modified: String,
}

fn now() -> String {
    humantime::format_rfc3339_seconds(SystemTime::now()).to_string()
}

fn has_text(title: &str, description: &str) -> bool {
    !title.trim().is_empty() && !description.trim().is_empty()
}

/// Create a listing owned by `owner`.
///
/// Returns `false` when the title or description is blank, or the owner
/// does not exist. The price is not checked here.
pub fn create_listing(
    database: &Database,
    id: Id,
    owner: user::Id,
    title: &str,
    description: &str,
    price: i64,
) -> Result<bool, Error> {
    if !has_text(title, description) {
        debug!("Refusing listing {} with a blank field", id);
        return Ok(false);
    }

    if database.get_user(&owner)?.is_none() {
        debug!("Refusing listing {}: owner {} does not exist", id, owner);
        return Ok(false);
    }

    database.add_listing(&Listing {
        id,
        owner,
        title: title.trim().to_string(),
        description: description.trim().to_string(),
        price,
        last_modified: now(),
    })?;

    Ok(true)
}

/// Overwrite a listing's title, description and price.
///
/// Returns `false` when the listing is missing, belongs to someone other
/// than `owner`, or the new title or description is blank.
pub fn update_listing(
    database: &Database,
    id: Id,
    owner: user::Id,
    title: &str,
    description: &str,
    price: i64,
) -> Result<bool, Error> {
    if !has_text(title, description) {
        debug!("Refusing update of listing {} with a blank field", id);
        return Ok(false);
    }

    let Some(listing) = database.get_listing(&id)? else {
        debug!("Listing {} does not exist", id);
        return Ok(false);
    };

    if listing.owner != owner {
        debug!("User {} does not own listing {}", owner, id);
        return Ok(false);
    }

    database.update_listing(&Listing {
        title: title.trim().to_string(),
        description: description.trim().to_string(),
        price,
        last_modified: now(),
        ..listing
    })?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{test_database, test_user};

    fn with_owner() -> Database {
        let db = test_database();
        assert!(test_user(&db, 1, "Ada", "ada@example.com", "pw"));
        db
    }

    #[test]
    fn create_requires_owner_and_text() {
        let db = with_owner();
        assert!(create_listing(&db, 10i64.into(), 1i64.into(), "Desk", "Oak", 50).unwrap());
        assert!(!create_listing(&db, 11i64.into(), 2i64.into(), "Desk", "Oak", 50).unwrap());
        assert!(!create_listing(&db, 12i64.into(), 1i64.into(), " ", "Oak", 50).unwrap());

        let listing = db.get_listing(&10i64.into()).unwrap().unwrap();
        assert_eq!(listing.title, "Desk");
        assert_eq!(listing.price, 50);
        assert!(db.get_listing(&11i64.into()).unwrap().is_none());
    }

    #[test]
    fn update_checks_ownership() {
        let db = with_owner();
        assert!(test_user(&db, 2, "Bob", "bob@example.com", "pw"));
        assert!(create_listing(&db, 10i64.into(), 1i64.into(), "Desk", "Oak", 50).unwrap());

        assert!(!update_listing(&db, 10i64.into(), 2i64.into(), "Mine", "Now", 60).unwrap());
        assert!(!update_listing(&db, 99i64.into(), 1i64.into(), "Gone", "Gone", 60).unwrap());
        assert!(update_listing(&db, 10i64.into(), 1i64.into(), "Desk", "Walnut", 75).unwrap());

        let listing = db.get_listing(&10i64.into()).unwrap().unwrap();
        assert_eq!(listing.description, "Walnut");
        assert_eq!(listing.price, 75);
        assert_eq!(listing.owner.id(), 1);
    }
}
