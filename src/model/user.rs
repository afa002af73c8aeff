use log::debug;

use super::{Database, Error, Snowflake};
use crate::auth;

pub type Id = Snowflake;

#[derive(Clone, Debug, serde::Serialize)]
pub struct User {
    pub id: Id,
    pub name: String,
    pub email: String,
    #[serde(skip)] // Never hand the hash to a template
    pub password: String,
}

/// Check a user's credentials.
///
/// Returns the user when `email` exists and `password` matches its hash.
pub fn login(database: &Database, email: &str, password: &str) -> Result<Option<User>, Error> {
    let email = email.trim();
    let Some(user) = database.get_user_by_email(email)? else {
        debug!("No user with email {}", email);
        return Ok(None);
    };

    if !auth::hash::check_password(password, &user.password) {
        debug!("Password incorrect for user {}", user.id);
        return Ok(None);
    }

    Ok(Some(user))
}

/// Build a user ready to be registered, hashing the password.
///
/// Returns `None` when a field is empty. Does not touch the database, so
/// the slow hash can run without holding the database lock.
pub fn new_user(id: Id, name: &str, email: &str, password: &str) -> Result<Option<User>, Error> {
    let (name, email) = (name.trim(), email.trim());
    if name.is_empty() || email.is_empty() || password.is_empty() {
        debug!("Refusing to register user with an empty field");
        return Ok(None);
    }

    let password = auth::hash::hash_password(password).map_err(Error::Hash)?;
    Ok(Some(User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        password,
    }))
}

/// Store a user built by [`new_user`].
///
/// Returns `false` when the email is already taken.
pub fn register(database: &Database, user: &User) -> Result<bool, Error> {
    if database.get_user_by_email(&user.email)?.is_some() {
        debug!("Email {} is already registered", user.email);
        return Ok(false);
    }

    database.add_user(user)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{test_database, test_user};

    #[test]
    fn register_then_login() {
        let db = test_database();
        assert!(test_user(&db, 1, "Ada", "ada@example.com", "hunter2"));

        let user = login(&db, "ada@example.com", "hunter2").unwrap().unwrap();
        assert_eq!(user.name, "Ada");
        assert_ne!(user.password, "hunter2");

        assert!(login(&db, "ada@example.com", "wrong").unwrap().is_none());
        assert!(login(&db, "bob@example.com", "hunter2").unwrap().is_none());
    }

    #[test]
    fn padded_email_matches_on_both_sides() {
        let db = test_database();
        assert!(test_user(&db, 1, "Ada", " ada@example.com ", "hunter2"));

        assert!(db.get_user_by_email("ada@example.com").unwrap().is_some());
        assert!(login(&db, " ada@example.com ", "hunter2").unwrap().is_some());
        assert!(login(&db, "ada@example.com", "hunter2").unwrap().is_some());
    }

    #[test]
    fn register_rejects_duplicates() {
        let db = test_database();
        assert!(test_user(&db, 1, "Ada", "ada@example.com", "pw"));
        assert!(!test_user(&db, 2, "Other Ada", "ada@example.com", "pw"));
        assert_eq!(db.get_user(&2i64.into()).unwrap().map(|u| u.name), None);
    }

    #[test]
    fn new_user_rejects_blanks() {
        assert!(new_user(3i64.into(), "  ", "blank@example.com", "pw").unwrap().is_none());
        assert!(new_user(4i64.into(), "Bob", "  ", "pw").unwrap().is_none());
        assert!(new_user(5i64.into(), "Bob", "bob@example.com", "").unwrap().is_none());

        let user = new_user(6i64.into(), " Bob ", "bob@example.com", "pw").unwrap().unwrap();
        assert_eq!(user.name, "Bob");
        assert!(auth::hash::check_password("pw", &user.password));
    }
}
