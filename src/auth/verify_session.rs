use log::{debug, error};

use crate::model::{session::Token, Database, User};

/// Why a session token did not resolve to a user.
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// Unknown or expired token.
    NoSession,
    /// The session names an email that has no user.
    UserNotFound,
    LookupFailed,
}

pub fn verify_session(token: Token, database: &Database) -> Result<User, Error> {
    let session = match database.get_session_from_token(token) {
        Ok(Some(session)) => session,
        Ok(None) => {
            debug!("Session not found in database");
            return Err(Error::NoSession);
        }
        Err(err) => {
            error!("Failed to get session from database: {}", err);
            return Err(Error::LookupFailed);
        }
    };

    if session.is_expired() {
        debug!("Session for {} has expired", session.logged_in);
        if let Err(err) = database.delete_session(token) {
            error!("Failed to delete expired session: {}", err);
        }
        return Err(Error::NoSession);
    }

    match database.get_user_by_email(&session.logged_in) {
        Ok(Some(user)) => Ok(user),
        Ok(None) => {
            debug!("Session refers to missing user {}", session.logged_in);
            Err(Error::UserNotFound)
        }
        Err(err) => {
            error!("Failed to get user from database: {}", err);
            Err(Error::LookupFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{test_database, test_user, Session};
    use std::time::Duration;

    #[test]
    fn resolves_live_session() {
        let db = test_database();
        assert!(test_user(&db, 1, "Ada", "ada@example.com", "pw"));
        let session = Session::generate("ada@example.com".into(), Duration::from_secs(60));
        db.add_session(&session).unwrap();

        let user = verify_session(session.token, &db).unwrap();
        assert_eq!(user.name, "Ada");
    }

    #[test]
    fn unknown_token() {
        let db = test_database();
        assert_eq!(verify_session(1234, &db).unwrap_err(), Error::NoSession);
    }

    #[test]
    fn expired_session_is_removed() {
        let db = test_database();
        assert!(test_user(&db, 1, "Ada", "ada@example.com", "pw"));
        let session = Session::generate("ada@example.com".into(), Duration::ZERO);
        db.add_session(&session).unwrap();

        assert_eq!(verify_session(session.token, &db).unwrap_err(), Error::NoSession);
        assert!(db.get_session_from_token(session.token).unwrap().is_none());
    }

    #[test]
    fn session_for_missing_user() {
        let db = test_database();
        let session = Session::generate("ghost@example.com".into(), Duration::from_secs(60));
        db.add_session(&session).unwrap();

        assert_eq!(verify_session(session.token, &db).unwrap_err(), Error::UserNotFound);
    }
}
