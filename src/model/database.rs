use super::{listing, session::Token, user, Listing, Session, User};
use log::{debug, info, trace};
use rusqlite::{Connection, OptionalExtension, Result as SqlResult, Row};
use std::path::Path;

type Result<T> = SqlResult<Option<T>>;

pub struct Database {
    conn: Connection,
}

/// Build the database.
impl Database {
    /// Open (or create) the database at `path`. `":memory:"` gives a
    /// throwaway database.
    pub fn build(path: impl AsRef<Path>) -> SqlResult<Database> {
        let conn = Connection::open(path)?;
        trace!("Opened database connection.");

        let db = Database { conn };
        db.init_db()?;
        Ok(db)
    }

    fn init_db(&self) -> SqlResult<()> {
        trace!("Initializing database...");

        self.conn.execute_batch(
            "PRAGMA foreign_keys = ON;

            CREATE TABLE IF NOT EXISTS users (
                id       INTEGER PRIMARY KEY,
                name     TEXT NOT NULL,
                email    TEXT NOT NULL UNIQUE,
                password TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS listings (
                id            INTEGER PRIMARY KEY,
                owner         INTEGER NOT NULL,
                title         TEXT NOT NULL,
                description   TEXT NOT NULL,
                price         INTEGER NOT NULL,
                last_modified TEXT NOT NULL,
                FOREIGN KEY(owner) REFERENCES users(id)
            );

            -- No foreign key on logged_in: a session may outlive its user
            CREATE TABLE IF NOT EXISTS sessions (
                token     INTEGER PRIMARY KEY,
                logged_in TEXT NOT NULL,
                expires   INTEGER NOT NULL
            );",
        )?;

        info!("Finished initializing database");
        Ok(())
    }
}

/// User stuff
impl Database {
    pub fn add_user(&self, user: &User) -> SqlResult<()> {
        debug!("Adding user {} to database", user.id);
        self.conn.execute(
            "INSERT INTO users (id, name, email, password) VALUES (?1, ?2, ?3, ?4)",
            (&user.id, &user.name, &user.email, &user.password),
        )?;
        Ok(())
    }

    pub fn get_user(&self, id: &user::Id) -> Result<User> {
        debug!("Getting user {}", id);
        self.conn
            .query_row(
                "SELECT id, name, email, password FROM users WHERE id=?1",
                (id,),
                map_user,
            )
            .optional()
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<User> {
        debug!("Getting user (email: {})", email);
        self.conn
            .query_row(
                "SELECT id, name, email, password FROM users WHERE email=?1",
                (email,),
                map_user,
            )
            .optional()
    }
}

/// Listing stuff
impl Database {
    pub fn add_listing(&self, listing: &Listing) -> SqlResult<()> {
        debug!("Adding listing {} to database", listing.id);
        self.conn.execute(
            "INSERT INTO listings (id, owner, title, description, price, last_modified)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                &listing.id,
                &listing.owner,
                &listing.title,
                &listing.description,
                listing.price,
                &listing.last_modified,
            ),
        )?;
        info!("Created listing {}: {}", listing.id, listing.title);
        Ok(())
    }

    pub fn update_listing(&self, listing: &Listing) -> SqlResult<()> {
        debug!("Updating listing {}", listing.id);
        self.conn.execute(
            "UPDATE listings SET title=?2, description=?3, price=?4, last_modified=?5
             WHERE id=?1",
            (
                &listing.id,
                &listing.title,
                &listing.description,
                listing.price,
                &listing.last_modified,
            ),
        )?;
        Ok(())
    }

    pub fn get_listing(&self, id: &listing::Id) -> Result<Listing> {
        debug!("Getting listing {}", id);
        self.conn
            .query_row(
                "SELECT id, owner, title, description, price, last_modified
                 FROM listings WHERE id=?1",
                (id,),
                map_listing,
            )
            .optional()
    }

    /// All listings, newest first.
    pub fn get_listings(&self) -> SqlResult<Vec<Listing>> {
        trace!("Getting all listings");
        let mut stmt = self.conn.prepare(
            "SELECT id, owner, title, description, price, last_modified
             FROM listings ORDER BY id DESC",
        )?;
        let listings = stmt
            .query_map((), map_listing)?
            .collect::<SqlResult<Vec<_>>>();
        listings
    }
}

/// Session stuff
impl Database {
    pub fn add_session(&self, session: &Session) -> SqlResult<()> {
        debug!("Adding session for {}", session.logged_in);
        self.conn.execute(
            "INSERT INTO sessions (token, logged_in, expires) VALUES (?1, ?2, ?3)",
            (session.token, &session.logged_in, session.expires),
        )?;
        Ok(())
    }

    pub fn get_session_from_token(&self, token: Token) -> Result<Session> {
        trace!("Getting session from token");
        self.conn
            .query_row(
                "SELECT token, logged_in, expires FROM sessions WHERE token=?1",
                (token,),
                |row| {
                    Ok(Session {
                        token: row.get(0)?,
                        logged_in: row.get(1)?,
                        expires: row.get(2)?,
                    })
                },
            )
            .optional()
    }

    /// Returns whether a session was removed.
    pub fn delete_session(&self, token: Token) -> SqlResult<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM sessions WHERE token=?1", (token,))?;
        debug!("Deleted {} session(s)", deleted);
        Ok(deleted > 0)
    }
}

fn map_user(row: &Row) -> SqlResult<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password: row.get(3)?,
    })
}

fn map_listing(row: &Row) -> SqlResult<Listing> {
    trace!("Mapping db row to listing");
    Ok(Listing {
        id: row.get(0)?,
        owner: row.get(1)?,
        title: row.get(2)?,
        description: row.get(3)?,
        price: row.get(4)?,
        last_modified: row.get(5)?,
    })
}
