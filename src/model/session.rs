use rand::RngCore;
use rand_core::OsRng;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

pub type Token = i64;

/// Server half of a browser session. The browser only ever sees `token`.
#[derive(Clone, Debug)]
pub struct Session {
    pub token: Token,
    /// Email of the user the session belongs to.
    pub logged_in: String,
    /// Unix seconds.
    pub expires: i64,
}

impl Session {
    pub fn generate(logged_in: String, ttl: Duration) -> Session {
        let token = OsRng.next_u64() as Token;
        let expires = unix_now().saturating_add(ttl.as_secs() as i64);

        Session {
            token,
            logged_in,
            expires,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires <= unix_now()
    }
}

pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
