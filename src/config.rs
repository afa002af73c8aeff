use log::LevelFilter;
use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

const DEFAULT_ADDR: &str = "127.0.0.1:7878";
const DEFAULT_DATABASE: &str = "./db.sqlite3";
const DEFAULT_TEMPLATES: &str = "templates/**/*";
const DEFAULT_STATIC_DIR: &str = "public";
const DEFAULT_SESSION_TTL: &str = "1day";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("QBAY_ADDR is not a socket address: {0}")]
    Addr(#[from] std::net::AddrParseError),
    #[error("QBAY_SESSION_TTL is not a duration: {0}")]
    SessionTtl(#[from] humantime::DurationError),
    #[error("QBAY_LOG_LEVEL is not a log level: {0}")]
    LogLevel(#[from] log::ParseLevelError),
}

/// Server settings, read from `QBAY_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub database: PathBuf,
    /// Glob handed to Tera.
    pub templates: String,
    pub static_dir: PathBuf,
    pub session_ttl: Duration,
    pub log_level: LevelFilter,
}

impl Config {
    pub fn from_env() -> Result<Config, Error> {
        Ok(Config {
            addr: var_or("QBAY_ADDR", DEFAULT_ADDR).parse()?,
            database: var_or("QBAY_DATABASE", DEFAULT_DATABASE).into(),
            templates: var_or("QBAY_TEMPLATES", DEFAULT_TEMPLATES),
            static_dir: var_or("QBAY_STATIC_DIR", DEFAULT_STATIC_DIR).into(),
            session_ttl: humantime::parse_duration(&var_or(
                "QBAY_SESSION_TTL",
                DEFAULT_SESSION_TTL,
            ))?,
            log_level: var_or("QBAY_LOG_LEVEL", "debug").parse()?,
        })
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
