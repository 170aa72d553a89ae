use std::env;
use std::net::SocketAddr;

use anyhow::{Context, Result};

/// Longest accepted `SESSION_DURATION_DAYS`.
pub const MAX_SESSION_DURATION_DAYS: i64 = 3650;

pub const SECONDS_PER_DAY: i64 = 86_400;

/// The application's configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// The URL of the PostgreSQL database. In-memory services are used when unset.
    pub database_url: Option<String>,
    /// The URL of the Redis server. In-memory sessions are used when unset.
    pub redis_url: Option<String>,
    /// The duration of a session in days.
    pub session_duration_days: i64,
    /// The address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Origins allowed to make credentialed cross-origin requests.
    pub cors_origins: Vec<String>,
    /// Whether the service runs in production (enables `Secure` cookies).
    pub production: bool,
}

impl Config {
    /// Creates a new `Config` from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `Config`.
    pub fn from_env() -> Result<Self> {
        let session_duration_days = parse_session_days(
            &env::var("SESSION_DURATION_DAYS").unwrap_or_else(|_| "7".to_string()),
        )?;

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .context("BIND_ADDR must be a socket address such as 127.0.0.1:3000")?;

        let cors_origins = parse_origins(
            &env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:3000".to_string()),
        );

        Ok(Self {
            database_url: non_empty_var("DATABASE_URL"),
            redis_url: non_empty_var("REDIS_URL"),
            session_duration_days,
            bind_addr,
            cors_origins,
            production: env::var("APP_ENV")
                .unwrap_or_else(|_| "development".to_string()) == "production",
        })
    }

    /// A configuration with every backend in memory, bound to an ephemeral port.
    pub fn in_memory() -> Self {
        Self {
            database_url: None,
            redis_url: None,
            session_duration_days: 7,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            cors_origins: vec!["http://localhost:3000".to_string()],
            production: false,
        }
    }

    /// Session lifetime in seconds.
    pub fn session_ttl_secs(&self) -> u64 {
        u64::try_from(self.session_duration_days.saturating_mul(SECONDS_PER_DAY)).unwrap_or(0)
    }
}

fn parse_session_days(raw: &str) -> Result<i64> {
    let days: i64 = raw.trim().parse().context("Invalid SESSION_DURATION_DAYS")?;

    if days <= 0 {
        anyhow::bail!("SESSION_DURATION_DAYS must be a positive number of days");
    }
    if days > MAX_SESSION_DURATION_DAYS {
        anyhow::bail!("SESSION_DURATION_DAYS must not exceed {MAX_SESSION_DURATION_DAYS} days");
    }

    Ok(days)
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
