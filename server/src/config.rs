use anyhow::{Context, Result};
use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

const DEFAULT_SESSION_SECRET: &str = "arcade-dev-session-secret";

/// Runtime settings, read from `ARCADE_*` environment variables.
#[derive(Debug, Clone)]
pub struct ArcadeConfig {
    pub http_addr: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub games_dir: PathBuf,
    pub web_dir: PathBuf,
    pub session_secret: String,
    /// Take the submitter address from `X-Forwarded-For`/`X-Real-IP`. Only
    /// enable behind a reverse proxy that overwrites those headers.
    pub trust_proxy_headers: bool,
}

impl ArcadeConfig {
    pub fn from_env() -> Result<Self> {
        let session_secret = env::var("ARCADE_SESSION_SECRET").unwrap_or_else(|_| {
            warn!("ARCADE_SESSION_SECRET not set, using the development secret");
            DEFAULT_SESSION_SECRET.to_string()
        });

        Ok(Self {
            http_addr: try_load("ARCADE_HTTP_ADDR", "0.0.0.0:8000")?,
            database_url: try_load("ARCADE_DATABASE_URL", "sqlite://arcade.db")?,
            db_max_connections: try_load("ARCADE_DB_MAX_CONNECTIONS", "5")?,
            games_dir: try_load("ARCADE_GAMES_DIR", "games")?,
            web_dir: try_load("ARCADE_WEB_DIR", "web")?,
            session_secret,
            trust_proxy_headers: try_load("ARCADE_TRUST_PROXY_HEADERS", "false")?,
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse::<T>()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("Invalid {key} value: {raw}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_load_falls_back_to_default() {
        let port: u32 = try_load("ARCADE_TEST_UNSET_VARIABLE", "42").unwrap();
        assert_eq!(port, 42);
    }

    #[test]
    fn test_try_load_rejects_unparseable_default() {
        let result: Result<u32> = try_load("ARCADE_TEST_UNSET_VARIABLE", "many");
        assert!(result.is_err());
    }
}
