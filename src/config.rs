use anyhow::Context;
use serde::Deserialize;

/// Output format of the log subscriber, picked by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Plain,
    Json,
}

impl LogFormat {
    pub fn from_env() -> Self {
        Self::parse(std::env::var("LOG_FORMAT").ok().as_deref())
    }

    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Plain,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key/value source. `DATABASE_URL` wins over
    /// the individual `PG_*` connection parts.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => {
                let user = lookup("PG_USER").context("PG_USER or DATABASE_URL must be set")?;
                let password = lookup("PG_PASSWORD").unwrap_or_default();
                let host = lookup("PG_HOST").unwrap_or_else(|| "localhost".into());
                let port = lookup("PG_PORT").unwrap_or_else(|| "5432".into());
                let db = lookup("PG_DB").context("PG_DB or DATABASE_URL must be set")?;
                format!("postgres://{}:{}@{}:{}/{}", user, password, host, port, db)
            }
        };

        let max_connections = lookup("DB_MAX_CONNECTIONS")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);
        let host = lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = match lookup("APP_PORT") {
            Some(v) => v.parse::<u16>().with_context(|| format!("APP_PORT is not a port: {}", v))?,
            None => 8080,
        };

        Ok(Self {
            database_url,
            max_connections,
            host,
            port,
        })
    }
}
