use std::env;

use crate::error::{AdminError, Result};

/// Connection configuration for a MongoDB server.
#[derive(Clone, Debug)]
pub struct MongoConfig {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub auth_source: String,
    pub connect_timeout_secs: u64,
}

impl MongoConfig {
    /// Build configuration from environment variables:
    /// `MONGO_HOST`, `MONGO_PORT` (optional, default 27017), `MONGO_USER`,
    /// `MONGO_PASSWORD`, `MONGO_AUTH_SOURCE` (optional, default `admin`),
    /// `MONGO_CONNECT_TIMEOUT_SECS` (optional, default 10).
    pub fn from_env() -> Result<Self> {
        let host = require_env("MONGO_HOST")?;
        let port = parse_env("MONGO_PORT").unwrap_or(27017);
        let user = env::var("MONGO_USER").ok().filter(|v| !v.is_empty());
        let password = env::var("MONGO_PASSWORD").ok();
        let auth_source = env::var("MONGO_AUTH_SOURCE").unwrap_or_else(|_| "admin".to_string());
        let connect_timeout_secs = parse_env("MONGO_CONNECT_TIMEOUT_SECS").unwrap_or(10);

        Ok(Self {
            host,
            port,
            user,
            password,
            auth_source,
            connect_timeout_secs,
        })
    }

    /// `mongodb://` URI for this configuration. Credentials are only added
    /// when a user is set.
    pub fn connection_uri(&self) -> String {
        match &self.user {
            Some(user) => {
                let password = self.password.as_deref().unwrap_or_default();
                format!(
                    "mongodb://{user}:{password}@{}:{}/?authSource={}",
                    self.host, self.port, self.auth_source
                )
            }
            None => format!("mongodb://{}:{}/", self.host, self.port),
        }
    }

    /// Key identifying the session this configuration belongs to.
    pub fn session_key(&self) -> String {
        let user = self.user.as_deref().unwrap_or_default();
        format!("{user}_{}_{}", self.host, self.port)
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 27017,
            user: None,
            password: None,
            auth_source: "admin".to_string(),
            connect_timeout_secs: 10,
        }
    }
}

fn require_env(key: &str) -> Result<String> {
    env::var(key).map_err(|_| AdminError::Config(format!("missing env: {key}")))
}

fn parse_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}
