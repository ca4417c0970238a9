use std::fmt;

use crate::config::{ConfigError, EnvironmentProvider};

const DEFAULT_DATABASE_URL: &str = "sqlite://calldesk.db?mode=rwc";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
/// 30 days
const DEFAULT_TOKEN_LIFETIME_MINUTES: i64 = 43_200;
/// One year
const MAX_TOKEN_LIFETIME_MINUTES: i64 = 525_600;

/// Infrastructure settings needed before the server can start
#[derive(Clone)]
pub struct ServerSettings {
    database_url: String,
    server_host: String,
    server_port: u16,
    token_lifetime_minutes: i64,
}

impl ServerSettings {
    /// Load settings through the given provider, falling back to defaults
    /// for anything that is not set.
    pub fn from_env_provider(env: &dyn EnvironmentProvider) -> Result<Self, ConfigError> {
        let database_url = env
            .get_var("DATABASE_URL")
            .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        if database_url.trim().is_empty() {
            return Err(ConfigError::invalid_setting(
                "DATABASE_URL",
                "must be at least 1 characters long",
            ));
        }

        let server_host = env
            .get_var("HOST")
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        if server_host.trim().is_empty() {
            return Err(ConfigError::invalid_setting("HOST", "must not be empty"));
        }

        let server_port = match env.get_var("PORT") {
            Some(raw) => Self::parse_port(&raw)?,
            None => DEFAULT_PORT,
        };

        let token_lifetime_minutes = match env.get_var("TOKEN_LIFETIME_MINUTES") {
            Some(raw) => {
                let minutes: i64 = raw.trim().parse().map_err(|_| {
                    ConfigError::invalid_format("TOKEN_LIFETIME_MINUTES", "positive integer", &raw)
                })?;
                if !(1..=MAX_TOKEN_LIFETIME_MINUTES).contains(&minutes) {
                    return Err(ConfigError::invalid_setting(
                        "TOKEN_LIFETIME_MINUTES",
                        format!(
                            "must be between 1 and {}, got {}",
                            MAX_TOKEN_LIFETIME_MINUTES, minutes
                        ),
                    ));
                }
                minutes
            }
            None => DEFAULT_TOKEN_LIFETIME_MINUTES,
        };

        Ok(Self {
            database_url,
            server_host,
            server_port,
            token_lifetime_minutes,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_provider(&crate::config::SystemEnvironment)
    }

    fn parse_port(raw: &str) -> Result<u16, ConfigError> {
        let port: u32 = raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::invalid_format("PORT", "integer between 1 and 65535", raw))?;
        if !(1..=65535).contains(&port) {
            return Err(ConfigError::invalid_setting(
                "PORT",
                format!("must be between 1 and 65535, got {}", port),
            ));
        }
        Ok(port as u16)
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    pub fn server_host(&self) -> &str {
        &self.server_host
    }

    pub fn server_port(&self) -> u16 {
        self.server_port
    }

    pub fn token_lifetime_minutes(&self) -> i64 {
        self.token_lifetime_minutes
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl fmt::Debug for ServerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerSettings")
            .field("database_url", &self.database_url)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("token_lifetime_minutes", &self.token_lifetime_minutes)
            .finish()
    }
}
