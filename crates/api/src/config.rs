use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} must be a valid {kind}, got `{value}`")]
    Invalid {
        name: &'static str,
        kind: &'static str,
        value: String,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server host to bind to.
    pub host: String,
    /// Server port to bind to.
    pub port: u16,
    /// PostgreSQL connection URL. Without it the site serves defaults and
    /// every write answers 503.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    /// JWT signing secret. Without it no admin token is issued or accepted.
    pub jwt_secret: Option<String>,
    pub token_ttl_hours: i64,
    /// The single admin login. Both must be set for login to work.
    pub admin_email: Option<String>,
    /// Argon2 PHC string.
    pub admin_password_hash: Option<String>,
    /// Tokens whose subject is an address in this domain count as admin.
    pub admin_email_domain: String,
    /// Author recorded on posts created without a known admin email.
    pub default_author: String,
    /// Root directory for uploaded images. Without it uploads answer 503.
    pub upload_dir: Option<PathBuf>,
    pub upload_base_url: String,
    /// Event bus channel capacity.
    pub event_bus_capacity: usize,
    /// Log level (e.g., "info", "debug", "trace").
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3030,
            database_url: None,
            db_max_connections: 20,
            db_min_connections: 5,
            jwt_secret: None,
            token_ttl_hours: 12,
            admin_email: None,
            admin_password_hash: None,
            admin_email_domain: "skyadvisers.com".to_string(),
            default_author: "info@skyadvisers.com".to_string(),
            upload_dir: None,
            upload_base_url: "/uploads".to_string(),
            event_bus_capacity: 1024,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with sensible defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source. Blank values count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Self::default();

        Ok(Self {
            host: var("HOST").unwrap_or(defaults.host),
            port: parse(&var, "PORT", "u16", defaults.port)?,
            database_url: var("DATABASE_URL"),
            db_max_connections: parse(&var, "DB_MAX_CONNECTIONS", "u32", defaults.db_max_connections)?,
            db_min_connections: parse(&var, "DB_MIN_CONNECTIONS", "u32", defaults.db_min_connections)?,
            jwt_secret: var("JWT_SECRET"),
            token_ttl_hours: parse(&var, "TOKEN_TTL_HOURS", "i64", defaults.token_ttl_hours)?,
            admin_email: var("ADMIN_EMAIL").map(|e| e.to_lowercase()),
            admin_password_hash: var("ADMIN_PASSWORD_HASH"),
            admin_email_domain: var("ADMIN_EMAIL_DOMAIN").unwrap_or(defaults.admin_email_domain),
            default_author: var("DEFAULT_AUTHOR").unwrap_or(defaults.default_author),
            upload_dir: var("UPLOAD_DIR").map(PathBuf::from),
            upload_base_url: var("UPLOAD_BASE_URL").unwrap_or(defaults.upload_base_url),
            event_bus_capacity: parse(&var, "EVENT_BUS_CAPACITY", "usize", defaults.event_bus_capacity)?,
            log_level: var("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// Build the socket address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse<T: FromStr>(
    var: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    kind: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match var(name) {
        None => Ok(default),
        Some(value) => value.parse().map_err(|_| ConfigError::Invalid { name, kind, value }),
    }
}
