use std::env;
use std::time::Duration;

use thiserror::Error;

/// Problems found while reading configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{0} must be a number, got {1:?}")]
    NotANumber(&'static str, String),
    #[error("{0} must be true or false, got {1:?}")]
    NotABool(&'static str, String),
    #[error("{0} must be between 1 and {max} seconds, got {1}", max = MAX_TOKEN_LIFETIME_SECS)]
    OutOfRange(&'static str, i64),
}

/// Upper bound for token lifetimes: ten years.
pub const MAX_TOKEN_LIFETIME_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// Signing key and lifetime for one kind of JWT.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    pub key: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
}

pub struct Config {
    pub database_url: String,
    pub server_port: u16,
    pub server_host: String,
    pub access_token: TokenConfig,
    pub refresh_token: TokenConfig,
    pub bcrypt_cost: u32,
    pub allowed_origin: String,
    pub auto_migrate: bool,
    pub request_timeout: Duration,
}

impl Config {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            server_port: parse_number(&lookup, "SERVER_PORT", 8080)?,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            access_token: TokenConfig {
                key: required("ACCESS_TOKEN_KEY")?,
                expires_in: parse_lifetime(&lookup, "ACCESS_TOKEN_EXP", 15 * 60)?,
            },
            refresh_token: TokenConfig {
                key: required("REFRESH_TOKEN_KEY")?,
                expires_in: parse_lifetime(&lookup, "REFRESH_TOKEN_EXP", 7 * 24 * 60 * 60)?,
            },
            bcrypt_cost: parse_number(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?,
            allowed_origin: lookup("ALLOWED_ORIGIN").unwrap_or_else(|| "*".to_string()),
            auto_migrate: parse_bool(&lookup, "AUTO_MIGRATE", true)?,
            request_timeout: Duration::from_secs(parse_number(&lookup, "REQUEST_TIMEOUT_SECS", 10)?),
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}

fn parse_number<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::NotANumber(key, raw)),
        None => Ok(default),
    }
}

fn parse_lifetime<F>(lookup: &F, key: &'static str, default: i64) -> Result<i64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let secs: i64 = parse_number(lookup, key, default)?;
    if !(1..=MAX_TOKEN_LIFETIME_SECS).contains(&secs) {
        return Err(ConfigError::OutOfRange(key, secs));
    }
    Ok(secs)
}

fn parse_bool<F>(lookup: &F, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" => Ok(true),
            "false" | "0" | "no" => Ok(false),
            _ => Err(ConfigError::NotABool(key, raw)),
        },
        None => Ok(default),
    }
}
