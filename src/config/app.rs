use anyhow::{anyhow, bail, Context, Result};
use jsonwebtoken::Algorithm;
use std::env;

pub const DEFAULT_JWT_SECRET: &str = "your-secret-key-change-in-production";

/// One year
pub const MAX_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 525_600;

#[derive(Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: String,
    pub log_level: String,
    pub jwt_secret: String,
    pub jwt_algorithm: Algorithm,
    pub access_token_expire_minutes: i64,
    pub bcrypt_cost: u32,
    pub allow_admin_registration: bool,
    pub seed_demo_data: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            environment: "development".to_string(),
            log_level: "info".to_string(),
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_algorithm: Algorithm::HS256,
            access_token_expire_minutes: 30,
            bcrypt_cost: 12,
            allow_admin_registration: false,
            seed_demo_data: false,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("environment", &self.environment)
            .field("log_level", &self.log_level)
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_algorithm", &self.jwt_algorithm)
            .field("access_token_expire_minutes", &self.access_token_expire_minutes)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("allow_admin_registration", &self.allow_admin_registration)
            .field("seed_demo_data", &self.seed_demo_data)
            .finish()
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build configuration from a variable lookup, falling back to defaults
    /// for anything unset.
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match var("PORT") {
            Some(port) => port.parse().context("PORT must be a valid port number")?,
            None => defaults.port,
        };

        let jwt_algorithm = match var("JWT_ALGORITHM") {
            Some(algorithm) => parse_algorithm(&algorithm)?,
            None => defaults.jwt_algorithm,
        };

        let access_token_expire_minutes = match var("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Some(minutes) => minutes
                .parse()
                .context("ACCESS_TOKEN_EXPIRE_MINUTES must be an integer")?,
            None => defaults.access_token_expire_minutes,
        };
        if !(1..=MAX_ACCESS_TOKEN_EXPIRE_MINUTES).contains(&access_token_expire_minutes) {
            bail!("ACCESS_TOKEN_EXPIRE_MINUTES must be between 1 and {MAX_ACCESS_TOKEN_EXPIRE_MINUTES}");
        }

        let bcrypt_cost = match var("BCRYPT_COST") {
            Some(cost) => cost.parse().context("BCRYPT_COST must be an integer")?,
            None => defaults.bcrypt_cost,
        };
        if !(4..=31).contains(&bcrypt_cost) {
            bail!("BCRYPT_COST must be between 4 and 31");
        }

        let config = AppConfig {
            host: var("HOST").unwrap_or(defaults.host),
            port,
            environment: var("ENVIRONMENT").unwrap_or(defaults.environment),
            log_level: var("LOG_LEVEL").unwrap_or(defaults.log_level),
            jwt_secret: var("JWT_SECRET").unwrap_or(defaults.jwt_secret),
            jwt_algorithm,
            access_token_expire_minutes,
            bcrypt_cost,
            allow_admin_registration: parse_flag(var("ALLOW_ADMIN_REGISTRATION"), defaults.allow_admin_registration)?,
            seed_demo_data: parse_flag(var("SEED_DEMO_DATA"), defaults.seed_demo_data)?,
        };

        if config.is_production() && config.jwt_secret == DEFAULT_JWT_SECRET {
            bail!("JWT_SECRET must be set in production");
        }

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_algorithm(value: &str) -> Result<Algorithm> {
    match value.to_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(anyhow!("unsupported JWT_ALGORITHM {other}: expected HS256, HS384 or HS512")),
    }
}

fn parse_flag(value: Option<String>, default: bool) -> Result<bool> {
    match value.as_deref().map(str::to_lowercase).as_deref() {
        None => Ok(default),
        Some("1" | "true" | "yes") => Ok(true),
        Some("0" | "false" | "no") => Ok(false),
        Some(other) => Err(anyhow!("invalid boolean value {other}")),
    }
}
