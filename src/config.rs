//! Environment-driven settings shared by both binaries.
//!
//! A `.env` file is honoured when present. `DATABASE_URL` wins over the
//! individual `POSTGRES_*` variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} must be a valid number, got '{value}'")]
    InvalidNumber { name: &'static str, value: String },
}

/// Per-binary fallbacks for values not set in the environment.
#[derive(Debug, Clone, Copy)]
pub struct ServiceDefaults {
    pub database_name: &'static str,
    pub port: u16,
}

impl ServiceDefaults {
    pub const CUSTOMER: ServiceDefaults = ServiceDefaults {
        database_name: "customer_service",
        port: 8000,
    };
    pub const ORDER: ServiceDefaults = ServiceDefaults {
        database_name: "order_service",
        port: 8001,
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductServiceSettings {
    pub base_url: String,
    pub timeout: Duration,
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber { name, value }),
        None => Ok(default),
    }
}

impl Settings {
    pub fn from_env(defaults: ServiceDefaults) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(defaults, |name| env::var(name).ok())
    }

    pub fn from_lookup(
        defaults: ServiceDefaults,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let var = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                var("POSTGRES_USER", "postgres"),
                var("POSTGRES_PASSWORD", "postgres"),
                var("POSTGRES_HOST", "localhost"),
                parse_var::<u16>(&lookup, "POSTGRES_PORT", 5432)?,
                var("POSTGRES_DB", defaults.database_name),
            ),
        };

        Ok(Settings {
            database_url,
            host: var("HOST", "0.0.0.0"),
            port: parse_var(&lookup, "PORT", defaults.port)?,
        })
    }
}

impl ProductServiceSettings {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(ProductServiceSettings {
            base_url: lookup("PRODUCT_SERVICE_URL")
                .unwrap_or_else(|| "http://localhost:8002".to_string()),
            timeout: Duration::from_secs(parse_var(
                &lookup,
                "PRODUCT_SERVICE_TIMEOUT_SECS",
                5u64,
            )?),
        })
    }
}
