use std::env;

use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {var}: {value}")]
    InvalidVar { var: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store_url: String,
    pub store_api_key: String,
    pub smtp_host: String,
    pub smtp_username: String,
    pub smtp_password: String,
    pub clinic_inbox: String,
    pub port: u16,
}

impl AppConfig {
    /// Load the full configuration from the environment. Any missing
    /// required variable fails the whole load so the process refuses to
    /// start half-configured.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidVar {
                var: "PORT",
                value: raw.clone(),
            })?,
            Err(_) => {
                warn!("PORT not set, defaulting to 3000");
                3000
            }
        };

        Ok(Self {
            store_url: require("STORE_URL")?,
            store_api_key: require("STORE_API_KEY")?,
            smtp_host: require("SMTP_HOST")?,
            smtp_username: require("SMTP_USERNAME")?,
            smtp_password: require("SMTP_PASSWORD")?,
            clinic_inbox: require("CLINIC_INBOX")?,
            port,
        })
    }
}

fn require(var: &'static str) -> Result<String, ConfigError> {
    match env::var(var) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(var)),
    }
}
