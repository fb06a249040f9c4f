//! Relay configuration, read from the process environment (and `.env`)

use anyhow::{Context, Result};
use std::env;

const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct Config {
    pub facepp_api_key: String,
    pub facepp_api_secret: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{} must be set in the environment or .env file", key))
        };

        let port = match lookup("PORT") {
            Some(port) => port
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got {:?}", port))?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            facepp_api_key: required("FACEPP_API_KEY")?,
            facepp_api_secret: required("FACEPP_API_SECRET")?,
            port,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}
