//! Configuration management for the shopfront API
//!
//! Loads configuration from environment variables with sensible defaults.

use anyhow::{Context, Result};
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// API server host
    pub host: String,

    /// API server port
    pub port: u16,

    /// Redis connection URL
    pub redis_url: String,

    /// Bearer token lifetime in hours
    pub token_ttl_hours: i64,

    /// Admin account email, created by the one-time seed
    pub admin_email: String,

    /// Admin account password, created by the one-time seed
    pub admin_password: String,

    /// Default hero image reference, written by the one-time seed
    pub hero_image: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),

            port: env::var("API_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("Invalid API_PORT")?,

            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://127.0.0.1:6379".to_string()),

            token_ttl_hours: env::var("TOKEN_TTL_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()
                .context("Invalid TOKEN_TTL_HOURS")?,

            admin_email: env::var("ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@shopfront.local".to_string()),

            admin_password: env::var("ADMIN_PASSWORD").unwrap_or_default(),

            hero_image: env::var("HERO_IMAGE").unwrap_or_else(|_| "/images/hero.jpg".to_string()),
        };

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            anyhow::bail!("API_PORT must be greater than 0");
        }

        if self.token_ttl_hours <= 0 {
            anyhow::bail!("TOKEN_TTL_HOURS must be greater than 0");
        }

        if self.admin_password.is_empty() {
            anyhow::bail!("ADMIN_PASSWORD must be set");
        }

        Ok(())
    }

    /// Get the API server address
    pub fn api_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
