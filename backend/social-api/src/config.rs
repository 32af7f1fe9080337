//! Configuration management for the social API.
//!
//! Settings load from environment variables, with a `.env` file picked up
//! in development builds. Required values fail fast at startup with a
//! message naming the missing variable.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::info;

/// Application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub jwt: JwtSettings,
    pub cors: CorsSettings,
}

impl Settings {
    pub fn load() -> Result<Self> {
        if cfg!(debug_assertions) {
            dotenvy::dotenv().ok();
            info!("Loaded .env file for development");
        }

        Ok(Settings {
            server: ServerSettings::from_env()?,
            database: DatabaseSettings::from_env()?,
            jwt: JwtSettings::from_env()?,
            cors: CorsSettings::from_env(),
        })
    }
}

/// HTTP server bind settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .context("Invalid PORT")?,
        })
    }
}

/// Database connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl DatabaseSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .context("Invalid DATABASE_MAX_CONNECTIONS")?,
            acquire_timeout_secs: env::var("DATABASE_ACQUIRE_TIMEOUT")
                .unwrap_or_else(|_| "5".to_string())
                .parse()
                .context("Invalid DATABASE_ACQUIRE_TIMEOUT")?,
        })
    }
}

/// Token signing settings. The secret is shared between issue and verify;
/// expiry applies to every token this service signs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtSettings {
    pub secret: String,
    pub expiry_secs: i64,
}

impl JwtSettings {
    fn from_env() -> Result<Self> {
        Ok(Self {
            secret: env::var("SECRET_KEY").context("SECRET_KEY must be set")?,
            expiry_secs: env::var("TOKEN_EXPIRY_SECS")
                .unwrap_or_else(|_| "3600".to_string())
                .parse()
                .context("Invalid TOKEN_EXPIRY_SECS")?,
        })
    }
}

/// CORS settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsSettings {
    /// Comma-separated list of allowed origins, or "*" for any.
    pub allowed_origins: String,
}

impl CorsSettings {
    fn from_env() -> Self {
        Self {
            allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "*".to_string()),
        }
    }

    pub fn origins(&self) -> Vec<&str> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn allows_any(&self) -> bool {
        self.allowed_origins.trim() == "*"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_origin_list() {
        let cors = CorsSettings {
            allowed_origins: "http://localhost:3000, https://app.example.com".to_string(),
        };
        assert!(!cors.allows_any());
        assert_eq!(
            cors.origins(),
            vec!["http://localhost:3000", "https://app.example.com"]
        );
    }

    #[test]
    fn test_cors_wildcard() {
        let cors = CorsSettings {
            allowed_origins: "*".to_string(),
        };
        assert!(cors.allows_any());
    }
}
