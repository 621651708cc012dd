//! # API Configuration Module
//!
//! This module handles loading and managing configuration for the Meets API server.
//! It retrieves configuration values from environment variables and provides defaults
//! where appropriate.
//!
//! ## Environment Variables
//!
//! - `API_HOST`: The host address to bind the server to (default: "0.0.0.0")
//! - `API_PORT`: The port to listen on (default: 3000)
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DB_MAX_CONNECTIONS`: Pool size (default: 5)
//! - `DB_TIMEOUT_SECONDS`: Upper bound for a single persistence call (default: 5)
//! - `LOG_LEVEL`: Logging level (default: "info")
//! - `API_CORS_ORIGINS`: Comma-separated list of allowed CORS origins
//! - `API_REQUEST_TIMEOUT_SECONDS`: Whole-request timeout (default: 30)
//! - `AUTH_SERVICE_URL`: Base URL of the identity service (required)
//! - `ELEVATED_ROLE`: Role name allowed to act for other organizers (default: "Programmer")

use eyre::{Result, WrapErr};
use std::{env, str::FromStr, time::Duration};
use tracing::Level;

/// Configuration for the Meets API server
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Host address for the API server (e.g., "127.0.0.1", "0.0.0.0")
    pub host: String,

    /// Port for the API server to listen on
    pub port: u16,

    /// PostgreSQL database connection string
    pub database_url: String,

    pub db_max_connections: u32,

    /// Timeout applied to each persistence call, in seconds
    pub db_timeout: u64,

    /// Log level for the application
    pub log_level: Level,

    /// CORS allowed origins (optional)
    pub cors_origins: Option<Vec<String>>,

    /// Request timeout in seconds
    pub request_timeout: u64,

    /// Identity service base URL; `/me` is appended when validating tokens
    pub auth_service_url: String,

    /// Role name that grants the elevated organizer policy
    pub elevated_role: String,
}

impl ApiConfig {
    /// Creates a new ApiConfig from environment variables
    ///
    /// # Errors
    ///
    /// This function will return an error if:
    /// - The DATABASE_URL or AUTH_SERVICE_URL environment variable is not set
    /// - A numeric setting cannot be parsed
    pub fn from_env() -> Result<Self> {
        // Network settings
        let host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = numeric_setting("API_PORT", env::var("API_PORT").ok(), 3000)?;

        // Database settings
        let database_url = env::var("DATABASE_URL")
            .wrap_err("DATABASE_URL environment variable must be set")?;
        let db_max_connections =
            numeric_setting("DB_MAX_CONNECTIONS", env::var("DB_MAX_CONNECTIONS").ok(), 5)?;
        let db_timeout =
            numeric_setting("DB_TIMEOUT_SECONDS", env::var("DB_TIMEOUT_SECONDS").ok(), 5)?;

        // Logging settings
        let log_level = parse_log_level(&env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()));

        // CORS settings
        let cors_origins = env::var("API_CORS_ORIGINS").ok().map(|origins| {
            origins.split(',').map(|s| s.trim().to_string()).collect()
        });

        // Performance settings
        let request_timeout = numeric_setting(
            "API_REQUEST_TIMEOUT_SECONDS",
            env::var("API_REQUEST_TIMEOUT_SECONDS").ok(),
            30,
        )?;

        // Identity settings
        let auth_service_url = env::var("AUTH_SERVICE_URL")
            .wrap_err("AUTH_SERVICE_URL environment variable must be set")?;
        let elevated_role = env::var("ELEVATED_ROLE").unwrap_or_else(|_| "Programmer".to_string());

        Ok(Self {
            host,
            port,
            database_url,
            db_max_connections,
            db_timeout,
            log_level,
            cors_origins,
            request_timeout,
            auth_service_url,
            elevated_role,
        })
    }

    /// Returns the server address as a string (e.g., "127.0.0.1:8080")
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn db_timeout(&self) -> Duration {
        Duration::from_secs(self.db_timeout)
    }
}

/// Parses an optional numeric variable, falling back to `default` only when it is unset.
fn numeric_setting<T>(name: &str, value: Option<String>, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .wrap_err_with(|| format!("Invalid {name} value")),
        None => Ok(default),
    }
}

fn parse_log_level(value: &str) -> Level {
    match value.to_ascii_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}
