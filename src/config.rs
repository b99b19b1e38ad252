//! Application configuration management.
//!
//! This module handles loading configuration from environment variables.
//! It uses the `envy` crate to automatically deserialize environment variables into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 5000
/// - `DATABASE_URL` (optional): PostgreSQL connection string. When unset, items live in memory
/// - `LOGIN_USERNAME` / `LOGIN_PASSWORD` (optional): credentials accepted by `POST /login/`
/// - `MAX_BODY_BYTES` (optional): request body limit, defaults to 10 MiB
/// - `LOG_FORMAT` (optional): `text` or `json`, defaults to `text`
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default)]
    pub database_url: Option<String>,

    #[serde(default = "default_login_username")]
    pub login_username: String,

    #[serde(default = "default_login_password")]
    pub login_password: String,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    #[serde(default)]
    pub log_format: LogFormat,
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Default port if SERVER_PORT environment variable is not set.
///
/// Matches the port exposed by the container image.
fn default_port() -> u16 {
    5000
}

fn default_login_username() -> String {
    "admin".to_string()
}

fn default_login_password() -> String {
    "secret".to_string()
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// This method first attempts to load a `.env` file (which is optional),
    /// then reads environment variables and deserializes them into a Config struct.
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable values cannot be parsed into expected types
    /// (e.g. a non-numeric `SERVER_PORT`).
    pub fn from_env() -> Result<Self, envy::Error> {
        // Try to load .env file if it exists (does nothing if not found)
        dotenvy::dotenv().ok();

        // Field names are automatically converted: server_port -> SERVER_PORT
        envy::from_env::<Config>()
    }

    /// Name of the storage backend this configuration selects.
    pub fn storage_backend(&self) -> &'static str {
        if self.database_url.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }
}
