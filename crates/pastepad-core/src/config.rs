//! Process configuration.
//!
//! `ServerConfig` covers everything fixed for the lifetime of the process
//! (bind port, database URL, token signing). Settings an admin can change at
//! runtime (password, upload directories, sync policy) live in
//! [`crate::settings::AppSettings`] and are persisted separately.

use std::env;

const DEFAULT_PORT: u16 = 3000;
const MAX_CONNECTIONS: u32 = 5;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const TOKEN_EXPIRY_HOURS: i64 = 1;
const MAX_UPLOAD_SIZE_MB: usize = 100;
const LOGIN_MAX_FAILURES: u32 = 5;
const LOGIN_FAILURE_WINDOW_SECS: u64 = 300;

/// Application configuration, loaded from the environment once at startup.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub server_port: u16,
    pub database_url: String,
    /// Path of the persisted runtime settings file (JSON).
    pub settings_path: String,
    pub cors_origins: Vec<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub token_secret: String,
    pub token_expiry_hours: i64,
    pub max_upload_size_bytes: usize,
    pub editor_allowed_content_types: Vec<String>,
    pub login_max_failures: u32,
    pub login_failure_window_seconds: u64,
    pub environment: String,
}

impl ServerConfig {
    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins_str = env::var("CORS_ORIGINS").unwrap_or_else(|_| "*".to_string());
        let cors_origins: Vec<String> = cors_origins_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let max_upload_size_mb = env::var("MAX_UPLOAD_SIZE_MB")
            .unwrap_or_else(|_| MAX_UPLOAD_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(MAX_UPLOAD_SIZE_MB);

        let editor_allowed_content_types = env::var("EDITOR_ALLOWED_CONTENT_TYPES")
            .unwrap_or_else(|_| {
                "image/jpeg,image/png,image/gif,image/bmp,image/webp,image/svg+xml,\
                 audio/mpeg,audio/wav,audio/ogg,audio/mp3,audio/aac,audio/flac"
                    .to_string()
            })
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let config = ServerConfig {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://pastepad.db".to_string()),
            settings_path: env::var("SETTINGS_PATH").unwrap_or_else(|_| "config.json".to_string()),
            cors_origins,
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| MAX_CONNECTIONS.to_string())
                .parse()
                .unwrap_or(MAX_CONNECTIONS),
            db_timeout_seconds: env::var("DB_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| CONNECTION_TIMEOUT_SECS.to_string())
                .parse()
                .unwrap_or(CONNECTION_TIMEOUT_SECS),
            token_secret: env::var("TOKEN_SECRET")
                .map_err(|_| anyhow::anyhow!("TOKEN_SECRET must be set for authentication"))?,
            token_expiry_hours: env::var("TOKEN_EXPIRY_HOURS")
                .unwrap_or_else(|_| TOKEN_EXPIRY_HOURS.to_string())
                .parse()
                .unwrap_or(TOKEN_EXPIRY_HOURS),
            max_upload_size_bytes: max_upload_size_mb * 1024 * 1024,
            editor_allowed_content_types,
            login_max_failures: env::var("LOGIN_MAX_FAILURES")
                .unwrap_or_else(|_| LOGIN_MAX_FAILURES.to_string())
                .parse()
                .unwrap_or(LOGIN_MAX_FAILURES),
            login_failure_window_seconds: env::var("LOGIN_FAILURE_WINDOW_SECS")
                .unwrap_or_else(|_| LOGIN_FAILURE_WINDOW_SECS.to_string())
                .parse()
                .unwrap_or(LOGIN_FAILURE_WINDOW_SECS),
            environment,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.token_secret.len() < 32 {
            return Err(anyhow::anyhow!(
                "TOKEN_SECRET must be at least 32 characters long"
            ));
        }

        if !self.database_url.starts_with("sqlite:") {
            return Err(anyhow::anyhow!(
                "DATABASE_URL must be a valid SQLite connection string"
            ));
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        Ok(())
    }
}
