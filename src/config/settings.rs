//! Application settings and configuration structures.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port, request timeout)
    pub server: ServerSettings,

    /// Database configuration (PostgreSQL)
    pub database: DatabaseSettings,

    /// Redis configuration (session store)
    pub redis: RedisSettings,

    /// Session cookie and TTL settings
    pub session: SessionSettings,

    /// CORS allow-list
    pub cors: CorsSettings,

    /// Image upload settings
    pub upload: UploadSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,

    /// Wall-clock budget per request in seconds; exceeding it yields 408
    pub request_timeout_secs: u64,
}

/// PostgreSQL database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections to maintain
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout: u64,
}

/// Redis configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    /// Redis connection URL
    pub url: String,
}

/// Server-side session configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    /// Name of the session cookie
    pub cookie_name: String,

    /// Session lifetime in seconds
    pub ttl_secs: u64,

    /// Whether the cookie carries the Secure flag (deployment-dependent)
    pub secure: bool,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins (comma-separated in env); empty means permissive
    pub allowed_origins: Vec<String>,
}

/// Upload configuration for profile images and post attachments.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadSettings {
    /// Root directory for stored images; served as /public/image
    pub dir: String,

    /// Maximum accepted file size in bytes
    pub max_bytes: usize,
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. built-in defaults
    /// 2. config/default.toml, then config/{RUN_ENV}.toml
    /// 3. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        // Determine the running environment
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.request_timeout_secs", 5)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout", 30)?
            .set_default("session.cookie_name", "sid")?
            .set_default("session.ttl_secs", 86_400)?
            // Secure cookies outside local development
            .set_default("session.secure", environment == "production")?
            .set_default("cors.allowed_origins", Vec::<String>::new())?
            .set_default("upload.dir", "public/image")?
            .set_default("upload.max_bytes", 10 * 1024 * 1024)?
            // Load from config files
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Load from environment variables
            // APP__SERVER__PORT=3000 -> server.port = 3000
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            // Map simple environment variables
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("redis.url", std::env::var("REDIS_URL").ok())?
            .build()?
            .try_deserialize()
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
