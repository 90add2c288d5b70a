use std::path::PathBuf;

use lovelock_core::allocation::DEFAULT_ALLOCATION_RETRIES;
use lovelock_core::marketplace::DEFAULT_COMMISSION_PERCENT;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Time allowed for draining the pool after shutdown, in seconds (default: `30`).
    pub shutdown_timeout_secs: u64,
    /// JWT validation settings.
    pub jwt: JwtConfig,
    /// Optional JSON file replacing the built-in reserved number list.
    pub reserved_ids_path: Option<PathBuf>,
    /// Allocate-and-insert rounds for random purchases (default: `3`).
    pub allocation_retries: u32,
    /// Platform cut of a resale, in percent (default: `10`).
    pub commission_percent: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                 |
    /// |-------------------------------|-------------------------|
    /// | `HOST`                        | `0.0.0.0`               |
    /// | `PORT`                        | `3000`                  |
    /// | `CORS_ORIGINS`                | `http://localhost:3000` |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`       | `30`                    |
    /// | `RESERVED_IDS_PATH`           | built-in list           |
    /// | `ALLOCATION_RETRIES`          | `3`                     |
    /// | `PLATFORM_COMMISSION_PERCENT` | `10`                    |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let reserved_ids_path = std::env::var("RESERVED_IDS_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        let allocation_retries: u32 = std::env::var("ALLOCATION_RETRIES")
            .unwrap_or_else(|_| DEFAULT_ALLOCATION_RETRIES.to_string())
            .parse()
            .expect("ALLOCATION_RETRIES must be a valid u32");
        assert!(allocation_retries > 0, "ALLOCATION_RETRIES must be at least 1");

        let commission_percent: u32 = std::env::var("PLATFORM_COMMISSION_PERCENT")
            .unwrap_or_else(|_| DEFAULT_COMMISSION_PERCENT.to_string())
            .parse()
            .expect("PLATFORM_COMMISSION_PERCENT must be a valid u32");
        assert!(
            commission_percent <= 100,
            "PLATFORM_COMMISSION_PERCENT must be between 0 and 100"
        );

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt,
            reserved_ids_path,
            allocation_retries,
            commission_percent,
        }
    }
}
