//! Application configuration loaded from environment variables.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use domain::DirectoryFailurePolicy;

/// Default listen port of the order service.
pub const ORDER_SERVICE_PORT: u16 = 8300;

/// Default listen port of the product service.
pub const PRODUCT_SERVICE_PORT: u16 = 8500;

const DEFAULT_USER_SERVICE_URL: &str = "http://localhost:8700/user-service/api/users";

/// Output format of the log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST`: bind address (default: `"0.0.0.0"`)
/// - `PORT`: listen port (default: per service)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `pretty` or `json` (default: `pretty`)
/// - `DATABASE_URL`: PostgreSQL URL; in-memory storage when unset
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: `5`)
/// - `USER_SERVICE_URL`: users collection of the user service
/// - `USER_SERVICE_TIMEOUT_SECS`: per-request timeout (default: `5`)
/// - `USER_FALLBACK`: `fail` or `omit` when the user service is down
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub user_service_url: String,
    pub user_service_timeout: Duration,
    pub user_fallback: DirectoryFailurePolicy,
    /// Settings that were present but unparsable, as `KEY="value": reason`.
    pub rejected: Vec<String>,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env(default_port: u16) -> Self {
        Self::from_lookup(default_port, |key| std::env::var(key).ok())
    }

    /// Loads configuration from `lookup`. Unparsable values fall back to
    /// defaults and are recorded in `rejected`.
    pub fn from_lookup(default_port: u16, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::with_port(default_port);
        let mut rejected = Vec::new();

        let port = parse_or(&lookup, "PORT", defaults.port, &mut rejected);
        let database_max_connections = parse_or(
            &lookup,
            "DATABASE_MAX_CONNECTIONS",
            defaults.database_max_connections,
            &mut rejected,
        );
        let user_service_timeout = parse_or(
            &lookup,
            "USER_SERVICE_TIMEOUT_SECS",
            defaults.user_service_timeout.as_secs(),
            &mut rejected,
        );
        let user_fallback = parse_or(
            &lookup,
            "USER_FALLBACK",
            defaults.user_fallback,
            &mut rejected,
        );

        Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            log_level: lookup("RUST_LOG").unwrap_or(defaults.log_level),
            log_format: match lookup("LOG_FORMAT").as_deref() {
                Some(f) if f.eq_ignore_ascii_case("json") => LogFormat::Json,
                _ => defaults.log_format,
            },
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            database_max_connections,
            user_service_url: lookup("USER_SERVICE_URL").unwrap_or(defaults.user_service_url),
            user_service_timeout: Duration::from_secs(user_service_timeout),
            user_fallback,
            rejected,
        }
    }

    /// Logs a warning for every rejected setting. Call once tracing is
    /// initialized.
    pub fn warn_rejected(&self) {
        for setting in &self.rejected {
            tracing::warn!(setting = %setting, "ignoring invalid setting, using default");
        }
    }

    /// Default configuration listening on `port`.
    pub fn with_port(port: u16) -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port,
            log_level: "info".to_string(),
            log_format: LogFormat::default(),
            database_url: None,
            database_max_connections: 5,
            user_service_url: DEFAULT_USER_SERVICE_URL.to_string(),
            user_service_timeout: Duration::from_secs(5),
            user_fallback: DirectoryFailurePolicy::default(),
            rejected: Vec::new(),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
    rejected: &mut Vec<String>,
) -> T
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            rejected.push(format!("{key}={raw:?}: {e}"));
            default
        }),
    }
}
