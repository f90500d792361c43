//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export DATABASE_URL="sqlite:./data/shortener.db"
//! export SITE_URL="https://go.example.com"
//! export ADMIN_PASSWORD="change-me"
//! ```
//!
//! ## Optional Variables
//!
//! - `DATABASE_URL` - SQLite URL (default: `sqlite:./data/shortener.db`)
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `SITE_URL` - Public base for short URLs (default: `http://localhost:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `ADMIN_PASSWORD` - Password required on admin routes (unset: no password check)
//! - `ALLOWED_IPS` - Comma-separated client IPs allowed on admin routes (unset: any)
//! - `BEHIND_PROXY` - Trust `X-Forwarded-For` / `X-Real-IP` (default: `false`)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `DB_CONNECT_TIMEOUT` - Pool acquire timeout in seconds (default: 30)

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

use crate::infrastructure::persistence::PoolSettings;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    /// Base used when formatting short URLs, without a trailing slash.
    pub site_url: String,
    pub log_level: String,
    pub log_format: String,
    /// `None` disables the password check on admin routes.
    pub admin_password: Option<String>,
    /// Empty disables the IP allowlist on admin routes.
    pub allowed_ips: Vec<String>,
    /// When true, client IP is read from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
    pub db_max_connections: u32,
    /// Timeout for acquiring a pooled connection, in seconds.
    pub db_connect_timeout: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:./data/shortener.db".to_string());
        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let site_url = env::var("SITE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .trim_end_matches('/')
            .to_string();
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let admin_password = env::var("ADMIN_PASSWORD")
            .ok()
            .filter(|p| !p.is_empty());

        let allowed_ips = env::var("ALLOWED_IPS")
            .map(|v| parse_ip_list(&v))
            .unwrap_or_default();

        let behind_proxy = env::var("BEHIND_PROXY")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(false);

        let db_max_connections = parse_var("DB_MAX_CONNECTIONS", 5)?;
        let db_connect_timeout = parse_var("DB_CONNECT_TIMEOUT", 30)?;

        Ok(Self {
            database_url,
            listen_addr,
            site_url,
            log_level,
            log_format,
            admin_password,
            allowed_ips,
            behind_proxy,
            db_max_connections,
            db_connect_timeout,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `database_url` is not a `sqlite:` URL
    /// - `listen_addr` is not `host:port`
    /// - `site_url` is not an `http(s)` URL
    /// - `log_format` is not `text` or `json`
    /// - pool settings are zero
    pub fn validate(&self) -> Result<()> {
        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.site_url.starts_with("http://") && !self.site_url.starts_with("https://") {
            anyhow::bail!(
                "SITE_URL must start with 'http://' or 'https://', got '{}'",
                self.site_url
            );
        }

        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_connect_timeout == 0 {
            anyhow::bail!("DB_CONNECT_TIMEOUT must be greater than 0");
        }

        Ok(())
    }

    /// Pool settings derived from the `DB_*` variables.
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.db_max_connections,
            acquire_timeout: Duration::from_secs(self.db_connect_timeout),
        }
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!("  Site URL: {}", self.site_url);
        tracing::info!(
            "  Admin password: {}",
            if self.admin_password.is_some() {
                "set"
            } else {
                "not set"
            }
        );
        if self.allowed_ips.is_empty() {
            tracing::info!("  IP allowlist: disabled");
        } else {
            tracing::info!("  IP allowlist: {}", self.allowed_ips.join(", "));
        }
        tracing::info!("  Behind proxy: {}", self.behind_proxy);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Splits a comma-separated list, dropping blanks.
fn parse_ip_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(str::to_string)
        .collect()
}

/// Reads a numeric variable, falling back to `default` when unset.
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(v) => v
            .trim()
            .parse()
            .with_context(|| format!("{name} must be a number, got '{v}'")),
        Err(_) => Ok(default),
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if a variable cannot be parsed or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
