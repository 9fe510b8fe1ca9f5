use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{anyhow, bail};
use lander_core::reveal::DEFAULT_REVEAL_SECS;

use crate::auth::jwt::JwtConfig;

/// Default request body limit for uploads: 100 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Log output format selected by `LOG_FORMAT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("expected 'text' or 'json', got '{other}'")),
        }
    }
}

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
    /// PostgreSQL URL. `None` runs the server over in-memory stores.
    pub database_url: Option<String>,
    /// JWT token configuration (secret, expiry durations).
    pub jwt: JwtConfig,
    /// Directory uploaded media is written to.
    pub media_root: PathBuf,
    /// Origin the site is served from, used for media URLs and SEO previews.
    pub public_base_url: String,
    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: usize,
    /// Allow sign-up after the first operator exists.
    pub allow_signup: bool,
    /// Countdown before the hero call-to-action is shown.
    pub reveal_after_secs: u32,
    pub log_format: LogFormat,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                   |
    /// |---------------------------|---------------------------|
    /// | `HOST`                    | `0.0.0.0`                 |
    /// | `PORT`                    | `3000`                    |
    /// | `CORS_ORIGINS`            | `http://localhost:5173`   |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                      |
    /// | `DATABASE_URL`            | unset (in-memory stores)  |
    /// | `MEDIA_ROOT`              | `./storage/media`         |
    /// | `PUBLIC_BASE_URL`         | `http://localhost:3000`   |
    /// | `MAX_UPLOAD_BYTES`        | `104857600`               |
    /// | `ALLOW_SIGNUP`            | `false`                   |
    /// | `REVEAL_AFTER_SECS`       | `60`                      |
    /// | `LOG_FORMAT`              | `text`                    |
    ///
    /// JWT settings are documented on [`JwtConfig::from_lookup`].
    ///
    /// # Errors
    ///
    /// Fails when a variable is present but cannot be parsed, or when
    /// `JWT_SECRET` is missing.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", 3000u16)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30u64)?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let media_root = PathBuf::from(
            lookup("MEDIA_ROOT").unwrap_or_else(|| "./storage/media".into()),
        );

        let public_base_url = lookup("PUBLIC_BASE_URL")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();
        if !public_base_url.starts_with("http://") && !public_base_url.starts_with("https://") {
            bail!("PUBLIC_BASE_URL must be an http(s) URL, got '{public_base_url}'");
        }

        let max_upload_bytes = parse_or(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?;
        let allow_signup = parse_or(&lookup, "ALLOW_SIGNUP", false)?;
        let reveal_after_secs = parse_or(&lookup, "REVEAL_AFTER_SECS", DEFAULT_REVEAL_SECS)?;
        let log_format = parse_or(&lookup, "LOG_FORMAT", LogFormat::Text)?;

        let jwt = JwtConfig::from_lookup(&lookup)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            database_url,
            jwt,
            media_root,
            public_base_url,
            max_upload_bytes,
            allow_signup,
            reveal_after_secs,
            log_format,
        })
    }
}

/// Parse `key` when it is set, otherwise return `default`.
pub(crate) fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{key} has an invalid value '{raw}': {e}")),
        None => Ok(default),
    }
}
