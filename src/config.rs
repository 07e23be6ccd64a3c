//! Configuration management for the Spotify token relay.
//!
//! Values come from environment variables, optionally seeded from `.env`
//! files:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the working directory
//! 3. `.env` in the local data directory
//! 4. Application defaults for everything except the client credentials

use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SCOPE: &str =
    "user-read-email user-read-private user-read-playback-state user-modify-playback-state";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} is not a valid URL: {reason}")]
    InvalidUrl { key: &'static str, reason: String },

    #[error("{key} is not a valid socket address: {value}")]
    InvalidAddress { key: &'static str, value: String },

    #[error("{key} is not a valid number: {value}")]
    InvalidNumber { key: &'static str, value: String },

    #[error("failed to load env file {path}: {reason}")]
    EnvFile { path: PathBuf, reason: String },
}

/// Runtime settings for the relay.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: Url,
    pub token_url: Url,
    pub api_url: Url,
    pub server_addr: SocketAddr,
    pub http_timeout: Duration,
    /// `tracing` filter directives, from `RUST_LOG`.
    pub log_filter: String,
}

impl Config {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, treating blank values as
    /// unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| get(key).ok_or(ConfigError::Missing(key));
        let url = |key: &'static str, default: &str| {
            let raw = get(key).unwrap_or_else(|| default.to_string());
            Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl {
                key,
                reason: e.to_string(),
            })
        };

        let server_addr = {
            let raw = get("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string());
            raw.parse::<SocketAddr>()
                .map_err(|_| ConfigError::InvalidAddress {
                    key: "SERVER_ADDRESS",
                    value: raw.clone(),
                })?
        };

        let http_timeout = match get("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|_| ConfigError::InvalidNumber {
                    key: "HTTP_TIMEOUT_SECS",
                    value: raw,
                })?,
            None => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        Ok(Config {
            client_id: required("SPOTIFY_CLIENT_ID")?,
            client_secret: required("SPOTIFY_CLIENT_SECRET")?,
            redirect_uri: required("SPOTIFY_REDIRECT_URI")?,
            scope: get("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string()),
            auth_url: url("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)?,
            token_url: url("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)?,
            api_url: url("SPOTIFY_API_URL", DEFAULT_API_URL)?,
            server_addr,
            http_timeout,
            log_filter: get("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
        })
    }

    /// Builds a full Web API URL from a path such as `/me`.
    pub fn api_endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.api_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Loads `.env` files from the local data directory and the working
/// directory. Neither file is required to exist.
///
/// The data directory file lives at:
/// - Linux: `~/.local/share/spotrelay/.env`
/// - macOS: `~/Library/Application Support/spotrelay/.env`
/// - Windows: `%LOCALAPPDATA%/spotrelay/.env`
///
/// Returns the paths that were actually loaded.
pub async fn load_env() -> Result<Vec<PathBuf>, ConfigError> {
    let mut loaded = Vec::new();

    // dotenv never overrides variables that are already set, so the working
    // directory file must go first to win over the data directory one.
    if let Ok(path) = dotenv::dotenv() {
        loaded.push(path);
    }

    let path = data_env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| ConfigError::EnvFile {
                path: path.clone(),
                reason: e.to_string(),
            })?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| ConfigError::EnvFile {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        loaded.push(path);
    }

    Ok(loaded)
}

fn data_env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotrelay/.env");
    path
}
