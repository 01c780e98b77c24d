//! Settings domain types and validation.
//!
//! Pure domain types with optional fields and `effective_*()` accessors so a
//! partial settings file (or none at all) still yields a runnable service.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default port for the HTTP server.
pub const DEFAULT_LISTEN_PORT: u16 = 3000;

/// Default path of the topology document, relative to the working directory.
pub const DEFAULT_TOPOLOGY_PATH: &str = "topology.json";

/// Default per-probe connect deadline.
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 2_000;

/// Default snapshot freshness window.
pub const DEFAULT_CACHE_TTL_MS: u64 = 180_000;

/// Default bound on concurrent probes within a pass.
pub const DEFAULT_PROBE_CONCURRENCY: usize = 16;

/// Errors raised while loading or validating settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON for the expected shape.
    #[error("failed to parse settings file: {0}")]
    Parse(#[from] serde_json::Error),

    /// A setting value is out of range.
    #[error("invalid setting: {0}")]
    Invalid(String),
}

/// Upstream server-list API configuration for the `/api/servers` proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerListConfig {
    /// Upstream endpoint URL.
    pub url: String,

    /// API token, usually supplied via `PINGMAP_TOKEN` instead of the file.
    #[serde(default)]
    pub token: Option<String>,

    /// Account login, usually supplied via `PINGMAP_LOGIN` instead of the file.
    #[serde(default)]
    pub login: Option<String>,
}

/// Application settings structure.
///
/// All fields are optional to support partial settings files and graceful
/// defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Port for the HTTP server.
    pub listen_port: Option<u16>,

    /// Path to the topology document.
    pub topology_path: Option<String>,

    /// Directory of static map assets to serve, if any.
    pub static_dir: Option<String>,

    /// Per-probe connect deadline in milliseconds.
    pub probe_timeout_ms: Option<u64>,

    /// Snapshot freshness window in milliseconds.
    pub cache_ttl_ms: Option<u64>,

    /// Bound on concurrent probes within a pass.
    pub probe_concurrency: Option<usize>,

    /// Upstream server-list API, if the proxy endpoint should be enabled.
    pub server_list: Option<ServerListConfig>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            listen_port: Some(DEFAULT_LISTEN_PORT),
            topology_path: Some(DEFAULT_TOPOLOGY_PATH.to_string()),
            static_dir: None,
            probe_timeout_ms: Some(DEFAULT_PROBE_TIMEOUT_MS),
            cache_ttl_ms: Some(DEFAULT_CACHE_TTL_MS),
            probe_concurrency: Some(DEFAULT_PROBE_CONCURRENCY),
            server_list: None,
        }
    }

    /// Read and parse a settings file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SettingsError::Io {
                path: path.display().to_string(),
                source,
            })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Load a settings file if it exists, otherwise fall back to defaults.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if tokio::fs::try_exists(path).await.unwrap_or(false) {
            Self::load(path).await
        } else {
            Ok(Self::with_defaults())
        }
    }

    /// Get the effective listen port (with default fallback).
    #[must_use]
    pub const fn effective_listen_port(&self) -> u16 {
        match self.listen_port {
            Some(port) => port,
            None => DEFAULT_LISTEN_PORT,
        }
    }

    /// Get the effective topology path (with default fallback).
    #[must_use]
    pub fn effective_topology_path(&self) -> &str {
        self.topology_path.as_deref().unwrap_or(DEFAULT_TOPOLOGY_PATH)
    }

    /// Get the effective probe timeout in milliseconds.
    #[must_use]
    pub const fn effective_probe_timeout_ms(&self) -> u64 {
        match self.probe_timeout_ms {
            Some(ms) => ms,
            None => DEFAULT_PROBE_TIMEOUT_MS,
        }
    }

    /// Get the effective snapshot TTL in milliseconds.
    #[must_use]
    pub const fn effective_cache_ttl_ms(&self) -> u64 {
        match self.cache_ttl_ms {
            Some(ms) => ms,
            None => DEFAULT_CACHE_TTL_MS,
        }
    }

    /// Get the effective probe concurrency bound.
    #[must_use]
    pub const fn effective_probe_concurrency(&self) -> usize {
        match self.probe_concurrency {
            Some(limit) => limit,
            None => DEFAULT_PROBE_CONCURRENCY,
        }
    }

    /// Overlay environment-supplied upstream credentials.
    ///
    /// Only applies when a `server_list` block is configured; the env values
    /// win over the file values.
    pub fn apply_env_credentials(&mut self, token: Option<String>, login: Option<String>) {
        if let Some(server_list) = self.server_list.as_mut() {
            if token.is_some() {
                server_list.token = token;
            }
            if login.is_some() {
                server_list.login = login;
            }
        }
    }
}

/// Validate settings values that have no sensible zero case.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if settings.probe_timeout_ms == Some(0) {
        return Err(SettingsError::Invalid(
            "probe_timeout_ms must be greater than zero".to_string(),
        ));
    }
    if settings.cache_ttl_ms == Some(0) {
        return Err(SettingsError::Invalid(
            "cache_ttl_ms must be greater than zero".to_string(),
        ));
    }
    if settings.probe_concurrency == Some(0) {
        return Err(SettingsError::Invalid(
            "probe_concurrency must be greater than zero".to_string(),
        ));
    }
    if let Some(server_list) = &settings.server_list {
        if server_list.url.trim().is_empty() {
            return Err(SettingsError::Invalid(
                "server_list.url must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::with_defaults();
        assert_eq!(settings.effective_listen_port(), DEFAULT_LISTEN_PORT);
        assert_eq!(settings.effective_topology_path(), DEFAULT_TOPOLOGY_PATH);
        assert_eq!(settings.effective_probe_timeout_ms(), 2_000);
        assert_eq!(settings.effective_cache_ttl_ms(), 180_000);
        assert_eq!(settings.effective_probe_concurrency(), 16);
        assert!(validate_settings(&settings).is_ok());
    }

    #[test]
    fn test_partial_file_gets_fallbacks() {
        let settings: Settings = serde_json::from_str(r#"{ "listen_port": 8080 }"#).unwrap();
        assert_eq!(settings.effective_listen_port(), 8080);
        assert_eq!(settings.effective_cache_ttl_ms(), DEFAULT_CACHE_TTL_MS);
    }

    #[test]
    fn test_rejects_zero_values() {
        let mut settings = Settings::with_defaults();
        settings.cache_ttl_ms = Some(0);
        assert!(matches!(
            validate_settings(&settings),
            Err(SettingsError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_empty_upstream_url() {
        let mut settings = Settings::with_defaults();
        settings.server_list = Some(ServerListConfig {
            url: "  ".to_string(),
            token: None,
            login: None,
        });
        assert!(validate_settings(&settings).is_err());
    }

    #[test]
    fn test_env_credentials_override_file() {
        let mut settings = Settings::with_defaults();
        settings.server_list = Some(ServerListConfig {
            url: "https://launcher.example.net/listServers".to_string(),
            token: Some("file-token".to_string()),
            login: None,
        });

        settings.apply_env_credentials(Some("env-token".to_string()), Some("env-login".to_string()));

        let server_list = settings.server_list.unwrap();
        assert_eq!(server_list.token.as_deref(), Some("env-token"));
        assert_eq!(server_list.login.as_deref(), Some("env-login"));
    }

    #[test]
    fn test_env_credentials_without_block_are_ignored() {
        let mut settings = Settings::with_defaults();
        settings.apply_env_credentials(Some("env-token".to_string()), None);
        assert!(settings.server_list.is_none());
    }

    #[tokio::test]
    async fn test_load_or_default_missing_file() {
        let settings = Settings::load_or_default("/definitely/not/here.json")
            .await
            .unwrap();
        assert_eq!(settings, Settings::with_defaults());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "cache_ttl_ms": 5000, "server_list": { "url": "https://u" } }"#)
            .unwrap();

        let settings = Settings::load(&path).await.unwrap();
        assert_eq!(settings.effective_cache_ttl_ms(), 5000);
        assert!(settings.server_list.is_some());
    }
}
