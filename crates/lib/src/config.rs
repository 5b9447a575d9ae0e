//! Configuration types and loading.
//!
//! Config is loaded from a JSON file (e.g. `~/.parley/config.json`) and environment.
//! Missing file or missing keys fall back to defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Top-level application config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Chat server URL and credentials.
    #[serde(default)]
    pub server: ServerConfig,

    /// Signed-in user.
    #[serde(default)]
    pub user: UserConfig,

    /// Retry policy for channel post refreshes.
    #[serde(default)]
    pub retry: RetryPolicy,

    /// Offline store snapshot location.
    #[serde(default)]
    pub store: StoreConfig,
}

/// Server base URL and session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Base URL of the chat server (default "http://127.0.0.1:8065").
    #[serde(default = "default_server_url")]
    pub url: String,

    /// Session or personal access token. Overridden by PARLEY_TOKEN env.
    pub token: Option<String>,
}

/// The user the client acts as.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserConfig {
    /// Current user id; used to build pending post ids.
    #[serde(default)]
    pub id: String,
}

/// How many times to try fetching a channel's posts and how long to wait between tries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetryPolicy {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Snapshot file (default ~/.parley/store.json).
    #[serde(default)]
    pub path: Option<PathBuf>,
}

fn default_server_url() -> String {
    "http://127.0.0.1:8065".to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_delay_ms() -> u64 {
    1000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            token: None,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
        }
    }
}

fn non_blank(s: &str) -> Option<String> {
    let s = s.trim();
    (!s.is_empty()).then(|| s.to_string())
}

/// Bearer token for the server. `PARLEY_TOKEN` wins over `server.token` so a token need not
/// live in the config file.
pub fn resolve_server_token(config: &Config) -> Option<String> {
    let from_env = std::env::var("PARLEY_TOKEN").ok();
    from_env
        .as_deref()
        .and_then(non_blank)
        .or_else(|| config.server.token.as_deref().and_then(non_blank))
}

/// `PARLEY_CONFIG_PATH`, else `~/.parley/config.json`.
pub fn default_config_path() -> PathBuf {
    if let Ok(p) = std::env::var("PARLEY_CONFIG_PATH") {
        return PathBuf::from(p);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".parley").join("config.json"),
        None => PathBuf::from("config.json"),
    }
}

/// Resolve the offline store snapshot path. Relative paths are resolved against the config file's parent.
pub fn resolve_store_path(config: &Config, config_path: &Path) -> PathBuf {
    let config_parent = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    match &config.store.path {
        Some(p) if !p.as_os_str().is_empty() => {
            if p.is_absolute() {
                p.clone()
            } else {
                config_parent.join(p)
            }
        }
        _ => config_parent.join("store.json"),
    }
}

/// Read the client config, returning it with the path it came from. Without a file every
/// setting takes its default (local server, three post fetch attempts one second apart).
pub fn load_config(path: Option<PathBuf>) -> Result<(Config, PathBuf)> {
    let path = path.unwrap_or_else(default_config_path);
    if !path.exists() {
        log::debug!("no config at {}, using defaults", path.display());
        return Ok((Config::default(), path));
    }
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("reading config from {}", path.display()))?;
    let config: Config = serde_json::from_str(&raw)
        .with_context(|| format!("parsing config from {}", path.display()))?;
    log::debug!(
        "config {}: server {}, {} post fetch attempts",
        path.display(),
        config.server.url,
        config.retry.max_attempts
    );
    Ok((config, path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_keys_missing() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.server.url, "http://127.0.0.1:8065");
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.delay_ms, 1000);
        assert!(config.user.id.is_empty());
    }

    #[test]
    fn camel_case_keys_parse() {
        let config: Config = serde_json::from_str(
            r#"{"server":{"url":"https://chat.example.com","token":"abc"},
                "user":{"id":"u1"},
                "retry":{"maxAttempts":5,"delayMs":10}}"#,
        )
        .unwrap();
        assert_eq!(config.server.url, "https://chat.example.com");
        assert_eq!(config.server.token.as_deref(), Some("abc"));
        assert_eq!(config.user.id, "u1");
        assert_eq!(config.retry, RetryPolicy { max_attempts: 5, delay_ms: 10 });
    }

    #[test]
    fn resolve_store_path_default() {
        let config = Config::default();
        let path = Path::new("/home/user/.parley/config.json");
        assert_eq!(
            resolve_store_path(&config, path),
            PathBuf::from("/home/user/.parley/store.json")
        );
    }

    #[test]
    fn resolve_store_path_override_relative() {
        let mut config = Config::default();
        config.store.path = Some(PathBuf::from("cache/offline.json"));
        let path = Path::new("/home/user/.parley/config.json");
        assert_eq!(
            resolve_store_path(&config, path),
            PathBuf::from("/home/user/.parley/cache/offline.json")
        );
    }

    #[test]
    fn blank_tokens_ignored() {
        assert_eq!(non_blank("  "), None);
        assert_eq!(non_blank(" abc\n").as_deref(), Some("abc"));
    }

    #[test]
    fn load_config_missing_file_uses_defaults() {
        let path = std::env::temp_dir().join("parley-config-does-not-exist.json");
        let (config, used) = load_config(Some(path.clone())).unwrap();
        assert_eq!(used, path);
        assert_eq!(config.retry, RetryPolicy::default());
    }
}
