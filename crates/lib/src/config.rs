//! Client configuration
//!
//! The endpoint and optional bearer token live in an explicit struct instead
//! of globals. Resolution order for the endpoint: caller-supplied flag, then
//! `TRACKOR_ENDPOINT`, then the config file. `TRACKOR_TOKEN` overrides the
//! file token.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const ENDPOINT_ENV: &str = "TRACKOR_ENDPOINT";
const TOKEN_ENV: &str = "TRACKOR_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "no endpoint configured: pass --endpoint, set TRACKOR_ENDPOINT, or add `endpoint` to the config file"
    )]
    MissingEndpoint,
}

/// Main configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Remote MCP endpoint URL, e.g. "https://example.fastmcp.app/mcp"
    pub endpoint: Option<String>,

    /// Bearer token sent as `Authorization: Bearer <token>` when set
    pub bearer_token: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            bearer_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load config from the default location (~/.config/trackor/config.toml)
    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load config from an explicit path, falling back to defaults on a
    /// missing or malformed file
    pub fn load_from(path: &Path) -> Self {
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Get config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("trackor/config.toml"))
    }

    /// Resolve the endpoint from a flag, the environment, or the file
    pub fn resolve_endpoint(&self, flag: Option<String>) -> Result<String, ConfigError> {
        flag.or_else(|| std::env::var(ENDPOINT_ENV).ok())
            .or_else(|| self.endpoint.clone())
            .ok_or(ConfigError::MissingEndpoint)
    }

    /// Bearer token, with the environment taking precedence over the file
    pub fn token(&self) -> Option<String> {
        std::env::var(TOKEN_ENV)
            .ok()
            .or_else(|| self.bearer_token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_from_full_file() {
        let file = write_config(
            r#"
            endpoint = "https://example.test/mcp"
            bearer_token = "secret"
            timeout_secs = 5
            "#,
        );

        let config = Config::load_from(file.path());
        assert_eq!(config.endpoint.as_deref(), Some("https://example.test/mcp"));
        assert_eq!(config.bearer_token.as_deref(), Some("secret"));
        assert_eq!(config.timeout_secs, 5);
    }

    #[test]
    fn timeout_defaults_when_absent() {
        let file = write_config(r#"endpoint = "https://example.test/mcp""#);

        let config = Config::load_from(file.path());
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(config.bearer_token.is_none());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/trackor.toml"));
        assert!(config.endpoint.is_none());
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let file = write_config("endpoint = [this is not toml");
        let config = Config::load_from(file.path());
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn flag_beats_file_endpoint() {
        let config = Config {
            endpoint: Some("https://file.test/mcp".into()),
            ..Default::default()
        };

        let resolved = config
            .resolve_endpoint(Some("https://flag.test/mcp".into()))
            .unwrap();
        assert_eq!(resolved, "https://flag.test/mcp");
    }

    #[test]
    fn file_endpoint_used_without_flag() {
        let config = Config {
            endpoint: Some("https://file.test/mcp".into()),
            ..Default::default()
        };

        assert_eq!(
            config.resolve_endpoint(None).unwrap(),
            "https://file.test/mcp"
        );
    }

    #[test]
    fn unset_endpoint_is_an_error() {
        let config = Config::default();
        assert!(config.resolve_endpoint(None).is_err());
    }
}
