//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub jira: JiraConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Whole-request timeout applied by the HTTP layer
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Jira connection settings
#[derive(Debug, Clone, Deserialize)]
pub struct JiraConfig {
    /// Hostname (`example.atlassian.net`) or base URL
    #[serde(default)]
    pub host: String,

    /// Account email
    #[serde(default)]
    pub user: String,

    #[serde(default)]
    pub api_token: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            host: String::new(),
            user: String::new(),
            api_token: String::new(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Inbound basic-auth credentials. Anonymous access when `user` is unset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    pub user: Option<String>,
    pub pass: Option<String>,
}

/// How inbound requests are authenticated, resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthMode {
    Anonymous,
    BasicCredentials { user: String, pass: String },
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `pretty` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("jira-datasource").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        // Server overrides
        if let Some(host) = var("JIRA_DATASOURCE_HOST") {
            self.server.host = host;
        }
        if let Some(port) = var("JIRA_DATASOURCE_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Some(secs) = var("JIRA_DATASOURCE_REQUEST_TIMEOUT").and_then(|s| s.parse().ok()) {
            self.server.request_timeout_secs = secs;
        }

        // Jira overrides
        if let Some(host) = var("JIRA_HOST") {
            self.jira.host = host;
        }
        if let Some(user) = var("JIRA_USER") {
            self.jira.user = user;
        }
        if let Some(token) = var("JIRA_API_TOKEN") {
            self.jira.api_token = token;
        }

        // Inbound auth overrides
        if let Some(user) = var("HTTP_USER") {
            self.auth.user = Some(user);
        }
        if let Some(pass) = var("HTTP_PASS") {
            self.auth.pass = Some(pass);
        }

        // Logging overrides
        if let Some(level) = var("JIRA_DATASOURCE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("JIRA_DATASOURCE_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Check that everything needed to reach Jira is present
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jira.host.trim().is_empty() {
            return Err(ConfigError::Missing("jira.host"));
        }
        Ok(())
    }

    /// Resolve the inbound authentication mode
    pub fn auth_mode(&self) -> AuthMode {
        match self.auth.user.as_deref() {
            Some(user) if !user.is_empty() => AuthMode::BasicCredentials {
                user: user.to_string(),
                pass: self.auth.pass.clone().unwrap_or_default(),
            },
            _ => AuthMode::Anonymous,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Missing required setting: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.addr(), "0.0.0.0:3000");
        assert_eq!(config.server.request_timeout_secs, 30);
        assert_eq!(config.jira.request_timeout_secs, 30);
        assert_eq!(config.logging.format, "pretty");
        assert_eq!(config.auth_mode(), AuthMode::Anonymous);
        assert!(matches!(config.validate(), Err(ConfigError::Missing("jira.host"))));
    }

    #[test]
    fn test_load_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[server]
port = 8080
request_timeout_secs = 10

[jira]
host = "example.atlassian.net"
user = "bot@example.com"
api_token = "token"

[auth]
user = "grafana"
pass = "hunter2"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.request_timeout_secs, 10);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.jira.host, "example.atlassian.net");
        assert!(config.validate().is_ok());
        assert_eq!(
            config.auth_mode(),
            AuthMode::BasicCredentials {
                user: "grafana".to_string(),
                pass: "hunter2".to_string(),
            }
        );
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();

        assert!(matches!(Config::load(&path), Err(ConfigError::Parse { .. })));
        assert!(matches!(
            Config::load(&dir.path().join("missing.toml")),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("JIRA_HOST", "jira.internal"),
            ("JIRA_USER", "svc"),
            ("JIRA_API_TOKEN", "abc"),
            ("HTTP_USER", "grafana"),
            ("JIRA_DATASOURCE_PORT", "9000"),
            ("JIRA_DATASOURCE_REQUEST_TIMEOUT", "5"),
            ("JIRA_DATASOURCE_LOG_FORMAT", "json"),
        ]
        .into_iter()
        .collect();

        let mut config = Config::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.jira.host, "jira.internal");
        assert_eq!(config.jira.user, "svc");
        assert_eq!(config.jira.api_token, "abc");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.request_timeout_secs, 5);
        assert_eq!(config.logging.format, "json");
        // Password defaults to empty when only the user is set
        assert_eq!(
            config.auth_mode(),
            AuthMode::BasicCredentials {
                user: "grafana".to_string(),
                pass: String::new(),
            }
        );
    }

    #[test]
    fn test_invalid_port_override_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|key| (key == "JIRA_DATASOURCE_PORT").then(|| "http".to_string()));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_empty_http_user_means_anonymous() {
        let mut config = Config::default();
        config.auth.user = Some(String::new());
        assert_eq!(config.auth_mode(), AuthMode::Anonymous);
    }
}
