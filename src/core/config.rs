//! Configuration management for the MCP server.
//!
//! This module provides a centralized configuration structure that can be
//! populated from environment variables (optionally via a `.env` file) or
//! defaults. The generation credential lives here so that nothing else in
//! the crate reads process environment directly.

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Environment variable holding the generation provider credential.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Text generation provider settings.
    pub generation: GenerationConfig,

    /// External API credentials configuration.
    pub credentials: CredentialsConfig,

    /// Security and path validation configuration.
    pub security: SecurityConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

/// Settings for the OpenAI-compatible generation provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Model identifier sent with every request.
    pub model: String,

    /// Base URL of the provider API, always ending with `/`.
    pub base_url: String,

    /// Upper bound on a single generation request.
    pub timeout_secs: u64,
}

impl GenerationConfig {
    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Configuration for external API credentials.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// OpenAI API key. Absence is reported on the first tool call, not at startup.
    #[serde(skip_serializing)]
    pub openai_api_key: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field(
                "openai_api_key",
                &self.openai_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Configuration for security and path validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// Optional root directory that generated pages must be written inside.
    /// If None, no path restrictions are enforced.
    pub root_path: Option<PathBuf>,

    /// Whether an existing symlink may be used as the output file.
    pub allow_symlinks: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            root_path: None,
            allow_symlinks: true,
        }
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: "gpt-5".to_string(),
            base_url: "https://api.openai.com/".to_string(),
            timeout_secs: 300,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "mcp-html-maker".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
            generation: GenerationConfig::default(),
            credentials: CredentialsConfig::default(),
            security: SecurityConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Server settings are prefixed with `MCP_` (e.g. `MCP_SERVER_NAME`,
    /// `MCP_LOG_LEVEL`); the credential uses the provider's conventional
    /// `OPENAI_API_KEY`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();

        if let Ok(model) = std::env::var("MCP_OPENAI_MODEL") {
            config.generation.model = model;
        }

        if let Ok(base_url) = std::env::var("MCP_OPENAI_BASE_URL") {
            config.generation.base_url = normalize_base_url(&base_url);
        }

        if let Ok(timeout) = std::env::var("MCP_OPENAI_TIMEOUT_SECS") {
            match timeout.parse() {
                Ok(secs) => config.generation.timeout_secs = secs,
                Err(_) => warn!("Ignoring invalid MCP_OPENAI_TIMEOUT_SECS: {}", timeout),
            }
        }

        match std::env::var(OPENAI_API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => {
                config.credentials.openai_api_key = Some(key);
                info!("{} loaded from environment", OPENAI_API_KEY_ENV);
            }
            _ => warn!(
                "{} not set - tool calls will fail until it is provided",
                OPENAI_API_KEY_ENV
            ),
        }

        if let Ok(root_path) = std::env::var("MCP_ROOT_PATH") {
            config.security.root_path = Some(PathBuf::from(root_path));
            info!(
                "Path security enabled: root directory set to {:?}",
                config.security.root_path
            );
        } else {
            warn!(
                "MCP_ROOT_PATH not set - no path restrictions active. \
                 Pages may be written anywhere the process can write."
            );
        }

        if let Ok(allow_symlinks) = std::env::var("MCP_ALLOW_SYMLINKS") {
            config.security.allow_symlinks = allow_symlinks.parse().unwrap_or(true);
            info!("Symlinks allowed: {}", config.security.allow_symlinks);
        }

        config
    }

    /// Check settings that would otherwise only surface on the first tool call.
    ///
    /// A missing credential is not an error here.
    pub fn validate(&self) -> super::Result<()> {
        if self.generation.timeout_secs == 0 {
            return Err(super::Error::config("generation timeout must be greater than zero"));
        }

        if self.generation.model.trim().is_empty() {
            return Err(super::Error::config("generation model must not be empty"));
        }

        if let Some(root) = &self.security.root_path {
            if !root.is_dir() {
                return Err(super::Error::config(format!(
                    "MCP_ROOT_PATH is not an existing directory: {}",
                    root.display()
                )));
            }
        }

        Ok(())
    }
}

fn normalize_base_url(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    pub(crate) static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_credentials_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var(OPENAI_API_KEY_ENV, "sk-test-12345");
        }
        let config = Config::from_env();
        assert_eq!(
            config.credentials.openai_api_key.as_deref(),
            Some("sk-test-12345")
        );
        unsafe {
            std::env::remove_var(OPENAI_API_KEY_ENV);
        }
    }

    #[test]
    fn test_missing_credential_does_not_fail_loading() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::remove_var(OPENAI_API_KEY_ENV);
        }
        let config = Config::from_env();
        assert!(config.credentials.openai_api_key.is_none());
    }

    #[test]
    fn test_blank_credential_treated_as_missing() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var(OPENAI_API_KEY_ENV, "   ");
        }
        let config = Config::from_env();
        assert!(config.credentials.openai_api_key.is_none());
        unsafe {
            std::env::remove_var(OPENAI_API_KEY_ENV);
        }
    }

    #[test]
    fn test_generation_overrides_from_env() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_OPENAI_MODEL", "gpt-4o-mini");
            std::env::set_var("MCP_OPENAI_BASE_URL", "http://localhost:8000");
            std::env::set_var("MCP_OPENAI_TIMEOUT_SECS", "not-a-number");
        }
        let config = Config::from_env();
        assert_eq!(config.generation.model, "gpt-4o-mini");
        assert_eq!(config.generation.base_url, "http://localhost:8000/");
        assert_eq!(config.generation.timeout_secs, 300);
        unsafe {
            std::env::remove_var("MCP_OPENAI_MODEL");
            std::env::remove_var("MCP_OPENAI_BASE_URL");
            std::env::remove_var("MCP_OPENAI_TIMEOUT_SECS");
        }
    }

    #[test]
    fn test_credentials_redacted_in_debug() {
        let creds = CredentialsConfig {
            openai_api_key: Some("super_secret_key".to_string()),
        };
        let debug_str = format!("{:?}", creds);
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super_secret_key"));
    }

    #[test]
    fn test_credentials_never_serialized() {
        let mut config = Config::default();
        config.credentials.openai_api_key = Some("super_secret_key".to_string());
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("super_secret_key"));
    }

    #[test]
    fn test_validate_rejects_missing_root() {
        let mut config = Config::default();
        config.security.root_path = Some(PathBuf::from("/definitely/not/a/real/dir"));
        assert!(matches!(config.validate(), Err(crate::core::Error::Config(_))));
    }

    #[test]
    fn test_generation_timeout_duration() {
        let generation = GenerationConfig {
            timeout_secs: 42,
            ..GenerationConfig::default()
        };
        assert_eq!(generation.timeout(), Duration::from_secs(42));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.generation.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_ignores_missing_credential() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.name, "mcp-html-maker");
        assert_eq!(config.generation.model, "gpt-5");
        assert!(config.credentials.openai_api_key.is_none());
        assert!(config.security.root_path.is_none());
    }
}
