//! Configuration management for the Suna compatibility layer.

use std::path::{Path, PathBuf};
use std::time::Duration;

use omni_agents::HttpAgentService;
use serde::{Deserialize, Serialize};

use crate::core::SunaDefaultAgentService;

/// Environment variable overriding `omni.base_url`.
pub const OMNI_URL_ENV: &str = "OMNI_API_URL";

/// Environment variable overriding `omni.admin_key`.
pub const OMNI_ADMIN_KEY_ENV: &str = "OMNI_ADMIN_API_KEY";

/// Environment variable overriding `api.token`.
pub const API_TOKEN_ENV: &str = "SUNA_API_TOKEN";

const REDACTED: &str = "********";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Omni admin API connection.
    pub omni: OmniConfig,

    /// Legacy HTTP API server.
    pub api: ApiConfig,
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// Loads global config first, then merges project-local config if present.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file cannot be read or parsed.
    pub fn load() -> anyhow::Result<Self> {
        let global_path = Self::config_path()?;
        let mut config = if global_path.exists() {
            Self::load_from(&global_path)?
        } else {
            Self::default()
        };

        if let Ok(project_path) = Self::project_config_path() {
            if project_path.exists() {
                config.merge(Self::load_from(&project_path)?);
            }
        }

        Ok(config)
    }

    /// Load configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("failed to parse {}: {e}", path.display()))
    }

    /// Get the project-local configuration file path.
    ///
    /// Looks for `.suna/config.toml` in the current directory.
    pub fn project_config_path() -> anyhow::Result<PathBuf> {
        let cwd = std::env::current_dir()?;
        Ok(cwd.join(".suna").join("config.toml"))
    }

    /// Merge another config into this one (project overrides global).
    fn merge(&mut self, other: Self) {
        let omni_defaults = OmniConfig::default();
        if other.omni.base_url != omni_defaults.base_url {
            self.omni.base_url = other.omni.base_url;
        }
        if other.omni.admin_key.is_some() {
            self.omni.admin_key = other.omni.admin_key;
        }
        if other.omni.timeout_secs != omni_defaults.timeout_secs {
            self.omni.timeout_secs = other.omni.timeout_secs;
        }

        let api_defaults = ApiConfig::default();
        if other.api.host != api_defaults.host {
            self.api.host = other.api.host;
        }
        if other.api.port != api_defaults.port {
            self.api.port = other.api.port;
        }
        if other.api.token.is_some() {
            self.api.token = other.api.token;
        }
    }

    /// Get the configuration file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Get the config directory path (`~/.config/suna/compat/`).
    ///
    /// # Errors
    ///
    /// Returns an error if the config directory cannot be determined.
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
            return Ok(PathBuf::from(xdg_config_home).join("suna").join("compat"));
        }

        let base = directories::BaseDirs::new()
            .ok_or_else(|| anyhow::anyhow!("could not determine config directory"))?;

        Ok(base.config_dir().join("suna").join("compat"))
    }

    /// Copy of this config with secrets masked, for display.
    #[must_use]
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.omni.admin_key.is_some() {
            config.omni.admin_key = Some(REDACTED.to_string());
        }
        if config.api.token.is_some() {
            config.api.token = Some(REDACTED.to_string());
        }
        config
    }

    /// Build the legacy facade over the configured Omni service.
    ///
    /// # Errors
    ///
    /// Returns an error if the Omni client cannot be created.
    pub fn facade(&self) -> anyhow::Result<SunaDefaultAgentService<HttpAgentService>> {
        let service = self.omni.create_service()?;
        Ok(SunaDefaultAgentService::new(service))
    }
}

/// Environment lookup used to resolve overrides.
type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

fn process_env(var: &str) -> Option<String> {
    std::env::var(var).ok()
}

/// Read `var` through `env`, falling back to the configured value.
fn env_or(env: EnvLookup<'_>, var: &str, configured: Option<&String>) -> Option<String> {
    env(var)
        .filter(|value| !value.is_empty())
        .or_else(|| configured.cloned())
}

/// Omni admin API configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OmniConfig {
    /// Root URL of the Omni admin API.
    /// Can also be set via `OMNI_API_URL` environment variable.
    pub base_url: String,

    /// Admin API key sent with every request.
    /// Can also be set via `OMNI_ADMIN_API_KEY` environment variable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_key: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OmniConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000/api".to_string(),
            admin_key: None,
            timeout_secs: 30,
        }
    }
}

impl OmniConfig {
    /// Get the base URL, preferring env var over config file.
    #[must_use]
    pub fn base_url(&self) -> String {
        self.base_url_from(&process_env)
    }

    fn base_url_from(&self, env: EnvLookup<'_>) -> String {
        env_or(env, OMNI_URL_ENV, Some(&self.base_url)).unwrap_or_default()
    }

    /// Get the admin key, preferring env var over config file.
    #[must_use]
    pub fn admin_key(&self) -> Option<String> {
        self.admin_key_from(&process_env)
    }

    fn admin_key_from(&self, env: EnvLookup<'_>) -> Option<String> {
        env_or(env, OMNI_ADMIN_KEY_ENV, self.admin_key.as_ref())
    }

    /// Request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Create the HTTP client for the Omni admin API.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL or admin key is invalid.
    pub fn create_service(&self) -> omni_agents::Result<HttpAgentService> {
        self.create_service_from(&process_env)
    }

    fn create_service_from(&self, env: EnvLookup<'_>) -> omni_agents::Result<HttpAgentService> {
        let admin_key = self.admin_key_from(env);
        HttpAgentService::new(&self.base_url_from(env), admin_key.as_deref(), self.timeout())
    }
}

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Host to bind to.
    pub host: String,

    /// Port to bind to.
    pub port: u16,

    /// API token for authentication (optional, but required for remote access).
    /// Can also be set via `SUNA_API_TOKEN` environment variable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 7891,
            token: None,
        }
    }
}

impl ApiConfig {
    /// Get the API token, preferring env var over config file.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token_from(&process_env)
    }

    fn token_from(&self, env: EnvLookup<'_>) -> Option<String> {
        env_or(env, API_TOKEN_ENV, self.token.as_ref())
    }

    /// Generate a new random API token.
    #[must_use]
    pub fn generate_token() -> String {
        use rand::Rng;
        let mut rng = rand::rng();
        let bytes: [u8; 32] = rng.random();
        format!("suna_{}", hex::encode(bytes))
    }
}
