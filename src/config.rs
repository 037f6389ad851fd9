// Service configuration
//
// Resolution order:
// 1. explicit `--config` path
// 2. `<config dir>/tiktok-resolver/config.json` when it exists
// 3. built-in defaults
// Environment variables are applied on top of whichever file was used.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid config {path}: {reason}")]
    Invalid { path: PathBuf, reason: &'static str },

    #[error("invalid value for {var}: {value}")]
    Env { var: &'static str, value: String },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Upstream providers that can be placed in the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Tiklydown,
    Tikwm,
    Vxtiktok,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub network: NetworkConfig,
    pub providers: ProvidersConfig,
    pub feedback: FeedbackConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address, e.g. "0.0.0.0:3000"
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Outbound network settings shared by every provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// HTTP or SOCKS5 proxy URL (e.g., "socks5h://127.0.0.1:1080")
    pub proxy: Option<String>,

    /// Upper bound for a single provider attempt, in seconds
    pub timeout_seconds: u64,

    /// User agent sent to the markup mirror
    pub user_agent: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            proxy: None,
            timeout_seconds: 15,
            user_agent: "Mozilla/5.0".to_string(),
        }
    }
}

impl NetworkConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Provider endpoints and chain order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub order: Vec<ProviderKind>,
    pub tiklydown_endpoint: String,
    pub tikwm_endpoint: String,
    /// Base URL substituted for the tiktok.com host
    pub vxtiktok_base: String,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            order: vec![
                ProviderKind::Tiklydown,
                ProviderKind::Tikwm,
                ProviderKind::Vxtiktok,
            ],
            tiklydown_endpoint: "https://api.tiklydown.eu.org/api/download".to_string(),
            tikwm_endpoint: "https://www.tikwm.com/api/".to_string(),
            vxtiktok_base: "https://vxtiktok.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// Append feedback records to this file as JSON lines
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Load from `path`, or from the default location, then apply env overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::default_path().filter(|p| p.exists()),
        };

        let mut config = match file {
            Some(p) => Self::from_file(&p)?,
            None => Self::default(),
        };
        config.apply_env(|var| std::env::var(var).ok())?;
        Ok(config)
    }

    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("tiktok-resolver").join("config.json"))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        if config.network.timeout_seconds == 0 {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                reason: "network.timeout_seconds must be greater than 0",
            });
        }
        Ok(config)
    }

    /// Apply `RESOLVER_*` overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(bind) = lookup("RESOLVER_BIND") {
            self.server.bind = bind;
        }
        if let Some(proxy) = lookup("RESOLVER_PROXY") {
            self.network.proxy = Some(proxy).filter(|p| !p.is_empty());
        }
        if let Some(raw) = lookup("RESOLVER_TIMEOUT_SECS") {
            self.network.timeout_seconds = raw
                .trim()
                .parse()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Env {
                    var: "RESOLVER_TIMEOUT_SECS",
                    value: raw.clone(),
                })?;
        }
        if let Some(path) = lookup("RESOLVER_FEEDBACK_LOG") {
            self.feedback.log_file = Some(PathBuf::from(path)).filter(|p| !p.as_os_str().is_empty());
        }
        Ok(())
    }
}
