//! Configuration module for the telemetry service

use std::env;
use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::risk_controls::RiskControls;
use crate::utils::error::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// General application settings
    #[serde(default)]
    pub app: AppConfig,

    /// Refresh timer settings
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// HTTP dashboard settings
    #[serde(default)]
    pub dashboard: DashboardConfig,

    /// Initial risk control panel values
    #[serde(default)]
    pub risk: RiskControls,
}

/// Application-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Refresh timer configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefreshConfig {
    /// Snapshot regeneration period in milliseconds
    #[serde(default = "default_snapshot_interval_ms")]
    pub snapshot_interval_ms: u64,

    /// Displayed clock update period in milliseconds
    #[serde(default = "default_clock_interval_ms")]
    pub clock_interval_ms: u64,

    /// Fixed RNG seed for reproducible sessions. Entropy when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Dashboard server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DashboardConfig {
    /// Address to listen on, e.g. "127.0.0.1:8080"
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

fn default_snapshot_interval_ms() -> u64 {
    2000
}
fn default_clock_interval_ms() -> u64 {
    1000
}
fn default_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { log_level: "info".to_string() }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            snapshot_interval_ms: default_snapshot_interval_ms(),
            clock_interval_ms: default_clock_interval_ms(),
            seed: None,
        }
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { bind_addr: default_bind_addr() }
    }
}

impl DashboardConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_addr
            .parse()
            .map_err(|e| Error::ConfigError(format!("Invalid bind_addr '{}': {}", self.bind_addr, e)))
    }
}

impl Config {
    /// Serialize default config to TOML string
    pub fn default_toml() -> Result<String> {
        Ok(toml::to_string_pretty(&Self::default())?)
    }

    /// Load configuration from a specific file path, then apply env overrides
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Error::ConfigError(format!("Failed to read config file {:?}: {}", path.as_ref(), e))
        })?;
        let mut cfg: Self = toml::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config file: {}", e)))?;
        cfg.merge_env()?;
        Ok(cfg)
    }

    /// Load `path` if it exists, otherwise defaults (with env overrides).
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            return Self::from_file(path);
        }
        log::warn!("Configuration file {:?} not found, using defaults", path.as_ref());
        let mut cfg = Self::default();
        cfg.merge_env()?;
        Ok(cfg)
    }

    /// Save the configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration for reasonable values
    pub fn validate(&self) -> Result<()> {
        if self.refresh.snapshot_interval_ms == 0 {
            return Err(Error::ConfigError("refresh.snapshot_interval_ms must be > 0".to_string()));
        }
        if self.refresh.clock_interval_ms == 0 {
            return Err(Error::ConfigError("refresh.clock_interval_ms must be > 0".to_string()));
        }
        self.dashboard.socket_addr()?;
        self.risk
            .validate()
            .map_err(|e| Error::ConfigError(format!("risk: {}", e)))?;
        Ok(())
    }

    /// Merge environment variables into the configuration
    pub fn merge_env(&mut self) -> Result<()> {
        if let Ok(level) = env::var("QTM_LOG_LEVEL") {
            self.app.log_level = level;
        }

        if let Ok(addr) = env::var("QTM_BIND_ADDR") {
            self.dashboard.bind_addr = addr;
        }

        if let Ok(seed) = env::var("QTM_SEED") {
            let seed = seed
                .parse::<u64>()
                .map_err(|e| Error::ConfigError(format!("QTM_SEED '{}': {}", seed, e)))?;
            self.refresh.seed = Some(seed);
        }

        Ok(())
    }
}
