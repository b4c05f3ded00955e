//! Engine configuration with TOML file support.

use accrue_types::{Principal, StakingParams};
use accrue_utils::{init_logging, LogFormat};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// How a participant's accrual window is measured.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccrualMode {
    /// From the later of the last global distribution and the participant's
    /// last harvest. A fresh deposit accrues as if staked for the whole window.
    #[default]
    GlobalCheckpoint,
    /// From the participant's own anchor, reset on every deposit and harvest.
    PerParticipant,
}

/// Descriptive token metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    #[serde(default = "default_token_name")]
    pub name: String,

    #[serde(default = "default_token_symbol")]
    pub symbol: String,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            name: default_token_name(),
            symbol: default_token_symbol(),
        }
    }
}

/// Configuration for a staking engine instance.
///
/// Can be loaded from a TOML file via [`EngineConfig::from_toml_file`] or
/// built programmatically (e.g. for tests) via [`EngineConfig::new`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// The only principal allowed to run governance actions and distributions.
    pub owner: Principal,

    #[serde(default)]
    pub accrual_mode: AccrualMode,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub token: TokenConfig,

    #[serde(default)]
    pub params: StakingParams,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_token_name() -> String {
    "Accrue Staked Token".to_string()
}

fn default_token_symbol() -> String {
    "stACR".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl EngineConfig {
    pub fn new(owner: Principal) -> Self {
        Self {
            owner,
            token: TokenConfig::default(),
            params: StakingParams::default(),
            accrual_mode: AccrualMode::default(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }

    pub fn with_accrual_mode(mut self, mode: AccrualMode) -> Self {
        self.accrual_mode = mode;
        self
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.params;
        if p.min_yield_rate > p.max_yield_rate {
            return Err(ConfigError::Invalid(format!(
                "min_yield_rate {} exceeds max_yield_rate {}",
                p.min_yield_rate, p.max_yield_rate
            )));
        }
        if p.minimum_stake_amount == 0 {
            return Err(ConfigError::Invalid(
                "minimum_stake_amount must be non-zero".into(),
            ));
        }
        if self.token.name.is_empty() || self.token.symbol.is_empty() {
            return Err(ConfigError::Invalid("token name and symbol are required".into()));
        }
        Ok(())
    }

    /// Install the global tracing subscriber described by this config.
    /// Returns `false` if one was already installed.
    pub fn init_logging(&self) -> bool {
        init_logging(self.log_format, &self.log_level).is_ok()
    }
}
