//! Environment variable overrides for the tool configuration.

use crate::error::ConfigError;
use crate::types::parse_bool;

/// Overrides the `[ui] safe_mode` setting.
pub const SAFE_MODE_ENV: &str = "REVSTACK_SAFE_MODE";
/// Overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "REVSTACK_CONFIG";
/// Overrides the `[hg] binary` setting.
pub const HG_BINARY_ENV: &str = "REVSTACK_HG";

/// Overrides read from the environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvOverrides {
    pub safe_mode: Option<bool>,
    pub config_path: Option<String>,
    pub hg_binary: Option<String>,
}

impl EnvOverrides {
    /// Read all revstack environment variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read overrides through an arbitrary lookup, so callers can test
    /// without touching process-global state.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let safe_mode = lookup(SAFE_MODE_ENV)
            .map(|v| parse_bool(Some(&v)))
            .transpose()?;
        Ok(Self {
            safe_mode,
            config_path: lookup(CONFIG_PATH_ENV).filter(|v| !v.is_empty()),
            hg_binary: lookup(HG_BINARY_ENV).filter(|v| !v.is_empty()),
        })
    }
}
