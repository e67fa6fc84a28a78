//! The tool's own settings (`~/.revstackrc`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env::EnvOverrides;
use crate::error::ConfigError;
use crate::parse::parse_ini;
use crate::types::{home_dir, parse_bool, parse_int, parse_path};

/// Default config file name, relative to the home directory.
pub const DEFAULT_FILE_NAME: &str = ".revstackrc";

/// Settings that shape how revstack drives Mercurial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    /// Global safe mode: pin username and force evolve regardless of the
    /// user's own extension setup.
    pub safe_mode: bool,
    /// The `hg` executable.
    pub hg_binary: PathBuf,
    /// Per-command timeout; None waits forever.
    pub timeout: Option<Duration>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            safe_mode: false,
            hg_binary: PathBuf::from("hg"),
            timeout: None,
        }
    }
}

impl ToolConfig {
    /// Parse settings from INI bytes.
    pub fn from_bytes(input: &[u8], filename: &str) -> Result<Self, ConfigError> {
        let mut config = ToolConfig::default();
        for entry in parse_ini(input, filename)? {
            let value = entry.value.as_deref();
            match entry.dotted_key().as_str() {
                "ui.safe_mode" => config.safe_mode = parse_bool(value)?,
                "hg.binary" => {
                    let value = value.ok_or_else(|| missing_value(&entry.dotted_key()))?;
                    config.hg_binary = parse_path(value);
                }
                "hg.timeout" => {
                    let value = value.ok_or_else(|| missing_value(&entry.dotted_key()))?;
                    let secs = parse_int(value)?;
                    config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
                }
                other => {
                    tracing::warn!(
                        file = filename,
                        line = entry.line_number,
                        key = other,
                        "ignoring unknown setting"
                    );
                }
            }
        }
        Ok(config)
    }

    /// Load settings from a specific file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::FileNotFound(path.to_path_buf()),
            _ => ConfigError::Io(e),
        })?;
        Self::from_bytes(&bytes, &path.display().to_string())
    }

    /// Load from the standard location and apply environment overrides.
    ///
    /// The file is `$REVSTACK_CONFIG` if set, else `~/.revstackrc`. A missing
    /// default file yields defaults; a missing explicit file is an error.
    pub fn discover(env: &EnvOverrides) -> Result<Self, ConfigError> {
        let mut config = match &env.config_path {
            Some(path) => Self::load(&parse_path(path))?,
            None => match home_dir().map(|home| home.join(DEFAULT_FILE_NAME)) {
                Some(path) => match Self::load(&path) {
                    Err(ConfigError::FileNotFound(_)) => ToolConfig::default(),
                    other => other?,
                },
                None => ToolConfig::default(),
            },
        };
        config.apply_env(env);
        Ok(config)
    }

    /// Environment values beat the file.
    pub fn apply_env(&mut self, env: &EnvOverrides) {
        if let Some(safe_mode) = env.safe_mode {
            self.safe_mode = safe_mode;
        }
        if let Some(ref binary) = env.hg_binary {
            self.hg_binary = parse_path(binary);
        }
    }
}

fn missing_value(key: &str) -> ConfigError {
    ConfigError::InvalidKey(format!("{} requires a value", key))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ToolConfig::from_bytes(b"", "empty").unwrap();
        assert_eq!(config, ToolConfig::default());
        assert!(!config.safe_mode);
        assert_eq!(config.hg_binary, PathBuf::from("hg"));
    }

    #[test]
    fn all_settings() {
        let config = ToolConfig::from_bytes(
            b"[ui]\nsafe_mode = true\n[hg]\nbinary = /opt/hg/bin/hg\ntimeout = 120\n",
            "rc",
        )
        .unwrap();
        assert!(config.safe_mode);
        assert_eq!(config.hg_binary, PathBuf::from("/opt/hg/bin/hg"));
        assert_eq!(config.timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    fn zero_timeout_disables() {
        let config = ToolConfig::from_bytes(b"[hg]\ntimeout = 0\n", "rc").unwrap();
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn bare_binary_key_fails() {
        assert!(ToolConfig::from_bytes(b"[hg]\nbinary\n", "rc").is_err());
    }

    #[test]
    fn unknown_keys_ignored() {
        let config = ToolConfig::from_bytes(b"[ui]\ncolor = never\n", "rc").unwrap();
        assert_eq!(config, ToolConfig::default());
    }

    #[test]
    fn env_beats_file() {
        let mut config = ToolConfig::from_bytes(b"[ui]\nsafe_mode = true\n", "rc").unwrap();
        config.apply_env(&EnvOverrides {
            safe_mode: Some(false),
            config_path: None,
            hg_binary: Some("/usr/local/bin/hg".into()),
        });
        assert!(!config.safe_mode);
        assert_eq!(config.hg_binary, PathBuf::from("/usr/local/bin/hg"));
    }
}
