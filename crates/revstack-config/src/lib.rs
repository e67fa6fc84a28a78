pub mod env;
pub mod error;
pub mod parse;
pub mod tool;
pub mod types;

pub use error::ConfigError;
pub use tool::ToolConfig;
pub use types::{parse_bool, parse_int, parse_path};

use std::collections::BTreeMap;

/// Value Mercurial uses to mark an extension as explicitly disabled.
const DISABLED_EXTENSION_PREFIX: char = '!';

/// A Mercurial configuration key: `section.name`.
///
/// Mercurial keys are case-sensitive, and the name part may itself contain
/// dots (`merge-tools.kdiff3.args`), so only the first dot separates the
/// section.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConfigKey {
    pub section: String,
    pub name: String,
}

impl ConfigKey {
    /// Parse from "section.name".
    pub fn parse(key: &str) -> Result<Self, ConfigError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(ConfigError::InvalidKey("empty key".into()));
        }

        let (section, name) = key.split_once('.').ok_or_else(|| {
            ConfigError::InvalidKey(format!("key must contain at least one dot: {}", key))
        })?;

        if section.is_empty() {
            return Err(ConfigError::InvalidKey(format!("empty section in key: {}", key)));
        }
        if name.is_empty() {
            return Err(ConfigError::InvalidKey(format!(
                "key must have a name after the dot: {}",
                key
            )));
        }

        Ok(ConfigKey {
            section: section.to_string(),
            name: name.to_string(),
        })
    }
}

/// A line that opens a new entry: a whitespace-free `section.name` key
/// before the first `=`.
fn parse_entry(line: &str) -> Option<(ConfigKey, &str)> {
    let (key, value) = parse::parse_config_line(line)?;
    if key.contains(char::is_whitespace) || line.starts_with(char::is_whitespace) {
        return None;
    }
    Some((ConfigKey::parse(key).ok()?, value))
}

impl std::fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.section, self.name)
    }
}

/// Snapshot of a repository's effective configuration, as printed by
/// `hg config`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HgConfig {
    entries: BTreeMap<ConfigKey, String>,
}

impl HgConfig {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `hg config` output lines (`section.name=value`).
    ///
    /// Later entries override earlier ones. Mercurial prints multi-line
    /// values with their later lines on lines of their own; any line that
    /// does not start a valid `section.name=` entry is appended to the
    /// previous value, or dropped when there is none. Blank lines are skipped.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let mut config = HgConfig::new();
        let mut last: Option<ConfigKey> = None;
        for line in lines {
            let line = line.as_ref();
            if line.trim().is_empty() {
                continue;
            }
            match parse_entry(line) {
                Some((key, value)) => {
                    config.set(key.clone(), value);
                    last = Some(key);
                }
                None => match last.as_ref().and_then(|k| config.entries.get_mut(k)) {
                    Some(value) => {
                        value.push('\n');
                        value.push_str(line);
                    }
                    None => tracing::debug!(line, "skipping unparsable config line"),
                },
            }
        }
        config
    }

    /// Insert or replace a value.
    pub fn set(&mut self, key: ConfigKey, value: impl Into<String>) {
        self.entries.insert(key, value.into());
    }

    /// Look up a value by its dotted key. Malformed keys never match.
    pub fn get(&self, key: &str) -> Option<&str> {
        let key = ConfigKey::parse(key).ok()?;
        self.entries.get(&key).map(String::as_str)
    }

    /// Whether the key is present at all, whatever its value.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Whether `extensions.<name>` is configured and not disabled with `!`.
    pub fn extension_enabled(&self, name: &str) -> bool {
        self.get(&format!("extensions.{}", name))
            .is_some_and(|v| !v.trim_start().starts_with(DISABLED_EXTENSION_PREFIX))
    }

    /// The configured `ui.username`, if any.
    pub fn username(&self) -> Option<&str> {
        self.get("ui.username")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ConfigKey, &str)> {
        self.entries.iter().map(|(k, v)| (k, v.as_str()))
    }
}
