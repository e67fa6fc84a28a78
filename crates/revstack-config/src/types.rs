//! Typed value conversion (bool, int, path).

use std::path::PathBuf;

use crate::error::ConfigError;

/// Parse a boolean config value.
///
/// Accepts Mercurial's spellings as well as git-style integers:
/// - None (bare key with no = sign) → true
/// - "" (empty string) → false
/// - "true", "yes", "on", "always" (case-insensitive) → true
/// - "false", "no", "off", "never" (case-insensitive) → false
/// - integers: 0 → false, anything else → true
pub fn parse_bool(value: Option<&str>) -> Result<bool, ConfigError> {
    let Some(v) = value else {
        return Ok(true);
    };
    let s = v.trim();
    if s.is_empty() {
        return Ok(false);
    }
    match s.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "always" => Ok(true),
        "false" | "no" | "off" | "never" => Ok(false),
        _ => s
            .parse::<i64>()
            .map(|n| n != 0)
            .map_err(|_| ConfigError::InvalidBool(s.to_string())),
    }
}

/// Parse a non-negative integer config value.
pub fn parse_int(value: &str) -> Result<u64, ConfigError> {
    let s = value.trim();
    if s.is_empty() {
        return Err(ConfigError::InvalidInt("empty value".into()));
    }
    s.parse().map_err(|_| ConfigError::InvalidInt(s.to_string()))
}

/// Parse a path config value, expanding `~/` to the home directory.
pub fn parse_path(value: &str) -> PathBuf {
    let s = value.trim();
    match (s, home_dir()) {
        ("~", Some(home)) => home,
        (s, Some(home)) if s.starts_with("~/") => home.join(&s[2..]),
        // Can't expand ~, return as-is
        (s, _) => PathBuf::from(s),
    }
}

/// Get the user's home directory.
pub(crate) fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
