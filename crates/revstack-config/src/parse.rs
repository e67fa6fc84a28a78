//! Parsers for `hg config` output and the tool's INI-style config file.

use bstr::ByteSlice;

use crate::error::ConfigError;

/// UTF-8 BOM bytes.
const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// Split one `hg config` output line into key and value.
///
/// Only the first `=` separates; values may contain further `=` signs.
pub fn parse_config_line(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key, value))
}

/// A key-value entry from an INI file, qualified by its section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IniEntry {
    /// Lowercased section name.
    pub section: String,
    /// Lowercased key name.
    pub key: String,
    /// Trimmed value; None for a bare key with no `=`.
    pub value: Option<String>,
    /// Line number where this entry appears.
    pub line_number: usize,
}

impl IniEntry {
    /// Canonical `section.key` form.
    pub fn dotted_key(&self) -> String {
        format!("{}.{}", self.section, self.key)
    }
}

/// Parse an INI file's bytes into entries.
///
/// Supports `[section]` headers, `key = value` pairs, bare keys, and `#`/`;`
/// comment lines. Values may be wrapped in double quotes. Entries before the
/// first section header are an error.
pub fn parse_ini(input: &[u8], filename: &str) -> Result<Vec<IniEntry>, ConfigError> {
    let input = input.strip_prefix(UTF8_BOM).unwrap_or(input);
    let mut entries = Vec::new();
    let mut section: Option<String> = None;

    for (idx, raw) in input.lines().enumerate() {
        let line_number = idx + 1;
        let line = raw.to_str_lossy();
        let line = line.trim();

        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(rest) = line.strip_prefix('[') {
            let name = rest.strip_suffix(']').ok_or_else(|| ConfigError::Parse {
                file: filename.to_string(),
                line: line_number,
                message: "unterminated section header".into(),
            })?;
            let name = name.trim();
            if name.is_empty() || !name.chars().all(is_name_char) {
                return Err(ConfigError::Parse {
                    file: filename.to_string(),
                    line: line_number,
                    message: format!("invalid section name '{}'", name),
                });
            }
            section = Some(name.to_ascii_lowercase());
            continue;
        }

        let Some(ref current) = section else {
            return Err(ConfigError::Parse {
                file: filename.to_string(),
                line: line_number,
                message: "key outside of any section".into(),
            });
        };

        let (key, value) = match line.split_once('=') {
            Some((k, v)) => (k.trim(), Some(unquote(v.trim()))),
            None => (line, None),
        };
        if key.is_empty() || !key.chars().all(is_name_char) {
            return Err(ConfigError::Parse {
                file: filename.to_string(),
                line: line_number,
                message: format!("invalid key '{}'", key),
            });
        }

        entries.push(IniEntry {
            section: current.clone(),
            key: key.to_ascii_lowercase(),
            value,
            line_number,
        });
    }

    Ok(entries)
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.'
}

fn unquote(value: &str) -> String {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
        .to_string()
}
