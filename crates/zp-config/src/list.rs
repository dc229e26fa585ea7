//! List-format config files
//!
//! A list file holds one entry per line. Lines are trimmed and unquoted; blank
//! lines and comment lines (`//`, `#`, `;`) are ignored. Files with a `.toml`
//! extension are read as TOML instead, taking the string array stored under the
//! config's alias.
//!
//! Entries are keyed by their text: a repeated entry keeps its first position.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::errors::ConfigError;
use crate::PLATFORM_MAX_PATH;

const COMMENT_PREFIXES: &[&str] = &["//", "#", ";"];

/// Read a list file from disk.
///
/// `key` names the TOML array to read when the file is TOML; plain list files
/// ignore it.
pub fn read_list(path: &Path, key: &str) -> Result<Vec<String>, ConfigError> {
    let content = fs::read_to_string(path)?;

    let is_toml = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    let raw = if is_toml {
        parse_toml_list(&content, key, path)?
    } else {
        parse_list(&content)
    };

    let mut seen = HashSet::with_capacity(raw.len());
    let mut entries = Vec::with_capacity(raw.len());
    for (line, entry) in raw {
        if entry.len() > PLATFORM_MAX_PATH {
            return Err(ConfigError::EntryTooLong {
                path: path.to_path_buf(),
                line,
                limit: PLATFORM_MAX_PATH,
            });
        }
        if seen.insert(entry.clone()) {
            entries.push(entry);
        } else {
            debug!("Duplicate entry {:?} in {:?}", entry, path);
        }
    }

    debug!("Read {} entries from {:?}", entries.len(), path);
    Ok(entries)
}

/// Parse plain list content into `(line number, entry)` pairs.
pub fn parse_list(content: &str) -> Vec<(usize, String)> {
    content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let line = line.trim();
            if line.is_empty() || COMMENT_PREFIXES.iter().any(|p| line.starts_with(p)) {
                return None;
            }
            let entry = strip_quotes(line).trim();
            if entry.is_empty() {
                None
            } else {
                Some((idx + 1, entry.to_string()))
            }
        })
        .collect()
}

fn parse_toml_list(
    content: &str,
    key: &str,
    path: &Path,
) -> Result<Vec<(usize, String)>, ConfigError> {
    let table: toml::Table = toml::from_str(content)?;
    let missing = || ConfigError::MissingKey {
        key: key.to_string(),
        path: path.to_path_buf(),
    };

    let array = table
        .get(key)
        .and_then(toml::Value::as_array)
        .ok_or_else(missing)?;

    // TOML arrays have no line numbers worth reporting; use the 1-based position
    Ok(array
        .iter()
        .enumerate()
        .filter_map(|(idx, value)| value.as_str().map(|s| (idx + 1, s.trim().to_string())))
        .filter(|(_, entry)| !entry.is_empty())
        .collect())
}

fn strip_quotes(line: &str) -> &str {
    line.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(line)
}
