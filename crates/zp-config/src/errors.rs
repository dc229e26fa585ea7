use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::registry::{ConfigFile, ReloadError};

/// Errors that can occur while registering, loading or reloading config files
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Config file '{0}' is not registered")]
    NotRegistered(ConfigFile),

    #[error("No path set for config file '{0}'")]
    PathNotSet(ConfigFile),

    #[error("Key '{key}' not found in {}", .path.display())]
    MissingKey { key: String, path: PathBuf },

    #[error("Entry on line {line} of {} exceeds {limit} bytes", .path.display())]
    EntryTooLong {
        path: PathBuf,
        line: usize,
        limit: usize,
    },

    #[error("Reload of '{file}' failed: {source}")]
    Reload {
        file: ConfigFile,
        #[source]
        source: ReloadError,
    },
}

#[cfg(test)]
mod tests {
    use crate::errors::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::NotRegistered(ConfigFile::Downloads);
        assert_eq!(err.to_string(), "Config file 'downloads' is not registered");

        let err = ConfigError::EntryTooLong {
            path: PathBuf::from("downloads.ini"),
            line: 3,
            limit: 256,
        };
        assert_eq!(
            err.to_string(),
            "Entry on line 3 of downloads.ini exceeds 256 bytes"
        );
    }
}
