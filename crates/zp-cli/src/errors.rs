//! Error types for the zp host tool

use std::io;
use thiserror::Error;
use zp_config::ConfigError;
use zp_downloads::DownloadsError;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Downloads(#[from] DownloadsError),

    #[error("Watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),
}

#[cfg(test)]
mod tests {
    use crate::errors::*;
    use std::path::PathBuf;

    #[test]
    fn test_downloads_error_is_transparent() {
        let err = CliError::from(DownloadsError::MissingFile(PathBuf::from("downloads.ini")));
        assert_eq!(err.to_string(), "Missing downloads file: \"downloads.ini\"");
    }
}
