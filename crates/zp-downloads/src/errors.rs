use std::path::PathBuf;
use thiserror::Error;
use zp_config::ConfigError;

/// Errors that stop the downloads module from starting.
///
/// None of these are recoverable: the host should not keep running without
/// its downloads manifest.
#[derive(Error, Debug)]
pub enum DownloadsError {
    #[error("Missing downloads file: \"{}\"", .0.display())]
    MissingFile(PathBuf),

    #[error("Unexpected error encountered loading: {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error("No usable data found in downloads config file: \"{}\"", .0.display())]
    Empty(PathBuf),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}
