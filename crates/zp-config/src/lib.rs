//! Zombie Plague config management
//!
//! This crate is the config subsystem the gameplay modules talk to. It keeps a
//! registry of known config files (where they live, whether they are loaded,
//! who reloads them) and parses the list-format files they are stored in.
//!
//! Host-level settings (game directory, config directory overrides) are read
//! from a small TOML file, see [`settings::Settings`].

pub mod errors;
pub mod list;
pub mod registry;
pub mod settings;

pub use errors::ConfigError;
pub use registry::{
    ConfigFile, ConfigRegistry, ConfigReload, ConfigStructure, ReloadError, ResolvedPath,
    SharedReloadHandler,
};
pub use settings::Settings;

/// Maximum length, in bytes, of a single list entry.
pub const PLATFORM_MAX_PATH: usize = 256;
