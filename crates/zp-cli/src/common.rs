//! Common types and utilities shared across commands

use clap::Parser;
use std::path::{Path, PathBuf};
use zp_config::{ConfigFile, ConfigRegistry, Settings};
use zp_logger::LogModule;

use crate::errors::CliError;

/// Global CLI options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    #[arg(short, long, global = true, help = "Decrease verbosity")]
    pub quiet: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase verbosity (-v for debug, -vv for trace)")]
    pub verbose: u8,

    #[arg(long, global = true, help = "Keep console output to results only")]
    pub no_stdout: bool,

    #[arg(long, global = true, help = "Game directory (overrides the game-dir setting)")]
    pub game_dir: Option<PathBuf>,

    #[arg(long, global = true, help = "Directory zp.log is written to")]
    pub log_dir: Option<PathBuf>,
}

impl GlobalOpts {
    /// Get the effective verbosity level
    /// - 0: quiet/warn only
    /// - 1: debug (-v)
    /// - 2: trace (-vv)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

/// Load host settings and apply command line overrides
pub fn load_settings(opts: &GlobalOpts) -> Result<Settings, CliError> {
    let mut settings = Settings::load()?;
    if let Some(ref game_dir) = opts.game_dir {
        settings.game_dir = Some(game_dir.to_string_lossy().into_owned());
    }

    let modules: Vec<LogModule> = settings
        .log_modules()
        .iter()
        .filter_map(|name| LogModule::from_name(name))
        .collect();
    zp_logger::set_module_filter(modules);

    Ok(settings)
}

/// Build the config registry for the configured config directory.
///
/// `manifest` overrides the downloads file location; relative paths are taken
/// from the working directory.
pub fn build_registry(
    settings: &Settings,
    manifest: Option<&Path>,
) -> Result<ConfigRegistry, CliError> {
    let mut registry = ConfigRegistry::new(settings.config_dir());

    if let Some(path) = manifest {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        registry.set_location(ConfigFile::Downloads, path);
    } else if let Some(ref location) = settings.downloads_path {
        registry.set_location(ConfigFile::Downloads, location);
    }

    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_level() {
        let opts = GlobalOpts {
            quiet: true,
            verbose: 2,
            ..Default::default()
        };
        assert_eq!(opts.verbosity_level(), 0);

        let opts = GlobalOpts {
            verbose: 1,
            ..Default::default()
        };
        assert_eq!(opts.verbosity_level(), 1);
    }

    #[test]
    fn test_registry_uses_settings_location() {
        let settings = Settings {
            game_dir: Some("/srv/game".to_string()),
            downloads_path: Some("lists/downloads.toml".to_string()),
            ..Default::default()
        };

        let Ok(registry) = build_registry(&settings, None) else {
            panic!("registry");
        };
        assert_eq!(
            registry.resolve_path(ConfigFile::Downloads).path,
            settings.config_dir().join("lists/downloads.toml")
        );
    }

    #[test]
    fn test_manifest_override_wins() {
        let settings = Settings {
            downloads_path: Some("ignored.ini".to_string()),
            ..Default::default()
        };

        let Ok(registry) = build_registry(&settings, Some(Path::new("/tmp/custom.ini"))) else {
            panic!("registry");
        };
        assert_eq!(
            registry.resolve_path(ConfigFile::Downloads).path,
            PathBuf::from("/tmp/custom.ini")
        );
    }
}
