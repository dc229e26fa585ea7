use clap::Subcommand;
use colored::Colorize;
use std::fs;
use std::path::Path;
use zp_config::Settings;

use crate::errors::CliError;
use crate::logger;
use crate::GlobalOpts;

const KNOWN_KEYS: &str = "game-dir, config-dir, downloads-path, log-modules";

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the current settings
    Show,
    /// Set a settings key
    Set { key: String, value: String },
    /// Get or set the path to the settings file.
    /// If `new_path` is provided, a pointer file redirects future runs to it.
    /// If omitted, the current settings file path is printed.
    Path {
        /// Optional new settings path to set
        new_path: Option<String>,
    },
}

pub fn handle_config(action: ConfigAction, opts: &GlobalOpts) {
    let settings_path = Settings::path();
    logger::debug(&format!("Reading settings from: {}", settings_path.display()));

    if let Err(e) = run_config(action, &settings_path, opts) {
        logger::error(&e.to_string());
    }
}

/// Apply a config action to the settings file at `settings_path`
pub fn run_config(
    action: ConfigAction,
    settings_path: &Path,
    opts: &GlobalOpts,
) -> Result<(), CliError> {
    match action {
        ConfigAction::Show => {
            let settings = Settings::load_from_path(settings_path)?;
            println!("{}", "Configuration:".bold().green());
            if settings.is_empty() {
                if opts.verbosity_level() > 0 {
                    println!("  {}", "(empty)".yellow());
                }
            } else {
                for (key, value) in settings.values_iter() {
                    println!("  {}: {}", key.cyan(), value);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut settings = Settings::load_from_path(settings_path)?;
            if !settings.set(&key, value.clone()) {
                return Err(CliError::InvalidArgs(format!(
                    "Unknown config key: {}. Currently supported keys: {}",
                    key, KNOWN_KEYS
                )));
            }
            settings.save_to_path(settings_path)?;
            logger::success(&format!("Set {} = {}", key, value));
        }
        ConfigAction::Path { new_path } => {
            let Some(pointer_path) = Settings::pointer_path(settings_path) else {
                return Err(CliError::InvalidArgs(format!(
                    "Settings path has no parent: {}",
                    settings_path.display()
                )));
            };

            match new_path {
                Some(p) => {
                    if let Some(parent) = pointer_path.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    fs::write(&pointer_path, p.as_bytes())?;
                    logger::success(&format!("Config path set to {}", p));
                }
                None => {
                    println!("{}", settings_path.display());

                    if let Ok(contents) = fs::read_to_string(&pointer_path) {
                        let trimmed = contents.trim();
                        if !trimmed.is_empty() {
                            println!("{} {}", "overridden-by".cyan(), trimmed);
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn normal_opts() -> GlobalOpts {
        GlobalOpts::default()
    }

    #[test]
    fn test_config_show_missing_file() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("zp.toml");
        assert!(run_config(ConfigAction::Show, &path, &normal_opts()).is_ok());
    }

    #[test]
    fn test_config_set_persists() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("zp.toml");

        let result = run_config(
            ConfigAction::Set {
                key: "game-dir".to_string(),
                value: "/srv/csgo".to_string(),
            },
            &path,
            &normal_opts(),
        );
        assert!(result.is_ok());

        let settings = Settings::load_from_path(&path).unwrap_or_default();
        assert_eq!(settings.game_dir.as_deref(), Some("/srv/csgo"));
    }

    #[test]
    fn test_config_set_unknown_key() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("zp.toml");

        let result = run_config(
            ConfigAction::Set {
                key: "cache-path".to_string(),
                value: "x".to_string(),
            },
            &path,
            &normal_opts(),
        );
        assert!(matches!(result, Err(CliError::InvalidArgs(_))));
        assert!(!path.exists());
    }

    #[test]
    fn test_config_path_writes_pointer() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let path = temp_dir.path().join("zp.toml");

        let result = run_config(
            ConfigAction::Path {
                new_path: Some("/etc/zp/zp.toml".to_string()),
            },
            &path,
            &normal_opts(),
        );
        assert!(result.is_ok());

        let pointer = fs::read_to_string(temp_dir.path().join(".zp_config_path"));
        assert!(pointer.is_ok_and(|p| p == "/etc/zp/zp.toml"));
    }
}
