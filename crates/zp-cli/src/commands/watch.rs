use clap::Args;
use notify::{RecursiveMode, Watcher};
use std::path::PathBuf;
use std::sync::mpsc;
use tracing::debug;
use zp_config::ConfigFile;
use zp_downloads::{DownloadTable, DownloadsLoader, StdFileSystem};

use crate::commands::print_summary;
use crate::common::{build_registry, load_settings};
use crate::errors::CliError;
use crate::logger;
use crate::GlobalOpts;

#[derive(Args, Debug, Clone, Default)]
pub struct WatchCommand {
    /// Downloads file to watch instead of the configured one
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

/// Load the manifest, then reload it every time the file changes.
///
/// Runs until the watcher shuts down or a reload fails.
pub fn handle_watch(cmd: WatchCommand, opts: &GlobalOpts) -> Result<(), CliError> {
    let settings = load_settings(opts)?;
    let mut registry = build_registry(&settings, cmd.manifest.as_deref())?;
    let loader = DownloadsLoader::new(
        StdFileSystem::new(settings.game_dir()),
        DownloadTable::new(),
    );

    let shared = loader.install(&mut registry)?;
    if let Some(report) = shared.lock().last_report() {
        print_summary(report);
    }

    let path = registry
        .path(ConfigFile::Downloads)
        .map(std::fs::canonicalize)
        .transpose()?
        .ok_or_else(|| CliError::InvalidArgs("downloads file path not set".to_string()))?;
    let (Some(dir), Some(file_name)) = (path.parent(), path.file_name()) else {
        return Err(CliError::InvalidArgs(format!(
            "cannot watch {}",
            path.display()
        )));
    };

    // Watch the directory: editors often replace the file instead of writing to it
    let (tx, rx) = mpsc::channel::<notify::Result<notify::Event>>();
    let mut watcher = notify::recommended_watcher(tx)?;
    watcher.watch(dir, RecursiveMode::NonRecursive)?;
    logger::info(&format!("Watching {} for changes", path.display()));

    for event in rx {
        let event = event?;
        debug!("Watch event {:?} on {:?}", event.kind, event.paths);
        let touches_manifest = event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name));
        if !touches_manifest || !(event.kind.is_create() || event.kind.is_modify()) {
            continue;
        }

        logger::step(&format!("Reloading {}", path.display()));
        registry.reload(Some(ConfigFile::Downloads))?;
        if let Some(report) = shared.lock().last_report() {
            print_summary(report);
        }
    }

    Ok(())
}
