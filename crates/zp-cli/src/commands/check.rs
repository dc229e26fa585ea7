use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use zp_downloads::{DownloadTable, DownloadsLoader, StdFileSystem};

use crate::commands::{print_summary, print_table};
use crate::common::{build_registry, load_settings};
use crate::errors::CliError;
use crate::logger;
use crate::GlobalOpts;

#[derive(Args, Debug, Clone, Default)]
pub struct CheckCommand {
    /// Downloads file to validate instead of the configured one
    #[arg(long)]
    pub manifest: Option<PathBuf>,

    /// Print the report and download table as JSON
    #[arg(long)]
    pub json: bool,

    /// List every precached file
    #[arg(long)]
    pub list: bool,
}

/// Load and validate the downloads manifest once
pub fn handle_check(cmd: CheckCommand, opts: &GlobalOpts) -> Result<(), CliError> {
    let settings = load_settings(opts)?;
    let mut registry = build_registry(&settings, cmd.manifest.as_deref())?;
    let loader = DownloadsLoader::new(
        StdFileSystem::new(settings.game_dir()),
        DownloadTable::new(),
    );

    if !cmd.json {
        logger::spinner_start("Validating downloads");
    }
    let shared = match loader.install(&mut registry) {
        Ok(shared) => shared,
        Err(e) => {
            logger::spinner_stop();
            return Err(e.into());
        }
    };
    logger::spinner_stop();

    let loader = shared.lock();
    let Some(report) = loader.last_report() else {
        return Ok(());
    };

    if cmd.json {
        let output = serde_json::json!({
            "report": report,
            "table": loader.gateway(),
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
        );
        return Ok(());
    }

    for entry in &report.removed_entries {
        println!("{} {}", "removed".red(), entry);
    }
    print_summary(report);
    if cmd.list {
        print_table(loader.gateway());
    }

    Ok(())
}
