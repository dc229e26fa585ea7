//! Manifest validation
//!
//! Walks the manifest in order, expands every entry and precaches the files it
//! resolves to. Entries that resolve to nothing are logged and dropped from the
//! manifest; the remaining entries keep their order.

use std::path::Path;
use zp_logger::{log_event, LogModule, LogType};

use crate::errors::DownloadsError;
use crate::expander::{expand, Expansion};
use crate::filesystem::FileSystem;
use crate::precache::{precache, PrecacheGateway};
use crate::types::{Manifest, ValidationReport};
use crate::LOG_TAG;

/// Validate and precache every manifest entry.
///
/// `source` is the manifest file, used in log messages. An empty manifest is
/// an error; per-entry and per-file failures are only counted.
pub fn validate<F, G>(
    manifest: &mut Manifest,
    fs: &F,
    gateway: &mut G,
    source: &Path,
) -> Result<ValidationReport, DownloadsError>
where
    F: FileSystem + ?Sized,
    G: PrecacheGateway + ?Sized,
{
    log_event(
        LogType::Normal,
        LogModule::Downloads,
        LOG_TAG,
        &format!("Loading downloads from file \"{}\"", source.display()),
    );

    if manifest.is_empty() {
        let err = DownloadsError::Empty(source.to_path_buf());
        log_event(LogType::Fatal, LogModule::Downloads, LOG_TAG, &err.to_string());
        return Err(err);
    }

    let mut report = ValidationReport::new(manifest.len());

    manifest.retain(|entry| match expand(fs, entry) {
        Expansion::Unresolvable => {
            log_event(
                LogType::Error,
                LogModule::Downloads,
                LOG_TAG,
                &format!("Incorrect path \"{}\"", entry),
            );
            report.removed_entries.push(entry.clone());
            false
        }
        expansion => {
            for file in expansion.files() {
                report.record(precache(&mut *gateway, file));
            }
            true
        }
    });

    log_event(LogType::Normal, LogModule::Downloads, LOG_TAG, &report.to_string());
    Ok(report)
}
