//! Downloads loader
//!
//! Owns the manifest for the lifetime of the module. Every load registers the
//! downloads config, reads it from disk, validates it and replaces the previous
//! manifest wholesale. [`DownloadsLoader::install`] also hooks the loader into
//! the registry so config reloads rebuild it.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;
use zp_config::{ConfigFile, ConfigRegistry, ConfigReload, ConfigStructure, ReloadError};
use zp_logger::{log_event, LogModule, LogType};

use crate::errors::DownloadsError;
use crate::filesystem::FileSystem;
use crate::precache::PrecacheGateway;
use crate::types::{Manifest, ValidationReport};
use crate::validator::validate;
use crate::LOG_TAG;

/// A loader shared with the config registry as its reload handler
pub type SharedLoader<F, G> = Arc<Mutex<DownloadsLoader<F, G>>>;

pub struct DownloadsLoader<F, G> {
    fs: F,
    gateway: G,
    manifest: Manifest,
    report: Option<ValidationReport>,
}

impl<F: FileSystem, G: PrecacheGateway> DownloadsLoader<F, G> {
    pub fn new(fs: F, gateway: G) -> Self {
        Self {
            fs,
            gateway,
            manifest: Manifest::default(),
            report: None,
        }
    }

    /// Manifest from the last successful load; empty before the first one
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn last_report(&self) -> Option<&ValidationReport> {
        self.report.as_ref()
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    /// Load, validate and precache the downloads manifest.
    ///
    /// Every error returned is fatal for the host. On error the previous
    /// manifest, and the registry's loaded flag and handle for it, are left in
    /// place. This does not set the reload handler: the loader cannot share
    /// itself from `&mut self`, so the first load goes through
    /// [`DownloadsLoader::install`], which loads and then registers the handler.
    pub fn load(
        &mut self,
        registry: &mut ConfigRegistry,
    ) -> Result<&ValidationReport, DownloadsError> {
        let file = ConfigFile::Downloads;
        registry.register(file, ConfigStructure::List, file.default_alias());

        let resolved = registry.resolve_path(file);
        if !resolved.exists {
            return Err(fatal(DownloadsError::MissingFile(resolved.path)));
        }
        registry.set_path(file, &resolved.path)?;

        let entries = match registry.load_list(file) {
            Ok(entries) => entries,
            Err(source) => {
                return Err(fatal(DownloadsError::Load {
                    path: resolved.path,
                    source,
                }))
            }
        };
        debug!("Loaded {} download entries", entries.len());

        let mut manifest = Manifest::new(entries);
        let report = validate(&mut manifest, &self.fs, &mut self.gateway, &resolved.path)?;
        self.manifest = manifest;

        registry.set_loaded(file, true)?;
        registry.set_handle(file, self.manifest.to_shared())?;

        Ok(&*self.report.insert(report))
    }
}

impl<F, G> DownloadsLoader<F, G>
where
    F: FileSystem + Send + 'static,
    G: PrecacheGateway + Send + 'static,
{
    /// Load once and register the loader as the downloads reload handler
    pub fn install(self, registry: &mut ConfigRegistry) -> Result<SharedLoader<F, G>, DownloadsError> {
        let shared = Arc::new(Mutex::new(self));
        shared.lock().load(registry)?;
        registry.set_reload_handler(ConfigFile::Downloads, shared.clone())?;
        Ok(shared)
    }
}

impl<F: FileSystem, G: PrecacheGateway> ConfigReload for DownloadsLoader<F, G> {
    // Only one file is owned here, so the reload target is irrelevant
    fn on_config_reload(
        &mut self,
        registry: &mut ConfigRegistry,
        _file: Option<ConfigFile>,
    ) -> Result<(), ReloadError> {
        self.load(registry)?;
        Ok(())
    }
}

fn fatal(err: DownloadsError) -> DownloadsError {
    log_event(LogType::Fatal, LogModule::Downloads, LOG_TAG, &err.to_string());
    err
}
