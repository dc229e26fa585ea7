//! Config registry
//!
//! Gameplay modules register the config files they own, resolve where those
//! files live on disk, load them, and hand the registry a reload handler so a
//! later reload event can rebuild their state.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use crate::errors::ConfigError;
use crate::list;

/// Error returned by a reload handler.
pub type ReloadError = Box<dyn std::error::Error + Send + Sync>;

/// Reload handler as stored by the registry.
pub type SharedReloadHandler = Arc<Mutex<dyn ConfigReload + Send>>;

/// Config files known to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigFile {
    Downloads,
}

impl ConfigFile {
    /// File name used when no explicit location was set
    pub fn default_file_name(self) -> &'static str {
        match self {
            ConfigFile::Downloads => "downloads.ini",
        }
    }

    /// Short name used in logs and as the TOML key of list files
    pub fn default_alias(self) -> &'static str {
        match self {
            ConfigFile::Downloads => "downloads",
        }
    }
}

impl fmt::Display for ConfigFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.default_alias())
    }
}

/// Structure hint supplied when a config file is registered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigStructure {
    /// One entry per line
    List,
}

/// Result of resolving a config file location
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    pub path: PathBuf,
    pub exists: bool,
}

/// Implemented by modules that own a config file and rebuild their state from it.
pub trait ConfigReload {
    /// Called when a reload event matches the file this handler was registered for.
    ///
    /// `file` is the specific config the event targeted, or `None` when every
    /// loaded config is being reloaded.
    fn on_config_reload(
        &mut self,
        registry: &mut ConfigRegistry,
        file: Option<ConfigFile>,
    ) -> Result<(), ReloadError>;
}

struct ConfigRecord {
    structure: ConfigStructure,
    alias: String,
    path: Option<PathBuf>,
    loaded: bool,
    reload: Option<SharedReloadHandler>,
    handle: Option<Arc<[String]>>,
}

/// Registry of config files, keyed by [`ConfigFile`]
pub struct ConfigRegistry {
    config_dir: PathBuf,
    locations: HashMap<ConfigFile, PathBuf>,
    records: HashMap<ConfigFile, ConfigRecord>,
}

impl ConfigRegistry {
    /// Create a registry resolving relative config locations against `config_dir`
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            locations: HashMap::new(),
            records: HashMap::new(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Register a config file.
    ///
    /// Registering an already known file only updates its structure and alias.
    /// The path, loaded flag, handle and reload handler of the earlier load stay
    /// in place until a new load replaces them.
    pub fn register(&mut self, file: ConfigFile, structure: ConfigStructure, alias: &str) {
        debug!("Registering config {} ({:?}) as {:?}", file, structure, alias);

        let record = self.records.entry(file).or_insert_with(|| ConfigRecord {
            structure,
            alias: String::new(),
            path: None,
            loaded: false,
            reload: None,
            handle: None,
        });
        record.structure = structure;
        alias.clone_into(&mut record.alias);
    }

    pub fn is_registered(&self, file: ConfigFile) -> bool {
        self.records.contains_key(&file)
    }

    /// Override where a config file lives. Relative paths resolve against the config directory.
    pub fn set_location(&mut self, file: ConfigFile, location: impl Into<PathBuf>) {
        self.locations.insert(file, location.into());
    }

    /// Resolve the full path of a config file and whether it exists as a regular file
    pub fn resolve_path(&self, file: ConfigFile) -> ResolvedPath {
        let location = self
            .locations
            .get(&file)
            .map_or_else(|| PathBuf::from(file.default_file_name()), Clone::clone);

        let path = if location.is_absolute() {
            location
        } else {
            self.config_dir.join(location)
        };

        let exists = path.is_file();
        ResolvedPath { path, exists }
    }

    pub fn set_path(&mut self, file: ConfigFile, path: impl Into<PathBuf>) -> Result<(), ConfigError> {
        self.record_mut(file)?.path = Some(path.into());
        Ok(())
    }

    pub fn path(&self, file: ConfigFile) -> Option<&Path> {
        self.records.get(&file).and_then(|r| r.path.as_deref())
    }

    pub fn alias(&self, file: ConfigFile) -> Option<&str> {
        self.records.get(&file).map(|r| r.alias.as_str())
    }

    pub fn structure(&self, file: ConfigFile) -> Option<ConfigStructure> {
        self.records.get(&file).map(|r| r.structure)
    }

    /// Load a registered list file from the path set with [`ConfigRegistry::set_path`]
    pub fn load_list(&self, file: ConfigFile) -> Result<Vec<String>, ConfigError> {
        let record = self
            .records
            .get(&file)
            .ok_or(ConfigError::NotRegistered(file))?;
        let path = record
            .path
            .as_deref()
            .ok_or(ConfigError::PathNotSet(file))?;

        match record.structure {
            ConfigStructure::List => list::read_list(path, &record.alias),
        }
    }

    pub fn set_loaded(&mut self, file: ConfigFile, loaded: bool) -> Result<(), ConfigError> {
        self.record_mut(file)?.loaded = loaded;
        Ok(())
    }

    pub fn is_loaded(&self, file: ConfigFile) -> bool {
        self.records.get(&file).is_some_and(|r| r.loaded)
    }

    pub fn set_reload_handler(
        &mut self,
        file: ConfigFile,
        handler: SharedReloadHandler,
    ) -> Result<(), ConfigError> {
        self.record_mut(file)?.reload = Some(handler);
        Ok(())
    }

    pub fn has_reload_handler(&self, file: ConfigFile) -> bool {
        self.records.get(&file).is_some_and(|r| r.reload.is_some())
    }

    /// Publish the loaded entries of a config file for other consumers
    pub fn set_handle(&mut self, file: ConfigFile, entries: Arc<[String]>) -> Result<(), ConfigError> {
        self.record_mut(file)?.handle = Some(entries);
        Ok(())
    }

    pub fn handle(&self, file: ConfigFile) -> Option<Arc<[String]>> {
        self.records.get(&file).and_then(|r| r.handle.clone())
    }

    /// Fire the reload handlers of loaded config files.
    ///
    /// With `Some(file)` only that file is reloaded; with `None` every loaded
    /// file with a handler is. Returns the number of handlers that ran. The
    /// first failing handler stops the reload.
    pub fn reload(&mut self, target: Option<ConfigFile>) -> Result<usize, ConfigError> {
        let mut handlers: Vec<(ConfigFile, SharedReloadHandler)> = self
            .records
            .iter()
            .filter(|(file, record)| record.loaded && target.map_or(true, |t| t == **file))
            .filter_map(|(file, record)| record.reload.clone().map(|h| (*file, h)))
            .collect();
        handlers.sort_by_key(|(file, _)| file.default_alias());

        let mut fired = 0;
        for (file, handler) in handlers {
            debug!("Reloading config {}", file);
            handler
                .lock()
                .on_config_reload(self, target)
                .map_err(|source| ConfigError::Reload { file, source })?;
            fired += 1;
        }

        Ok(fired)
    }

    fn record_mut(&mut self, file: ConfigFile) -> Result<&mut ConfigRecord, ConfigError> {
        self.records
            .get_mut(&file)
            .ok_or(ConfigError::NotRegistered(file))
    }
}
