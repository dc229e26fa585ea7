//! Precache dispatch
//!
//! [`precache`] classifies a file and forwards it to the matching engine call
//! on a [`PrecacheGateway`].

use serde::Serialize;
use std::collections::HashMap;
use tracing::debug;
use zp_logger::{log_event, LogModule, LogType};

use crate::classifier::{classify, AssetCategory};
use crate::LOG_TAG;

/// Engine calls that add a file to the precache and client download tables
pub trait PrecacheGateway {
    fn precache_sound(&mut self, path: &str) -> bool;

    /// Returns the model index, or 0 on failure
    fn precache_model(&mut self, path: &str) -> u32;

    fn precache_particle(&mut self, path: &str) -> bool;

    fn precache_material(&mut self, path: &str) -> bool;
}

impl<G: PrecacheGateway + ?Sized> PrecacheGateway for &mut G {
    fn precache_sound(&mut self, path: &str) -> bool {
        (**self).precache_sound(path)
    }

    fn precache_model(&mut self, path: &str) -> u32 {
        (**self).precache_model(path)
    }

    fn precache_particle(&mut self, path: &str) -> bool {
        (**self).precache_particle(path)
    }

    fn precache_material(&mut self, path: &str) -> bool {
        (**self).precache_material(path)
    }
}

/// Classify `path` and precache it. Files with an unrecognised extension
/// succeed without any engine call; files without an extension fail.
pub fn precache<G: PrecacheGateway + ?Sized>(gateway: &mut G, path: &str) -> bool {
    let category = match classify(path) {
        Ok(category) => category,
        Err(e) => {
            log_event(LogType::Error, LogModule::Engine, LOG_TAG, &e.to_string());
            return false;
        }
    };

    debug!("Precaching {:?} as {}", path, category);

    match category {
        AssetCategory::Sound => gateway.precache_sound(path),
        AssetCategory::StaticModel => gateway.precache_model(path) != 0,
        AssetCategory::Particle => gateway.precache_particle(path),
        AssetCategory::Material => gateway.precache_material(path),
        AssetCategory::Other => true,
    }
}

/// In-memory download table: records every precached file by category
#[derive(Debug, Clone, Default, Serialize)]
pub struct DownloadTable {
    sounds: Vec<String>,
    models: Vec<String>,
    particles: Vec<String>,
    materials: Vec<String>,
    /// Position of each recorded file within its category list
    #[serde(skip)]
    index: HashMap<(AssetCategory, String), usize>,
}

impl DownloadTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files recorded for a category; `Other` files are never recorded
    pub fn files(&self, category: AssetCategory) -> &[String] {
        match category {
            AssetCategory::Sound => self.sounds.as_slice(),
            AssetCategory::StaticModel => self.models.as_slice(),
            AssetCategory::Particle => self.particles.as_slice(),
            AssetCategory::Material => self.materials.as_slice(),
            AssetCategory::Other => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.sounds.len() + self.models.len() + self.particles.len() + self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.sounds.clear();
        self.models.clear();
        self.particles.clear();
        self.materials.clear();
        self.index.clear();
    }

    /// Every recorded file, grouped by category
    pub fn iter(&self) -> impl Iterator<Item = (AssetCategory, &str)> + '_ {
        [
            AssetCategory::Sound,
            AssetCategory::StaticModel,
            AssetCategory::Particle,
            AssetCategory::Material,
        ]
        .into_iter()
        .flat_map(move |category| {
            self.files(category)
                .iter()
                .map(move |path| (category, path.as_str()))
        })
    }

    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Record `path` once per category and return its position
    fn insert(&mut self, category: AssetCategory, path: &str) -> usize {
        let key = (category, path.to_string());
        if let Some(&idx) = self.index.get(&key) {
            return idx;
        }

        let list = match category {
            AssetCategory::Sound => &mut self.sounds,
            AssetCategory::StaticModel => &mut self.models,
            AssetCategory::Particle => &mut self.particles,
            AssetCategory::Material => &mut self.materials,
            AssetCategory::Other => return 0,
        };
        list.push(key.1.clone());
        let idx = list.len() - 1;
        self.index.insert(key, idx);
        idx
    }
}

impl PrecacheGateway for DownloadTable {
    fn precache_sound(&mut self, path: &str) -> bool {
        self.insert(AssetCategory::Sound, path);
        true
    }

    fn precache_model(&mut self, path: &str) -> u32 {
        // Index 0 is reserved for "no model"
        let idx = self.insert(AssetCategory::StaticModel, path);
        u32::try_from(idx + 1).unwrap_or(0)
    }

    fn precache_particle(&mut self, path: &str) -> bool {
        self.insert(AssetCategory::Particle, path);
        true
    }

    fn precache_material(&mut self, path: &str) -> bool {
        self.insert(AssetCategory::Material, path);
        true
    }
}
