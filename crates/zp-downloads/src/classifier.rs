//! Asset classification by file extension
//!
//! The extension is everything from the last `.` in the path onward, compared
//! without regard to case. A path without any `.` cannot be classified.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Kind of asset a file is precached as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetCategory {
    Sound,
    StaticModel,
    Particle,
    Material,
    /// Any other extension. Passed through without precaching.
    Other,
}

impl AssetCategory {
    pub fn name(self) -> &'static str {
        match self {
            AssetCategory::Sound => "sound",
            AssetCategory::StaticModel => "model",
            AssetCategory::Particle => "particle",
            AssetCategory::Material => "material",
            AssetCategory::Other => "other",
        }
    }
}

impl fmt::Display for AssetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("Missing file format: {0}")]
    MissingExtension(String),
}

const EXTENSIONS: &[(&str, AssetCategory)] = &[
    (".mp3", AssetCategory::Sound),
    (".wav", AssetCategory::Sound),
    (".mdl", AssetCategory::StaticModel),
    (".pcf", AssetCategory::Particle),
    (".vmt", AssetCategory::Material),
];

/// Classify a resolved file path by its extension
pub fn classify(path: &str) -> Result<AssetCategory, ClassifyError> {
    let extension = extension(path).ok_or_else(|| ClassifyError::MissingExtension(path.to_string()))?;

    Ok(EXTENSIONS
        .iter()
        .find(|(ext, _)| ext.eq_ignore_ascii_case(extension))
        .map_or(AssetCategory::Other, |(_, category)| *category))
}

/// Substring from the last `.` to the end of the path, delimiter included
pub fn extension(path: &str) -> Option<&str> {
    path.rfind('.').map(|idx| &path[idx..])
}
