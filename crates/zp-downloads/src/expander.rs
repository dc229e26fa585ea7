//! Manifest entry expansion
//!
//! An entry is either a file (precached as is), a directory (each regular
//! file directly inside it is precached), or nothing at all. Entries holding
//! the `@` marker name virtual assets, such as particle systems defined
//! inside a `.pcf`, and are passed through without touching the disk.

use tracing::debug;

use crate::filesystem::{FileSystem, FileType};

/// Marker for virtual references that have no file of their own
pub const VIRTUAL_MARKER: char = '@';

/// What a manifest entry resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// An existing file or a virtual reference
    File(String),
    /// A directory and the full paths of its regular files
    Directory(Vec<String>),
    /// Neither a file nor an openable directory
    Unresolvable,
}

impl Expansion {
    /// Paths to precache for this entry
    pub fn files(&self) -> &[String] {
        match self {
            Expansion::File(path) => std::slice::from_ref(path),
            Expansion::Directory(files) => files,
            Expansion::Unresolvable => &[],
        }
    }

    pub fn is_resolved(&self) -> bool {
        !matches!(self, Expansion::Unresolvable)
    }
}

pub fn is_virtual_reference(entry: &str) -> bool {
    entry.contains(VIRTUAL_MARKER)
}

/// Resolve one manifest entry against the file system
pub fn expand<F: FileSystem + ?Sized>(fs: &F, entry: &str) -> Expansion {
    if is_virtual_reference(entry) || fs.exists(entry) {
        return Expansion::File(entry.to_string());
    }

    let Some(listing) = fs.open_directory(entry) else {
        return Expansion::Unresolvable;
    };

    // Subdirectories and unknown members are skipped, there is no recursion
    let files: Vec<String> = listing
        .filter(|(_, file_type)| *file_type == FileType::File)
        .map(|(name, _)| join_member(entry, &name))
        .collect();

    debug!("Directory {:?} expanded to {} files", entry, files.len());
    Expansion::Directory(files)
}

fn join_member(dir: &str, name: &str) -> String {
    if dir.is_empty() || dir.ends_with('/') || dir.ends_with('\\') {
        format!("{}{}", dir, name)
    } else {
        format!("{}/{}", dir, name)
    }
}
