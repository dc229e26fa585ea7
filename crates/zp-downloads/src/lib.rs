//! Zombie Plague downloads manager
//!
//! Loads the downloads manifest, a list of asset files and directories,
//! checks every entry against the game directory, expands directories into
//! their files, and precaches each file according to its extension. Entries
//! that do not resolve to anything are dropped from the manifest.
//!
//! The host supplies the file system ([`FileSystem`]) and the engine precache
//! calls ([`PrecacheGateway`]); [`DownloadTable`] is an in-memory gateway that
//! records what would be sent to clients.

pub mod classifier;
pub mod errors;
pub mod expander;
pub mod filesystem;
pub mod loader;
pub mod precache;
pub mod types;
pub mod validator;

pub use classifier::{classify, AssetCategory, ClassifyError};
pub use errors::DownloadsError;
pub use expander::{expand, Expansion};
pub use filesystem::{FileSystem, FileType, StdFileSystem};
pub use loader::{DownloadsLoader, SharedLoader};
pub use precache::{precache, DownloadTable, PrecacheGateway};
pub use types::{Manifest, ValidationReport};
pub use validator::validate;

/// Tag attached to every event this crate logs
pub const LOG_TAG: &str = "Config Validation";
