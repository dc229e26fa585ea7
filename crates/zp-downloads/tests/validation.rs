//! End-to-end validation of downloads manifests against a game directory

use std::fs;
use std::path::Path;
use tempfile::TempDir;
use zp_config::{ConfigFile, ConfigRegistry};
use zp_downloads::{
    classify, validate, AssetCategory, DownloadTable, DownloadsError, DownloadsLoader, Manifest,
    StdFileSystem,
};

fn touch(root: &Path, relative: &str) -> bool {
    let path = root.join(relative);
    path.parent()
        .is_some_and(|parent| fs::create_dir_all(parent).is_ok())
        && fs::write(path, b"").is_ok()
}

fn manifest(entries: &[&str]) -> Manifest {
    Manifest::new(entries.iter().map(ToString::to_string).collect())
}

#[test]
fn test_mixed_manifest_scenario() {
    let Ok(game) = TempDir::new() else {
        return;
    };
    for file in ["snd/foo.wav", "models/bar.mdl", "particles/fx1.pcf", "particles/fx2.pcf"] {
        assert!(touch(game.path(), file));
    }

    let files = StdFileSystem::new(game.path());
    let mut table = DownloadTable::new();
    let mut entries = manifest(&["snd/foo.wav", "models/bar.mdl", "missing/nope.vmt", "particles/"]);

    let report = validate(&mut entries, &files, &mut table, Path::new("downloads.ini"))
        .unwrap_or_default();

    assert_eq!(report.total_entries, 4);
    assert_eq!(report.removed(), 1);
    assert_eq!(report.removed_entries, vec!["missing/nope.vmt"]);
    assert_eq!(report.successful, 4);
    assert_eq!(report.unsuccessful, 0);
    assert_eq!(
        entries.entries(),
        ["snd/foo.wav".to_string(), "models/bar.mdl".to_string(), "particles/".to_string()]
    );
    assert_eq!(table.files(AssetCategory::Particle), ["particles/fx1.pcf", "particles/fx2.pcf"]);
    assert_eq!(
        report.to_string(),
        "Total blocks: 4 | Unsuccessful blocks: 1 | Total: 4 | Successful: 4 | Unsuccessful: 0"
    );
}

#[test]
fn test_directory_entry_counts_each_file() {
    let Ok(game) = TempDir::new() else {
        return;
    };
    let names = ["a.wav", "b.mp3", "c.mdl", "d.vmt", "e.pcf"];
    for name in names {
        assert!(touch(game.path(), &format!("assets/{}", name)));
    }

    let files = StdFileSystem::new(game.path());
    let mut table = DownloadTable::new();
    let mut entries = manifest(&["assets/"]);

    let report = validate(&mut entries, &files, &mut table, Path::new("downloads.ini"))
        .unwrap_or_default();
    assert_eq!(report.removed(), 0);
    assert_eq!(report.successful, names.len());
    assert_eq!(table.len(), names.len());
}

#[test]
fn test_subdirectories_are_not_recursed() {
    let Ok(game) = TempDir::new() else {
        return;
    };
    assert!(touch(game.path(), "materials/zp/top.vmt"));
    assert!(touch(game.path(), "materials/zp/nested/deep.vmt"));

    let files = StdFileSystem::new(game.path());
    let mut table = DownloadTable::new();
    let mut entries = manifest(&["materials/zp/"]);

    let report = validate(&mut entries, &files, &mut table, Path::new("downloads.ini"))
        .unwrap_or_default();
    assert_eq!(report.successful, 1);
    assert_eq!(table.files(AssetCategory::Material), ["materials/zp/top.vmt"]);
}

#[test]
fn test_removal_does_not_skip_entries() {
    let Ok(game) = TempDir::new() else {
        return;
    };
    assert!(touch(game.path(), "sound/a.wav"));
    assert!(touch(game.path(), "sound/b.wav"));

    let files = StdFileSystem::new(game.path());
    let mut table = DownloadTable::new();
    let mut entries = manifest(&[
        "gone/1.wav",
        "gone/2.wav",
        "sound/a.wav",
        "gone/3.wav",
        "sound/b.wav",
    ]);
    let before = entries.len();

    let report = validate(&mut entries, &files, &mut table, Path::new("downloads.ini"))
        .unwrap_or_default();
    assert_eq!(entries.len(), before - 3);
    assert_eq!(report.successful, 2);
    assert_eq!(table.files(AssetCategory::Sound), ["sound/a.wav", "sound/b.wav"]);
}

#[test]
fn test_virtual_reference_without_extension_fails_classification() {
    let Ok(game) = TempDir::new() else {
        return;
    };
    let files = StdFileSystem::new(game.path());
    let mut table = DownloadTable::new();
    let mut entries = manifest(&["particles/blood@spray", "particles/fx.pcf@fire"]);

    let report = validate(&mut entries, &files, &mut table, Path::new("downloads.ini"))
        .unwrap_or_default();
    // Neither exists on disk, both are kept
    assert_eq!(report.removed(), 0);
    assert_eq!(report.unsuccessful, 1);
    // ".pcf@fire" is an unrecognised extension, passed through
    assert_eq!(report.successful, 1);
    assert_eq!(classify("particles/fx.pcf@fire"), Ok(AssetCategory::Other));
}

#[test]
fn test_loader_with_borrowed_gateway() {
    let Ok(game) = TempDir::new() else {
        return;
    };
    assert!(touch(game.path(), "models/zombie.MDL"));
    let config_dir = game.path().join("cfg");
    assert!(fs::create_dir_all(&config_dir).is_ok());
    assert!(fs::write(
        config_dir.join("downloads.ini"),
        "// zombie models\n\"models/zombie.MDL\"\nmodels/zombie.MDL\n"
    )
    .is_ok());

    let mut registry = ConfigRegistry::new(&config_dir);
    let mut table = DownloadTable::new();
    {
        let mut loader = DownloadsLoader::new(StdFileSystem::new(game.path()), &mut table);
        let result = loader.load(&mut registry);
        assert!(result.is_ok_and(|r| r.total_entries == 1 && r.successful == 1));
    }

    assert_eq!(table.files(AssetCategory::StaticModel), ["models/zombie.MDL"]);
    assert!(registry.is_loaded(ConfigFile::Downloads));
    // Only install hooks the loader into reloads
    assert!(!registry.has_reload_handler(ConfigFile::Downloads));
}

#[test]
fn test_loader_missing_file() {
    let Ok(game) = TempDir::new() else {
        return;
    };
    let mut registry = ConfigRegistry::new(game.path());
    let mut loader = DownloadsLoader::new(StdFileSystem::new(game.path()), DownloadTable::new());

    let result = loader.load(&mut registry);
    assert!(matches!(result, Err(DownloadsError::MissingFile(_))));
    assert!(loader.manifest().is_empty());
}
