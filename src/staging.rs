//! Archive staging: unpacking texture packs and mod jars, pulling matching
//! mod textures into the input tree, and removing the scratch directories
//! afterwards.

use crate::error::Result;
use std::fs;
use std::path::{Component, Path, PathBuf};

const SCRATCH_SUFFIX: &str = "_temp";

/// Unpack every `*.zip` texture pack under `root` into a sibling
/// `<name>_temp` scratch directory.
pub fn unpack_texturepacks(root: &Path) -> Result<()> {
    unpack_archives(root, "zip", "texturepack")
}

/// Unpack every `*.jar` mod under `root` into a sibling scratch directory.
pub fn unpack_mods(root: &Path) -> Result<()> {
    unpack_archives(root, "jar", "mod")
}

fn unpack_archives(root: &Path, extension: &str, label: &str) -> Result<()> {
    let mut archives = Vec::new();
    collect_files(root, &mut archives)?;

    for path in archives {
        if path.extension().map(|e| e == extension).unwrap_or(false) {
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            println!("Unpacking {label}: {name}");
            let stem = path.file_stem().unwrap_or_default().to_string_lossy();
            let dest = path.with_file_name(format!("{stem}{SCRATCH_SUFFIX}"));
            let file = fs::File::open(&path)?;
            let mut archive = zip::ZipArchive::new(file)?;
            archive.extract(&dest)?;
        }
    }
    Ok(())
}

/// Remove every `<name>_temp` scratch directory under `root`. The source
/// archives themselves are left in place.
pub fn cleanup_unpacked(root: &Path) -> Result<()> {
    if !root.is_dir() {
        return Ok(());
    }
    for entry in fs::read_dir(root)? {
        let path = entry?.path();
        if path.is_dir() {
            let name = path.file_name().unwrap_or_default().to_string_lossy();
            if name.ends_with(SCRATCH_SUFFIX) {
                fs::remove_dir_all(&path)?;
            } else {
                cleanup_unpacked(&path)?;
            }
        }
    }
    Ok(())
}

/// Copy leaf textures from unpacked mods into the main input tree: every
/// `.png` whose filename contains `leaves`, sitting under a
/// `textures/block` segment inside an `assets` tree, lands at the same
/// asset-relative path under `input_assets`.
pub fn scan_mods_for_textures(mods_root: &Path, input_assets: &Path) -> Result<()> {
    let mut files = Vec::new();
    collect_files(mods_root, &mut files)?;

    for path in files {
        let Some(file_name) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
            continue;
        };
        if !file_name.ends_with(".png") || !file_name.contains("leaves") {
            continue;
        }
        let Some(dir) = path.parent() else { continue };
        let Some(asset_rel) = asset_relative_dir(dir) else {
            continue;
        };
        if !has_segment_pair(&asset_rel, "textures", "block") {
            continue;
        }

        let mod_id = asset_rel
            .components()
            .next()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .unwrap_or_default();
        println!(
            "Found texture {}/{} in mod {}",
            asset_rel.display(),
            file_name,
            mod_id
        );

        let dest_dir = input_assets.join(&asset_rel);
        fs::create_dir_all(&dest_dir)?;
        fs::copy(&path, dest_dir.join(&file_name))?;
    }
    Ok(())
}

/// Directory path after the first `assets` component.
fn asset_relative_dir(dir: &Path) -> Option<PathBuf> {
    let mut components = dir.components();
    for component in components.by_ref() {
        if let Component::Normal(name) = component {
            if name == "assets" {
                let rest = components.as_path();
                if rest.as_os_str().is_empty() {
                    return None;
                }
                return Some(rest.to_path_buf());
            }
        }
    }
    None
}

fn has_segment_pair(path: &Path, first: &str, second: &str) -> bool {
    let segments: Vec<_> = path
        .components()
        .filter_map(|c| match c {
            Component::Normal(name) => Some(name.to_string_lossy().to_string()),
            _ => None,
        })
        .collect();
    segments
        .windows(2)
        .any(|pair| pair[0] == first && pair[1] == second)
}

/// Recursively collect plain files, sorted for deterministic processing.
fn collect_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    let mut entries: Vec<_> = fs::read_dir(dir)?.flatten().map(|e| e.path()).collect();
    entries.sort();
    for path in entries {
        if path.is_dir() {
            collect_files(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn make_zip(path: &Path, entries: &[(&str, &[u8])]) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        let file = fs::File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for (name, data) in entries {
            writer
                .start_file(name.to_string(), SimpleFileOptions::default())
                .unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_unpack_and_cleanup_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let packs = tmp.path().join("texturepacks");
        make_zip(
            &packs.join("coolpack.zip"),
            &[("assets/mymod/textures/block/oak_leaves.png", b"fake")],
        );

        unpack_texturepacks(&packs).unwrap();
        let unpacked = packs.join("coolpack_temp/assets/mymod/textures/block/oak_leaves.png");
        assert!(unpacked.is_file());

        cleanup_unpacked(&packs).unwrap();
        assert!(!packs.join("coolpack_temp").exists());
        assert!(packs.join("coolpack.zip").is_file());
    }

    #[test]
    fn test_scan_mods_copies_matching_leaf_textures() {
        let tmp = tempfile::tempdir().unwrap();
        let mods = tmp.path().join("mods");
        let input_assets = tmp.path().join("input/assets");
        make_zip(
            &mods.join("treemod.jar"),
            &[
                ("assets/treemod/textures/block/palm_leaves.png", b"leaf"),
                // Wrong folder: not under textures/block.
                ("assets/treemod/textures/item/palm_leaves.png", b"item"),
                // Not a leaf texture.
                ("assets/treemod/textures/block/palm_log.png", b"log"),
            ],
        );

        unpack_mods(&mods).unwrap();
        scan_mods_for_textures(&mods, &input_assets).unwrap();

        assert!(input_assets
            .join("treemod/textures/block/palm_leaves.png")
            .is_file());
        assert!(!input_assets.join("treemod/textures/item/palm_leaves.png").exists());
        assert!(!input_assets.join("treemod/textures/block/palm_log.png").exists());
    }

    #[test]
    fn test_missing_roots_are_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        unpack_texturepacks(&tmp.path().join("nope")).unwrap();
        cleanup_unpacked(&tmp.path().join("nope")).unwrap();
        scan_mods_for_textures(&tmp.path().join("nope"), &tmp.path().join("assets")).unwrap();
    }
}
