//! Layered texture source lookup.
//!
//! Installed texture packs (and, when enabled, a programmer-art pack) are
//! unpacked into staging directories before a run. For every texture the
//! generator asks which of those overlay sources actually supplies it; the
//! base input tree is the silent fallback.

use crate::report;
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Resolves the physical directory that supplies a texture.
#[derive(Debug, Clone)]
pub struct TextureSources {
    packs_root: PathBuf,
    programmer_art_root: Option<PathBuf>,
}

impl TextureSources {
    pub fn new(packs_root: PathBuf, programmer_art_root: Option<PathBuf>) -> Self {
        Self {
            packs_root,
            programmer_art_root,
        }
    }

    /// Find the directory that supplies `filename` for the asset location
    /// `base_dir`. The programmer-art root is searched first, then the
    /// texture-pack staging root; the first pack directory whose
    /// asset-relative suffix matches `base_dir`'s and which contains the
    /// file wins. No match falls back to `base_dir` without a warning.
    pub fn resolve(&self, base_dir: &Path, filename: &str) -> PathBuf {
        let Some(suffix) = asset_suffix(base_dir) else {
            return base_dir.to_path_buf();
        };

        if let Some(programmer_art) = &self.programmer_art_root {
            if let Some(found) = scan_root(programmer_art, &suffix, filename) {
                return found;
            }
        }
        if let Some(found) = scan_root(&self.packs_root, &suffix, filename) {
            return found;
        }
        base_dir.to_path_buf()
    }
}

/// Path portion after the first `assets` component, or None when the path
/// has no `assets` component.
fn asset_suffix(path: &Path) -> Option<PathBuf> {
    let mut components = path.components();
    for component in components.by_ref() {
        if let Component::Normal(name) = component {
            if name == "assets" {
                return Some(components.as_path().to_path_buf());
            }
        }
    }
    None
}

fn scan_root(root: &Path, suffix: &Path, filename: &str) -> Option<PathBuf> {
    let found = scan_dir(root, suffix, filename)?;
    // Report which unpacked pack supplied the texture.
    if let Ok(rel) = found.strip_prefix(root) {
        if let Some(Component::Normal(pack)) = rel.components().next() {
            report::status(format!(" Using texture from: {}", pack.to_string_lossy()));
        }
    }
    Some(found)
}

/// Depth-first search over the unpacked packs, in lexicographic order so
/// the winner among multiple packs is platform-independent.
fn scan_dir(dir: &Path, suffix: &Path, filename: &str) -> Option<PathBuf> {
    if asset_suffix(dir).as_deref() == Some(suffix) && dir.join(filename).is_file() {
        return Some(dir.to_path_buf());
    }

    let entries = fs::read_dir(dir).ok()?;
    let mut subdirs: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    subdirs.sort();

    subdirs
        .into_iter()
        .find_map(|subdir| scan_dir(&subdir, suffix, filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_suffix() {
        assert_eq!(
            asset_suffix(Path::new("input/assets/mymod/textures/block")),
            Some(PathBuf::from("mymod/textures/block"))
        );
        assert_eq!(asset_suffix(Path::new("input/mymod/textures")), None);
    }

    #[test]
    fn test_resolve_prefers_pack_over_base() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().join("input/assets/mymod/textures/block");
        let pack = tmp
            .path()
            .join("packs/coolpack_temp/assets/mymod/textures/block");
        fs::create_dir_all(&base).unwrap();
        fs::create_dir_all(&pack).unwrap();
        fs::write(base.join("oak_leaves.png"), b"base").unwrap();
        fs::write(pack.join("oak_leaves.png"), b"pack").unwrap();

        let sources = TextureSources::new(tmp.path().join("packs"), None);
        assert_eq!(sources.resolve(&base, "oak_leaves.png"), pack);
    }

    #[test]
    fn test_resolve_falls_back_to_base() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().join("input/assets/mymod/textures/block");
        fs::create_dir_all(&base).unwrap();
        fs::write(base.join("oak_leaves.png"), b"base").unwrap();

        let sources = TextureSources::new(tmp.path().join("packs"), None);
        assert_eq!(sources.resolve(&base, "oak_leaves.png"), base);
    }

    #[test]
    fn test_resolve_requires_matching_suffix() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().join("input/assets/mymod/textures/block");
        let pack = tmp
            .path()
            .join("packs/coolpack_temp/assets/othermod/textures/block");
        fs::create_dir_all(&base).unwrap();
        fs::create_dir_all(&pack).unwrap();
        fs::write(base.join("oak_leaves.png"), b"base").unwrap();
        fs::write(pack.join("oak_leaves.png"), b"pack").unwrap();

        let sources = TextureSources::new(tmp.path().join("packs"), None);
        assert_eq!(sources.resolve(&base, "oak_leaves.png"), base);
    }

    #[test]
    fn test_programmer_art_wins_over_packs() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().join("input/assets/mymod/textures/block");
        let pack = tmp
            .path()
            .join("packs/coolpack_temp/assets/mymod/textures/block");
        let art = tmp
            .path()
            .join("art/classic_temp/assets/mymod/textures/block");
        for dir in [&base, &pack, &art] {
            fs::create_dir_all(dir).unwrap();
            fs::write(dir.join("oak_leaves.png"), b"x").unwrap();
        }

        let sources = TextureSources::new(
            tmp.path().join("packs"),
            Some(tmp.path().join("art")),
        );
        assert_eq!(sources.resolve(&base, "oak_leaves.png"), art);
    }

    #[test]
    fn test_lexicographic_pack_precedence() {
        let tmp = tempfile::tempdir().unwrap();
        let base = tmp.path().join("input/assets/mymod/textures/block");
        fs::create_dir_all(&base).unwrap();
        fs::write(base.join("oak_leaves.png"), b"x").unwrap();

        for pack in ["zpack_temp", "apack_temp"] {
            let dir = tmp
                .path()
                .join("packs")
                .join(pack)
                .join("assets/mymod/textures/block");
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join("oak_leaves.png"), b"x").unwrap();
        }

        let sources = TextureSources::new(tmp.path().join("packs"), None);
        let found = sources.resolve(&base, "oak_leaves.png");
        assert!(found.starts_with(tmp.path().join("packs/apack_temp")));
    }
}
