//! Texture source resolution and compositing.
//!
//! This module decides which physical directory supplies each texture
//! (layered texture packs and programmer art before the base input) and
//! produces the final output textures via 3×3 tiling and mask-based
//! edge rounding.

pub mod snowy;
pub mod sources;
pub mod stitch;

pub use sources::TextureSources;

use std::fs;
use std::io;
use std::path::Path;

/// Plain files of a directory, sorted case-insensitively by name.
pub(crate) fn list_files_alphabetically(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if entry.file_type()?.is_file() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    names.sort_by_key(|name| name.to_lowercase());
    Ok(names)
}

/// True when the directory exists and has at least one entry.
pub(crate) fn dir_is_nonempty(dir: &Path) -> bool {
    fs::read_dir(dir)
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}
