//! Per-texture sidecar descriptors (`<name>.betterleaves.json`).
//!
//! A sidecar sits next to its texture and may redirect the blockstate
//! target, add extra texture slots, or supply per-tile stitching overrides.
//! An absent sidecar means "use defaults".

use crate::error::{GenError, Result};
use crate::leaf::{split_id, BlockstateTarget, LeafBlock};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const SIDECAR_EXTENSION: &str = "betterleaves.json";

/// Decoded sidecar contents. All keys are optional.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sidecar {
    pub block_state_data: Option<BlockstateRedirect>,
    pub sprite_overrides: Option<BTreeMap<String, String>>,
    /// Tile index (or `"a-b"` index range) -> texture id.
    pub texture_stitching: Option<BTreeMap<String, String>>,
}

/// Blockstate redirect: write under a different file and variant key.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockstateRedirect {
    /// Target block id; defaults to the leaf's own identity when absent.
    pub block: Option<String>,
    /// Variant key inside the blockstate file.
    pub state: String,
}

impl Sidecar {
    /// Path of the sidecar belonging to a texture file.
    pub fn path_for(texture_path: &Path) -> PathBuf {
        texture_path.with_extension(SIDECAR_EXTENSION)
    }

    /// Load the sidecar next to `texture_path`, if one exists.
    pub fn load_for(texture_path: &Path) -> Result<Option<Sidecar>> {
        let path = Self::path_for(texture_path);
        if !path.is_file() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        let sidecar =
            serde_json::from_str(&contents).map_err(|e| GenError::InvalidSidecar {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        Ok(Some(sidecar))
    }

    /// Resolve the blockstate redirect against a leaf's own identity.
    pub fn blockstate_target(&self, leaf: &LeafBlock) -> Option<BlockstateTarget> {
        let redirect = self.block_state_data.as_ref()?;
        let (namespace, block_name) = match &redirect.block {
            Some(block) => {
                let (ns, name) = split_id(block);
                (ns.to_string(), name.to_string())
            }
            None => (leaf.id_namespace(), leaf.id_name()),
        };
        Some(BlockstateTarget {
            namespace,
            block_name,
            state: redirect.state.clone(),
        })
    }

    /// Expand the stitching table into per-index entries. Range keys like
    /// `"1-3"` become entries for 1, 2 and 3 (inclusive on both ends).
    pub fn tile_map(&self, sidecar_path: &Path) -> Result<BTreeMap<u32, String>> {
        let mut map = BTreeMap::new();
        let Some(stitching) = &self.texture_stitching else {
            return Ok(map);
        };

        let bad_key = |key: &str| GenError::InvalidSidecar {
            path: sidecar_path.display().to_string(),
            reason: format!("bad textureStitching key '{key}'"),
        };

        for (key, value) in stitching {
            if let Some((start, end)) = key.split_once('-') {
                let start: u32 = start.trim().parse().map_err(|_| bad_key(key))?;
                let end: u32 = end.trim().parse().map_err(|_| bad_key(key))?;
                for index in start..=end {
                    map.insert(index, value.clone());
                }
            } else {
                let index: u32 = key.trim().parse().map_err(|_| bad_key(key))?;
                map.insert(index, value.clone());
            }
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sidecar_path() {
        assert_eq!(
            Sidecar::path_for(Path::new("input/assets/mymod/textures/block/oak_leaves.png")),
            Path::new("input/assets/mymod/textures/block/oak_leaves.betterleaves.json")
        );
    }

    #[test]
    fn test_range_keys_expand() {
        let sidecar: Sidecar = serde_json::from_str(
            r#"{"textureStitching": {"1-3": "mymod:block/a", "5": "mymod:block/b"}}"#,
        )
        .unwrap();
        let map = sidecar.tile_map(Path::new("x.betterleaves.json")).unwrap();
        assert_eq!(map.len(), 4);
        assert_eq!(map[&1], "mymod:block/a");
        assert_eq!(map[&2], "mymod:block/a");
        assert_eq!(map[&3], "mymod:block/a");
        assert_eq!(map[&5], "mymod:block/b");
    }

    #[test]
    fn test_bad_range_key_is_reported() {
        let sidecar: Sidecar =
            serde_json::from_str(r#"{"textureStitching": {"one": "mymod:block/a"}}"#).unwrap();
        assert!(sidecar.tile_map(Path::new("x.betterleaves.json")).is_err());
    }

    #[test]
    fn test_blockstate_target_defaults_to_leaf_identity() {
        let sidecar: Sidecar =
            serde_json::from_str(r#"{"blockStateData": {"state": "type=oak"}}"#).unwrap();
        let leaf = LeafBlock::new("mymod", "oak_leaves", "oak_leaves");
        let target = sidecar.blockstate_target(&leaf).unwrap();
        assert_eq!(target.namespace, "mymod");
        assert_eq!(target.block_name, "oak_leaves");
        assert_eq!(target.state, "type=oak");
    }

    #[test]
    fn test_blockstate_target_redirect() {
        let sidecar: Sidecar = serde_json::from_str(
            r#"{"blockStateData": {"block": "other:all_leaves", "state": "type=birch"}}"#,
        )
        .unwrap();
        let leaf = LeafBlock::new("mymod", "birch_leaves", "birch_leaves");
        let target = sidecar.blockstate_target(&leaf).unwrap();
        assert_eq!(target.namespace, "other");
        assert_eq!(target.block_name, "all_leaves");
        assert_eq!(target.state, "type=birch");
    }
}
