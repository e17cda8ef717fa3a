//! Leaf carpet emission.
//!
//! Some mods ship carpet variants of their leaves. Because the parent leaf
//! texture changes, the carpet assets are regenerated against the resolved
//! leaf texture.

use crate::emit::blockstate::{rotation_set, Blockstate};
use crate::emit::model::Model;
use crate::emit::JsonStyle;
use crate::error::Result;
use crate::leaf::{CarpetBlock, LeafBlock};
use std::path::Path;

/// Write the blockstate and block model for one carpet block.
pub fn write_carpet_assets(
    carpet: &CarpetBlock,
    leaf: &LeafBlock,
    style: JsonStyle,
    out_assets: &Path,
) -> Result<()> {
    let mut state = Blockstate::default();
    state.variants.insert(
        String::new(),
        rotation_set(&format!("{}:block/{}", carpet.namespace, carpet.block_name)),
    );
    let state_path = out_assets
        .join(&carpet.namespace)
        .join("blockstates")
        .join(format!("{}.json", carpet.block_name));
    style.write(&state_path, &state)?;

    let model = Model {
        parent: format!("betterleaves:block/{}", carpet.base_model),
        textures: [("wool".to_string(), leaf.texture_id())].into_iter().collect(),
    };
    let model_path = out_assets
        .join(&carpet.namespace)
        .join("models/block")
        .join(format!("{}.json", carpet.block_name));
    style.write(&model_path, &model)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_carpet_assets() {
        let tmp = tempfile::tempdir().unwrap();
        let leaf = LeafBlock::new("mymod", "oak_leaves", "oak_leaves");
        let carpet = CarpetBlock::new("mymod:oak_leaf_carpet", &leaf);
        write_carpet_assets(&carpet, &leaf, JsonStyle::pretty(), tmp.path()).unwrap();

        let state: Blockstate = serde_json::from_str(
            &fs::read_to_string(tmp.path().join("mymod/blockstates/oak_leaf_carpet.json"))
                .unwrap(),
        )
        .unwrap();
        let entries = &state.variants[""];
        assert_eq!(entries.len(), 4);
        assert!(entries
            .iter()
            .all(|entry| entry.model == "mymod:block/oak_leaf_carpet"));
        assert_eq!(entries[3].y, Some(270));

        let model: Model = serde_json::from_str(
            &fs::read_to_string(tmp.path().join("mymod/models/block/oak_leaf_carpet.json"))
                .unwrap(),
        )
        .unwrap();
        assert_eq!(model.parent, "betterleaves:block/leaf_carpet");
        assert_eq!(model.textures["wool"], "mymod:block/oak_leaves");
    }

    #[test]
    fn test_notint_carpet_template() {
        let tmp = tempfile::tempdir().unwrap();
        let mut leaf = LeafBlock::new("mymod", "birch_leaves", "birch_leaves");
        leaf.tint_disabled = true;
        let carpet = CarpetBlock::new("mymod:birch_leaf_carpet", &leaf);
        write_carpet_assets(&carpet, &leaf, JsonStyle::pretty(), tmp.path()).unwrap();

        let model: Model = serde_json::from_str(
            &fs::read_to_string(tmp.path().join("mymod/models/block/birch_leaf_carpet.json"))
                .unwrap(),
        )
        .unwrap();
        assert_eq!(model.parent, "betterleaves:block/leaf_carpet_notint");
    }
}
