//! Snowy model variants and snow predicates.
//!
//! For each leaf that went through the compositor, a parallel set of
//! `snowy_<name>1..4` models binds the snow overlay texture matching the
//! mask chosen for the block's main texture, and a predicate file swaps the
//! snowy models in when snow sits on top of the block.

use crate::emit::model::Model;
use crate::emit::JsonStyle;
use crate::error::Result;
use crate::leaf::LeafBlock;
use serde_json::json;
use std::path::Path;

/// Write the four snowy orientation models for a leaf.
pub fn write_snowy_models(
    leaf: &LeafBlock,
    mask_index: usize,
    style: JsonStyle,
    out_assets: &Path,
) -> Result<()> {
    let namespace = leaf.id_namespace();
    let name = leaf.id_name();
    let models_dir = out_assets.join(&namespace).join("models/block");

    for i in 1..=4 {
        let mut textures = [
            ("all".to_string(), leaf.texture_id()),
            (
                "snowy".to_string(),
                format!("betterleaves:block/snowy_overlay{mask_index}"),
            ),
        ]
        .into_iter()
        .collect::<std::collections::BTreeMap<_, _>>();
        if !leaf.overlay_texture_id.is_empty() {
            textures.insert("overlay".to_string(), leaf.overlay_texture_id.clone());
        }
        if let Some(sprites) = &leaf.sprite_overrides {
            for (slot, texture_id) in sprites {
                textures.insert(slot.clone(), texture_id.clone());
            }
        }

        let model = Model {
            parent: format!("betterleaves:block/leaves_snowy{i}"),
            textures,
        };
        style.write(&models_dir.join(format!("snowy_{name}{i}.json")), &model)?;
    }
    Ok(())
}

/// Write the predicate that selects the snowy models when snow or a snow
/// block sits directly above the leaf.
pub fn write_snow_predicate(leaf: &LeafBlock, style: JsonStyle, out_assets: &Path) -> Result<()> {
    let namespace = leaf.id_namespace();
    let name = leaf.id_name();

    let above = |state: &str| {
        json!({
            "adjacent_block": {
                "state": state,
                "offset": { "x": 0, "y": 1, "z": 0 }
            }
        })
    };
    let predicate = json!({
        "overrides": [
            {
                "when": {
                    "or": [above("minecraft:snow"), above("minecraft:snow_block")]
                },
                "apply": [
                    format!("{namespace}:snowy_{name}1"),
                    format!("{namespace}:snowy_{name}2"),
                    format!("{namespace}:snowy_{name}3"),
                    format!("{namespace}:snowy_{name}4")
                ]
            }
        ]
    });

    let path = out_assets
        .join(&namespace)
        .join("mbp")
        .join(format!("{name}.json"));
    style.write(&path, &predicate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_snowy_models_bind_matching_overlay() {
        let tmp = tempfile::tempdir().unwrap();
        let leaf = LeafBlock::new("mymod", "oak_leaves", "oak_leaves");
        write_snowy_models(&leaf, 3, JsonStyle::pretty(), tmp.path()).unwrap();

        for i in 1..=4 {
            let model: Model = serde_json::from_str(
                &fs::read_to_string(
                    tmp.path()
                        .join(format!("mymod/models/block/snowy_oak_leaves{i}.json")),
                )
                .unwrap(),
            )
            .unwrap();
            assert_eq!(model.parent, format!("betterleaves:block/leaves_snowy{i}"));
            assert_eq!(model.textures["all"], "mymod:block/oak_leaves");
            assert_eq!(model.textures["snowy"], "betterleaves:block/snowy_overlay3");
        }
    }

    #[test]
    fn test_predicate_targets_snowy_models() {
        let tmp = tempfile::tempdir().unwrap();
        let leaf = LeafBlock::new("mymod", "oak_leaves", "oak_leaves");
        write_snow_predicate(&leaf, JsonStyle::pretty(), tmp.path()).unwrap();

        let value: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(tmp.path().join("mymod/mbp/oak_leaves.json")).unwrap(),
        )
        .unwrap();
        let when = &value["overrides"][0]["when"]["or"];
        assert_eq!(when[0]["adjacent_block"]["state"], "minecraft:snow");
        assert_eq!(when[1]["adjacent_block"]["state"], "minecraft:snow_block");
        assert_eq!(
            value["overrides"][0]["apply"][0],
            "mymod:snowy_oak_leaves1"
        );
    }
}
