//! Block and item model emission.

use crate::emit::JsonStyle;
use crate::error::Result;
use crate::leaf::LeafBlock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A model file: a template parent plus texture-slot bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub parent: String,
    pub textures: BTreeMap<String, String>,
}

/// Texture slots shared by every model emitted for a leaf: the `all` slot,
/// the overlay slot when an overlay is set, and any sidecar sprite
/// overrides.
fn texture_slots(leaf: &LeafBlock, all: String) -> BTreeMap<String, String> {
    let mut textures = BTreeMap::new();
    textures.insert("all".to_string(), all);
    if !leaf.overlay_texture_id.is_empty() {
        textures.insert("overlay".to_string(), leaf.overlay_texture_id.clone());
    }
    if let Some(sprites) = &leaf.sprite_overrides {
        for (slot, texture_id) in sprites {
            textures.insert(slot.clone(), texture_id.clone());
        }
    }
    textures
}

/// Write the four orientation block models (`<name>1..4.json`).
pub fn write_block_models(leaf: &LeafBlock, style: JsonStyle, out_assets: &Path) -> Result<()> {
    let namespace = leaf.id_namespace();
    let name = leaf.id_name();
    let models_dir = out_assets.join(&namespace).join("models/block");

    for i in 1..=4 {
        let model = Model {
            parent: format!("betterleaves:block/{}{}", leaf.base_model.as_str(), i),
            textures: texture_slots(leaf, leaf.texture_id()),
        };
        style.write(&models_dir.join(format!("{name}{i}.json")), &model)?;
    }
    Ok(())
}

/// Write the item model at `models/block/<name>.json`, and additionally as
/// a standalone `models/item` file when requested (redirected to the
/// sidecar's blockstate target when one was given).
pub fn write_item_model(leaf: &LeafBlock, style: JsonStyle, out_assets: &Path) -> Result<()> {
    let namespace = leaf.id_namespace();
    let name = leaf.id_name();

    // Items must not inherit a redirected texture; they keep the literal
    // own-namespace path when a texture override was applied.
    let all = if leaf.has_texture_override {
        format!("{namespace}:block/{name}")
    } else {
        leaf.texture_id()
    };
    let model = Model {
        parent: format!("betterleaves:block/{}", leaf.base_model.as_str()),
        textures: texture_slots(leaf, all),
    };

    let path = out_assets
        .join(&namespace)
        .join("models/block")
        .join(format!("{name}.json"));
    style.write(&path, &model)?;

    if leaf.item_model_requested {
        let (item_namespace, item_name) = match &leaf.blockstate_target {
            Some(target) => (target.namespace.clone(), target.block_name.clone()),
            None => (namespace, name),
        };
        let item_path = out_assets
            .join(item_namespace)
            .join("models/item")
            .join(format!("{item_name}.json"));
        style.write(&item_path, &model)?;
    }
    Ok(())
}
