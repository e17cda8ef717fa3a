//! Per-texture working records.
//!
//! A [`LeafBlock`] is built for every discovered leaf texture and accumulates
//! the resolved identity and classification flags while the engine consults
//! the override tables. It is only mutated during that resolution pass; every
//! emitter receives it by shared reference.

use std::collections::BTreeMap;

/// Which externally-authored template family the emitted models reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BaseModel {
    /// Tinted tiled leaves (the default).
    #[default]
    Leaves,
    /// Tiled leaves without biome tint.
    LeavesNotint,
    /// Tiled leaves with a second overlay texture slot.
    LeavesOverlay,
    /// Non-tiled single-mesh model for animated or forced-legacy textures.
    LeavesLegacy,
}

impl BaseModel {
    /// Template name as referenced from model JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            BaseModel::Leaves => "leaves",
            BaseModel::LeavesNotint => "leaves_notint",
            BaseModel::LeavesOverlay => "leaves_overlay",
            BaseModel::LeavesLegacy => "leaves_legacy",
        }
    }
}

/// Redirect for where a blockstate is written, from a sidecar descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockstateTarget {
    pub namespace: String,
    pub block_name: String,
    /// Variant key inside the blockstate file; empty is the default variant.
    pub state: String,
}

/// Working record for one discovered leaf texture.
#[derive(Debug, Clone, Default)]
pub struct LeafBlock {
    /// Top-level asset namespace, from the path position under `assets/`.
    pub namespace: String,
    /// Base block identifier; rewritten for wood-type subfolder layouts.
    pub block_name: String,
    /// Original filename stem, immutable once set.
    pub texture_name: String,
    /// Subfolder segment (with trailing slash) for nested textures.
    pub texture_prefix: String,

    pub base_model: BaseModel,
    pub tint_disabled: bool,
    pub legacy_model: bool,
    pub item_model_requested: bool,
    /// Set when the block-textures table redirected the texture binding.
    pub has_texture_override: bool,

    /// Empty means no overlay; non-empty selects the overlay model variant.
    pub overlay_texture_id: String,
    pub id_override: Option<String>,
    pub texture_id_override: Option<String>,
    /// Secondary namespace that receives a duplicate blockstate.
    pub dynamictrees_namespace: Option<String>,
    pub blockstate_target: Option<BlockstateTarget>,
    /// Extra texture slots merged into every emitted model.
    pub sprite_overrides: Option<BTreeMap<String, String>>,
    /// Rounding mask index chosen during compositing, reused by the snowy
    /// model variants.
    pub mask_index: Option<usize>,
}

impl LeafBlock {
    pub fn new(namespace: &str, block_name: &str, texture_name: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            block_name: block_name.to_string(),
            texture_name: texture_name.to_string(),
            ..Self::default()
        }
    }

    /// Block identity: the id override when set, else `namespace:block_name`.
    pub fn id(&self) -> String {
        match &self.id_override {
            Some(id) => id.clone(),
            None => format!("{}:{}", self.namespace, self.block_name),
        }
    }

    /// Texture identity: the texture override when set, else
    /// `namespace:block/<prefix><texture_name>`.
    pub fn texture_id(&self) -> String {
        match &self.texture_id_override {
            Some(id) => id.clone(),
            None => format!(
                "{}:block/{}{}",
                self.namespace, self.texture_prefix, self.texture_name
            ),
        }
    }

    /// Namespace half of the (possibly overridden) block identity.
    pub fn id_namespace(&self) -> String {
        let id = self.id();
        split_id(&id).0.to_string()
    }

    /// Name half of the (possibly overridden) block identity.
    pub fn id_name(&self) -> String {
        let id = self.id();
        split_id(&id).1.to_string()
    }
}

/// Carpet companion block for a leaf, from the carpet-association table.
#[derive(Debug, Clone)]
pub struct CarpetBlock {
    pub namespace: String,
    pub block_name: String,
    /// Mirrors the parent leaf's tint classification.
    pub base_model: &'static str,
}

impl CarpetBlock {
    pub fn new(carpet_id: &str, parent: &LeafBlock) -> Self {
        let (namespace, block_name) = split_id(carpet_id);
        Self {
            namespace: namespace.to_string(),
            block_name: block_name.to_string(),
            base_model: if parent.tint_disabled {
                "leaf_carpet_notint"
            } else {
                "leaf_carpet"
            },
        }
    }
}

/// Split `"ns:name"` into namespace and name; a missing namespace maps to
/// `minecraft`, matching vanilla resource-location defaults.
pub fn split_id(id: &str) -> (&str, &str) {
    match id.split_once(':') {
        Some((ns, name)) => (ns, name),
        None => ("minecraft", id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_identity() {
        let leaf = LeafBlock::new("mymod", "oak_leaves", "oak_leaves");
        assert_eq!(leaf.id(), "mymod:oak_leaves");
        assert_eq!(leaf.texture_id(), "mymod:block/oak_leaves");
    }

    #[test]
    fn test_identity_overrides_take_priority() {
        let mut leaf = LeafBlock::new("mymod", "oak_leaves", "oak_leaves");
        leaf.id_override = Some("other:renamed_leaves".to_string());
        leaf.texture_id_override = Some("other:block/custom".to_string());
        assert_eq!(leaf.id(), "other:renamed_leaves");
        assert_eq!(leaf.id_namespace(), "other");
        assert_eq!(leaf.id_name(), "renamed_leaves");
        assert_eq!(leaf.texture_id(), "other:block/custom");
    }

    #[test]
    fn test_texture_prefix_in_texture_id() {
        let mut leaf = LeafBlock::new("mymod", "azalea_leaves", "azalea_leaves");
        leaf.texture_prefix = "natural/".to_string();
        assert_eq!(leaf.texture_id(), "mymod:block/natural/azalea_leaves");
        // The block identity is unaffected by the prefix.
        assert_eq!(leaf.id(), "mymod:azalea_leaves");
    }

    #[test]
    fn test_carpet_mirrors_tint() {
        let mut leaf = LeafBlock::new("mymod", "oak_leaves", "oak_leaves");
        let carpet = CarpetBlock::new("mymod:oak_leaf_carpet", &leaf);
        assert_eq!(carpet.base_model, "leaf_carpet");
        assert_eq!(carpet.namespace, "mymod");
        assert_eq!(carpet.block_name, "oak_leaf_carpet");

        leaf.tint_disabled = true;
        let carpet = CarpetBlock::new("mymod:oak_leaf_carpet", &leaf);
        assert_eq!(carpet.base_model, "leaf_carpet_notint");
    }

    #[test]
    fn test_split_id_defaults_namespace() {
        assert_eq!(split_id("snow"), ("minecraft", "snow"));
        assert_eq!(split_id("mymod:snow"), ("mymod", "snow"));
    }
}
