//! Blockstate emission.
//!
//! A leaf block's blockstate lists, per variant key, sixteen candidate
//! entries: each of the four quadrant sub-models under the four horizontal
//! rotations. Writes merge with an existing target file so several leaf
//! types can share one blockstate under different variant keys.

use crate::emit::JsonStyle;
use crate::error::Result;
use crate::leaf::{split_id, LeafBlock};
use crate::overrides::OneOrMany;
use crate::report;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

/// One candidate model reference inside a blockstate variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantModel {
    pub model: String,
    /// Rotation around the vertical axis, in degrees; absent means 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<u32>,
    /// Fields this tool does not produce itself (x, uvlock, weight, ...) are
    /// carried through merges untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl VariantModel {
    fn new(model: &str, y: Option<u32>) -> Self {
        Self {
            model: model.to_string(),
            y,
            extra: BTreeMap::new(),
        }
    }
}

/// A blockstate document: variant key -> candidate models.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Blockstate {
    #[serde(default)]
    pub variants: BTreeMap<String, Vec<VariantModel>>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// The four horizontal rotations of one model.
pub fn rotation_set(model_id: &str) -> Vec<VariantModel> {
    [None, Some(90), Some(180), Some(270)]
        .into_iter()
        .map(|y| VariantModel::new(model_id, y))
        .collect()
}

fn blockstate_path(out_assets: &Path, namespace: &str, name: &str) -> PathBuf {
    out_assets
        .join(namespace)
        .join("blockstates")
        .join(format!("{name}.json"))
}

fn load_or_default(path: &Path) -> Result<Blockstate> {
    if path.is_file() {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    } else {
        Ok(Blockstate::default())
    }
}

/// Write the blockstate for a resolved leaf, plus its dynamic-trees
/// duplicate and any configured unconditional copies.
pub fn write_blockstate(
    leaf: &LeafBlock,
    copies: &HashMap<String, OneOrMany>,
    style: JsonStyle,
    out_assets: &Path,
) -> Result<()> {
    let namespace = leaf.id_namespace();
    let name = leaf.id_name();

    let (target_namespace, target_name, state) = match &leaf.blockstate_target {
        Some(target) => (
            target.namespace.clone(),
            target.block_name.clone(),
            target.state.clone(),
        ),
        None => (namespace.clone(), name.clone(), String::new()),
    };

    let path = blockstate_path(out_assets, &target_namespace, &target_name);
    let mut data = load_or_default(&path)?;
    let entries = data.variants.entry(state).or_default();
    for i in 1..=4 {
        entries.extend(rotation_set(&format!("{namespace}:block/{name}{i}")));
    }
    style.write(&path, &data)?;

    // The dynamic-trees companion namespace receives the identical content.
    if let Some(dyntrees) = &leaf.dynamictrees_namespace {
        style.write(&blockstate_path(out_assets, dyntrees, &name), &data)?;
    }

    if let Some(copy_ids) = copies.get(&leaf.id()) {
        for copy_id in copy_ids.as_slice() {
            let (copy_namespace, copy_name) = split_id(copy_id);
            style.write(&blockstate_path(out_assets, copy_namespace, copy_name), &data)?;
            report::detail(format!("Writing blockstate copy: {copy_id}"));
        }
    }
    Ok(())
}
