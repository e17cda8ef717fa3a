//! Override tables loaded from `input/overrides.json`.
//!
//! The tables are decoded into a strongly-typed struct and validated once at
//! load time, before any file I/O happens; they are read-only for the rest
//! of the run. A missing or malformed file is a fatal configuration error.

use crate::error::{GenError, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// A value that may be written as a single string or a list of strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl OneOrMany {
    /// Normalized list view.
    pub fn as_slice(&self) -> &[String] {
        match self {
            OneOrMany::One(value) => std::slice::from_ref(value),
            OneOrMany::Many(values) => values,
        }
    }
}

/// The seven-plus lookup tables from `overrides.json`.
///
/// Keys are block identities (`ns:name`) except where noted. All tables must
/// be present in the file; an absent table is a configuration error, not an
/// empty default.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overrides {
    /// Block ids rendered without biome tint.
    pub no_tint: HashSet<String>,
    /// Block id -> texture id; redirects the texture binding.
    pub block_textures: HashMap<String, String>,
    /// Block id -> texture id; adds a second overlay texture slot.
    pub overlay_textures: HashMap<String, String>,
    /// Block id -> texture id; swaps the main texture, keeping the original
    /// as the overlay. Mutually exclusive with `overlay_textures` per block
    /// (`overlay_textures` wins).
    pub overlay_variants: HashMap<String, String>,
    /// Texture ids that exist only to be referenced, never becoming blocks.
    pub compile_only: HashSet<String>,
    /// Block id -> block id; renames the emitted block identity.
    pub block_ids: HashMap<String, String>,
    /// Block id -> carpet id(s); triggers carpet asset emission.
    pub leaves_with_carpet: HashMap<String, OneOrMany>,
    /// Namespace -> namespace; duplicates blockstates under the second one.
    pub dynamic_trees_namespaces: HashMap<String, String>,
    /// Block ids that get a standalone item model file.
    pub generate_item_models: HashSet<String>,
    /// Block id -> blockstate id(s); unconditional blockstate duplication.
    pub block_state_copies: HashMap<String, OneOrMany>,
}

impl Overrides {
    /// Load and validate the overrides file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            GenError::MissingInput(format!("{}: {}", path.display(), e))
        })?;
        let overrides: Overrides = serde_json::from_str(&contents)?;
        overrides.validate()?;
        Ok(overrides)
    }

    /// True when the texture id is the source side of any overlay entry.
    /// Such textures are referenced by another block and never become blocks.
    pub fn is_overlay_source(&self, texture_id: &str) -> bool {
        self.overlay_textures.values().any(|v| v == texture_id)
    }

    /// Check that every identity-valued entry carries a namespace. All
    /// offending entries are reported together.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        let mut check = |table: &str, id: &str| {
            if !id.contains(':') {
                problems.push(format!("{table}: '{id}' is missing a namespace"));
            }
        };

        for id in &self.no_tint {
            check("noTint", id);
        }
        for (k, v) in &self.block_textures {
            check("blockTextures", k);
            check("blockTextures", v);
        }
        for (k, v) in &self.overlay_textures {
            check("overlayTextures", k);
            check("overlayTextures", v);
        }
        for (k, v) in &self.overlay_variants {
            check("overlayVariants", k);
            check("overlayVariants", v);
        }
        for id in &self.compile_only {
            check("compileOnly", id);
        }
        for (k, v) in &self.block_ids {
            check("blockIds", k);
            check("blockIds", v);
        }
        for (k, v) in &self.leaves_with_carpet {
            check("leavesWithCarpet", k);
            for id in v.as_slice() {
                check("leavesWithCarpet", id);
            }
        }
        for id in &self.generate_item_models {
            check("generateItemModels", id);
        }
        for (k, v) in &self.block_state_copies {
            check("blockStateCopies", k);
            for id in v.as_slice() {
                check("blockStateCopies", id);
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(GenError::InvalidOverrides(problems.join("; ")))
        }
    }
}
