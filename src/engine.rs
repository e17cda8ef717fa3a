//! The override resolution engine.
//!
//! Walks every discovered leaf texture, builds its descriptor, consults the
//! override tables in a fixed precedence order, drives the compositor, and
//! hands the finished descriptor to the emitters. The descriptor is only
//! mutated here; emitters see it behind a shared reference.

use crate::emit::{self, JsonStyle};
use crate::error::{GenError, Result};
use crate::leaf::{split_id, BaseModel, CarpetBlock, LeafBlock};
use crate::overrides::Overrides;
use crate::report;
use crate::sidecar::Sidecar;
use crate::staging;
use crate::texture::{snowy, stitch, TextureSources};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Run configuration, threaded explicitly through the pipeline.
#[derive(Debug, Clone)]
pub struct GenConfig {
    /// Pack version string, substituted into the pack metadata.
    pub version: String,
    /// Edition label, substituted into the pack metadata.
    pub edition: String,
    /// Force legacy models for every leaf regardless of texture shape.
    pub legacy_models: bool,
    /// Search the programmer-art staging directory before texture packs.
    pub programmer_art: bool,
    /// Emit minified JSON instead of indented JSON.
    pub minify: bool,
    /// Also generate snow overlay textures, models and predicates.
    pub snowy: bool,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            version: "0.0".to_string(),
            edition: "§cCustom Edition".to_string(),
            legacy_models: false,
            programmer_art: false,
            minify: false,
            snowy: false,
        }
    }
}

/// Filesystem layout of a run.
#[derive(Debug, Clone)]
pub struct GenPaths {
    /// Input tree root (`assets/`, `masks/`, `texturepacks/`, `mods/`, ...).
    pub input: PathBuf,
    /// Template tree holding the externally-authored `assets/` to copy.
    pub base: PathBuf,
    /// Output root; the generated `assets/` tree lands here.
    pub output: PathBuf,
}

impl GenPaths {
    pub fn new(input: PathBuf, base: PathBuf, output: PathBuf) -> Self {
        Self { input, base, output }
    }

    pub fn input_assets(&self) -> PathBuf {
        self.input.join("assets")
    }

    pub fn masks_root(&self) -> PathBuf {
        self.input.join("masks")
    }

    pub fn texturepacks_dir(&self) -> PathBuf {
        self.input.join("texturepacks")
    }

    pub fn programmer_art_dir(&self) -> PathBuf {
        self.input.join("programmer_art")
    }

    pub fn mods_dir(&self) -> PathBuf {
        self.input.join("mods")
    }

    pub fn output_assets(&self) -> PathBuf {
        self.output.join("assets")
    }
}

/// One full generation pass over the input tree.
pub struct Generator {
    config: GenConfig,
    paths: GenPaths,
    overrides: Overrides,
    sources: TextureSources,
    style: JsonStyle,
}

impl Generator {
    pub fn new(config: GenConfig, paths: GenPaths, overrides: Overrides) -> Self {
        let programmer_art = config
            .programmer_art
            .then(|| paths.programmer_art_dir());
        let sources = TextureSources::new(paths.texturepacks_dir(), programmer_art);
        let style = if config.minify {
            JsonStyle::minified()
        } else {
            JsonStyle::pretty()
        };
        Self {
            config,
            paths,
            overrides,
            sources,
            style,
        }
    }

    /// Generate the full assets tree. Returns the number of leaf blocks
    /// processed.
    pub fn run(&self) -> Result<usize> {
        println!("Generating assets...");
        self.reset_output_tree()?;

        if self.config.programmer_art {
            staging::unpack_texturepacks(&self.paths.programmer_art_dir())?;
        }
        staging::unpack_texturepacks(&self.paths.texturepacks_dir())?;
        staging::unpack_mods(&self.paths.mods_dir())?;
        staging::scan_mods_for_textures(&self.paths.mods_dir(), &self.paths.input_assets())?;

        if self.config.snowy {
            match snowy::generate_snowy_overlays(
                &self.paths.input_assets(),
                &self.paths.masks_root(),
                &self.sources,
                &self.paths.output_assets(),
            ) {
                Ok(_) => {}
                Err(e) if e.is_per_texture() => {
                    println!("Error while generating snow overlay texture");
                    warn!("snow overlay generation failed: {e}");
                }
                Err(e) => return Err(e),
            }
        }

        let input_assets = self.paths.input_assets();
        let mut processed = 0;
        if input_assets.is_dir() {
            self.walk_assets(&input_assets, &input_assets, &mut processed)?;
        }

        println!();
        if self.config.programmer_art {
            staging::cleanup_unpacked(&self.paths.programmer_art_dir())?;
        }
        staging::cleanup_unpacked(&self.paths.texturepacks_dir())?;
        staging::cleanup_unpacked(&self.paths.mods_dir())?;
        report::status(format!("Processed {processed} leaf blocks"));
        Ok(processed)
    }

    /// Reset the output assets tree from the externally-authored template
    /// tree. The template holds the betterleaves model parts every emitted
    /// model references; without it the output would be structurally
    /// invalid, so its absence is fatal.
    fn reset_output_tree(&self) -> Result<()> {
        let out_assets = self.paths.output_assets();
        if out_assets.exists() {
            fs::remove_dir_all(&out_assets)?;
        }
        let template = self.paths.base.join("assets");
        if !template.is_dir() {
            return Err(GenError::MissingInput(format!(
                "template asset tree at {}",
                template.display()
            )));
        }
        copy_tree(&template, &out_assets)?;
        if self.config.minify {
            emit::minify_json_tree(&out_assets)?;
        }
        Ok(())
    }

    /// Sorted depth-first walk: files of a directory before its
    /// subdirectories, both in lexicographic order.
    fn walk_assets(&self, dir: &Path, input_assets: &Path, processed: &mut usize) -> Result<()> {
        let mut entries: Vec<_> = fs::read_dir(dir)?.flatten().map(|e| e.path()).collect();
        entries.sort();

        for path in entries.iter().filter(|p| p.is_file()) {
            if path.extension().map(|e| e == "png").unwrap_or(false) {
                if let Some(file_name) = path.file_name().map(|n| n.to_string_lossy().to_string())
                {
                    *processed += self.process_leaf(dir, input_assets, &file_name)?;
                }
            }
        }
        for path in entries.iter().filter(|p| p.is_dir()) {
            self.walk_assets(path, input_assets, processed)?;
        }
        Ok(())
    }

    /// Resolve and emit one leaf texture. Returns 1 when the block was
    /// processed, 0 when it was skipped.
    fn process_leaf(&self, dir: &Path, input_assets: &Path, file_name: &str) -> Result<usize> {
        let rel: Vec<String> = match dir.strip_prefix(input_assets) {
            Ok(rel) => rel
                .components()
                .map(|c| c.as_os_str().to_string_lossy().to_string())
                .collect(),
            Err(_) => return Ok(0),
        };
        let stem = file_name.strip_suffix(".png").unwrap_or(file_name);
        let Some(mut leaf) = derive_descriptor(&rel, stem) else {
            return Ok(0);
        };

        report::block(&leaf.id());
        if !leaf.texture_prefix.is_empty() {
            if stem == "leaves" {
                report::detail(format!("Auto-redirected from {}:leaves", leaf.namespace));
            } else {
                report::detail(format!("Prefix: {}", leaf.texture_prefix));
            }
        }

        // Compile-only and overlay-source textures exist only to be
        // referenced by another block; they never become blocks themselves.
        let texture_id = leaf.texture_id();
        if self.overrides.compile_only.contains(&texture_id) {
            report::detail("Skipping compile-only texture");
            return Ok(0);
        }
        if self.overrides.is_overlay_source(&texture_id) {
            report::detail("Skipping overlay texture");
            return Ok(0);
        }

        let texture_path = dir.join(file_name);
        leaf.legacy_model = match self.classify_legacy(&texture_path) {
            Ok(legacy) => legacy,
            Err(e) => {
                warn!("skipping unreadable texture {file_name}: {e}");
                return Ok(0);
            }
        };

        let sidecar = Sidecar::load_for(&texture_path)?;
        let sidecar_path = Sidecar::path_for(&texture_path);

        if !(leaf.legacy_model || self.overrides.overlay_variants.contains_key(&leaf.id())) {
            if let Err(e) =
                self.generate_texture(&mut leaf, dir, input_assets, file_name, sidecar.as_ref())
            {
                if e.is_per_texture() {
                    println!("Error while generating texture for '{file_name}'");
                    warn!("texture generation failed for {file_name}: {e}");
                } else {
                    return Err(e);
                }
            }
        }

        if let Some(id_override) = self.overrides.block_ids.get(&leaf.id()) {
            leaf.id_override = Some(id_override.clone());
            report::detail(format!("ID Override: {}", leaf.id()));
        }

        leaf.has_texture_override = self.overrides.block_textures.contains_key(&leaf.id());
        if let Some(texture_override) = self.overrides.block_textures.get(&leaf.id()) {
            leaf.texture_id_override = Some(texture_override.clone());
            report::detail(format!("Texture Override: {}", leaf.texture_id()));
        }

        leaf.tint_disabled = self.overrides.no_tint.contains(&leaf.id());
        if leaf.legacy_model {
            leaf.base_model = BaseModel::LeavesLegacy;
        } else if leaf.tint_disabled {
            leaf.base_model = BaseModel::LeavesNotint;
            report::detail("No tint");
        }

        // Overlay tables are mutually exclusive per block; overlay-textures
        // wins. Legacy keeps its base model but still carries the overlay
        // texture id and any variant redirect.
        if let Some(overlay_id) = self.overrides.overlay_textures.get(&leaf.id()) {
            if !leaf.legacy_model {
                leaf.base_model = BaseModel::LeavesOverlay;
            }
            leaf.overlay_texture_id = overlay_id.clone();
            report::detail(format!("Has overlay texture: {}", leaf.overlay_texture_id));
        } else if let Some(variant_id) = self.overrides.overlay_variants.get(&leaf.id()).cloned() {
            if !leaf.legacy_model {
                leaf.base_model = BaseModel::LeavesOverlay;
            }
            leaf.overlay_texture_id = leaf.texture_id();
            leaf.texture_id_override = Some(variant_id.clone());
            report::detail(format!("Has overlay variant: {variant_id}"));
        }

        if let Some(dyntrees) = self.overrides.dynamic_trees_namespaces.get(&leaf.namespace) {
            leaf.dynamictrees_namespace = Some(dyntrees.clone());
        }

        if self.overrides.generate_item_models.contains(&leaf.id()) {
            leaf.item_model_requested = true;
            report::detail("Also generating item model");
        }

        if let Some(sidecar) = &sidecar {
            if sidecar.block_state_data.is_some() {
                report::detail(format!(
                    "Loading blockstate data from: {}",
                    sidecar_path.display()
                ));
                leaf.blockstate_target = sidecar.blockstate_target(&leaf);
            }
            if let Some(sprites) = &sidecar.sprite_overrides {
                leaf.sprite_overrides = Some(sprites.clone());
            }
        }

        let out_assets = self.paths.output_assets();
        emit::blockstate::write_blockstate(
            &leaf,
            &self.overrides.block_state_copies,
            self.style,
            &out_assets,
        )?;
        emit::model::write_block_models(&leaf, self.style, &out_assets)?;
        emit::model::write_item_model(&leaf, self.style, &out_assets)?;

        if self.config.snowy {
            if let Some(mask_index) = leaf.mask_index {
                emit::snowy::write_snowy_models(&leaf, mask_index, self.style, &out_assets)?;
                emit::snowy::write_snow_predicate(&leaf, self.style, &out_assets)?;
            }
        }

        if let Some(carpet_ids) = self.overrides.leaves_with_carpet.get(&leaf.id()) {
            for carpet_id in carpet_ids.as_slice() {
                let carpet = CarpetBlock::new(carpet_id, &leaf);
                emit::carpet::write_carpet_assets(&carpet, &leaf, self.style, &out_assets)?;
                report::detail(format!("Generating leaf carpet: {carpet_id}"));
            }
        }

        Ok(1)
    }

    /// Legacy classification: non-square textures are animated sprite
    /// sheets that cannot be tiled; the run flag forces legacy for all.
    fn classify_legacy(&self, texture_path: &Path) -> Result<bool> {
        let (width, height) = image::image_dimensions(texture_path)?;
        if width != height {
            report::detail("Animated - using legacy model");
            return Ok(true);
        }
        if self.config.legacy_models {
            report::detail("Using legacy model as requested");
            return Ok(true);
        }
        Ok(false)
    }

    /// Composite the output texture for a leaf and record the chosen mask.
    fn generate_texture(
        &self,
        leaf: &mut LeafBlock,
        dir: &Path,
        input_assets: &Path,
        file_name: &str,
        sidecar: Option<&Sidecar>,
    ) -> Result<()> {
        let tile_map = self.resolve_tile_map(dir, file_name, sidecar)?;
        let source_dir = self.sources.resolve(dir, file_name);
        let rel = dir.strip_prefix(input_assets).unwrap_or(dir);
        let out_path = self.paths.output_assets().join(rel).join(file_name);
        let mask_index = stitch::stitch(
            &source_dir,
            file_name,
            &tile_map,
            &self.paths.masks_root(),
            &out_path,
        )?;
        leaf.mask_index = Some(mask_index);
        Ok(())
    }

    /// Resolve the sidecar stitching table into per-tile physical paths,
    /// routing each referenced texture through the layered source lookup.
    fn resolve_tile_map(
        &self,
        dir: &Path,
        file_name: &str,
        sidecar: Option<&Sidecar>,
    ) -> Result<BTreeMap<u32, PathBuf>> {
        let mut map = BTreeMap::new();
        let Some(sidecar) = sidecar else {
            return Ok(map);
        };
        let sidecar_path = Sidecar::path_for(&dir.join(file_name));
        let entries = sidecar.tile_map(&sidecar_path)?;
        if entries.is_empty() {
            return Ok(map);
        }
        report::detail(format!(
            "Using texture stitching data from: {}",
            sidecar_path.display()
        ));

        for (index, texture_id) in entries {
            let (namespace, rest) = split_id(&texture_id);
            let rest = PathBuf::from(format!("{rest}.png"));
            let tile_file = rest
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            let base_dir = match rest.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => self
                    .paths
                    .input_assets()
                    .join(namespace)
                    .join("textures")
                    .join(parent),
                _ => self.paths.input_assets().join(namespace).join("textures"),
            };
            let resolved = self.sources.resolve(&base_dir, &tile_file);
            map.insert(index, resolved.join(&tile_file));
        }
        Ok(map)
    }
}

/// Derive the initial descriptor from the asset-relative directory
/// components and the filename stem. Returns None for files directly under
/// the assets root.
fn derive_descriptor(rel_dir: &[String], stem: &str) -> Option<LeafBlock> {
    let namespace = rel_dir.first()?;
    let mut leaf = LeafBlock::new(namespace, stem, stem);
    // ns/textures/block/<sub>: the extra segment disambiguates textures
    // sharing a block name, and generic "leaves" files take their species
    // name from it.
    if rel_dir.len() >= 4 {
        leaf.texture_prefix = format!("{}/", rel_dir[3]);
        if leaf.block_name == "leaves" {
            leaf.block_name = format!("{}_leaves", rel_dir[3]);
        }
    }
    Some(leaf)
}

fn copy_tree(src: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)?;
    let mut entries: Vec<_> = fs::read_dir(src)?.flatten().map(|e| e.path()).collect();
    entries.sort();
    for path in entries {
        let Some(name) = path.file_name() else { continue };
        let target = dest.join(name);
        if path.is_dir() {
            copy_tree(&path, &target)?;
        } else {
            fs::copy(&path, &target)?;
        }
    }
    Ok(())
}
