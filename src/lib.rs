//! # Better Leaves generator
//!
//! An offline asset-generation pipeline for the Better Leaves resourcepack.
//!
//! ## Overview
//!
//! Given a directory of leaf-block textures and a JSON override table, this
//! crate produces a tree of blockstate files, block/item model files and
//! procedurally composited textures, then packages everything into a
//! distributable ZIP archive. There is no runtime component: a run is one
//! deterministic batch transform.
//!
//! Each input texture is tiled 3×3 onto a double-size canvas and rounded
//! with a deterministically-chosen mask, while a cascade of override tables
//! decides which model templates the emitted JSON references.
//!
//! ## Quick Start
//!
//! ```ignore
//! use betterleaves_gen::{GenConfig, GenPaths, Generator, Overrides};
//!
//! let overrides = Overrides::load("input/overrides.json".as_ref())?;
//! let paths = GenPaths::new("input".into(), "base".into(), ".".into());
//! let generator = Generator::new(GenConfig::default(), paths, overrides);
//!
//! let processed = generator.run()?;
//! println!("{processed} leaf blocks processed");
//! ```

pub mod emit;
pub mod engine;
pub mod error;
pub mod leaf;
pub mod overrides;
pub mod pack;
pub mod report;
pub mod sidecar;
pub mod staging;
pub mod texture;

// Re-export main types for convenience
pub use emit::JsonStyle;
pub use engine::{GenConfig, GenPaths, Generator};
pub use error::{GenError, Result};
pub use leaf::{BaseModel, BlockstateTarget, CarpetBlock, LeafBlock};
pub use overrides::{OneOrMany, Overrides};
pub use sidecar::Sidecar;
pub use texture::TextureSources;
