//! JSON asset emission.
//!
//! All writers go through one [`JsonStyle`] chosen per run, so the
//! minified/indented decision is an explicit value threaded through calls
//! rather than ambient state.

pub mod blockstate;
pub mod carpet;
pub mod model;
pub mod snowy;

use crate::error::Result;
use serde::Serialize;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Output encoding for every emitted JSON file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonStyle {
    pub minify: bool,
}

impl JsonStyle {
    pub fn pretty() -> Self {
        Self { minify: false }
    }

    pub fn minified() -> Self {
        Self { minify: true }
    }

    /// Serialize `value` to `path`, creating parent directories as needed.
    pub fn write<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(path)?;
        let mut writer = BufWriter::new(file);
        if self.minify {
            serde_json::to_writer(&mut writer, value)?;
        } else {
            serde_json::to_writer_pretty(&mut writer, value)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Re-encode every `.json` file under `dir` in minified form. Applied to
/// the copied template tree when minified output is requested.
pub fn minify_json_tree(dir: &Path) -> Result<()> {
    let mut entries: Vec<_> = fs::read_dir(dir)?.flatten().map(|e| e.path()).collect();
    entries.sort();

    for path in entries {
        if path.is_dir() {
            minify_json_tree(&path)?;
        } else if path.extension().map(|e| e == "json").unwrap_or(false) {
            let contents = fs::read_to_string(&path)?;
            let value: serde_json::Value = serde_json::from_str(&contents)?;
            fs::write(&path, serde_json::to_string(&value)?)?;
        }
    }
    Ok(())
}
