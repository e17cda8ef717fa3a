//! Pack metadata and the final distributable archive.

use crate::error::{GenError, Result};
use chrono::Datelike;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;

/// Substitution tokens supported in the `pack.mcmeta` template.
const VERSION_TOKEN: &str = "${version}";
const EDITION_TOKEN: &str = "${edition}";
const YEAR_TOKEN: &str = "${year}";

/// Copy `input/pack.mcmeta` to the output root, substituting the version,
/// edition and current-year tokens.
pub fn write_pack_metadata(
    input: &Path,
    output: &Path,
    version: &str,
    edition: &str,
) -> Result<()> {
    let template = input.join("pack.mcmeta");
    let contents = fs::read_to_string(&template)
        .map_err(|e| GenError::MissingInput(format!("{}: {}", template.display(), e)))?;
    let year = chrono::Local::now().year().to_string();
    let contents = contents
        .replace(VERSION_TOKEN, version)
        .replace(EDITION_TOKEN, edition)
        .replace(YEAR_TOKEN, &year);
    fs::write(output.join("pack.mcmeta"), contents)?;
    Ok(())
}

/// Build the distributable archive: the whole `assets/` tree plus the pack
/// metadata files, deflate-compressed. Returns the archive path.
pub fn make_zip(output_root: &Path, archive_name: &str, programmer_art: bool) -> Result<PathBuf> {
    let archive_path = output_root.join(archive_name);
    let file = fs::File::create(&archive_path)?;
    let mut writer = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(9));

    add_tree(&mut writer, output_root, &output_root.join("assets"), options)?;
    add_file(&mut writer, &output_root.join("pack.mcmeta"), "pack.mcmeta", options)?;

    // The programmer-art edition ships its own icon under the regular name.
    let icon = if programmer_art {
        "pack_programmer_art.png"
    } else {
        "pack.png"
    };
    add_optional(&mut writer, &output_root.join(icon), "pack.png", options)?;
    add_optional(&mut writer, &output_root.join("LICENSE"), "LICENSE", options)?;
    add_optional(&mut writer, &output_root.join("README.md"), "README.md", options)?;

    writer.finish()?;
    Ok(archive_path)
}

fn add_tree(
    writer: &mut zip::ZipWriter<fs::File>,
    root: &Path,
    dir: &Path,
    options: SimpleFileOptions,
) -> Result<()> {
    if !dir.is_dir() {
        return Err(GenError::MissingInput(format!(
            "assets tree at {}",
            dir.display()
        )));
    }
    let mut entries: Vec<_> = fs::read_dir(dir)?.flatten().map(|e| e.path()).collect();
    entries.sort();

    for path in entries {
        if path.is_dir() {
            add_tree(writer, root, &path, options)?;
        } else {
            let name = path
                .strip_prefix(root)
                .unwrap_or(&path)
                .to_string_lossy()
                .replace('\\', "/");
            add_file(writer, &path, &name, options)?;
        }
    }
    Ok(())
}

fn add_file(
    writer: &mut zip::ZipWriter<fs::File>,
    path: &Path,
    name: &str,
    options: SimpleFileOptions,
) -> Result<()> {
    writer.start_file(name.to_string(), options)?;
    let mut file = fs::File::open(path)?;
    io::copy(&mut file, writer)?;
    Ok(())
}

fn add_optional(
    writer: &mut zip::ZipWriter<fs::File>,
    path: &Path,
    name: &str,
    options: SimpleFileOptions,
) -> Result<()> {
    if path.is_file() {
        add_file(writer, path, name, options)
    } else {
        warn!("skipping absent pack file {}", path.display());
        Ok(())
    }
}
