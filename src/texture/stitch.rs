//! The texture compositor: 3×3 tiling plus mask-based edge rounding.
//!
//! A source texture of size `(w,h)` becomes a `(2w,2h)` canvas holding a
//! 3×3 grid of tiles centered on the canvas, with the outer ring clipped at
//! the edges. A rounding mask, chosen deterministically from the input
//! filename, is then applied as a per-pixel blend against a transparent
//! background.

use crate::error::{GenError, Result};
use crate::texture::{dir_is_nonempty, list_files_alphabetically};
use image::imageops::{self, FilterType};
use image::{GrayImage, Rgba, RgbaImage};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rustc_hash::FxHasher;
use std::collections::BTreeMap;
use std::fs;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// Resolution the default mask set is authored for.
const DEFAULT_MASK_DIR: &str = "16px";

const TRANSPARENT_WHITE: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Linear tile index for a grid offset; `x,y ∈ {-1,0,1}` map to 1..=9 with
/// the center tile at 5. Sidecar stitching tables use these indices.
pub fn tile_index(x: i32, y: i32) -> u32 {
    ((x + 2) + (y + 1) * 3) as u32
}

/// Top-left paste position of a tile. Truncates toward zero so odd texture
/// sizes place tiles the same way float math would.
pub fn paste_origin(width: u32, height: u32, x: i32, y: i32) -> (i64, i64) {
    let ox = (width as f64 / 2.0 + width as f64 * x as f64) as i64;
    let oy = (height as f64 / 2.0 + height as f64 * y as f64) as i64;
    (ox, oy)
}

/// Stable seed derived from the bare input filename, so repeated runs on
/// the same filename always pick the same mask.
fn filename_seed(filename: &str) -> u64 {
    let mut hasher = FxHasher::default();
    filename.hash(&mut hasher);
    hasher.finish()
}

/// Uniform mask pick, seeded by the filename.
pub fn choose_mask(masks: &[String], filename: &str) -> usize {
    let mut rng = ChaCha8Rng::seed_from_u64(filename_seed(filename));
    rng.gen_range(0..masks.len())
}

/// Mask candidates for a texture size: the size-specific directory when it
/// exists and is non-empty, else the 16px default. Candidates are listed in
/// case-insensitive alphabetical order. An empty result is fatal since
/// masks are required template assets.
pub fn list_masks(masks_root: &Path, width: u32) -> Result<(PathBuf, Vec<String>)> {
    let sized = masks_root.join(format!("{width}px"));
    let dir = if dir_is_nonempty(&sized) {
        sized
    } else {
        masks_root.join(DEFAULT_MASK_DIR)
    };
    let masks = list_files_alphabetically(&dir)
        .map_err(|_| GenError::NoMasks(dir.display().to_string()))?;
    if masks.is_empty() {
        return Err(GenError::NoMasks(dir.display().to_string()));
    }
    Ok((dir, masks))
}

/// Blend the canvas against a fully transparent background, using the mask
/// luminance as the per-pixel blend factor.
pub(crate) fn apply_mask(canvas: &mut RgbaImage, mask: &GrayImage) {
    for (x, y, pixel) in canvas.enumerate_pixels_mut() {
        let factor = mask.get_pixel(x, y)[0] as u32;
        let inverse = 255 - factor;
        let [r, g, b, a] = pixel.0;
        pixel.0 = [
            ((r as u32 * factor + 255 * inverse) / 255) as u8,
            ((g as u32 * factor + 255 * inverse) / 255) as u8,
            ((b as u32 * factor + 255 * inverse) / 255) as u8,
            ((a as u32 * factor) / 255) as u8,
        ];
    }
}

/// Composite `filename` from `source_dir` into the rounded 3×3 output
/// texture at `out_path`. Entries in `tile_map` replace individual grid
/// tiles. Returns the chosen mask index for reuse by the snowy variants.
pub fn stitch(
    source_dir: &Path,
    filename: &str,
    tile_map: &BTreeMap<u32, PathBuf>,
    masks_root: &Path,
    out_path: &Path,
) -> Result<usize> {
    let source = image::open(source_dir.join(filename))?.to_rgba8();
    let (width, height) = source.dimensions();
    let mut canvas = RgbaImage::from_pixel(width * 2, height * 2, TRANSPARENT_WHITE);

    for x in -1..=1 {
        for y in -1..=1 {
            let (ox, oy) = paste_origin(width, height, x, y);
            match tile_map.get(&tile_index(x, y)) {
                Some(tile_path) => {
                    let tile = image::open(tile_path)?.to_rgba8();
                    imageops::replace(&mut canvas, &tile, ox, oy);
                }
                None => imageops::replace(&mut canvas, &source, ox, oy),
            }
        }
    }

    let (mask_dir, masks) = list_masks(masks_root, width)?;
    let mask_index = choose_mask(&masks, filename);
    let mask = image::open(mask_dir.join(&masks[mask_index]))?.to_luma8();
    let mask = imageops::resize(&mask, canvas.width(), canvas.height(), FilterType::Nearest);
    apply_mask(&mut canvas, &mask);

    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)?;
    }
    canvas.save(out_path)?;
    Ok(mask_index)
}
