//! Snow overlay textures.
//!
//! Builds one `snowy_overlay<i>.png` per snowy rounding mask by compositing
//! the vanilla snow top sprite over a luminance-filtered snowy-side sprite
//! with the same 3×3-tile approach as the main compositor. Leaf models pick
//! the overlay matching their own mask index, keeping a block's rounded
//! shape and its snow cap visually consistent.

use crate::error::Result;
use crate::report;
use crate::texture::stitch::{apply_mask, paste_origin};
use crate::texture::{dir_is_nonempty, list_files_alphabetically, TextureSources};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::fs;
use std::path::Path;

/// Red-channel threshold below which a snowy-side pixel is considered dirt
/// rather than snow and made transparent.
const SNOW_BRIGHTNESS_THRESHOLD: u8 = 190;

const TRANSPARENT_WHITE: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Generate every snowy overlay texture. Returns the number of overlays
/// written (one per snowy mask).
pub fn generate_snowy_overlays(
    input_assets: &Path,
    masks_root: &Path,
    sources: &TextureSources,
    out_assets: &Path,
) -> Result<usize> {
    let out_dir = out_assets.join("betterleaves/textures/block");
    fs::create_dir_all(&out_dir)?;

    let base_dir = input_assets.join("minecraft/textures/block");
    let top_dir = sources.resolve(&base_dir, "snow.png");
    let top = image::open(top_dir.join("snow.png"))?.to_rgba8();
    let side = snowy_side_sprite(&base_dir, sources)?;

    let (width, height) = top.dimensions();
    let mut canvas = RgbaImage::from_pixel(width * 2, height * 2, TRANSPARENT_WHITE);
    for x in -1..=1 {
        let (ox, oy) = paste_origin(width, height, x, -1);
        imageops::replace(&mut canvas, &top, ox, oy);
        let (ox, oy) = paste_origin(width, height, x, 0);
        imageops::replace(&mut canvas, &side, ox, oy);
    }

    let sized = masks_root.join(format!("{width}px/snowy"));
    let mask_dir = if dir_is_nonempty(&sized) {
        sized
    } else {
        masks_root.join("16px/snowy")
    };
    if !mask_dir.is_dir() {
        // Snow caps are an optional extension; no masks means no overlays.
        return Ok(0);
    }

    let masks = list_files_alphabetically(&mask_dir)?;
    for (mask_index, mask_name) in masks.iter().enumerate() {
        let mask = image::open(mask_dir.join(mask_name))?.to_luma8();
        let mask =
            imageops::resize(&mask, canvas.width(), canvas.height(), FilterType::Nearest);
        let mut output = canvas.clone();
        apply_mask(&mut output, &mask);
        output.save(out_dir.join(format!("snowy_overlay{mask_index}.png")))?;
        report::detail(format!("Created mask: {mask_index} for {mask_name}"));
    }
    Ok(masks.len())
}

/// The snowy side sprite: `grass_block_snow` with every pixel too dark to
/// be snow made fully transparent.
fn snowy_side_sprite(base_dir: &Path, sources: &TextureSources) -> Result<RgbaImage> {
    let side_dir = sources.resolve(base_dir, "grass_block_snow.png");
    let mut side = image::open(side_dir.join("grass_block_snow.png"))?.to_rgba8();
    for pixel in side.pixels_mut() {
        if pixel.0[0] < SNOW_BRIGHTNESS_THRESHOLD {
            pixel.0 = [0, 0, 0, 0];
        }
    }
    Ok(side)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_png(path: &Path, width: u32, height: u32, color: [u8; 4]) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbaImage::from_pixel(width, height, Rgba(color))
            .save(path)
            .unwrap();
    }

    #[test]
    fn test_generates_one_overlay_per_mask() {
        let tmp = tempfile::tempdir().unwrap();
        let input_assets = tmp.path().join("input/assets");
        let masks_root = tmp.path().join("input/masks");
        let out_assets = tmp.path().join("assets");

        let block_dir = input_assets.join("minecraft/textures/block");
        write_png(&block_dir.join("snow.png"), 16, 16, [250, 250, 250, 255]);
        write_png(
            &block_dir.join("grass_block_snow.png"),
            16,
            16,
            [200, 200, 200, 255],
        );
        for name in ["a.png", "b.png"] {
            write_png(&masks_root.join("16px/snowy").join(name), 16, 16, [255, 255, 255, 255]);
        }

        let sources = TextureSources::new(tmp.path().join("input/texturepacks"), None);
        let count =
            generate_snowy_overlays(&input_assets, &masks_root, &sources, &out_assets).unwrap();
        assert_eq!(count, 2);

        for index in 0..2 {
            let overlay = image::open(
                out_assets.join(format!("betterleaves/textures/block/snowy_overlay{index}.png")),
            )
            .unwrap()
            .to_rgba8();
            assert_eq!(overlay.dimensions(), (32, 32));
        }
    }

    #[test]
    fn test_dark_side_pixels_become_transparent() {
        let tmp = tempfile::tempdir().unwrap();
        let block_dir = tmp.path().join("input/assets/minecraft/textures/block");
        write_png(&block_dir.join("grass_block_snow.png"), 2, 2, [100, 100, 100, 255]);

        let sources = TextureSources::new(tmp.path().join("input/texturepacks"), None);
        let side = snowy_side_sprite(&block_dir, &sources).unwrap();
        assert!(side.pixels().all(|pixel| pixel.0 == [0, 0, 0, 0]));
    }

    #[test]
    fn test_missing_snowy_masks_yield_no_overlays() {
        let tmp = tempfile::tempdir().unwrap();
        let input_assets = tmp.path().join("input/assets");
        let block_dir = input_assets.join("minecraft/textures/block");
        write_png(&block_dir.join("snow.png"), 16, 16, [250, 250, 250, 255]);
        write_png(&block_dir.join("grass_block_snow.png"), 16, 16, [200, 200, 200, 255]);

        let sources = TextureSources::new(tmp.path().join("input/texturepacks"), None);
        let count = generate_snowy_overlays(
            &input_assets,
            &tmp.path().join("input/masks"),
            &sources,
            &tmp.path().join("assets"),
        )
        .unwrap();
        assert_eq!(count, 0);
    }
}
