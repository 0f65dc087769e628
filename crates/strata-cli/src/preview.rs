//! PNG export of world previews.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, bail};
use strata_worldgen::debug_viz::DebugImage;

/// Pixels per cell edge in exported previews.
pub const PNG_SCALE: u32 = 4;

/// Nearest-neighbour upscale by an integer `factor`.
pub fn upscale(image: &DebugImage, factor: u32) -> DebugImage {
    let factor = factor.max(1);
    let mut scaled = DebugImage::new(image.width * factor, image.height * factor);

    for y in 0..scaled.height {
        for x in 0..scaled.width {
            if let Some(color) = image.get_pixel(x / factor, y / factor) {
                scaled.set_pixel(x, y, color);
            }
        }
    }

    scaled
}

/// Encode `image` as an 8-bit RGBA PNG at `path`, creating parent directories.
pub fn write_png(image: &DebugImage, path: &Path) -> anyhow::Result<()> {
    if image.pixel_count() == 0 {
        bail!("world preview is empty; nothing to write to {}", path.display());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), image.width, image.height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header().context("failed to write PNG header")?;
    writer
        .write_image_data(&image.pixels)
        .context("failed to write PNG data")?;
    writer.finish().context("failed to finish PNG")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upscale_repeats_pixels() {
        let mut image = DebugImage::new(2, 1);
        image.set_pixel(1, 0, [10, 20, 30, 255]);

        let scaled = upscale(&image, 3);
        assert_eq!(scaled.dimensions(), (6, 3));
        assert_eq!(scaled.get_pixel(3, 2), Some([10, 20, 30, 255]));
        assert_eq!(scaled.get_pixel(2, 2), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_png_written_with_image_dimensions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("previews").join("world.png");
        let image = DebugImage::filled(5, 3, [90, 170, 60, 255]);

        write_png(&image, &path).unwrap();

        let decoder = png::Decoder::new(File::open(&path).unwrap());
        let reader = decoder.read_info().unwrap();
        let info = reader.info();
        assert_eq!((info.width, info.height), (5, 3));
        assert_eq!(info.color_type, png::ColorType::Rgba);
    }

    #[test]
    fn test_empty_image_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.png");
        assert!(write_png(&DebugImage::new(0, 0), &path).is_err());
        assert!(!path.exists());
    }
}
