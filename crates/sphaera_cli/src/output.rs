//! Image export for finished and intermediate renders.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::RgbaImage;
use sphaera_renderer::DisplayBuffer;

/// Save the display buffer as an 8-bit image; format follows the extension.
pub fn save_display(display: &DisplayBuffer, path: &Path) -> Result<()> {
    let image = RgbaImage::from_raw(display.width(), display.height(), display.to_rgba8())
        .context("Display buffer does not match its dimensions")?;

    // PNM has no alpha channel
    let is_pnm = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "ppm" | "pnm"));

    let saved = if is_pnm {
        image::DynamicImage::ImageRgba8(image).to_rgb8().save(path)
    } else {
        image.save(path)
    };
    saved.with_context(|| format!("Failed to write image {}", path.display()))?;

    log::info!("Saved {}", path.display());
    Ok(())
}

/// Path for the snapshot taken after `pass`: `render.png` -> `render_0016.png`.
pub fn snapshot_path(output: &Path, pass: u32) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "render".to_string());
    let name = match output.extension() {
        Some(ext) => format!("{}_{:04}.{}", stem, pass, ext.to_string_lossy()),
        None => format!("{}_{:04}", stem, pass),
    };
    output.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_path() {
        assert_eq!(
            snapshot_path(Path::new("out/render.png"), 16),
            PathBuf::from("out/render_0016.png")
        );
        assert_eq!(
            snapshot_path(Path::new("frame"), 3),
            PathBuf::from("frame_0003")
        );
    }

    #[test]
    fn test_save_png() {
        let display = DisplayBuffer::new(4, 3).unwrap();
        let path = std::env::temp_dir().join(format!("sphaera_test_{}.png", std::process::id()));

        save_display(&display, &path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (4, 3));
        assert_eq!(loaded.get_pixel(0, 0).0, [0, 0, 0, 255]);

        std::fs::remove_file(&path).unwrap();
    }
}
