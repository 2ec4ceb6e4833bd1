use std::path::Path;

use anyhow::Context;
use image::{Rgb as ImageRgb, RgbImage};
use tracing_subscriber::EnvFilter;
use voronoi_scarf::prelude::{PixelBuffer, PixelSink, Rgb};

/// Installs a fmt subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Pixel sink backed by an [`RgbImage`].
pub struct ImageSink {
    image: RgbImage,
}

impl ImageSink {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbImage::new(width, height),
        }
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Encodes the collected pixels; the format follows the file extension (`.png`, `.tiff`).
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();
        self.image
            .save(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("Wrote {}.", path.display());
        Ok(())
    }
}

impl PixelSink for ImageSink {
    fn put_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        if x < self.image.width() && y < self.image.height() {
            self.image.put_pixel(x, y, ImageRgb(color.0));
        }
    }
}

/// Writes `buffer` to a PNG file at `path`.
pub fn save_png(buffer: &PixelBuffer, path: impl AsRef<Path>) -> anyhow::Result<()> {
    let (w, h) = buffer.dimensions();
    let mut sink = ImageSink::new(w, h);
    sink.accept_buffer(buffer);
    sink.save(path)
}
