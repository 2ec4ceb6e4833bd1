//! Two-color rasterization of cell boundaries.
//!
//! A pixel is painted with the edge color when it lies in the border frame or when some pixel
//! within the edge stroke disk around it belongs to a different seed. Everything else gets
//! the base color.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::ScarfConfig;
use crate::context::GenerationContext;
use crate::error::Result;
use crate::events::{EventSink, ScarfEvent, ScarfEventKind};

/// 8-bit RGB color.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb(pub [u8; 3]);

impl Rgb {
    pub const BLACK: Rgb = Rgb([0, 0, 0]);
    pub const WHITE: Rgb = Rgb([255, 255, 255]);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self([r, g, b])
    }
}

/// Receiver for rendered pixels, e.g. an image encoder.
pub trait PixelSink {
    fn put_pixel(&mut self, x: u32, y: u32, color: Rgb);

    /// Accepts a whole buffer. Defaults to one [`Self::put_pixel`] call per pixel in row-major
    /// order.
    fn accept_buffer(&mut self, buffer: &PixelBuffer) {
        for (x, y, color) in buffer.enumerate_pixels() {
            self.put_pixel(x, y, color);
        }
    }
}

/// Row-major buffer of colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl PixelBuffer {
    /// Create a `width` x `height` buffer filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    /// Size of the buffer as `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Color at `(x, y)`, or `None` outside the buffer.
    pub fn get(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Iterates `(x, y, color)` in row-major order.
    pub fn enumerate_pixels(&self) -> impl Iterator<Item = (u32, u32, Rgb)> + '_ {
        let w = self.width.max(1) as usize;
        self.pixels
            .iter()
            .enumerate()
            .map(move |(i, c)| ((i % w) as u32, (i / w) as u32, *c))
    }

    /// Number of pixels painted with `color`.
    pub fn count(&self, color: Rgb) -> usize {
        self.pixels.iter().filter(|c| **c == color).count()
    }

    /// Interleaved RGB8 bytes, row-major.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| c.0).collect()
    }
}

impl PixelSink for PixelBuffer {
    fn put_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        if x < self.width && y < self.height {
            let i = y as usize * self.width as usize + x as usize;
            self.pixels[i] = color;
        }
    }
}

/// Pixel counts of a finished raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RasterStats {
    /// Pixels in the border frame.
    pub border_pixels: usize,
    /// Pixels on a cell boundary, outside the frame.
    pub edge_pixels: usize,
    /// Pixels painted with the base color.
    pub base_pixels: usize,
    /// Entries in the classification cache after rasterization.
    pub classified_pixels: usize,
}

/// Whether `(x, y)` lies within `border_width` of any raster edge.
pub fn is_on_border(config: &ScarfConfig, x: u32, y: u32) -> bool {
    let b = config.border_width;
    x < b || x + b >= config.width || y < b || y + b >= config.height
}

/// Whether any pixel within the edge stroke disk of `(x, y)` belongs to another seed.
pub fn is_on_edge(ctx: &mut GenerationContext, x: u32, y: u32) -> Result<bool> {
    let center = ctx.classify(x, y)?;

    let r = ctx.config().edge_stroke_width as i64;
    let (w, h) = (ctx.config().width as i64, ctx.config().height as i64);
    let r2 = r * r;
    let (x, y) = (x as i64, y as i64);

    for ty in (y - r).max(0)..=(y + r).min(h - 1) {
        for tx in (x - r).max(0)..=(x + r).min(w - 1) {
            let (dx, dy) = (tx - x, ty - y);
            if dx * dx + dy * dy > r2 {
                continue;
            }
            if ctx.classify(tx as u32, ty as u32)? != center {
                return Ok(true);
            }
        }
    }

    Ok(false)
}

/// Paints every pixel of a sampled context, each exactly once.
pub fn rasterize(
    ctx: &mut GenerationContext,
    sink: &mut dyn EventSink,
) -> Result<(PixelBuffer, RasterStats)> {
    let (width, height) = (ctx.config().width, ctx.config().height);
    let (edge_color, base_color) = (ctx.config().edge_color, ctx.config().base_color);

    if sink.wants(ScarfEventKind::RasterStarted) {
        sink.send(ScarfEvent::RasterStarted {
            size: (width, height),
        });
    }
    if ctx.points().len() == 1 {
        warn!("Only one seed was placed; the raster has no cell boundaries.");
        if sink.wants(ScarfEventKind::Warning) {
            sink.send(ScarfEvent::Warning {
                context: "raster".into(),
                message: "Single seed; no cell boundaries".into(),
            });
        }
    }

    let mut stats = RasterStats::default();
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            let color = if is_on_border(ctx.config(), x, y) {
                stats.border_pixels += 1;
                edge_color
            } else if is_on_edge(ctx, x, y)? {
                stats.edge_pixels += 1;
                edge_color
            } else {
                stats.base_pixels += 1;
                base_color
            };
            pixels.push(color);
        }
        if y % 256 == 255 {
            debug!("Rasterized {} of {} rows.", y + 1, height);
        }
    }
    stats.classified_pixels = ctx.cache().len();

    info!(
        "Rasterized {}x{}: {} border, {} edge, {} base pixels.",
        width, height, stats.border_pixels, stats.edge_pixels, stats.base_pixels
    );
    if sink.wants(ScarfEventKind::RasterFinished) {
        sink.send(ScarfEvent::RasterFinished { stats });
    }

    Ok((
        PixelBuffer {
            width,
            height,
            pixels,
        },
        stats,
    ))
}
