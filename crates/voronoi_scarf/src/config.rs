//! Generation configuration.
//!
//! [`ScarfConfig`] gathers every knob of a generation run. Defaults reproduce the classic
//! scarf: a 100 x 1200 raster with seeds 25 px apart, a 4 px border and 4 px cell strokes.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::raster::Rgb;

/// Default raster width in pixels.
pub const DEFAULT_WIDTH: u32 = 100;
/// Default raster height in pixels.
pub const DEFAULT_HEIGHT: u32 = 1200;
/// Default minimum distance between seed points.
pub const DEFAULT_MIN_DISTANCE: f32 = 25.0;
/// Default border width in pixels.
pub const DEFAULT_BORDER_WIDTH: u32 = 4;
/// Default cell edge stroke radius in pixels.
pub const DEFAULT_EDGE_STROKE_WIDTH: u32 = 4;
/// Default number of placement attempts per active point.
pub const DEFAULT_POPULATION_RETRIES: usize = 30;
/// Default cap on rejection-sampling draws for a single annulus candidate.
pub const DEFAULT_ANNULUS_ATTEMPT_LIMIT: usize = 1024;

/// Strategy used to find the nearest seed for a pixel.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NearestSearch {
    /// Query the spatial grid with a growing radius (`2d`, `4d`, ...) and pick the closest
    /// candidate of the first non-empty query.
    ///
    /// Any seed closer than the best candidate lies inside the same query disk, so the
    /// answer agrees with [`NearestSearch::Exhaustive`], ties included.
    #[default]
    RadiusDoubling,
    /// Scan every seed. Always returns the true nearest seed at O(n) per lookup.
    Exhaustive,
}

/// Configuration for a generation run.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub struct ScarfConfig {
    /// Raster width in pixels.
    pub width: u32,
    /// Raster height in pixels.
    pub height: u32,
    /// Minimum distance between any two seed points.
    pub min_distance: f32,
    /// Width of the frame painted along every raster edge.
    pub border_width: u32,
    /// Radius of the neighbourhood inspected when detecting cell boundaries.
    pub edge_stroke_width: u32,
    /// Placement attempts around an active point before it is retired.
    pub population_retries: usize,
    /// Color of borders and cell boundaries.
    pub edge_color: Rgb,
    /// Color of cell interiors.
    pub base_color: Rgb,
    /// Upper bound on rejection draws for one annulus candidate.
    pub annulus_attempt_limit: usize,
    /// Nearest-seed lookup strategy.
    pub nearest_search: NearestSearch,
}

impl Default for ScarfConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            min_distance: DEFAULT_MIN_DISTANCE,
            border_width: DEFAULT_BORDER_WIDTH,
            edge_stroke_width: DEFAULT_EDGE_STROKE_WIDTH,
            population_retries: DEFAULT_POPULATION_RETRIES,
            edge_color: Rgb::new(50, 50, 50),
            base_color: Rgb::new(255, 255, 255),
            annulus_attempt_limit: DEFAULT_ANNULUS_ATTEMPT_LIMIT,
            nearest_search: NearestSearch::RadiusDoubling,
        }
    }
}

impl ScarfConfig {
    /// Creates a configuration for a `width` x `height` raster with default spacing and colors.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Sets the minimum distance between seeds.
    pub fn with_min_distance(mut self, min_distance: f32) -> Self {
        self.min_distance = min_distance;
        self
    }

    /// Sets the border width.
    pub fn with_border_width(mut self, border_width: u32) -> Self {
        self.border_width = border_width;
        self
    }

    /// Sets the cell edge stroke radius.
    pub fn with_edge_stroke_width(mut self, edge_stroke_width: u32) -> Self {
        self.edge_stroke_width = edge_stroke_width;
        self
    }

    /// Sets the per-point placement retry budget.
    pub fn with_population_retries(mut self, population_retries: usize) -> Self {
        self.population_retries = population_retries;
        self
    }

    /// Sets the edge and base colors.
    pub fn with_colors(mut self, edge_color: Rgb, base_color: Rgb) -> Self {
        self.edge_color = edge_color;
        self.base_color = base_color;
        self
    }

    /// Sets the rejection-sampling cap for annulus candidates.
    pub fn with_annulus_attempt_limit(mut self, limit: usize) -> Self {
        self.annulus_attempt_limit = limit;
        self
    }

    /// Sets the nearest-seed lookup strategy.
    pub fn with_nearest_search(mut self, nearest_search: NearestSearch) -> Self {
        self.nearest_search = nearest_search;
        self
    }

    /// Side length of a spatial grid cell: `floor(min_distance / sqrt(2))`.
    pub fn grid_cell_size(&self) -> f32 {
        (self.min_distance / std::f32::consts::SQRT_2).floor()
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidConfig(
                "width and height must be > 0".into(),
            ));
        }
        if !self.min_distance.is_finite() || self.min_distance <= 0.0 {
            return Err(Error::InvalidConfig(
                "min_distance must be finite and > 0".into(),
            ));
        }
        if self.grid_cell_size() < 1.0 {
            return Err(Error::InvalidConfig(format!(
                "min_distance {} yields an empty grid cell; it must be >= sqrt(2)",
                self.min_distance
            )));
        }

        let half_extent = self.width.min(self.height) / 2;
        if self.border_width == 0 || self.border_width > half_extent {
            return Err(Error::InvalidConfig(format!(
                "border_width must be in 1..={half_extent}, got {}",
                self.border_width
            )));
        }
        if self.edge_stroke_width == 0 || self.edge_stroke_width > half_extent {
            return Err(Error::InvalidConfig(format!(
                "edge_stroke_width must be in 1..={half_extent}, got {}",
                self.edge_stroke_width
            )));
        }
        if self.population_retries == 0 {
            return Err(Error::InvalidConfig(
                "population_retries must be > 0".into(),
            ));
        }
        if self.annulus_attempt_limit == 0 {
            return Err(Error::InvalidConfig(
                "annulus_attempt_limit must be > 0".into(),
            ));
        }

        Ok(())
    }
}
