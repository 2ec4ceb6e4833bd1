#![forbid(unsafe_code)]
//! voronoi_scarf: blue-noise seeded cell patterns rendered as two-color rasters.
//!
//! Modules:
//! - grid: uniform bucketing grid with radius queries
//! - sampling: Poisson disk (dart throwing) seed placement
//! - classify: memoized nearest-seed lookup per pixel
//! - raster: border and cell boundary detection, pixel buffers and sinks
//! - context, config, runner, events: run state, settings, pipeline and observation
//!
//! Image encoding is left to the caller; see [`raster::PixelSink`].
pub mod classify;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod grid;
pub mod raster;
pub mod runner;
pub mod sampling;

/// Convenient re-exports for common types. Import with `use voronoi_scarf::prelude::*;`.
pub mod prelude {
    pub use crate::classify::{nearest_by_radius_doubling, nearest_exhaustive, ClassificationCache};
    pub use crate::config::{NearestSearch, ScarfConfig};
    pub use crate::context::GenerationContext;
    pub use crate::error::{Error, Result};
    pub use crate::events::{
        EventSink, FnSink, MultiSink, ScarfEvent, ScarfEventKind, VecSink,
    };
    pub use crate::grid::SpatialGrid;
    pub use crate::raster::{
        is_on_border, is_on_edge, rasterize, PixelBuffer, PixelSink, RasterStats, Rgb,
    };
    pub use crate::runner::{
        generate, generate_seeded, generate_with_events, GenerationResult, ScarfRunner,
    };
    pub use crate::sampling::{PoissonDiskSampler, SamplingSummary};
}
