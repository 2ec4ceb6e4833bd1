//! Per-run generation state.
//!
//! A [`GenerationContext`] owns everything a run mutates: the point sequence, the spatial
//! grid, the active list and the classification cache. Separate contexts share nothing, so
//! runs can be repeated or executed side by side without interfering.
use glam::Vec2;

use crate::classify::{nearest_by_radius_doubling, nearest_exhaustive, ClassificationCache};
use crate::config::{NearestSearch, ScarfConfig};
use crate::error::{Error, Result};
use crate::grid::SpatialGrid;

pub struct GenerationContext {
    config: ScarfConfig,
    points: Vec<Vec2>,
    grid: SpatialGrid,
    pub(crate) active: Vec<usize>,
    cache: ClassificationCache,
}

impl GenerationContext {
    /// Validates `config` and allocates an empty context for it.
    pub fn new(config: ScarfConfig) -> Result<Self> {
        config.validate()?;
        let grid = SpatialGrid::new(
            config.width as f32,
            config.height as f32,
            config.grid_cell_size(),
        )?;

        Ok(Self {
            config,
            points: Vec::new(),
            grid,
            active: Vec::new(),
            cache: ClassificationCache::new(),
        })
    }

    pub fn config(&self) -> &ScarfConfig {
        &self.config
    }

    /// Placed points in placement order. A point's position in this slice is its identity.
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Indices of points still used to spawn neighbours.
    pub fn active(&self) -> &[usize] {
        &self.active
    }

    pub fn cache(&self) -> &ClassificationCache {
        &self.cache
    }

    /// Consumes the context, returning the point sequence.
    pub fn into_points(self) -> Vec<Vec2> {
        self.points
    }

    /// Whether `point` lies inside the raster and keeps the minimum distance to every seed.
    pub fn is_legal(&self, point: Vec2) -> bool {
        let w = self.config.width as f32;
        let h = self.config.height as f32;
        if point.x < 0.0 || point.x > w || point.y < 0.0 || point.y > h {
            return false;
        }

        self.grid
            .query_radius(&self.points, point, self.config.min_distance)
            .next()
            .is_none()
    }

    /// Appends `point` to the sequence and the active list and records it in the grid.
    ///
    /// The caller is responsible for the distance check; see [`Self::is_legal`]. Points cannot
    /// be added once classification has started.
    pub fn insert_point(&mut self, point: Vec2) -> Result<usize> {
        if !self.cache.is_empty() {
            return Err(Error::PointsFrozen);
        }
        let index = self.points.len();
        self.grid.insert(point, index)?;
        self.points.push(point);
        self.active.push(index);
        Ok(index)
    }

    /// Index of the seed closest to pixel `(x, y)`, memoized per pixel.
    pub fn classify(&mut self, x: u32, y: u32) -> Result<usize> {
        if self.points.is_empty() {
            return Err(Error::NoSeedPoints);
        }
        if let Some(index) = self.cache.get(x, y) {
            return Ok(index);
        }

        let coord = Vec2::new(x as f32, y as f32);
        let found = match self.config.nearest_search {
            NearestSearch::RadiusDoubling => nearest_by_radius_doubling(
                &self.points,
                &self.grid,
                coord,
                self.config.min_distance,
            ),
            NearestSearch::Exhaustive => nearest_exhaustive(&self.points, coord),
        };
        let index = found.ok_or(Error::NoSeedPoints)?;

        Ok(self.cache.insert_if_absent(x, y, index))
    }
}
