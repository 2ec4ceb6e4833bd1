//! Nearest-seed classification of pixels.
//!
//! Two lookups are provided: [`nearest_by_radius_doubling`], which queries the spatial grid
//! with a growing radius, and [`nearest_exhaustive`], a linear scan. Both break distance ties
//! toward the lowest point index. Results are memoized in a [`ClassificationCache`].
use std::collections::HashMap;

use glam::Vec2;

use crate::grid::SpatialGrid;

/// Memo of pixel -> nearest seed index.
///
/// Entries are only ever added. The cache stays valid because points are frozen once
/// classification begins.
#[derive(Debug, Default, Clone)]
pub struct ClassificationCache {
    entries: HashMap<(u32, u32), usize>,
}

impl ClassificationCache {
    /// Creates a new, empty cache.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Cached seed index for pixel `(x, y)`, if classified.
    pub fn get(&self, x: u32, y: u32) -> Option<usize> {
        self.entries.get(&(x, y)).copied()
    }

    /// Stores `index` for `(x, y)` unless an entry exists, returning the stored value.
    pub fn insert_if_absent(&mut self, x: u32, y: u32, index: usize) -> usize {
        *self.entries.entry((x, y)).or_insert(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Picks the candidate closest to `coord`; equal distances resolve to the lowest index.
fn closest_of<I>(points: &[Vec2], candidates: I, coord: Vec2) -> Option<usize>
where
    I: IntoIterator<Item = usize>,
{
    let mut best: Option<(f32, usize)> = None;
    for i in candidates {
        let Some(p) = points.get(i) else {
            continue;
        };
        let d2 = p.distance_squared(coord);
        best = match best {
            Some((bd, bi)) if bd < d2 || (bd == d2 && bi < i) => Some((bd, bi)),
            _ => Some((d2, i)),
        };
    }
    best.map(|(_, i)| i)
}

/// Nearest seed by scanning every point.
pub fn nearest_exhaustive(points: &[Vec2], coord: Vec2) -> Option<usize> {
    closest_of(points, 0..points.len(), coord)
}

/// Nearest seed by querying `grid` with radius `2d, 4d, 8d, ...` until a query is non-empty.
///
/// The search falls back to [`nearest_exhaustive`] once the radius exceeds twice the grid's
/// extent, which only happens for coordinates far outside the raster.
pub fn nearest_by_radius_doubling(
    points: &[Vec2],
    grid: &SpatialGrid,
    coord: Vec2,
    min_distance: f32,
) -> Option<usize> {
    if points.is_empty() {
        return None;
    }
    if !coord.is_finite() || !min_distance.is_finite() || min_distance <= 0.0 {
        return nearest_exhaustive(points, coord);
    }

    let (cols, rows) = grid.dimensions();
    let extent = Vec2::new(cols as f32, rows as f32) * grid.cell_size();
    let limit = 2.0 * (extent.length() + coord.length());

    let mut radius = min_distance;
    loop {
        radius *= 2.0;
        if let Some(i) = closest_of(points, grid.query_radius(points, coord, radius), coord) {
            return Some(i);
        }
        if radius > limit {
            return nearest_exhaustive(points, coord);
        }
    }
}
