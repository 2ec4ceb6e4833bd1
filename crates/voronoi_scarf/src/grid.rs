//! Uniform bucketing grid over the raster plane.
//!
//! [`SpatialGrid`] stores at most one point index per cell. With a cell side of
//! `floor(d / sqrt(2))` the cell diagonal is shorter than the minimum seed distance `d`, so two
//! accepted seeds can never share a cell. Points themselves live in the caller's sequence;
//! the grid only records indices into it.
use glam::Vec2;

use crate::error::{Error, Result};

/// Grid of cells, each empty or holding the index of a single point.
#[derive(Clone, Debug)]
pub struct SpatialGrid {
    cell_size: f32,
    cols: usize,
    rows: usize,
    cells: Vec<Option<usize>>,
}

impl SpatialGrid {
    /// Allocates an empty grid of `ceil(width / cell_size) x ceil(height / cell_size)` cells.
    pub fn new(width: f32, height: f32, cell_size: f32) -> Result<Self> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "grid cell size must be finite and > 0, got {cell_size}"
            )));
        }
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "grid extent must be > 0, got {width} x {height}"
            )));
        }

        let cols = (width / cell_size).ceil() as usize;
        let rows = (height / cell_size).ceil() as usize;

        Ok(Self {
            cell_size,
            cols,
            rows,
            cells: vec![None; cols * rows],
        })
    }

    /// Side length of a cell.
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Grid size as `(columns, rows)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    /// Number of cells holding a point.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    #[inline]
    fn cell_index(&self, x: usize, y: usize) -> usize {
        y * self.cols + x
    }

    /// Cell coordinates containing `point`, clamped to the grid.
    #[inline]
    pub fn cell_of(&self, point: Vec2) -> (usize, usize) {
        let x = ((point.x / self.cell_size).floor() as isize).clamp(0, self.cols as isize - 1);
        let y = ((point.y / self.cell_size).floor() as isize).clamp(0, self.rows as isize - 1);
        (x as usize, y as usize)
    }

    /// Index of the point stored in the cell containing `point`, if any.
    pub fn occupant(&self, point: Vec2) -> Option<usize> {
        let (x, y) = self.cell_of(point);
        self.cells[self.cell_index(x, y)]
    }

    /// Stores `index` in the cell containing `point`.
    ///
    /// Fails with [`Error::GridCellOccupied`] if the cell already holds a point; cells are
    /// written at most once.
    pub fn insert(&mut self, point: Vec2, index: usize) -> Result<()> {
        let (x, y) = self.cell_of(point);
        let idx = self.cell_index(x, y);
        match self.cells[idx] {
            Some(existing) => Err(Error::GridCellOccupied {
                cell_x: x,
                cell_y: y,
                existing,
                incoming: index,
            }),
            None => {
                self.cells[idx] = Some(index);
                Ok(())
            }
        }
    }

    /// Lazily yields the indices of all stored points strictly closer than `radius` to `center`.
    ///
    /// `points` is the sequence the stored indices refer to. Each candidate cell is visited
    /// once, so the output is duplicate free; order follows the row-major cell scan.
    pub fn query_radius<'a>(
        &'a self,
        points: &'a [Vec2],
        center: Vec2,
        radius: f32,
    ) -> impl Iterator<Item = usize> + 'a {
        let radius_squared = radius * radius;
        let (x0, x1) = self.span(center.x, radius, self.cols);
        let (y0, y1) = self.span(center.y, radius, self.rows);

        (y0..=y1)
            .flat_map(move |gy| (x0..=x1).map(move |gx| (gx as usize, gy as usize)))
            .filter_map(move |(gx, gy)| self.cells[self.cell_index(gx, gy)])
            .filter(move |&i| {
                points
                    .get(i)
                    .is_some_and(|p| p.distance_squared(center) < radius_squared)
            })
    }

    /// Inclusive range of cells along one axis that may hold points within `radius` of `c`.
    fn span(&self, c: f32, radius: f32, len: usize) -> (isize, isize) {
        let lo = (((c - radius) / self.cell_size).floor() as isize).max(0);
        let hi = ((((c + radius) / self.cell_size).floor() as isize) + 1).min(len as isize - 1);
        (lo, hi)
    }
}
