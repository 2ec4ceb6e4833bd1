//! Poisson disk (dart throwing) seed sampling.
//!
//! See "Fast Poisson Disk Sampling in Arbitrary Dimensions" (Bridson, 2007). Seeds are grown
//! from a random start point: an active point spawns candidates in the annulus `[d, 2d]`
//! around itself and is retired once a whole batch of candidates is rejected.
use glam::Vec2;
use rand::RngCore;
use tracing::{debug, info, warn};

use crate::config::ScarfConfig;
use crate::context::GenerationContext;
use crate::error::{Error, Result};
use crate::events::{EventSink, ScarfEvent, ScarfEventKind};

/// Generate a random float in the range [0, 1].
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

/// Uniform random index below `len` (Lemire's multiply-shift with rejection). `len` must be
/// non-zero.
#[inline]
fn rand_index(rng: &mut dyn RngCore, len: usize) -> usize {
    let range = len as u64;
    let threshold = range.wrapping_neg() % range;
    loop {
        let m = (rng.next_u64() as u128) * (range as u128);
        if (m as u64) >= threshold {
            return (m >> 64) as usize;
        }
    }
}

/// Outcome of a sampling pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingSummary {
    /// Number of seeds placed.
    pub point_count: usize,
    /// Number of active-list iterations.
    pub iterations: usize,
}

/// Poisson disk sampler parameters.
#[derive(Debug, Clone)]
pub struct PoissonDiskSampler {
    /// Minimum distance between seeds.
    pub min_distance: f32,
    /// Candidates tried around an active point before it is retired.
    pub retries: usize,
    /// Maximum rejection draws for a single annulus candidate.
    pub annulus_attempt_limit: usize,
}

impl PoissonDiskSampler {
    pub fn new(min_distance: f32, retries: usize, annulus_attempt_limit: usize) -> Self {
        Self {
            min_distance,
            retries,
            annulus_attempt_limit,
        }
    }

    pub fn from_config(config: &ScarfConfig) -> Self {
        Self::new(
            config.min_distance,
            config.population_retries,
            config.annulus_attempt_limit,
        )
    }

    /// Draws a point uniformly from the annulus `[min_radius, max_radius]` around `center`
    /// by rejection over the bounding square.
    pub fn displaced_point(
        &self,
        center: Vec2,
        min_radius: f32,
        max_radius: f32,
        rng: &mut dyn RngCore,
    ) -> Result<Vec2> {
        let min2 = min_radius * min_radius;
        let max2 = max_radius * max_radius;

        for _ in 0..self.annulus_attempt_limit {
            let candidate = Vec2::new(
                center.x - max_radius + rand01(rng) * 2.0 * max_radius,
                center.y - max_radius + rand01(rng) * 2.0 * max_radius,
            );
            let d2 = candidate.distance_squared(center);
            if d2 >= min2 && d2 <= max2 {
                return Ok(candidate);
            }
        }

        Err(Error::SamplingStalled {
            iterations: self.annulus_attempt_limit,
        })
    }

    /// Fills an empty context with seeds until the active list drains.
    pub fn fill(
        &self,
        ctx: &mut GenerationContext,
        rng: &mut dyn RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<SamplingSummary> {
        if !ctx.points().is_empty() {
            return Err(Error::AlreadySampled);
        }

        let w = ctx.config().width as f32;
        let h = ctx.config().height as f32;
        let half = self.min_distance / 2.0;

        // Start inside [d/2, extent - d/2]; axes narrower than d collapse to their center.
        let lo_x = half.min(w / 2.0);
        let hi_x = (w - half).max(w / 2.0);
        let lo_y = half.min(h / 2.0);
        let hi_y = (h - half).max(h / 2.0);
        let seed = Vec2::new(
            lo_x + rand01(rng) * (hi_x - lo_x),
            lo_y + rand01(rng) * (hi_y - lo_y),
        );
        ctx.insert_point(seed)?;

        if sink.wants(ScarfEventKind::SamplingStarted) {
            sink.send(ScarfEvent::SamplingStarted {
                seed,
                grid_size: ctx.grid().dimensions(),
            });
        }

        // Every iteration either places a point or retires one, so a run that drains the
        // active list takes exactly 2 * points - 1 iterations, and points never outnumber
        // cells. The bound below only trips if that accounting is broken.
        let (cols, rows) = ctx.grid().dimensions();
        let max_iterations = 2 * cols * rows + 1;

        let mut iterations = 0;
        while !ctx.active.is_empty() {
            iterations += 1;
            if iterations > max_iterations {
                warn!(
                    "Sampling did not converge after {} iterations ({} points).",
                    max_iterations,
                    ctx.points().len()
                );
                return Err(Error::SamplingStalled {
                    iterations: max_iterations,
                });
            }

            let slot = rand_index(rng, ctx.active.len());
            let parent = ctx.active[slot];
            let origin = ctx.points()[parent];

            let mut placed = None;
            for _ in 0..self.retries {
                let candidate =
                    self.displaced_point(origin, self.min_distance, 2.0 * self.min_distance, rng)?;
                if ctx.is_legal(candidate) {
                    placed = Some((ctx.insert_point(candidate)?, candidate));
                    break;
                }
            }

            match placed {
                Some((index, position)) => {
                    if sink.wants(ScarfEventKind::PointPlaced) {
                        sink.send(ScarfEvent::PointPlaced {
                            index,
                            parent,
                            position,
                        });
                    }
                }
                None => {
                    ctx.active.swap_remove(slot);
                    if sink.wants(ScarfEventKind::PointExhausted) {
                        sink.send(ScarfEvent::PointExhausted { index: parent });
                    }
                }
            }
        }

        let summary = SamplingSummary {
            point_count: ctx.points().len(),
            iterations,
        };
        debug!(
            "Grid {}x{} holds {} seeds.",
            cols,
            rows,
            ctx.grid().occupied_count()
        );
        info!(
            "Placed {} seeds in {} iterations.",
            summary.point_count, summary.iterations
        );
        if sink.wants(ScarfEventKind::SamplingFinished) {
            sink.send(ScarfEvent::SamplingFinished {
                point_count: summary.point_count,
                iterations: summary.iterations,
            });
        }

        Ok(summary)
    }
}
