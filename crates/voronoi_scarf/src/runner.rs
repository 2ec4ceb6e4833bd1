//! High-level runner that samples seeds and rasterizes the cell pattern.
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::info;

use crate::config::ScarfConfig;
use crate::context::GenerationContext;
use crate::error::Result;
use crate::events::EventSink;
use crate::raster::{rasterize, PixelBuffer, PixelSink, RasterStats};
use crate::sampling::{PoissonDiskSampler, SamplingSummary};

/// Result of a generation run.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct GenerationResult {
    /// Seed points in placement order.
    pub points: Vec<Vec2>,
    /// Rendered two-color raster.
    pub buffer: PixelBuffer,
    /// Sampling pass summary.
    pub sampling: SamplingSummary,
    /// Raster pass pixel counts.
    pub stats: RasterStats,
}

impl GenerationResult {
    /// Hands the rendered raster to an external pixel sink.
    pub fn write_to(&self, sink: &mut dyn PixelSink) {
        sink.accept_buffer(&self.buffer);
    }
}

pub struct ScarfRunner {
    /// Run configuration applied to this runner.
    pub config: ScarfConfig,
}

impl ScarfRunner {
    pub fn try_new(config: ScarfConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Runs sampling and rasterization, returning the result.
    pub fn run(&self, rng: &mut impl RngCore) -> Result<GenerationResult> {
        generate(&self.config, rng, None)
    }

    pub fn run_with_events(
        &self,
        rng: &mut impl RngCore,
        sink: &mut dyn EventSink,
    ) -> Result<GenerationResult> {
        generate(&self.config, rng, Some(sink))
    }
}

/// Runs a full generation with `config`, drawing randomness from `rng`.
///
/// Fails before any work is done if the configuration is invalid.
pub fn generate<R: RngCore>(
    config: &ScarfConfig,
    rng: &mut R,
    sink: Option<&mut dyn EventSink>,
) -> Result<GenerationResult> {
    if let Some(s) = sink {
        generate_with_events(config, rng, s)
    } else {
        generate_with_events(config, rng, &mut ())
    }
}

pub fn generate_with_events<R: RngCore>(
    config: &ScarfConfig,
    rng: &mut R,
    sink: &mut dyn EventSink,
) -> Result<GenerationResult> {
    info!(
        "Generating {}x{} raster with seed spacing {}.",
        config.width, config.height, config.min_distance
    );
    let mut ctx = GenerationContext::new(config.clone())?;

    let sampling = PoissonDiskSampler::from_config(config).fill(&mut ctx, rng, sink)?;
    let (buffer, stats) = rasterize(&mut ctx, sink)?;

    Ok(GenerationResult {
        points: ctx.into_points(),
        buffer,
        sampling,
        stats,
    })
}

/// Runs a full generation with a [`StdRng`] seeded from `seed`.
pub fn generate_seeded(config: &ScarfConfig, seed: u64) -> Result<GenerationResult> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate(config, &mut rng, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::nearest_exhaustive;
    use crate::error::Error;
    use crate::events::{ScarfEvent, ScarfEventKind, VecSink};
    use crate::raster::{is_on_border, Rgb};

    fn scenario_config() -> ScarfConfig {
        ScarfConfig::new(50, 50)
            .with_min_distance(10.0)
            .with_border_width(2)
            .with_edge_stroke_width(2)
    }

    /// xorshift64 (13, 7, 17). Its stream is fixed, unlike `StdRng`'s across `rand` releases.
    struct XorShiftRng {
        state: u64,
    }

    impl RngCore for XorShiftRng {
        fn next_u32(&mut self) -> u32 {
            (self.next_u64() >> 32) as u32
        }

        fn next_u64(&mut self) -> u64 {
            let mut x = self.state;
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            self.state = x;
            x
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            for chunk in dest.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }
    }

    /// One line per row, `#` for edge-coloured pixels and `.` for base pixels.
    fn ascii_dump(buffer: &PixelBuffer, edge_color: Rgb) -> String {
        let (w, h) = buffer.dimensions();
        let mut out = String::with_capacity(((w + 1) * h) as usize);
        for y in 0..h {
            for x in 0..w {
                out.push(if buffer.get(x, y) == Some(edge_color) { '#' } else { '.' });
            }
            out.push('\n');
        }
        out
    }

    const GOLDEN_RASTER: &str = include_str!("../testdata/scarf_50x50_xorshift42.txt");

    #[test]
    fn xorshift_scenario_matches_golden_output() {
        let config = scenario_config();
        let mut rng = XorShiftRng { state: 42 };
        let result = generate(&config, &mut rng, None).unwrap();

        let expected = [
            Vec2::new(5.0, 30.006512),
            Vec2::new(17.353024, 22.99054),
            Vec2::new(8.881332, 49.055027),
            Vec2::new(13.808975, 7.735469),
            Vec2::new(20.407648, 33.15981),
            Vec2::new(37.023415, 26.097359),
            Vec2::new(22.386478, 49.790802),
            Vec2::new(32.403595, 12.311778),
            Vec2::new(40.121178, 43.569935),
            Vec2::new(48.075954, 17.53606),
            Vec2::new(7.6671257, 17.792782),
            Vec2::new(1.514246, 6.2777596),
            Vec2::new(46.244598, 32.193336),
            Vec2::new(49.389458, 2.6546826),
            Vec2::new(39.463688, 4.398836),
            Vec2::new(22.179338, 0.48482037),
        ];
        assert_eq!(result.points.len(), expected.len());
        for (i, (got, want)) in result.points.iter().zip(expected).enumerate() {
            assert!(got.abs_diff_eq(want, 1e-4), "point {i}: {got} != {want}");
        }
        assert_eq!(
            result.sampling,
            SamplingSummary {
                point_count: 16,
                iterations: 31
            }
        );

        assert_eq!(
            result.stats,
            RasterStats {
                border_pixels: 384,
                edge_pixels: 864,
                base_pixels: 1252,
                classified_pixels: 2455,
            }
        );
        assert_eq!(ascii_dump(&result.buffer, config.edge_color), GOLDEN_RASTER);
    }

    #[test]
    fn invalid_config_fails_before_sampling() {
        let config = scenario_config().with_border_width(26);
        assert!(matches!(
            ScarfRunner::try_new(config.clone()),
            Err(Error::InvalidConfig(_))
        ));

        let mut sink = VecSink::new();
        let mut rng = StdRng::seed_from_u64(42);
        let result = generate(&config, &mut rng, Some(&mut sink));
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
        assert!(sink.is_empty());
    }

    #[test]
    fn seeded_run_is_reproducible() {
        let config = scenario_config();
        let a = generate_seeded(&config, 42).unwrap();
        let b = generate_seeded(&config, 42).unwrap();

        assert!(!a.points.is_empty());
        assert_eq!(a.points, b.points);
        assert_eq!(a.buffer, b.buffer);
        assert_eq!(a.stats, b.stats);
        assert_eq!(a.buffer.dimensions(), (50, 50));
    }

    #[test]
    fn border_pixels_use_edge_color() {
        let config = scenario_config();
        let result = generate_seeded(&config, 42).unwrap();
        for (x, y, color) in result.buffer.enumerate_pixels() {
            if x < 2 || x >= 48 || y < 2 || y >= 48 {
                assert_eq!(color, config.edge_color, "({x}, {y})");
            }
        }
        assert_eq!(result.stats.border_pixels, 50 * 50 - 46 * 46);
    }

    #[test]
    fn seeds_keep_minimum_distance() {
        let config = ScarfConfig::new(160, 90)
            .with_min_distance(12.0)
            .with_border_width(3)
            .with_edge_stroke_width(2);
        let result = generate_seeded(&config, 7).unwrap();
        let points = &result.points;
        assert_eq!(result.sampling.point_count, points.len());
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                assert!(
                    points[i].distance(points[j]) >= 12.0 - 1e-4,
                    "points {i} and {j} too close"
                );
            }
        }
    }

    #[test]
    fn pixels_away_from_boundaries_are_base_color() {
        let config = scenario_config();
        let result = generate_seeded(&config, 42).unwrap();
        let class = |x: i64, y: i64| nearest_exhaustive(&result.points, Vec2::new(x as f32, y as f32));

        for (x, y, color) in result.buffer.enumerate_pixels() {
            if is_on_border(&config, x, y) {
                continue;
            }
            let (x, y) = (x as i64, y as i64);
            let own = class(x, y);
            let mut uniform = true;
            for ty in (y - 2).max(0)..=(y + 2).min(49) {
                for tx in (x - 2).max(0)..=(x + 2).min(49) {
                    if (tx - x).pow(2) + (ty - y).pow(2) <= 4 && class(tx, ty) != own {
                        uniform = false;
                    }
                }
            }
            let expected = if uniform {
                config.base_color
            } else {
                config.edge_color
            };
            assert_eq!(color, expected, "({x}, {y})");
        }
    }

    #[test]
    fn oversized_spacing_yields_one_uniform_cell() {
        let config = scenario_config().with_min_distance(100.0);
        let mut rng = StdRng::seed_from_u64(42);
        let mut sink = VecSink::only([ScarfEventKind::SamplingFinished, ScarfEventKind::Warning]);
        let result = ScarfRunner::try_new(config.clone())
            .unwrap()
            .run_with_events(&mut rng, &mut sink)
            .unwrap();

        assert_eq!(result.points.len(), 1);
        assert_eq!(result.stats.edge_pixels, 0);
        assert_eq!(result.stats.base_pixels, 46 * 46);
        assert_eq!(result.buffer.count(config.base_color), 46 * 46);

        let events = sink.into_inner();
        assert!(matches!(
            events[0],
            ScarfEvent::SamplingFinished {
                point_count: 1,
                iterations: 1
            }
        ));
        assert!(matches!(events[1], ScarfEvent::Warning { .. }));
    }

    #[test]
    fn write_to_forwards_every_pixel() {
        struct Counting {
            pixels: usize,
            edge: usize,
        }
        impl PixelSink for Counting {
            fn put_pixel(&mut self, _x: u32, _y: u32, color: Rgb) {
                self.pixels += 1;
                if color == Rgb::new(50, 50, 50) {
                    self.edge += 1;
                }
            }
        }

        let result = generate_seeded(&scenario_config(), 3).unwrap();
        let mut sink = Counting { pixels: 0, edge: 0 };
        result.write_to(&mut sink);
        assert_eq!(sink.pixels, 2500);
        assert_eq!(
            sink.edge,
            result.stats.border_pixels + result.stats.edge_pixels
        );
    }
}
