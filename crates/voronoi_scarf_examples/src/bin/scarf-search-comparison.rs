use voronoi_scarf::prelude::*;
use voronoi_scarf_examples::{init_tracing, save_png};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let base = ScarfConfig::new(400, 300)
        .with_min_distance(18.0)
        .with_border_width(3)
        .with_edge_stroke_width(2)
        .with_colors(Rgb::new(20, 40, 90), Rgb::new(235, 225, 200));

    let doubling = generate_seeded(
        &base.clone().with_nearest_search(NearestSearch::RadiusDoubling),
        7,
    )?;
    let exhaustive = generate_seeded(
        &base.with_nearest_search(NearestSearch::Exhaustive),
        7,
    )?;

    let differing = doubling
        .buffer
        .pixels()
        .iter()
        .zip(exhaustive.buffer.pixels())
        .filter(|(a, b)| a != b)
        .count();
    println!(
        "{} seeds; {} of {} pixels differ between search strategies",
        doubling.points.len(),
        differing,
        doubling.buffer.pixels().len()
    );

    save_png(&doubling.buffer, "scarf-radius-doubling.png")?;
    save_png(&exhaustive.buffer, "scarf-exhaustive.png")?;
    Ok(())
}
