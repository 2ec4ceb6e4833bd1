use rand::rngs::StdRng;
use rand::SeedableRng;
use voronoi_scarf::prelude::*;
use voronoi_scarf_examples::{init_tracing, ImageSink};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ScarfConfig::default();
    let runner = ScarfRunner::try_new(config.clone())?;
    let mut rng = StdRng::seed_from_u64(42);
    let result = runner.run(&mut rng)?;

    println!(
        "{} seeds, {} edge pixels, {} base pixels",
        result.points.len(),
        result.stats.border_pixels + result.stats.edge_pixels,
        result.stats.base_pixels
    );

    let mut image = ImageSink::new(config.width, config.height);
    result.write_to(&mut image);
    image.save("scarf.png")?;
    image.save("scarf.tiff")?;
    Ok(())
}
