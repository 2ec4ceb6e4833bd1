use rand::rngs::StdRng;
use rand::SeedableRng;
use voronoi_scarf::prelude::*;
use voronoi_scarf_examples::{init_tracing, save_png};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ScarfConfig::new(240, 240)
        .with_min_distance(20.0)
        .with_border_width(4)
        .with_edge_stroke_width(3);

    let mut placed = 0usize;
    let mut exhausted = 0usize;
    let mut longest_branch = 0usize;
    let mut depth: Vec<usize> = vec![0];
    let mut sink = FnSink::new(|event| match event {
        ScarfEvent::PointPlaced { index, parent, .. } => {
            placed += 1;
            let d = depth.get(parent).copied().unwrap_or(0) + 1;
            if depth.len() <= index {
                depth.resize(index + 1, 0);
            }
            depth[index] = d;
            longest_branch = longest_branch.max(d);
        }
        ScarfEvent::PointExhausted { .. } => exhausted += 1,
        _ => {}
    });

    let mut rng = StdRng::seed_from_u64(2024);
    let result = ScarfRunner::try_new(config)?.run_with_events(&mut rng, &mut sink)?;
    drop(sink);

    println!(
        "{placed} placements, {exhausted} retirements, longest spawn chain {longest_branch}, {} iterations",
        result.sampling.iterations
    );
    save_png(&result.buffer, "scarf-growth.png")?;
    Ok(())
}
