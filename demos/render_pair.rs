//! Example: Render a flat pattern and its shaded relief
//!
//! Writes `pattern.png`, `pattern_inverted.png` and `relief.png` into
//! `output/`. Set `RUST_LOG=debug` to see per-stage timings.

use std::error::Error;
use std::fs;
use std::path::Path;

use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use voronoi_relief::{PatternConfigBuilder, PointDistribution, ReliefPattern};

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .init();

    let config = PatternConfigBuilder::new()
        .seed(42)
        .point_count(60)?
        .point_distribution(PointDistribution::Random)
        .show_points(false)
        .wetness(0.8)?
        .build()?;

    info!(
        seed = config.seed,
        width = config.width,
        height = config.height,
        points = config.point_count,
        "rendering pattern pair"
    );

    let pattern = ReliefPattern::generate(config)?;

    let out = Path::new("output");
    fs::create_dir_all(out)?;
    pattern.raster().save(out.join("pattern.png"))?;
    pattern.inverted_raster().save(out.join("pattern_inverted.png"))?;
    pattern.rendered().save(out.join("relief.png"))?;

    let (lo, hi) = pattern.height_field().min_max();
    info!(min_height = lo, max_height = hi, dir = %out.display(), "saved images");
    Ok(())
}
