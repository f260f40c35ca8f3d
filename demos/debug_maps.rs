//! Example: Dump every intermediate of the relief stage
//!
//! Shades a grid pattern and writes the height map, normal map, diffuse
//! term, highlights and final image into `output/debug/`, one PNG each.

use std::error::Error;
use std::fs;
use std::path::Path;

use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use voronoi_relief::{diffuse, LightModel, PatternConfigBuilder, PointDistribution, ReliefPattern};

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_timer(fmt::time::uptime()))
        .init();

    let config = PatternConfigBuilder::new()
        .seed(7)
        .surface_seed(42)
        .size(640, 480)?
        .point_count(40)?
        .point_distribution(PointDistribution::Grid)
        .build()?;

    let pattern = ReliefPattern::generate(config)?;
    let relief = pattern.relief();

    let out = Path::new("output").join("debug");
    fs::create_dir_all(&out)?;

    pattern.raster().save(out.join("pattern.png"))?;

    // heights live in [0, bulge]; stretch to the full grey range
    let mut heights = relief.heights.clone();
    heights.normalize();
    heights.to_luma_image().save(out.join("height_map.png"))?;

    relief.normals.to_rgb_image().save(out.join("normal_map.png"))?;

    let light = LightModel::from_config(pattern.config());
    diffuse(&relief.normals, light.unit_direction())
        .to_luma_image()
        .save(out.join("diffuse.png"))?;
    relief.lighting.to_luma_image().save(out.join("lighting.png"))?;
    relief.specular.to_luma_image().save(out.join("specular.png"))?;
    pattern.rendered().save(out.join("final_result.png"))?;

    info!(dir = %out.display(), "saved debug maps");
    Ok(())
}
