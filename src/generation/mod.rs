//! Flat pattern generation
//!
//! Places seed points, computes their Voronoi ridges, and rasterizes the
//! boundaries (and optionally the seeds) into an RGB canvas.

mod points;
mod raster;
mod voronoi;

pub use points::{generate_points, PointField, SeedPoint};
pub(crate) use points::linspace;
pub use raster::{draw_disc, draw_segment, filled_canvas};
pub use voronoi::{auxiliary_points, compute_ridges, VoronoiRidge};

use std::time::Instant;

use image::RgbImage;
use tracing::debug;

use crate::config::{PatternConfig, Rgb};
use crate::error::{PatternError, Result};

/// The flat pattern image
pub type RasterImage = RgbImage;

/// Drawing options for the flat pattern
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterStyle {
    /// Colour of the cell boundary strokes
    pub edge_color: Rgb,
    /// Colour of the seed markers
    pub point_color: Rgb,
    /// Canvas fill colour
    pub background_color: Rgb,
    /// Stroke width in pixels
    pub edge_thickness: u32,
    /// Seed marker radius in pixels
    pub point_radius: u32,
    /// Whether seed markers are drawn
    pub show_points: bool,
}

impl RasterStyle {
    /// Take the drawing options out of a full configuration
    pub fn from_config(config: &PatternConfig) -> Self {
        Self {
            edge_color: config.edge_color,
            point_color: config.point_color,
            background_color: config.background_color,
            edge_thickness: config.edge_thickness,
            point_radius: config.point_radius,
            show_points: config.show_points,
        }
    }
}

/// Rasterize the Voronoi diagram of `points` onto a fresh canvas
///
/// The canvas is pre-filled with the background colour. Ridges with at least
/// one endpoint on the canvas are stroked in full, then the seed markers are
/// painted on top; later writes win.
///
/// # Errors
///
/// Returns `InvalidConfig` for a zero-sized canvas or zero stroke width, and
/// `GenerationFailed` if the seed set cannot be triangulated. Nothing is
/// drawn in either case.
pub fn build_raster(
    points: &[SeedPoint],
    width: u32,
    height: u32,
    style: &RasterStyle,
) -> Result<RasterImage> {
    if width == 0 {
        return Err(PatternError::invalid("width", width, "must be positive"));
    }
    if height == 0 {
        return Err(PatternError::invalid("height", height, "must be positive"));
    }
    if style.edge_thickness == 0 {
        return Err(PatternError::invalid(
            "edge_thickness",
            style.edge_thickness,
            "must be a positive pixel count",
        ));
    }

    let start = Instant::now();
    let (w, h) = (width as f64, height as f64);
    let ridges = compute_ridges(points, w, h)?;
    let partition_time = start.elapsed();

    let mut image = filled_canvas(width, height, style.background_color);

    let mut drawn = 0usize;
    for ridge in ridges.iter().filter(|r| r.touches_canvas(w, h)) {
        draw_segment(&mut image, ridge.start, ridge.end, style.edge_color, style.edge_thickness);
        drawn += 1;
    }

    if style.show_points {
        for &point in points {
            // markers are skipped when the seed itself is off the canvas
            let (x, y) = (point.x.trunc(), point.y.trunc());
            if x >= 0.0 && x < w && y >= 0.0 && y < h {
                draw_disc(&mut image, point, style.point_radius, style.point_color);
            }
        }
    }

    debug!(
        seeds = points.len(),
        ridges = ridges.len(),
        drawn,
        partition_ms = partition_time.as_secs_f64() * 1e3,
        total_ms = start.elapsed().as_secs_f64() * 1e3,
        "rasterized voronoi pattern"
    );

    Ok(image)
}
