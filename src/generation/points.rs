//! Seed Point Distribution
//!
//! Places Voronoi seed points on a rectangular canvas.
//!
//! # Distributions
//!
//! - `Random`: independent uniform samples over `[0, width) x [0, height)`.
//! - `Grid`: an evenly spaced lattice whose column count follows the canvas
//!   aspect ratio, truncated to the requested count in row-major order and
//!   jittered with Gaussian noise to break up the regular pattern.
//!
//! Truncation keeps the first `count` lattice points rather than resampling the
//! lattice, so the last row can be partially filled and the bottom of the canvas
//! under-sampled. That shape is part of the look and is kept as-is.

use glam::DVec2;
use rand::Rng;
use std::f64::consts::PI;

use crate::config::PointDistribution;
use crate::error::{PatternError, Result};

/// Grid jitter standard deviation as a fraction of the shorter canvas side
const GRID_JITTER: f64 = 0.02;

/// A seed point in canvas pixel coordinates
pub type SeedPoint = DVec2;

/// Ordered seed points together with the request that produced them
#[derive(Debug, Clone, PartialEq)]
pub struct PointField {
    /// Seed points in generation order
    pub points: Vec<SeedPoint>,
    /// Distribution the points were drawn from
    pub distribution: PointDistribution,
    /// Canvas width the points were placed on
    pub width: u32,
    /// Canvas height the points were placed on
    pub height: u32,
}

impl PointField {
    /// Number of seed points
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the field holds no points
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Generate seed points under a distribution policy
///
/// Randomness is drawn only from `rng`, so a seeded generator reproduces the
/// same sequence on every call.
///
/// # Errors
///
/// Returns `InvalidConfig` if `count`, `width` or `height` is zero.
///
/// # Example
///
/// ```rust
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use voronoi_relief::{generate_points, PointDistribution};
///
/// let mut rng = ChaCha8Rng::seed_from_u64(42);
/// let field = generate_points(PointDistribution::Grid, 7, 300, 200, &mut rng).unwrap();
/// assert_eq!(field.len(), 7);
/// ```
pub fn generate_points<R: Rng + ?Sized>(
    distribution: PointDistribution,
    count: usize,
    width: u32,
    height: u32,
    rng: &mut R,
) -> Result<PointField> {
    if count == 0 {
        return Err(PatternError::invalid("point_count", count, "must be at least 1"));
    }
    if width == 0 {
        return Err(PatternError::invalid("width", width, "must be positive"));
    }
    if height == 0 {
        return Err(PatternError::invalid("height", height, "must be positive"));
    }

    let points = match distribution {
        PointDistribution::Random => random_points(count, width as f64, height as f64, rng),
        PointDistribution::Grid => grid_points(count, width as f64, height as f64, rng),
    };

    Ok(PointField {
        points,
        distribution,
        width,
        height,
    })
}

fn random_points<R: Rng + ?Sized>(count: usize, width: f64, height: f64, rng: &mut R) -> Vec<SeedPoint> {
    (0..count)
        .map(|_| {
            let x = rng.gen_range(0.0..width);
            let y = rng.gen_range(0.0..height);
            DVec2::new(x, y)
        })
        .collect()
}

fn grid_points<R: Rng + ?Sized>(count: usize, width: f64, height: f64, rng: &mut R) -> Vec<SeedPoint> {
    let (cols, rows) = grid_shape(count, width, height);
    let sigma = width.min(height) * GRID_JITTER;

    let xs = linspace(0.0, width, cols);
    let ys = linspace(0.0, height, rows);

    // Row-major lattice, tail dropped
    let lattice: Vec<SeedPoint> = ys
        .iter()
        .flat_map(|&y| xs.iter().map(move |&x| DVec2::new(x, y)))
        .take(count)
        .collect();

    lattice
        .into_iter()
        .map(|p| {
            let dx = gaussian(rng, sigma);
            let dy = gaussian(rng, sigma);
            p + DVec2::new(dx, dy)
        })
        .collect()
}

/// Lattice columns and rows for `count` points on a `width x height` canvas
///
/// Always returns at least `count` lattice slots.
pub(crate) fn grid_shape(count: usize, width: f64, height: f64) -> (usize, usize) {
    let cols = ((count as f64 * width / height).sqrt().ceil() as usize).max(1);
    let rows = count.div_ceil(cols).max(1);
    (cols, rows)
}

/// `n` evenly spaced samples over `[start, end]`, both ends included
pub(crate) fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n).map(|i| start + step * i as f64).collect()
        }
    }
}

/// Zero-mean normal sample (Box-Muller)
fn gaussian<R: Rng + ?Sized>(rng: &mut R, std_dev: f64) -> f64 {
    // 1 - u keeps the log argument in (0, 1]
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos() * std_dev
}
