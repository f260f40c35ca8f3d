//! Height field and normal estimation
//!
//! Turns the flat pattern into a bulged relief: every cell rises towards its
//! middle and falls to zero on its boundary strokes. The pipeline is
//! distance transform, normalization, a rounding curve, Gaussian smoothing,
//! optional procedural surface texture, and a final scale by the bulge
//! strength.

mod blur;
mod distance;
mod field;
mod normals;
mod surface;

pub use blur::{default_sigma, gaussian_blur, gaussian_kernel};
pub use distance::{distance_transform, interior_mask, luminance, INTERIOR_THRESHOLD};
pub use field::ScalarField;
pub use normals::{compute_normals, NormalField};
pub use surface::{procedural_surface, SurfaceConfig};

use std::time::Instant;

use image::RgbImage;
use tracing::debug;

use crate::config::PatternConfig;
use crate::error::{PatternError, Result};

/// Bulge heights in `[0, bulge_strength]`
pub type HeightField = ScalarField;

/// Procedural texture mixed into the height field
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceLayer {
    /// Seed for the texture phases
    pub seed: u64,
    /// Weight of the texture relative to the bulges
    pub scale: f32,
    /// Octave layout
    pub config: SurfaceConfig,
}

/// Shape parameters of the height field
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeightParams {
    /// Exponent divisor of the rounding curve (`d^(1 / roundness)`)
    pub roundness: f32,
    /// Odd Gaussian kernel extent in pixels
    pub smoothness_kernel: u32,
    /// Peak height
    pub bulge_strength: f32,
    /// Optional surface texture
    pub surface: Option<SurfaceLayer>,
}

impl HeightParams {
    /// Take the height options out of a full configuration
    pub fn from_config(config: &PatternConfig) -> Self {
        let surface = config.surface_enabled.then(|| SurfaceLayer {
            seed: config.surface_seed,
            scale: config.surface_scale,
            config: SurfaceConfig::with_complexity(config.surface_complexity),
        });
        Self {
            roundness: config.roundness,
            smoothness_kernel: config.smoothness_kernel,
            bulge_strength: config.bulge_strength,
            surface,
        }
    }

    fn validate(&self) -> Result<()> {
        if !(self.roundness.is_finite() && self.roundness > 0.0) {
            return Err(PatternError::invalid("roundness", self.roundness, "must be positive"));
        }
        if self.smoothness_kernel == 0 || self.smoothness_kernel % 2 == 0 {
            return Err(PatternError::invalid(
                "smoothness_kernel",
                self.smoothness_kernel,
                "must be an odd positive integer",
            ));
        }
        if !(self.bulge_strength.is_finite() && self.bulge_strength > 0.0) {
            return Err(PatternError::invalid(
                "bulge_strength",
                self.bulge_strength,
                "must be positive",
            ));
        }
        if let Some(layer) = &self.surface {
            if !(layer.scale.is_finite() && layer.scale >= 0.0) {
                return Err(PatternError::invalid("surface_scale", layer.scale, "must be non-negative"));
            }
            if !(layer.config.complexity.is_finite() && layer.config.complexity > 0.0) {
                return Err(PatternError::invalid(
                    "surface_complexity",
                    layer.config.complexity,
                    "must be positive",
                ));
            }
        }
        Ok(())
    }
}

/// Derive the bulge height field from a flat pattern
///
/// Pixels with luminance above [`INTERIOR_THRESHOLD`] are cell interior,
/// the rest are boundary. Heights are zero on the boundary and grow with the
/// distance to it.
///
/// # Errors
///
/// Returns `InvalidConfig` for a non-positive roundness or bulge strength,
/// an even or zero kernel, or a bad surface layer. Nothing is computed in
/// that case.
///
/// # Example
///
/// ```
/// use image::{Rgb, RgbImage};
/// use voronoi_relief::{build_height_field, HeightParams};
///
/// // a dark frame around a bright square
/// let raster = RgbImage::from_fn(32, 32, |x, y| {
///     if x == 0 || y == 0 || x == 31 || y == 31 { Rgb([0, 0, 0]) } else { Rgb([255, 255, 255]) }
/// });
/// let params = HeightParams { roundness: 2.0, smoothness_kernel: 3, bulge_strength: 0.5, surface: None };
/// let heights = build_height_field(&raster, &params)?;
/// assert!(heights.get(16, 16) > heights.get(2, 2));
/// # Ok::<(), voronoi_relief::PatternError>(())
/// ```
pub fn build_height_field(raster: &RgbImage, params: &HeightParams) -> Result<HeightField> {
    params.validate()?;

    let start = Instant::now();
    let (width, height) = raster.dimensions();

    let mask = interior_mask(raster);
    let mut field = distance_transform(&mask, width, height);

    let (_, max_distance) = field.min_max();
    if max_distance > 0.0 {
        let exponent = 1.0 / params.roundness;
        field.map_in_place(|d| (d / max_distance).powf(exponent));
    } else {
        field.map_in_place(|_| 0.0);
    }

    let mut field = gaussian_blur(&field, params.smoothness_kernel);

    if let Some(layer) = &params.surface {
        let texture = procedural_surface(width, height, layer.seed, &layer.config);
        for (h, s) in field.values_mut().iter_mut().zip(texture.values()) {
            *h += s * layer.scale;
        }
        field.normalize();
    }

    let bulge = params.bulge_strength;
    field.map_in_place(|h| h * bulge);

    debug!(
        width,
        height,
        max_distance,
        surface = params.surface.is_some(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1e3,
        "built height field"
    );

    Ok(field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn params(surface: Option<SurfaceLayer>) -> HeightParams {
        HeightParams {
            roundness: 2.0,
            smoothness_kernel: 5,
            bulge_strength: 0.5,
            surface,
        }
    }

    fn framed_square(size: u32) -> RgbImage {
        RgbImage::from_fn(size, size, |x, y| {
            if x == 0 || y == 0 || x == size - 1 || y == size - 1 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        })
    }

    #[test]
    fn test_no_boundary_gives_flat_zero() {
        let raster = RgbImage::from_pixel(40, 30, Rgb([255, 255, 255]));
        let heights = build_height_field(&raster, &params(None)).unwrap();
        assert!(heights.values().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_all_dark_gives_flat_zero() {
        let raster = RgbImage::from_pixel(40, 30, Rgb([0, 0, 0]));
        let heights = build_height_field(&raster, &params(None)).unwrap();
        assert!(heights.values().iter().all(|&h| h == 0.0));
    }

    #[test]
    fn test_bulge_peaks_in_the_middle() {
        let heights = build_height_field(&framed_square(41), &params(None)).unwrap();
        let (lo, hi) = heights.min_max();
        assert!(lo >= 0.0);
        assert!(hi <= 0.5 + 1e-6);
        assert!(heights.get(20, 20) > heights.get(10, 20));
        assert!(heights.get(10, 20) > heights.get(1, 20));
    }

    #[test]
    fn test_heights_stay_within_bulge_with_surface() {
        let layer = SurfaceLayer {
            seed: 42,
            scale: 0.3,
            config: SurfaceConfig::default(),
        };
        let heights = build_height_field(&framed_square(50), &params(Some(layer))).unwrap();
        let (lo, hi) = heights.min_max();
        assert_eq!(lo, 0.0);
        assert!((hi - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_roundness_lifts_shoulders() {
        let raster = framed_square(41);
        let sharp = HeightParams { roundness: 0.5, smoothness_kernel: 1, ..params(None) };
        let round = HeightParams { roundness: 4.0, smoothness_kernel: 1, ..params(None) };
        let sharp = build_height_field(&raster, &sharp).unwrap();
        let round = build_height_field(&raster, &round).unwrap();
        assert!(round.get(5, 20) > sharp.get(5, 20));
    }

    #[test]
    fn test_rejects_bad_params() {
        let raster = framed_square(10);
        let even = HeightParams { smoothness_kernel: 16, ..params(None) };
        assert!(matches!(
            build_height_field(&raster, &even),
            Err(PatternError::InvalidConfig { field: "smoothness_kernel", .. })
        ));
        let flat = HeightParams { bulge_strength: 0.0, ..params(None) };
        assert!(build_height_field(&raster, &flat).is_err());
        let blunt = HeightParams { roundness: -1.0, ..params(None) };
        assert!(build_height_field(&raster, &blunt).is_err());
    }
}
