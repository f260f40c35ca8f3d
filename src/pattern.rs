//! ReliefPattern: the full flat-pattern to shaded-relief pipeline

use std::time::Instant;

use image::RgbImage;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::PatternConfig;
use crate::error::Result;
use crate::generation::{build_raster, generate_points, PointField, RasterImage, RasterStyle};
use crate::relief::{build_height_field, compute_normals, HeightField, HeightParams, NormalField, ScalarField};
use crate::shading::{
    compose, enhance_contrast, invert, shading, specular, LightModel, SpecularModel, VIEW_DIRECTION,
};

/// The shaded relief image
pub type RenderedImage = RgbImage;

/// Every intermediate of the relief stage for one raster
#[derive(Debug, Clone)]
pub struct Relief {
    /// Bulge heights in `[0, bulge_strength]`
    pub heights: HeightField,
    /// Unit surface normals
    pub normals: NormalField,
    /// Ambient, diffuse and shadow combined, in `[0, 1]`
    pub lighting: ScalarField,
    /// Highlight strength
    pub specular: ScalarField,
    /// Composed and contrast-stretched output
    pub image: RenderedImage,
}

/// Shade an existing flat pattern as a wet relief
///
/// Dark pixels (luminance at or below mid grey) are treated as cell
/// boundaries, everything else as cell interior. Only the relief and
/// shading options of `config` are used; the canvas shape comes from
/// `raster`.
///
/// # Errors
///
/// Returns `InvalidConfig` if `config` fails validation.
pub fn render_relief(raster: &RgbImage, config: &PatternConfig) -> Result<Relief> {
    config.validate()?;

    let start = Instant::now();
    let heights = build_height_field(raster, &HeightParams::from_config(config))?;
    let normals = compute_normals(&heights);

    // shadow works on heights relative to the peak
    let mut relative = heights.clone();
    let bulge = config.bulge_strength;
    relative.map_in_place(|h| h / bulge);

    let light = LightModel::from_config(config);
    let lighting = shading(&normals, &relative, &light)?;
    let specular = specular(
        &normals,
        light.unit_direction(),
        VIEW_DIRECTION,
        &SpecularModel::from_config(config),
    );

    let composed = compose(
        config.base_color,
        raster,
        &lighting,
        &specular,
        config.reflection_color,
    )?;
    let image = enhance_contrast(&composed, config.contrast_gain, config.contrast_bias);

    debug!(
        width = raster.width(),
        height = raster.height(),
        elapsed_ms = start.elapsed().as_secs_f64() * 1e3,
        "rendered relief"
    );

    Ok(Relief {
        heights,
        normals,
        lighting,
        specular,
        image,
    })
}

/// A generated pattern with its flat raster and shaded relief
///
/// Holds the resolved configuration alongside every output, so a batch
/// driver can record exactly which parameters produced an image pair.
///
/// # Example
///
/// ```
/// use voronoi_relief::*;
///
/// let config = PatternConfigBuilder::new()
///     .seed(42)
///     .size(160, 120).unwrap()
///     .point_count(12).unwrap()
///     .smoothness_kernel(5).unwrap()
///     .build()
///     .unwrap();
///
/// let pattern = ReliefPattern::generate(config).unwrap();
/// assert_eq!(pattern.raster().dimensions(), (160, 120));
/// assert_eq!(pattern.rendered().dimensions(), (160, 120));
/// assert_eq!(pattern.points().len(), 12);
/// ```
#[derive(Debug, Clone)]
pub struct ReliefPattern {
    config: PatternConfig,
    points: PointField,
    raster: RasterImage,
    relief: Relief,
}

impl ReliefPattern {
    /// Generate a pattern from a configuration
    ///
    /// Point placement is seeded with `config.seed` on a fresh
    /// `ChaCha8Rng`, so the same configuration always yields byte-identical
    /// images.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` before any work is done if the configuration
    /// is out of range, and `GenerationFailed` if the partition cannot be
    /// built.
    pub fn generate(config: PatternConfig) -> Result<Self> {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        Self::generate_with_rng(config, &mut rng)
    }

    /// Generate a pattern drawing seed points from a caller-owned generator
    ///
    /// `config.seed` is kept in the record but not used. The surface texture
    /// is still seeded from `config.surface_seed`.
    ///
    /// # Example
    ///
    /// ```
    /// use rand::SeedableRng;
    /// use rand_chacha::ChaCha8Rng;
    /// use voronoi_relief::*;
    ///
    /// let config = PatternConfigBuilder::new()
    ///     .size(96, 64).unwrap()
    ///     .point_count(8).unwrap()
    ///     .smoothness_kernel(3).unwrap()
    ///     .build()
    ///     .unwrap();
    ///
    /// let mut rng = ChaCha8Rng::seed_from_u64(7);
    /// let pattern = ReliefPattern::generate_with_rng(config, &mut rng).unwrap();
    /// assert_eq!(pattern.points().len(), 8);
    /// ```
    pub fn generate_with_rng<R: Rng + ?Sized>(config: PatternConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let start = Instant::now();

        let points = generate_points(
            config.point_distribution,
            config.point_count,
            config.width,
            config.height,
            rng,
        )?;
        let raster = build_raster(
            &points.points,
            config.width,
            config.height,
            &RasterStyle::from_config(&config),
        )?;
        let relief = render_relief(&raster, &config)?;

        info!(
            seed = config.seed,
            surface_seed = config.surface_seed,
            width = config.width,
            height = config.height,
            points = points.len(),
            distribution = %config.point_distribution,
            elapsed_ms = start.elapsed().as_secs_f64() * 1e3,
            "generated relief pattern"
        );

        Ok(Self {
            config,
            points,
            raster,
            relief,
        })
    }

    /// Configuration used to generate this pattern
    #[inline]
    pub fn config(&self) -> &PatternConfig {
        &self.config
    }

    #[inline]
    pub fn points(&self) -> &PointField {
        &self.points
    }

    /// The flat pattern
    #[inline]
    pub fn raster(&self) -> &RasterImage {
        &self.raster
    }

    /// The flat pattern with every channel inverted
    pub fn inverted_raster(&self) -> RasterImage {
        invert(&self.raster)
    }

    #[inline]
    pub fn height_field(&self) -> &HeightField {
        &self.relief.heights
    }

    #[inline]
    pub fn normal_field(&self) -> &NormalField {
        &self.relief.normals
    }

    /// All relief intermediates, including the lighting and highlight fields
    #[inline]
    pub fn relief(&self) -> &Relief {
        &self.relief
    }

    /// The final shaded relief image
    #[inline]
    pub fn rendered(&self) -> &RenderedImage {
        &self.relief.image
    }
}
