//! Relief Pattern Configuration and Builder
//!
//! This module provides the validated configuration value consumed by every
//! stage of the relief pipeline. A configuration is built once per render
//! request and never mutated afterwards.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{PatternError, Result};

/// RGB colour triple
pub type Rgb = [u8; 3];

/// How seed points are placed on the canvas
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PointDistribution {
    /// Independent uniform samples over the canvas
    #[default]
    Random,
    /// Jittered lattice, truncated to the requested count
    Grid,
}

impl PointDistribution {
    /// Get the canonical lowercase name of this distribution
    pub fn name(self) -> &'static str {
        match self {
            PointDistribution::Random => "random",
            PointDistribution::Grid => "grid",
        }
    }
}

impl fmt::Display for PointDistribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PointDistribution {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "random" => Ok(PointDistribution::Random),
            "grid" => Ok(PointDistribution::Grid),
            other => Err(PatternError::invalid(
                "point_distribution",
                other,
                "expected \"random\" or \"grid\"",
            )),
        }
    }
}

/// Base image the lighting is multiplied into
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BaseColor {
    /// Flat white field
    #[default]
    White,
    /// Value channel (max of R, G, B) of the flat raster
    RasterValue,
}

/// Configuration for one relief pattern render
///
/// Every field is public so external recorders can read the resolved values,
/// but the pipeline re-runs [`PatternConfig::validate`] before any pixel work,
/// so a hand-edited value is still caught.
///
/// # Example
///
/// ```rust
/// use voronoi_relief::*;
///
/// let config = PatternConfigBuilder::new()
///     .seed(7)
///     .size(320, 240).unwrap()
///     .point_count(30).unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(config.surface_seed, 7);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternConfig {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
    /// Number of Voronoi seed points
    pub point_count: usize,
    /// Seed point placement policy
    pub point_distribution: PointDistribution,
    /// Random seed for point placement
    pub seed: u64,

    /// Colour of the cell boundary strokes
    pub edge_color: Rgb,
    /// Colour of the seed markers
    pub point_color: Rgb,
    /// Canvas fill colour
    pub background_color: Rgb,
    /// Stroke width of cell boundaries in pixels
    pub edge_thickness: u32,
    /// Radius of the seed markers in pixels
    pub point_radius: u32,
    /// Whether seed markers are drawn
    pub show_points: bool,

    /// Peak height of a cell bulge
    pub bulge_strength: f32,
    /// Crown shape exponent: above 1 flattens, below 1 sharpens
    pub roundness: f32,
    /// Gaussian kernel extent (odd)
    pub smoothness_kernel: u32,

    /// How dark the valleys get (0 = no height shadowing)
    pub shadow_depth: f32,
    /// Diffuse light multiplier
    pub light_intensity: f32,
    /// Ambient light floor
    pub ambient_light: f32,
    /// Direction towards the light, normalized internally
    pub light_direction: Vec3,
    /// Base image the lighting is applied to
    pub base_color: BaseColor,

    /// Whether procedural surface undulation is added to the height field
    pub surface_enabled: bool,
    /// Weight of the surface undulation
    pub surface_scale: f32,
    /// Coordinate span of the undulation (higher = busier)
    pub surface_complexity: f32,
    /// Random seed for the undulation phases
    pub surface_seed: u64,

    /// How wet the surface looks (scales the highlights)
    pub wetness: f32,
    /// Specular highlight multiplier
    pub specular_intensity: f32,
    /// Blinn-Phong exponent (higher = tighter highlights)
    pub specular_power: f32,
    /// Colour of the specular highlights
    pub reflection_color: Rgb,

    /// Final contrast gain
    pub contrast_gain: f32,
    /// Final brightness offset
    pub contrast_bias: f32,
}

impl PatternConfig {
    /// Light direction as a unit vector
    #[inline]
    pub fn light_dir(&self) -> Vec3 {
        self.light_direction.normalize_or_zero()
    }

    /// Check every option against its documented range
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        check_dimension("width", self.width)?;
        check_dimension("height", self.height)?;
        check_point_count(self.point_count)?;
        check_stroke("edge_thickness", self.edge_thickness)?;
        check_stroke("point_radius", self.point_radius)?;
        check_positive("bulge_strength", self.bulge_strength)?;
        check_positive("roundness", self.roundness)?;
        check_smoothness_kernel(self.smoothness_kernel)?;
        check_unit("shadow_depth", self.shadow_depth)?;
        check_non_negative("light_intensity", self.light_intensity)?;
        check_unit("ambient_light", self.ambient_light)?;
        check_light_direction(self.light_direction)?;
        check_non_negative("surface_scale", self.surface_scale)?;
        check_positive("surface_complexity", self.surface_complexity)?;
        check_unit("wetness", self.wetness)?;
        check_non_negative("specular_intensity", self.specular_intensity)?;
        check_positive("specular_power", self.specular_power)?;
        check_non_negative("contrast_gain", self.contrast_gain)?;
        check_finite("contrast_bias", self.contrast_bias)?;
        Ok(())
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        let seed = rand::random();
        PatternConfig {
            seed,
            surface_seed: seed,
            ..PatternConfigBuilder::DEFAULTS
        }
    }
}

fn check_dimension(field: &'static str, value: u32) -> Result<()> {
    if value == 0 {
        return Err(PatternError::invalid(field, value, "must be positive"));
    }
    Ok(())
}

fn check_point_count(count: usize) -> Result<()> {
    if count == 0 {
        return Err(PatternError::invalid("point_count", count, "must be at least 1"));
    }
    Ok(())
}

fn check_stroke(field: &'static str, value: u32) -> Result<()> {
    if value == 0 {
        return Err(PatternError::invalid(field, value, "must be a positive pixel count"));
    }
    Ok(())
}

fn check_smoothness_kernel(kernel: u32) -> Result<()> {
    if kernel == 0 || kernel % 2 == 0 {
        return Err(PatternError::invalid(
            "smoothness_kernel",
            kernel,
            "must be an odd positive integer",
        ));
    }
    Ok(())
}

fn check_finite(field: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() {
        return Err(PatternError::invalid(field, value, "must be finite"));
    }
    Ok(())
}

fn check_positive(field: &'static str, value: f32) -> Result<()> {
    check_finite(field, value)?;
    if value <= 0.0 {
        return Err(PatternError::invalid(field, value, "must be > 0"));
    }
    Ok(())
}

fn check_non_negative(field: &'static str, value: f32) -> Result<()> {
    check_finite(field, value)?;
    if value < 0.0 {
        return Err(PatternError::invalid(field, value, "must be >= 0"));
    }
    Ok(())
}

fn check_unit(field: &'static str, value: f32) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(PatternError::invalid(field, value, "must be within [0, 1]"));
    }
    Ok(())
}

fn check_light_direction(direction: Vec3) -> Result<()> {
    if !direction.is_finite() || direction.length_squared() == 0.0 {
        return Err(PatternError::invalid(
            "light_direction",
            direction,
            "must be a finite non-zero vector",
        ));
    }
    Ok(())
}

/// Builder for creating PatternConfig with validation
///
/// Constrained options are checked as they are set; [`build`](Self::build)
/// re-checks the whole set so the parity and range policies hold no matter
/// how the values arrived.
///
/// # Example
///
/// ```rust
/// use voronoi_relief::*;
///
/// let config = PatternConfigBuilder::new()
///     .seed(12345)
///     .point_distribution(PointDistribution::Grid)
///     .smoothness_kernel(9)
///     .unwrap()
///     .wetness(0.9)
///     .unwrap()
///     .build()
///     .unwrap();
///
/// // Even kernels are rejected, never silently adjusted
/// assert!(PatternConfigBuilder::new().smoothness_kernel(16).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PatternConfigBuilder {
    seed: Option<u64>,
    surface_seed: Option<u64>,
    params: PatternConfig,
}

impl PatternConfigBuilder {
    /// Option values used when a setter is not called
    pub const DEFAULTS: PatternConfig = PatternConfig {
        width: 800,
        height: 600,
        point_count: 50,
        point_distribution: PointDistribution::Random,
        seed: 0,
        edge_color: [0, 0, 0],
        point_color: [255, 0, 0],
        background_color: [255, 255, 255],
        edge_thickness: 1,
        point_radius: 3,
        show_points: true,
        bulge_strength: 0.5,
        roundness: 2.0,
        smoothness_kernel: 15,
        shadow_depth: 0.7,
        light_intensity: 1.2,
        ambient_light: 0.3,
        light_direction: Vec3::new(0.5, 0.5, 1.0),
        base_color: BaseColor::White,
        surface_enabled: true,
        surface_scale: 0.3,
        surface_complexity: 2.0,
        surface_seed: 0,
        wetness: 0.7,
        specular_intensity: 1.0,
        specular_power: 30.0,
        reflection_color: [255, 255, 255],
        contrast_gain: 1.1,
        contrast_bias: 5.0,
    };

    /// Create a new builder with default values
    ///
    /// Defaults:
    /// - seed: Random (generated from thread_rng)
    /// - canvas: 800 x 600, 50 random points
    /// - surface_seed: Same as seed
    /// - everything else: see [`PatternConfigBuilder::DEFAULTS`]
    pub fn new() -> Self {
        Self {
            seed: None,
            surface_seed: None,
            params: Self::DEFAULTS,
        }
    }

    /// Set the random seed for point placement
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set a separate seed for the surface undulation
    ///
    /// If not set, the surface seed matches the point seed.
    pub fn surface_seed(mut self, seed: u64) -> Self {
        self.surface_seed = Some(seed);
        self
    }

    /// Set the canvas size in pixels
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if either dimension is zero
    pub fn size(mut self, width: u32, height: u32) -> Result<Self> {
        check_dimension("width", width)?;
        check_dimension("height", height)?;
        self.params.width = width;
        self.params.height = height;
        Ok(self)
    }

    /// Set the number of seed points
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if count is zero
    pub fn point_count(mut self, count: usize) -> Result<Self> {
        check_point_count(count)?;
        self.params.point_count = count;
        Ok(self)
    }

    /// Set the seed point placement policy
    pub fn point_distribution(mut self, distribution: PointDistribution) -> Self {
        self.params.point_distribution = distribution;
        self
    }

    /// Set the boundary, marker and background colours
    pub fn colors(mut self, edge: Rgb, point: Rgb, background: Rgb) -> Self {
        self.params.edge_color = edge;
        self.params.point_color = point;
        self.params.background_color = background;
        self
    }

    /// Set the boundary stroke width
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if thickness is zero
    pub fn edge_thickness(mut self, thickness: u32) -> Result<Self> {
        check_stroke("edge_thickness", thickness)?;
        self.params.edge_thickness = thickness;
        Ok(self)
    }

    /// Set the seed marker radius
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if radius is zero
    pub fn point_radius(mut self, radius: u32) -> Result<Self> {
        check_stroke("point_radius", radius)?;
        self.params.point_radius = radius;
        Ok(self)
    }

    /// Toggle drawing of the seed markers
    pub fn show_points(mut self, show: bool) -> Self {
        self.params.show_points = show;
        self
    }

    /// Set the peak bulge height
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if strength is not > 0
    pub fn bulge_strength(mut self, strength: f32) -> Result<Self> {
        check_positive("bulge_strength", strength)?;
        self.params.bulge_strength = strength;
        Ok(self)
    }

    /// Set the crown roundness exponent
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if roundness is not > 0
    pub fn roundness(mut self, roundness: f32) -> Result<Self> {
        check_positive("roundness", roundness)?;
        self.params.roundness = roundness;
        Ok(self)
    }

    /// Set the Gaussian smoothing kernel extent
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if kernel is even or zero
    pub fn smoothness_kernel(mut self, kernel: u32) -> Result<Self> {
        check_smoothness_kernel(kernel)?;
        self.params.smoothness_kernel = kernel;
        Ok(self)
    }

    /// Set the valley shadow depth
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if depth is outside [0, 1]
    pub fn shadow_depth(mut self, depth: f32) -> Result<Self> {
        check_unit("shadow_depth", depth)?;
        self.params.shadow_depth = depth;
        Ok(self)
    }

    /// Set the diffuse light multiplier
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if intensity is negative
    pub fn light_intensity(mut self, intensity: f32) -> Result<Self> {
        check_non_negative("light_intensity", intensity)?;
        self.params.light_intensity = intensity;
        Ok(self)
    }

    /// Set the ambient light floor
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if ambient is outside [0, 1]
    pub fn ambient_light(mut self, ambient: f32) -> Result<Self> {
        check_unit("ambient_light", ambient)?;
        self.params.ambient_light = ambient;
        Ok(self)
    }

    /// Set the direction towards the light
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` for a zero or non-finite vector
    pub fn light_direction(mut self, direction: Vec3) -> Result<Self> {
        check_light_direction(direction)?;
        self.params.light_direction = direction;
        Ok(self)
    }

    /// Select the base image the lighting is multiplied into
    pub fn base_color(mut self, base: BaseColor) -> Self {
        self.params.base_color = base;
        self
    }

    /// Toggle the procedural surface undulation
    pub fn surface_enabled(mut self, enabled: bool) -> Self {
        self.params.surface_enabled = enabled;
        self
    }

    /// Set the weight of the surface undulation
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if scale is negative
    pub fn surface_scale(mut self, scale: f32) -> Result<Self> {
        check_non_negative("surface_scale", scale)?;
        self.params.surface_scale = scale;
        Ok(self)
    }

    /// Set the coordinate span of the surface undulation
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if complexity is not > 0
    pub fn surface_complexity(mut self, complexity: f32) -> Result<Self> {
        check_positive("surface_complexity", complexity)?;
        self.params.surface_complexity = complexity;
        Ok(self)
    }

    /// Set the wetness factor
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if wetness is outside [0, 1]
    pub fn wetness(mut self, wetness: f32) -> Result<Self> {
        check_unit("wetness", wetness)?;
        self.params.wetness = wetness;
        Ok(self)
    }

    /// Set the specular highlight multiplier
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if intensity is negative
    pub fn specular_intensity(mut self, intensity: f32) -> Result<Self> {
        check_non_negative("specular_intensity", intensity)?;
        self.params.specular_intensity = intensity;
        Ok(self)
    }

    /// Set the Blinn-Phong exponent
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if power is not > 0
    pub fn specular_power(mut self, power: f32) -> Result<Self> {
        check_positive("specular_power", power)?;
        self.params.specular_power = power;
        Ok(self)
    }

    /// Set the highlight colour
    pub fn reflection_color(mut self, color: Rgb) -> Self {
        self.params.reflection_color = color;
        self
    }

    /// Set the final contrast gain and brightness offset
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if gain is negative or either value is not finite
    pub fn contrast(mut self, gain: f32, bias: f32) -> Result<Self> {
        check_non_negative("contrast_gain", gain)?;
        check_finite("contrast_bias", bias)?;
        self.params.contrast_gain = gain;
        self.params.contrast_bias = bias;
        Ok(self)
    }

    /// Build the configuration
    ///
    /// If no seed was provided, generates a random seed using thread_rng.
    pub fn build(self) -> Result<PatternConfig> {
        let seed = self.seed.unwrap_or_else(rand::random);
        let surface_seed = self.surface_seed.unwrap_or(seed);

        let config = PatternConfig {
            seed,
            surface_seed,
            ..self.params
        };
        config.validate()?;
        Ok(config)
    }
}

impl Default for PatternConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
