//! Wet-surface shading
//!
//! Lambert diffuse with a height-driven shadow term, a Blinn-Phong specular
//! highlight scaled by wetness, composition onto a base image, and a final
//! linear contrast stretch.

mod compose;
mod contrast;

pub use compose::{compose, invert, value_channel};
pub use contrast::enhance_contrast;

use glam::Vec3;

use crate::config::PatternConfig;
use crate::error::{PatternError, Result};
use crate::relief::{NormalField, ScalarField};

/// Viewer looks straight down onto the canvas
pub const VIEW_DIRECTION: Vec3 = Vec3::Z;

/// Diffuse light setup
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LightModel {
    /// Direction towards the light; normalized before use
    pub direction: Vec3,
    /// Multiplier on the diffuse term
    pub intensity: f32,
    /// Constant light added everywhere
    pub ambient: f32,
    /// How much low ground darkens, in `[0, 1]`
    pub shadow_depth: f32,
}

impl LightModel {
    pub fn from_config(config: &PatternConfig) -> Self {
        Self {
            direction: config.light_direction,
            intensity: config.light_intensity,
            ambient: config.ambient_light,
            shadow_depth: config.shadow_depth,
        }
    }

    /// Unit light direction (zero if the direction is degenerate)
    #[inline]
    pub fn unit_direction(&self) -> Vec3 {
        self.direction.normalize_or_zero()
    }
}

/// Highlight setup
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecularModel {
    /// Shininess exponent; higher gives tighter highlights
    pub power: f32,
    pub intensity: f32,
    /// Surface wetness in `[0, 1]`
    pub wetness: f32,
}

impl SpecularModel {
    pub fn from_config(config: &PatternConfig) -> Self {
        Self {
            power: config.specular_power,
            intensity: config.specular_intensity,
            wetness: config.wetness,
        }
    }
}

/// `clamp(n . l, 0, 1)` for every normal
pub fn diffuse(normals: &NormalField, light_dir: Vec3) -> ScalarField {
    let light = light_dir.normalize_or_zero();
    let (width, height) = normals.dimensions();
    let mut field = ScalarField::filled(width, height, 0.0);
    for (dst, n) in field.values_mut().iter_mut().zip(normals.normals()) {
        *dst = n.dot(light).clamp(0.0, 1.0);
    }
    field
}

/// Lighting factor in `[0, 1]` per pixel
///
/// `relative_heights` must already be rescaled to `[0, 1]`; lower ground is
/// shadowed by `1 - (1 - h) * shadow_depth`. The result is
/// `clamp(ambient + diffuse * shadow * intensity, 0, 1)`.
///
/// # Errors
///
/// Returns `InvalidConfig` if the height field does not match the normals'
/// shape.
pub fn shading(
    normals: &NormalField,
    relative_heights: &ScalarField,
    light: &LightModel,
) -> Result<ScalarField> {
    check_shape("relative_heights", normals.dimensions(), relative_heights.dimensions())?;

    let mut lighting = diffuse(normals, light.unit_direction());
    for (l, &h) in lighting.values_mut().iter_mut().zip(relative_heights.values()) {
        let shadow = 1.0 - (1.0 - h) * light.shadow_depth;
        *l = (light.ambient + *l * shadow * light.intensity).clamp(0.0, 1.0);
    }
    Ok(lighting)
}

/// Blinn-Phong highlight strength per pixel
///
/// Uses the half vector between `light_dir` and `view_dir`:
/// `max(0, n . h)^power * intensity * wetness`.
pub fn specular(
    normals: &NormalField,
    light_dir: Vec3,
    view_dir: Vec3,
    model: &SpecularModel,
) -> ScalarField {
    let half = (view_dir.normalize_or_zero() + light_dir.normalize_or_zero()).normalize_or_zero();
    let scale = model.intensity * model.wetness;

    let (width, height) = normals.dimensions();
    let mut field = ScalarField::filled(width, height, 0.0);
    for (dst, n) in field.values_mut().iter_mut().zip(normals.normals()) {
        *dst = n.dot(half).max(0.0).powf(model.power) * scale;
    }
    field
}

/// Fail unless a per-pixel input matches the canvas shape
pub(crate) fn check_shape(field: &'static str, expected: (u32, u32), actual: (u32, u32)) -> Result<()> {
    if expected != actual {
        return Err(PatternError::invalid(
            field,
            format!("{}x{}", actual.0, actual.1),
            format!("must match the {}x{} canvas", expected.0, expected.1),
        ));
    }
    Ok(())
}
