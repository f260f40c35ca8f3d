//! Procedural surface texture
//!
//! Sums a few octaves of a separable sinusoidal basis
//! `sin(x * f + phase_x) * cos(y * f + phase_y)` over a grid spanning
//! `[0, complexity]` on both axes. Phases are drawn from a generator seeded
//! with the surface seed, so the texture is a pure function of seed,
//! complexity and canvas shape.

use std::f64::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::field::ScalarField;
use crate::generation::linspace;

/// Octave layout of the surface texture
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SurfaceConfig {
    /// Extent of the sampling grid on each axis (higher = busier texture)
    pub complexity: f32,
    /// Number of layers
    pub octaves: usize,
    /// Amplitude decay per octave
    pub persistence: f32,
    /// Frequency multiplier per octave
    pub lacunarity: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            complexity: 2.0,
            octaves: 4,
            persistence: 0.5,
            lacunarity: 2.0,
        }
    }
}

impl SurfaceConfig {
    /// Default octave layout with the given grid extent
    pub fn with_complexity(complexity: f32) -> Self {
        Self {
            complexity,
            ..Default::default()
        }
    }
}

/// Generate the texture normalized to `[0, 1]`
///
/// A texture with no spread (e.g. zero complexity) comes back all zero.
pub fn procedural_surface(width: u32, height: u32, seed: u64, config: &SurfaceConfig) -> ScalarField {
    if width == 0 || height == 0 {
        return ScalarField::filled(width, height, 0.0);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let extent = config.complexity as f64;
    let xs = linspace(0.0, extent, width as usize);
    let ys = linspace(0.0, extent, height as usize);

    let mut sum = vec![0.0f64; width as usize * height as usize];
    let mut amplitude = 1.0f64;
    let mut frequency = 1.0f64;

    for _ in 0..config.octaves {
        let phase_x = rng.gen::<f64>() * TAU;
        let phase_y = rng.gen::<f64>() * TAU;

        // separable: one sine per column, one cosine per row
        let col: Vec<f64> = xs.iter().map(|x| (x * frequency + phase_x).sin()).collect();
        let row: Vec<f64> = ys.iter().map(|y| (y * frequency + phase_y).cos()).collect();

        for (cells, r) in sum.chunks_exact_mut(width as usize).zip(&row) {
            for (cell, c) in cells.iter_mut().zip(&col) {
                *cell += amplitude * c * r;
            }
        }

        amplitude *= config.persistence as f64;
        frequency *= config.lacunarity as f64;
    }

    let mut field = ScalarField::filled(width, height, 0.0);
    for (dst, v) in field.values_mut().iter_mut().zip(&sum) {
        *dst = *v as f32;
    }
    field.normalize();
    field
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let config = SurfaceConfig::default();
        let a = procedural_surface(64, 48, 42, &config);
        let b = procedural_surface(64, 48, 42, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seeds() {
        let config = SurfaceConfig::default();
        let a = procedural_surface(64, 48, 42, &config);
        let b = procedural_surface(64, 48, 999, &config);
        assert_ne!(a, b);
    }

    #[test]
    fn test_range_is_unit_interval() {
        let field = procedural_surface(80, 60, 7, &SurfaceConfig::with_complexity(5.0));
        let (lo, hi) = field.min_max();
        assert_eq!(lo, 0.0);
        assert_eq!(hi, 1.0);
    }

    #[test]
    fn test_zero_complexity_is_flat() {
        // every sample sits at the origin, so the sum has no spread
        let field = procedural_surface(20, 10, 3, &SurfaceConfig::with_complexity(0.0));
        assert!(field.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_single_octave_is_separable() {
        let config = SurfaceConfig {
            octaves: 1,
            ..SurfaceConfig::default()
        };
        let field = procedural_surface(9, 7, 11, &config);

        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let phase_x = rng.gen::<f64>() * TAU;
        let phase_y = rng.gen::<f64>() * TAU;
        let xs = linspace(0.0, 2.0, 9);
        let ys = linspace(0.0, 2.0, 7);
        let raw: Vec<f64> = ys
            .iter()
            .flat_map(|y| xs.iter().map(move |x| (x + phase_x).sin() * (y + phase_y).cos()))
            .collect();
        let lo = raw.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = raw.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

        for (got, want) in field.values().iter().zip(&raw) {
            let want = ((want - lo) / (hi - lo)) as f32;
            assert!((got - want).abs() < 1e-5);
        }
    }
}
