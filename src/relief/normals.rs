//! Surface normals from height-field gradients

use glam::Vec3;
use image::{Rgb, RgbImage};

use super::field::{reflect_101, ScalarField};

/// Keeps the normalization finite on perfectly flat ground
const NORMAL_EPSILON: f32 = 1e-10;

/// Per-pixel unit surface normals, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct NormalField {
    width: u32,
    height: u32,
    data: Vec<Vec3>,
}

impl NormalField {
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Normal at `(x, y)`; panics when out of bounds
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Vec3 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn normals(&self) -> &[Vec3] {
        &self.data
    }

    /// Colour view of the normals, each component mapped from `[-1, 1]` to
    /// `[0, 255]` and truncated
    pub fn to_rgb_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let n = self.get(x, y);
            let channel = |c: f32| ((c + 1.0) * 127.5).clamp(0.0, 255.0) as u8;
            Rgb([channel(n.x), channel(n.y), channel(n.z)])
        })
    }
}

/// Estimate normals with 3x3 Sobel gradients
///
/// Each normal is `(-dh/dx, -dh/dy, 1)` scaled to unit length. Borders are
/// mirrored without repeating the edge sample.
///
/// # Example
///
/// ```
/// use voronoi_relief::{compute_normals, ScalarField};
///
/// let flat = ScalarField::filled(8, 8, 0.25);
/// let normals = compute_normals(&flat);
/// assert!(normals.normals().iter().all(|n| n.z > 0.999));
/// ```
pub fn compute_normals(heights: &ScalarField) -> NormalField {
    let (width, height) = heights.dimensions();
    let (w, h) = (width as usize, height as usize);
    let src = heights.values();
    let at = |x: i64, y: i64| src[reflect_101(y, h) * w + reflect_101(x, w)];

    let mut data = Vec::with_capacity(w * h);
    for y in 0..h as i64 {
        for x in 0..w as i64 {
            let gx = (at(x + 1, y - 1) + 2.0 * at(x + 1, y) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2.0 * at(x - 1, y) + at(x - 1, y + 1));
            let gy = (at(x - 1, y + 1) + 2.0 * at(x, y + 1) + at(x + 1, y + 1))
                - (at(x - 1, y - 1) + 2.0 * at(x, y - 1) + at(x + 1, y - 1));

            let raw = Vec3::new(-gx, -gy, 1.0);
            data.push(raw / (raw.length() + NORMAL_EPSILON));
        }
    }

    NormalField { width, height, data }
}
