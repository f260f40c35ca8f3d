//! Separable Gaussian smoothing

use super::field::{reflect_101, ScalarField};

/// Sigma used for a kernel of `extent` taps when none is given explicitly
///
/// `0.3 * ((extent - 1) / 2 - 1) + 0.8`, the usual image-processing default.
#[inline]
pub fn default_sigma(extent: u32) -> f64 {
    0.3 * ((extent as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Normalized 1D Gaussian weights for an odd tap count
pub fn gaussian_kernel(extent: u32) -> Vec<f32> {
    let sigma = default_sigma(extent);
    let center = (extent as f64 - 1.0) / 2.0;
    let scale = -0.5 / (sigma * sigma);

    let raw: Vec<f64> = (0..extent)
        .map(|i| {
            let d = i as f64 - center;
            (d * d * scale).exp()
        })
        .collect();
    let sum: f64 = raw.iter().sum();
    raw.iter().map(|w| (w / sum) as f32).collect()
}

/// Blur `field` with a `extent`-tap Gaussian, rows then columns
///
/// Borders are mirrored without repeating the edge sample. The result is
/// clamped to `[0, 1]`. An extent of 0 or 1 leaves the field unchanged.
pub fn gaussian_blur(field: &ScalarField, extent: u32) -> ScalarField {
    if extent <= 1 {
        return field.clone();
    }

    let kernel = gaussian_kernel(extent);
    let radius = (extent / 2) as i64;
    let (width, height) = field.dimensions();
    let (w, h) = (width as usize, height as usize);
    let src = field.values();

    let mut horizontal = vec![0.0f32; w * h];
    for y in 0..h {
        let row = &src[y * w..(y + 1) * w];
        for x in 0..w {
            let mut acc = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let sx = reflect_101(x as i64 + k as i64 - radius, w);
                acc += weight * row[sx];
            }
            horizontal[y * w + x] = acc;
        }
    }

    let mut out = ScalarField::filled(width, height, 0.0);
    let dst = out.values_mut();
    for y in 0..h {
        for x in 0..w {
            let mut acc = 0.0;
            for (k, weight) in kernel.iter().enumerate() {
                let sy = reflect_101(y as i64 + k as i64 - radius, h);
                acc += weight * horizontal[sy * w + x];
            }
            dst[y * w + x] = acc.clamp(0.0, 1.0);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kernel_is_normalized_and_symmetric() {
        for extent in [3, 5, 15, 31] {
            let kernel = gaussian_kernel(extent);
            assert_eq!(kernel.len(), extent as usize);
            let sum: f32 = kernel.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5);
            for i in 0..kernel.len() / 2 {
                assert!((kernel[i] - kernel[kernel.len() - 1 - i]).abs() < 1e-7);
            }
            let peak = kernel[kernel.len() / 2];
            assert!(kernel.iter().all(|&w| w <= peak));
        }
    }

    #[test]
    fn test_default_sigma() {
        assert!((default_sigma(15) - 2.6).abs() < 1e-12);
        assert!((default_sigma(3) - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_constant_field_is_unchanged() {
        let field = ScalarField::filled(16, 9, 0.4);
        let blurred = gaussian_blur(&field, 7);
        assert!(blurred.values().iter().all(|&v| (v - 0.4).abs() < 1e-6));
    }

    #[test]
    fn test_spreads_single_spike() {
        let mut field = ScalarField::filled(11, 11, 0.0);
        field.set(5, 5, 1.0);
        let blurred = gaussian_blur(&field, 5);

        assert!(blurred.get(5, 5) < 1.0);
        assert!(blurred.get(4, 5) > 0.0);
        assert!((blurred.get(4, 5) - blurred.get(6, 5)).abs() < 1e-7);
        assert!((blurred.get(5, 4) - blurred.get(4, 5)).abs() < 1e-7);
        assert_eq!(blurred.get(0, 0), 0.0);
        let total: f32 = blurred.values().iter().sum();
        assert!((total - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_trivial_extent_is_identity() {
        let field = ScalarField::from_fn(4, 4, |x, y| (x + y) as f32 / 6.0);
        assert_eq!(gaussian_blur(&field, 1), field);
    }
}
