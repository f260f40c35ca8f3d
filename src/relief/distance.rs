//! Interior mask and exact Euclidean distance transform
//!
//! The transform uses the separable lower-envelope-of-parabolas method
//! (Felzenszwalb & Huttenlocher): one 1D pass down every column, then one
//! along every row, each linear in the line length.

use image::RgbImage;

use super::field::ScalarField;

/// Luminance above which a pixel counts as cell interior
pub const INTERIOR_THRESHOLD: u8 = 128;

/// Stand-in for "no feature on this line yet"; far above any squared
/// pixel distance yet finite, so envelope intersections stay well defined
const FAR: f64 = 1e20;

/// Grey level of an RGB pixel, rounded to the nearest byte
///
/// Weights are `0.114 R + 0.587 G + 0.299 B`: the Rec. 601 coefficients
/// applied with red and blue swapped, matching how the reference datasets
/// were thresholded.
#[inline]
pub fn luminance(rgb: [u8; 3]) -> u8 {
    let [r, g, b] = rgb.map(f32::from);
    (0.114 * r + 0.587 * g + 0.299 * b).round().clamp(0.0, 255.0) as u8
}

/// Split the raster into bright interior (`true`) and dark boundary (`false`)
pub fn interior_mask(raster: &RgbImage) -> Vec<bool> {
    raster
        .pixels()
        .map(|p| luminance(p.0) > INTERIOR_THRESHOLD)
        .collect()
}

/// Distance from every pixel to the nearest boundary pixel
///
/// Boundary pixels get 0. If the mask has no boundary pixel at all there is
/// nothing to measure from, and the whole field is 0.
pub fn distance_transform(interior: &[bool], width: u32, height: u32) -> ScalarField {
    let (w, h) = (width as usize, height as usize);
    debug_assert_eq!(interior.len(), w * h);

    if interior.iter().all(|&inside| inside) {
        return ScalarField::filled(width, height, 0.0);
    }

    let mut sq: Vec<f64> = interior
        .iter()
        .map(|&inside| if inside { FAR } else { 0.0 })
        .collect();

    let longest = w.max(h);
    let mut line = vec![0.0; longest];
    let mut out = vec![0.0; longest];
    let mut hull = vec![0usize; longest];
    let mut bounds = vec![0.0; longest + 1];

    for x in 0..w {
        for y in 0..h {
            line[y] = sq[y * w + x];
        }
        lower_envelope(&line[..h], &mut out[..h], &mut hull, &mut bounds);
        for y in 0..h {
            sq[y * w + x] = out[y];
        }
    }

    for y in 0..h {
        let row = &mut sq[y * w..(y + 1) * w];
        line[..w].copy_from_slice(row);
        lower_envelope(&line[..w], &mut out[..w], &mut hull, &mut bounds);
        row.copy_from_slice(&out[..w]);
    }

    let mut field = ScalarField::filled(width, height, 0.0);
    for (dst, &d) in field.values_mut().iter_mut().zip(&sq) {
        *dst = d.sqrt() as f32;
    }
    field
}

/// 1D squared distance transform of the sampled function `f`
///
/// `hull` and `bounds` are scratch buffers of at least `f.len()` and
/// `f.len() + 1` entries.
fn lower_envelope(f: &[f64], d: &mut [f64], hull: &mut [usize], bounds: &mut [f64]) {
    let n = f.len();
    if n == 0 {
        return;
    }

    let intersect = |q: usize, p: usize| -> f64 {
        let (qf, pf) = (q as f64, p as f64);
        ((f[q] + qf * qf) - (f[p] + pf * pf)) / (2.0 * qf - 2.0 * pf)
    };

    let mut k = 0usize;
    hull[0] = 0;
    bounds[0] = f64::NEG_INFINITY;
    bounds[1] = f64::INFINITY;

    for q in 1..n {
        let mut s = intersect(q, hull[k]);
        while s <= bounds[k] {
            k -= 1;
            s = intersect(q, hull[k]);
        }
        k += 1;
        hull[k] = q;
        bounds[k] = s;
        bounds[k + 1] = f64::INFINITY;
    }

    k = 0;
    for (q, out) in d.iter_mut().enumerate() {
        while bounds[k + 1] < q as f64 {
            k += 1;
        }
        let offset = q as f64 - hull[k] as f64;
        *out = offset * offset + f[hull[k]];
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    /// Reference transform by exhaustive search
    fn brute_force(interior: &[bool], w: usize, h: usize) -> Vec<f32> {
        let dark: Vec<(usize, usize)> = (0..w * h)
            .filter(|&i| !interior[i])
            .map(|i| (i % w, i / w))
            .collect();
        (0..w * h)
            .map(|i| {
                let (x, y) = (i % w, i / w);
                dark.iter()
                    .map(|&(dx, dy)| {
                        let ex = x as f64 - dx as f64;
                        let ey = y as f64 - dy as f64;
                        (ex * ex + ey * ey).sqrt()
                    })
                    .fold(f64::INFINITY, f64::min) as f32
            })
            .collect()
    }

    #[test]
    fn test_luminance_weights() {
        assert_eq!(luminance([255, 255, 255]), 255);
        assert_eq!(luminance([0, 0, 0]), 0);
        assert_eq!(luminance([255, 0, 0]), 29);
        assert_eq!(luminance([0, 255, 0]), 150);
        assert_eq!(luminance([0, 0, 255]), 76);
    }

    #[test]
    fn test_orange_stroke_is_boundary() {
        // 0.114 * 255 + 0.587 * 128 = 104.2
        assert_eq!(luminance([255, 128, 0]), 104);

        let mut raster = RgbImage::from_pixel(3, 1, Rgb([255, 255, 255]));
        raster.put_pixel(1, 0, Rgb([255, 128, 0]));
        assert_eq!(interior_mask(&raster), vec![true, false, true]);
    }

    #[test]
    fn test_mask_threshold() {
        let mut raster = RgbImage::from_pixel(3, 1, Rgb([128, 128, 128]));
        raster.put_pixel(1, 0, Rgb([129, 129, 129]));
        raster.put_pixel(2, 0, Rgb([0, 0, 0]));
        assert_eq!(interior_mask(&raster), vec![false, true, false]);
    }

    #[test]
    fn test_single_dark_pixel() {
        let (w, h) = (9usize, 7usize);
        let mut interior = vec![true; w * h];
        interior[3 * w + 4] = false;
        let field = distance_transform(&interior, w as u32, h as u32);

        assert_eq!(field.get(4, 3), 0.0);
        assert_eq!(field.get(5, 3), 1.0);
        assert!((field.get(0, 0) - 5.0).abs() < 1e-6);
        assert!((field.get(8, 6) - (16.0f32 + 9.0).sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_matches_brute_force() {
        let (w, h) = (23usize, 17usize);
        let interior: Vec<bool> = (0..w * h)
            .map(|i| {
                let (x, y) = (i % w, i / w);
                // a few scattered strokes
                !(x == 5 || (y == 11 && x > 8) || (x + 2 * y) % 29 == 0)
            })
            .collect();

        let fast = distance_transform(&interior, w as u32, h as u32);
        let slow = brute_force(&interior, w, h);
        for (a, b) in fast.values().iter().zip(&slow) {
            assert!((a - b).abs() < 1e-4, "{a} vs {b}");
        }
    }

    #[test]
    fn test_no_boundary_gives_zero_field() {
        let interior = vec![true; 12];
        let field = distance_transform(&interior, 4, 3);
        assert!(field.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_all_boundary_gives_zero_field() {
        let interior = vec![false; 12];
        let field = distance_transform(&interior, 4, 3);
        assert!(field.values().iter().all(|&v| v == 0.0));
    }
}
