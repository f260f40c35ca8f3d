//! Linear contrast stretch

use image::RgbImage;

/// Map every channel through `v * gain + bias`, rounded half to even and
/// saturated to a byte
///
/// # Example
///
/// ```
/// use image::{Rgb, RgbImage};
/// use voronoi_relief::enhance_contrast;
///
/// let image = RgbImage::from_pixel(1, 1, Rgb([100, 0, 250]));
/// let out = enhance_contrast(&image, 1.1, 5.0);
/// assert_eq!(out.get_pixel(0, 0).0, [115, 5, 255]);
/// ```
pub fn enhance_contrast(image: &RgbImage, gain: f32, bias: f32) -> RgbImage {
    // one lookup per byte value
    let table: [u8; 256] =
        std::array::from_fn(|v| (v as f32 * gain + bias).round_ties_even().clamp(0.0, 255.0) as u8);

    let mut out = image.clone();
    for pixel in out.pixels_mut() {
        pixel.0 = pixel.0.map(|c| table[c as usize]);
    }
    out
}
