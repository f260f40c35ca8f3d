//! Final image composition

use image::{Rgb, RgbImage};

use super::check_shape;
use crate::config::{BaseColor, Rgb as Color};
use crate::error::Result;
use crate::relief::ScalarField;

/// HSV value channel: the brightest of the three components
#[inline]
pub fn value_channel(pixel: [u8; 3]) -> u8 {
    pixel[0].max(pixel[1]).max(pixel[2])
}

/// Multiply the base image by `lighting` and add the tinted highlights
///
/// With [`BaseColor::White`] the base is a flat 255 field; with
/// [`BaseColor::RasterValue`] it is the value channel of `raster`. Each
/// channel becomes `base * lighting + specular * reflection`, clamped to the
/// byte range and truncated.
///
/// # Errors
///
/// Returns `InvalidConfig` if either field differs from the raster in shape.
pub fn compose(
    base: BaseColor,
    raster: &RgbImage,
    lighting: &ScalarField,
    specular: &ScalarField,
    reflection: Color,
) -> Result<RgbImage> {
    let dims = raster.dimensions();
    check_shape("lighting", dims, lighting.dimensions())?;
    check_shape("specular", dims, specular.dimensions())?;

    let reflection = reflection.map(f32::from);
    let mut out = RgbImage::new(dims.0, dims.1);
    let cells = lighting.values().iter().zip(specular.values());

    for ((dst, src), (&light, &spec)) in out.pixels_mut().zip(raster.pixels()).zip(cells) {
        let base = match base {
            BaseColor::White => 255.0,
            BaseColor::RasterValue => f32::from(value_channel(src.0)),
        };
        let lit = base * light;
        *dst = Rgb(reflection.map(|r| (lit + spec * r).clamp(0.0, 255.0) as u8));
    }
    Ok(out)
}

/// Bitwise complement of every channel (white lines on black for dark-on-light
/// patterns)
pub fn invert(raster: &RgbImage) -> RgbImage {
    let mut out = raster.clone();
    for pixel in out.pixels_mut() {
        pixel.0 = pixel.0.map(|c| !c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PatternError;

    #[test]
    fn test_white_base() {
        let raster = RgbImage::from_pixel(2, 2, Rgb([10, 20, 30]));
        let lighting = ScalarField::filled(2, 2, 0.5);
        let specular = ScalarField::filled(2, 2, 0.0);
        let out = compose(BaseColor::White, &raster, &lighting, &specular, [255, 255, 255]).unwrap();
        assert!(out.pixels().all(|p| p.0 == [127, 127, 127]));
    }

    #[test]
    fn test_raster_value_base() {
        let mut raster = RgbImage::from_pixel(2, 1, Rgb([255, 255, 255]));
        raster.put_pixel(1, 0, Rgb([0, 0, 200]));
        let lighting = ScalarField::filled(2, 1, 1.0);
        let specular = ScalarField::filled(2, 1, 0.0);
        let out = compose(BaseColor::RasterValue, &raster, &lighting, &specular, [0, 0, 0]).unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [255, 255, 255]);
        assert_eq!(out.get_pixel(1, 0).0, [200, 200, 200]);
    }

    #[test]
    fn test_highlights_are_tinted_and_clamped() {
        let raster = RgbImage::new(1, 1);
        let lighting = ScalarField::filled(1, 1, 0.2);
        let specular = ScalarField::filled(1, 1, 0.5);
        let out = compose(BaseColor::White, &raster, &lighting, &specular, [255, 0, 100]).unwrap();
        // 51 + 127.5, 51 + 0, 51 + 50
        assert_eq!(out.get_pixel(0, 0).0, [178, 51, 101]);

        let specular = ScalarField::filled(1, 1, 3.0);
        let out = compose(BaseColor::White, &raster, &lighting, &specular, [255, 0, 100]).unwrap();
        assert_eq!(out.get_pixel(0, 0).0, [255, 51, 255]);
    }

    #[test]
    fn test_rejects_mismatched_fields() {
        let raster = RgbImage::new(4, 3);
        let lighting = ScalarField::filled(4, 3, 1.0);
        let specular = ScalarField::filled(3, 4, 0.0);
        let err = compose(BaseColor::White, &raster, &lighting, &specular, [255, 255, 255]).unwrap_err();
        assert!(matches!(err, PatternError::InvalidConfig { field: "specular", .. }));

        let err = compose(BaseColor::White, &raster, &specular, &lighting, [255, 255, 255]).unwrap_err();
        assert!(matches!(err, PatternError::InvalidConfig { field: "lighting", .. }));
    }

    #[test]
    fn test_invert() {
        let mut raster = RgbImage::from_pixel(2, 1, Rgb([255, 255, 255]));
        raster.put_pixel(1, 0, Rgb([0, 10, 200]));
        let inverted = invert(&raster);
        assert_eq!(inverted.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(inverted.get_pixel(1, 0).0, [255, 245, 55]);
        assert_eq!(invert(&inverted), raster);
    }
}
