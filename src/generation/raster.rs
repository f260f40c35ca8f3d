//! Pixel rasterization of ridges and seed markers

use glam::DVec2;
use image::{Rgb as Pixel, RgbImage};

use crate::config::Rgb;

/// Canvas filled with a single colour
pub fn filled_canvas(width: u32, height: u32, color: Rgb) -> RgbImage {
    RgbImage::from_pixel(width, height, Pixel(color))
}

/// Stroke a line segment onto the canvas
///
/// Endpoints are truncated to whole pixels first. Every pixel whose centre
/// lies within `thickness / 2` of the segment (never less than half a pixel)
/// is painted, so thick strokes get rounded caps. Parts of the segment off
/// the canvas are clipped.
pub fn draw_segment(image: &mut RgbImage, start: DVec2, end: DVec2, color: Rgb, thickness: u32) {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let a = start.trunc();
    let b = end.trunc();
    let half = (thickness as f64 / 2.0).max(0.5);

    let min = a.min(b) - DVec2::splat(half);
    let max = a.max(b) + DVec2::splat(half);
    let x0 = min.x.floor().max(0.0);
    let y0 = min.y.floor().max(0.0);
    let x1 = max.x.ceil().min((width - 1) as f64);
    let y1 = max.y.ceil().min((height - 1) as f64);
    if x0 > x1 || y0 > y1 {
        return;
    }

    let half_sq = half * half;
    for y in y0 as u32..=y1 as u32 {
        for x in x0 as u32..=x1 as u32 {
            let p = DVec2::new(x as f64, y as f64);
            if distance_sq_to_segment(p, a, b) <= half_sq {
                image.put_pixel(x, y, Pixel(color));
            }
        }
    }
}

/// Paint a filled disc, clipped to the canvas
pub fn draw_disc(image: &mut RgbImage, center: DVec2, radius: u32, color: Rgb) {
    let (width, height) = image.dimensions();
    let cx = center.x.trunc() as i64;
    let cy = center.y.trunc() as i64;
    let r = radius as i64;

    let x0 = (cx - r).max(0);
    let y0 = (cy - r).max(0);
    let x1 = (cx + r).min(width as i64 - 1);
    let y1 = (cy + r).min(height as i64 - 1);

    for y in y0..=y1 {
        for x in x0..=x1 {
            let (dx, dy) = (x - cx, y - cy);
            if dx * dx + dy * dy <= r * r {
                image.put_pixel(x as u32, y as u32, Pixel(color));
            }
        }
    }
}

/// Squared distance from `p` to the segment `a`-`b`
fn distance_sq_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq == 0.0 {
        return p.distance_squared(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance_squared(a + ab * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb = [255, 255, 255];
    const BLACK: Rgb = [0, 0, 0];

    fn count(image: &RgbImage, color: Rgb) -> usize {
        image.pixels().filter(|p| p.0 == color).count()
    }

    #[test]
    fn test_horizontal_segment_thickness() {
        let mut image = filled_canvas(20, 20, WHITE);
        draw_segment(&mut image, DVec2::new(2.0, 10.0), DVec2::new(17.0, 10.0), BLACK, 1);
        assert_eq!(count(&image, BLACK), 16);

        let mut image = filled_canvas(20, 20, WHITE);
        draw_segment(&mut image, DVec2::new(5.0, 10.0), DVec2::new(14.0, 10.0), BLACK, 3);
        // three rows of ten plus rounded caps
        assert!(count(&image, BLACK) >= 30);
        assert_eq!(image.get_pixel(10, 9).0, BLACK);
        assert_eq!(image.get_pixel(10, 11).0, BLACK);
        assert_eq!(image.get_pixel(10, 13).0, WHITE);
    }

    #[test]
    fn test_diagonal_segment_is_connected() {
        let mut image = filled_canvas(32, 32, WHITE);
        draw_segment(&mut image, DVec2::new(0.0, 3.0), DVec2::new(31.0, 20.0), BLACK, 1);
        for x in 0..32 {
            assert!((0..32).any(|y| image.get_pixel(x, y).0 == BLACK), "gap at column {x}");
        }
    }

    #[test]
    fn test_segment_clipped_to_canvas() {
        let mut image = filled_canvas(10, 10, WHITE);
        draw_segment(&mut image, DVec2::new(-500.0, 5.0), DVec2::new(500.0, 5.0), BLACK, 1);
        assert_eq!(count(&image, BLACK), 10);

        let mut image = filled_canvas(10, 10, WHITE);
        draw_segment(&mut image, DVec2::new(-50.0, -5.0), DVec2::new(-20.0, -8.0), BLACK, 2);
        assert_eq!(count(&image, BLACK), 0);
    }

    #[test]
    fn test_disc_area_and_clipping() {
        let mut image = filled_canvas(20, 20, WHITE);
        draw_disc(&mut image, DVec2::new(10.4, 10.9), 3, BLACK);
        // lattice points with x^2 + y^2 <= 9
        assert_eq!(count(&image, BLACK), 29);

        let mut image = filled_canvas(20, 20, WHITE);
        draw_disc(&mut image, DVec2::new(0.0, 0.0), 3, BLACK);
        assert_eq!(count(&image, BLACK), 11);
    }

    #[test]
    fn test_distance_to_degenerate_segment() {
        let a = DVec2::new(1.0, 1.0);
        assert_eq!(distance_sq_to_segment(DVec2::new(4.0, 5.0), a, a), 25.0);
    }
}
