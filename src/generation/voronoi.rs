//! Voronoi ridge construction from Delaunay triangulation
//!
//! Computes the planar Voronoi diagram of the seed points as the dual of
//! their Delaunay triangulation: every Delaunay edge shared by two triangles
//! becomes a ridge joining the two triangles' circumcenters.

use glam::DVec2;
use spade::{DelaunayTriangulation, Point2, Triangulation};
use tracing::trace;

use crate::error::{PatternError, Result};
use crate::generation::points::SeedPoint;

/// A finite Voronoi ridge (both endpoints are circumcenters of real triangles)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoronoiRidge {
    /// First ridge endpoint
    pub start: DVec2,
    /// Second ridge endpoint
    pub end: DVec2,
}

impl VoronoiRidge {
    /// Check whether either endpoint lies inside `[0, width] x [0, height]`
    ///
    /// Only one endpoint has to be on the canvas; the other may be far
    /// outside, which yields partial strokes along the canvas border.
    pub fn touches_canvas(&self, width: f64, height: f64) -> bool {
        let inside = |p: DVec2| (0.0..=width).contains(&p.x) && (0.0..=height).contains(&p.y);
        inside(self.start) || inside(self.end)
    }
}

/// Four points far outside the canvas, one beyond each corner
///
/// Adding them to the seed set bounds every cell that covers the canvas, so
/// the visible boundaries are all finite ridges.
pub fn auxiliary_points(width: f64, height: f64) -> [SeedPoint; 4] {
    [
        DVec2::new(-width, -height),
        DVec2::new(-width, 2.0 * height),
        DVec2::new(2.0 * width, -height),
        DVec2::new(2.0 * width, 2.0 * height),
    ]
}

/// Compute all finite Voronoi ridges of the seed points
///
/// The seed set is augmented with [`auxiliary_points`] before triangulating.
/// Ridges running off to infinity (Delaunay hull edges) and ridges with a
/// non-finite circumcenter are dropped.
///
/// # Arguments
///
/// * `points` - Seed points in canvas coordinates
/// * `width` - Canvas width
/// * `height` - Canvas height
///
/// # Errors
///
/// Returns `GenerationFailed` if the triangulation rejects a point
/// (non-finite or out-of-range coordinates).
pub fn compute_ridges(points: &[SeedPoint], width: f64, height: f64) -> Result<Vec<VoronoiRidge>> {
    let vertices: Vec<Point2<f64>> = points
        .iter()
        .chain(auxiliary_points(width, height).iter())
        .map(|p| Point2::new(p.x, p.y))
        .collect();

    let triangulation: DelaunayTriangulation<Point2<f64>> =
        DelaunayTriangulation::bulk_load(vertices)
            .map_err(|e| PatternError::GenerationFailed(format!("delaunay triangulation: {e:?}")))?;

    let ridges = triangulation
        .undirected_edges()
        .filter_map(|edge| {
            let directed = edge.as_directed();
            let left = directed.face().as_inner()?;
            let right = directed.rev().face().as_inner()?;

            let start = to_dvec(left.circumcenter());
            let end = to_dvec(right.circumcenter());
            (start.is_finite() && end.is_finite()).then_some(VoronoiRidge { start, end })
        })
        .collect::<Vec<_>>();

    trace!(
        vertices = triangulation.num_vertices(),
        ridges = ridges.len(),
        "computed voronoi ridges"
    );
    Ok(ridges)
}

#[inline]
fn to_dvec(p: Point2<f64>) -> DVec2 {
    DVec2::new(p.x, p.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PointDistribution;
    use crate::generation::points::generate_points;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_single_seed_has_no_visible_ridges() {
        // One seed owns the whole canvas; the only ridges separate it from the
        // auxiliary points and lie far outside.
        let ridges = compute_ridges(&[DVec2::new(400.0, 300.0)], 800.0, 600.0).unwrap();
        assert!(!ridges.is_empty());
        assert!(ridges.iter().all(|r| !r.touches_canvas(800.0, 600.0)));
    }

    #[test]
    fn test_two_seeds_bisector_stays_off_canvas() {
        // Both endpoints of the bisector ridge lie beyond the canvas, so it is
        // not drawn even though it crosses the canvas.
        let seeds = [DVec2::new(200.0, 300.0), DVec2::new(600.0, 300.0)];
        let ridges = compute_ridges(&seeds, 800.0, 600.0).unwrap();

        let bisector: Vec<_> = ridges
            .iter()
            .filter(|r| (r.start.x - 400.0).abs() < 1e-6 && (r.end.x - 400.0).abs() < 1e-6)
            .collect();
        assert!(!bisector.is_empty());
        assert!(ridges.iter().all(|r| !r.touches_canvas(800.0, 600.0)));
    }

    #[test]
    fn test_three_seeds_meet_at_circumcenter() {
        let seeds = [
            DVec2::new(200.0, 200.0),
            DVec2::new(600.0, 200.0),
            DVec2::new(400.0, 500.0),
        ];
        let center = DVec2::new(400.0, 850.0 / 3.0);
        let ridges = compute_ridges(&seeds, 800.0, 600.0).unwrap();

        let spokes: Vec<_> = ridges
            .iter()
            .filter(|r| r.start.distance(center) < 1e-6 || r.end.distance(center) < 1e-6)
            .collect();
        assert_eq!(spokes.len(), 3);
        assert!(spokes.iter().all(|r| r.touches_canvas(800.0, 600.0)));
    }

    #[test]
    fn test_ridge_endpoints_are_equidistant() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let field = generate_points(PointDistribution::Random, 40, 800, 600, &mut rng).unwrap();
        let ridges = compute_ridges(&field.points, 800.0, 600.0).unwrap();

        let mut all = field.points.clone();
        all.extend(auxiliary_points(800.0, 600.0));

        // Each ridge endpoint is a Voronoi vertex: its nearest seeds are tied
        for ridge in &ridges {
            for vertex in [ridge.start, ridge.end] {
                let mut dists: Vec<f64> = all.iter().map(|p| p.distance(vertex)).collect();
                dists.sort_by(|a, b| a.partial_cmp(b).unwrap());
                assert!((dists[0] - dists[2]).abs() < 1e-6 * dists[0].max(1.0));
            }
        }
    }

    #[test]
    fn test_non_finite_seed_fails() {
        let result = compute_ridges(&[DVec2::new(f64::NAN, 1.0)], 800.0, 600.0);
        assert!(matches!(result, Err(PatternError::GenerationFailed(_))));
    }

    #[test]
    fn test_ridges_are_deterministic() {
        let seeds: Vec<DVec2> = (0..30)
            .map(|i| DVec2::new((i * 37 % 800) as f64 + 0.5, (i * 53 % 600) as f64 + 0.25))
            .collect();
        let a = compute_ridges(&seeds, 800.0, 600.0).unwrap();
        let b = compute_ridges(&seeds, 800.0, 600.0).unwrap();
        assert_eq!(a, b);
    }
}
