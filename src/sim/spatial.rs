use geo::{Area, BoundingRect, Contains, MultiPolygon, Point};
use rand::Rng;

use crate::error::SimError;

// How many rejected draws per requested point we tolerate before declaring
// the boundary unusable. Uniform rejection over the bounding box accepts at
// the polygon/box area ratio, so real study areas finish well under this.
const MAX_ATTEMPTS_PER_POINT: usize = 10_000;

// ---------------------------------------------------------------------------
// Uniform-in-polygon sampling
// ---------------------------------------------------------------------------

/// Draw `n` points uniformly distributed inside the boundary polygon, by
/// rejection sampling over its bounding box.
///
/// Points are returned in the boundary's own CRS. No minimum spacing or
/// clustering control is applied; the distribution is purely uniform.
pub fn sample_points<R: Rng>(
    boundary: &MultiPolygon<f64>,
    n: usize,
    rng: &mut R,
) -> Result<Vec<Point<f64>>, SimError> {
    if boundary.unsigned_area() <= 0.0 {
        return Err(SimError::DegenerateBoundary);
    }
    let rect = boundary
        .bounding_rect()
        .ok_or(SimError::DegenerateBoundary)?;
    let (min, max) = (rect.min(), rect.max());

    let mut points = Vec::with_capacity(n);
    let mut attempts = 0usize;
    let budget = n.saturating_mul(MAX_ATTEMPTS_PER_POINT);

    while points.len() < n {
        if attempts >= budget {
            return Err(SimError::SamplingStalled {
                attempts,
                accepted: points.len(),
                requested: n,
            });
        }
        attempts += 1;

        let candidate = Point::new(
            rng.gen_range(min.x..max.x),
            rng.gen_range(min.y..max.y),
        );
        if boundary.contains(&candidate) {
            points.push(candidate);
        }
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::polygon;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn square() -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 100.0, y: 0.0),
            (x: 100.0, y: 100.0),
            (x: 0.0, y: 100.0),
        ]])
    }

    #[test]
    fn all_points_land_inside_the_boundary() {
        let boundary = square();
        let mut rng = StdRng::seed_from_u64(11);
        let points = sample_points(&boundary, 500, &mut rng).unwrap();
        assert_eq!(points.len(), 500);
        assert!(points.iter().all(|p| boundary.contains(p)));
    }

    #[test]
    fn multi_part_boundaries_are_sampled_across_parts() {
        let two_squares = MultiPolygon(vec![
            polygon![(x: 0.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 0.0, y: 10.0)],
            polygon![(x: 90.0, y: 90.0), (x: 100.0, y: 90.0), (x: 100.0, y: 100.0), (x: 90.0, y: 100.0)],
        ]);
        let mut rng = StdRng::seed_from_u64(11);
        let points = sample_points(&two_squares, 400, &mut rng).unwrap();
        let in_low = points.iter().filter(|p| p.x() < 50.0).count();
        // Equal-area parts should each catch a substantial share.
        assert!(in_low > 100 && in_low < 300, "lopsided split: {in_low}/400");
    }

    #[test]
    fn zero_area_boundary_is_rejected() {
        let line = MultiPolygon(vec![polygon![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 0.0, y: 0.0),
        ]]);
        let mut rng = StdRng::seed_from_u64(11);
        assert!(matches!(
            sample_points(&line, 10, &mut rng),
            Err(SimError::DegenerateBoundary)
        ));
    }
}
