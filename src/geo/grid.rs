use serde::{Deserialize, Serialize};

/// Approximate number of kilometers per degree of latitude
pub const KM_PER_DEGREE: f64 = 111.0;

/// A geographic coordinate
///
/// Equality is exact floating-point equality; points only ever need to be
/// compared for grid identity, never fuzzily.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lon)
    }
}

/// Generates the grid of sub-search centers covering the search area
///
/// The area is a square bounding box around `center`, not a circular mask:
/// corner points outside the true radius are intentionally included because
/// each sub-search applies its own smaller radius, giving full coverage with
/// overlap.
///
/// The degree conversion uses a flat-earth approximation (valid at the
/// scale of a city-sized radius). The longitude span is widened by
/// `1 / cos(lat)` to compensate for longitude compression away from the
/// equator; latitudes approaching the poles are out of intended use.
///
/// Points are laid out evenly from `center - delta` to `center + delta`
/// inclusive on both axes, in row-major order (latitude outer, longitude
/// inner). The result is deterministic for fixed inputs.
///
/// # Arguments
///
/// * `center` - Center of the overall search area
/// * `radius_km` - Search radius in kilometers
/// * `step_km` - Distance between neighboring grid points in kilometers
pub fn generate_grid(center: GeoPoint, radius_km: f64, step_km: f64) -> Vec<GeoPoint> {
    let lat_delta = radius_km / KM_PER_DEGREE;
    // Longitude degrees per km varies with latitude
    let lon_delta = radius_km / (KM_PER_DEGREE * center.lat.to_radians().cos());

    let lat_steps = axis_steps(radius_km, step_km);
    let lon_steps = axis_steps(radius_km, step_km);

    let mut points = Vec::with_capacity(lat_steps * lon_steps);
    for i in 0..lat_steps {
        let lat = axis_value(center.lat, lat_delta, i, lat_steps);
        for j in 0..lon_steps {
            let lon = axis_value(center.lon, lon_delta, j, lon_steps);
            points.push(GeoPoint { lat, lon });
        }
    }

    points
}

/// Number of grid points along one axis, never less than one
fn axis_steps(radius_km: f64, step_km: f64) -> usize {
    let steps = (2.0 * radius_km / step_km).ceil();
    if steps < 1.0 {
        1
    } else {
        steps as usize
    }
}

/// The i-th of `steps` evenly spaced values on `[center - delta, center + delta]`
///
/// A single-step axis collapses to the center value rather than dividing by
/// `steps - 1 == 0`.
fn axis_value(center: f64, delta: f64, index: usize, steps: usize) -> f64 {
    if steps == 1 {
        return center;
    }
    center - delta + 2.0 * delta * index as f64 / (steps - 1) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn center() -> GeoPoint {
        GeoPoint::new(44.9778, -93.2650)
    }

    #[test]
    fn test_grid_point_count() {
        // ceil(2*5 / 2.5) = 4 steps per axis, 16 points total
        let points = generate_grid(center(), 5.0, 2.5);
        assert_eq!(points.len(), 16);
    }

    #[test]
    fn test_grid_is_deterministic() {
        let first = generate_grid(center(), 5.0, 2.5);
        let second = generate_grid(center(), 5.0, 2.5);
        assert_eq!(first, second);
    }

    #[test]
    fn test_grid_spans_bounding_box_inclusive() {
        let c = center();
        let points = generate_grid(c, 5.0, 2.5);

        let lat_delta = 5.0 / KM_PER_DEGREE;
        let lon_delta = 5.0 / (KM_PER_DEGREE * c.lat.to_radians().cos());

        // Row-major: first point is the south-west corner, last the north-east
        let first = points[0];
        let last = points[points.len() - 1];
        assert!((first.lat - (c.lat - lat_delta)).abs() < 1e-12);
        assert!((first.lon - (c.lon - lon_delta)).abs() < 1e-12);
        assert!((last.lat - (c.lat + lat_delta)).abs() < 1e-12);
        assert!((last.lon - (c.lon + lon_delta)).abs() < 1e-12);
    }

    #[test]
    fn test_grid_row_major_order() {
        let points = generate_grid(center(), 5.0, 2.5);

        // Within the first row latitude is constant and longitude increases
        for pair in points[..4].windows(2) {
            assert_eq!(pair[0].lat, pair[1].lat);
            assert!(pair[0].lon < pair[1].lon);
        }
        // Across rows latitude increases
        assert!(points[0].lat < points[4].lat);
    }

    #[test]
    fn test_zero_radius_degenerates_to_center() {
        let c = center();
        let points = generate_grid(c, 0.0, 2.5);
        assert_eq!(points, vec![c]);
    }

    #[test]
    fn test_tiny_radius_single_point() {
        // 2*0.5 / 2.5 rounds up to one step per axis
        let c = center();
        let points = generate_grid(c, 0.5, 2.5);
        assert_eq!(points, vec![c]);
    }

    #[test]
    fn test_longitude_span_widens_away_from_equator() {
        let equator = generate_grid(GeoPoint::new(0.0, 10.0), 5.0, 2.5);
        let north = generate_grid(GeoPoint::new(60.0, 10.0), 5.0, 2.5);

        let span = |points: &[GeoPoint]| {
            points[points.len() - 1].lon - points[0].lon
        };

        // cos(60°) = 0.5, so the northern grid spans twice the degrees
        assert!(span(&north) > 1.9 * span(&equator));
    }
}
