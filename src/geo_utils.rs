//! # Geographic Utilities
//!
//! Great-circle primitives shared by route construction, destination
//! selection and progress tracking.
//!
//! ## Overview
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`distance_km`] | Great-circle distance between two coordinates |
//! | [`initial_bearing`] | Initial compass bearing from one coordinate to another |
//! | [`bearing_separation`] | Circular distance between two bearings |
//! | [`polyline_length_km`] | Summed segment length of a coordinate sequence |
//!
//! ## Algorithm Notes
//!
//! ### Haversine Formula
//!
//! Distances use the Haversine formula on a sphere of radius 6371 km. The
//! whole engine is calibrated against this exact radius: route lengths,
//! progress percentages and selection buckets all assume it, so it is
//! deliberately not the IUGG mean radius (6371.0088 km) that general-purpose
//! geodesy libraries use.
//!
//! Reference: [Haversine formula (Wikipedia)](https://en.wikipedia.org/wiki/Haversine_formula)
//!
//! ### Coordinate System
//!
//! All functions expect WGS84 latitude/longitude in degrees. They are total
//! over finite inputs; validation of caller-supplied coordinates happens at
//! the engine entry points, not here.

use crate::Coordinate;

/// Earth radius in kilometers used throughout the engine.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

// =============================================================================
// Distance and Bearing
// =============================================================================

/// Calculate the great-circle distance between two coordinates in kilometers.
///
/// Symmetric (`distance_km(a, b) == distance_km(b, a)`) and zero for
/// identical coordinates. Numerically stable for antipodal pairs: the
/// Haversine intermediate is clamped to [0, 1] before the square roots, so
/// floating-point overshoot can never produce NaN.
///
/// # Example
///
/// ```rust
/// use journey_engine::{Coordinate, geo_utils};
///
/// let london = Coordinate::new(51.5074, -0.1278);
/// let paris = Coordinate::new(48.8566, 2.3522);
///
/// let distance = geo_utils::distance_km(&london, &paris);
/// assert!((distance - 343.5).abs() < 2.0); // ~344 km
/// ```
#[inline]
pub fn distance_km(a: &Coordinate, b: &Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);

    // Rounding can push h a hair outside [0, 1] for antipodal pairs, which
    // would make the square roots return NaN.
    let h = h.clamp(0.0, 1.0);

    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Calculate the initial compass bearing from `a` to `b` in degrees.
///
/// Normalized to [0, 360) with 0 = north, 90 = east. For identical
/// coordinates the result is implementation-defined (currently 0.0); callers
/// must not rely on a specific value in that case.
///
/// # Example
///
/// ```rust
/// use journey_engine::{Coordinate, geo_utils};
///
/// let origin = Coordinate::new(0.0, 0.0);
/// let due_east = Coordinate::new(0.0, 10.0);
///
/// let bearing = geo_utils::initial_bearing(&origin, &due_east);
/// assert!((bearing - 90.0).abs() < 1e-9);
/// ```
#[inline]
pub fn initial_bearing(a: &Coordinate, b: &Coordinate) -> f64 {
    let d_lng = (b.longitude - a.longitude).to_radians();
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();

    let y = d_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lng.cos();

    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Circular distance between two bearings in degrees, in [0, 180].
///
/// Takes the smaller of the clockwise and counterclockwise angular
/// differences, so 350° and 10° are 20° apart, not 340°.
#[inline]
pub fn bearing_separation(b1: f64, b2: f64) -> f64 {
    let diff = (b1 - b2).abs();
    diff.min(360.0 - diff)
}

// =============================================================================
// Polylines
// =============================================================================

/// Total length of a coordinate sequence in kilometers.
///
/// Sums the great-circle distance between consecutive points. Empty or
/// single-point sequences return 0.0.
pub fn polyline_length_km(points: &[Coordinate]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }

    points
        .windows(2)
        .map(|w| distance_km(&w[0], &w[1]))
        .sum()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Distance, Haversine};

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    #[test]
    fn test_distance_same_point_is_zero() {
        let p = Coordinate::new(51.5074, -0.1278);
        assert_eq!(distance_km(&p, &p), 0.0);
    }

    #[test]
    fn test_distance_known_value() {
        // London to Paris is approximately 344 km
        let london = Coordinate::new(51.5074, -0.1278);
        let paris = Coordinate::new(48.8566, 2.3522);
        assert!(approx_eq(distance_km(&london, &paris), 343.5, 2.0));
    }

    #[test]
    fn test_distance_symmetry() {
        let a = Coordinate::new(35.6762, 139.6503); // Tokyo
        let b = Coordinate::new(-33.8688, 151.2093); // Sydney
        assert_eq!(distance_km(&a, &b), distance_km(&b, &a));
    }

    #[test]
    fn test_distance_antipodal_is_finite() {
        // Exactly antipodal: half the Earth's circumference
        let a = Coordinate::new(0.0, 0.0);
        let b = Coordinate::new(0.0, 180.0);
        let d = distance_km(&a, &b);
        assert!(d.is_finite());
        assert!(approx_eq(d, std::f64::consts::PI * EARTH_RADIUS_KM, 1.0));

        // Near-antipodal pairs exercise the clamp on the intermediate term
        let c = Coordinate::new(-0.000_000_1, 179.999_999_9);
        assert!(distance_km(&a, &c).is_finite());
    }

    #[test]
    fn test_distance_agrees_with_geo_haversine() {
        // geo uses the IUGG mean radius (6371.0088 km); agreement should be
        // within that radius-model difference (~0.014%).
        let london = Coordinate::new(51.5074, -0.1278);
        let tokyo = Coordinate::new(35.6762, 139.6503);

        let ours = distance_km(&london, &tokyo);
        let oracle = Haversine::distance(geo::Point::from(london), geo::Point::from(tokyo)) / 1000.0;

        assert!((ours - oracle).abs() / oracle < 2e-4);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = Coordinate::new(0.0, 0.0);
        assert!(approx_eq(initial_bearing(&origin, &Coordinate::new(10.0, 0.0)), 0.0, 1e-9));
        assert!(approx_eq(initial_bearing(&origin, &Coordinate::new(0.0, 10.0)), 90.0, 1e-9));
        assert!(approx_eq(initial_bearing(&origin, &Coordinate::new(-10.0, 0.0)), 180.0, 1e-9));
        assert!(approx_eq(initial_bearing(&origin, &Coordinate::new(0.0, -10.0)), 270.0, 1e-9));
    }

    #[test]
    fn test_bearing_is_normalized() {
        let a = Coordinate::new(51.5074, -0.1278);
        let b = Coordinate::new(40.7128, -74.0060);
        let bearing = initial_bearing(&a, &b);
        assert!((0.0..360.0).contains(&bearing));
    }

    #[test]
    fn test_bearing_reciprocal_differs_by_180() {
        let a = Coordinate::new(51.5074, -0.1278);
        let b = Coordinate::new(48.8566, 2.3522);
        let forward = initial_bearing(&a, &b);
        let back = initial_bearing(&b, &a);
        // Reciprocal bearings differ by ~180 degrees modulo 360; the small
        // residual comes from great-circle convergence over the separation.
        assert!(approx_eq(bearing_separation(forward, back), 180.0, 3.0));
    }

    #[test]
    fn test_bearing_same_point_does_not_crash() {
        let p = Coordinate::new(12.34, 56.78);
        let bearing = initial_bearing(&p, &p);
        assert!(bearing.is_finite());
        assert!((0.0..360.0).contains(&bearing));
    }

    #[test]
    fn test_bearing_separation_wraps() {
        assert_eq!(bearing_separation(350.0, 10.0), 20.0);
        assert_eq!(bearing_separation(10.0, 350.0), 20.0);
        assert_eq!(bearing_separation(0.0, 180.0), 180.0);
        assert_eq!(bearing_separation(90.0, 90.0), 0.0);
    }

    #[test]
    fn test_polyline_length_degenerate() {
        assert_eq!(polyline_length_km(&[]), 0.0);
        assert_eq!(polyline_length_km(&[Coordinate::new(1.0, 1.0)]), 0.0);
    }

    #[test]
    fn test_polyline_length_sums_segments() {
        let points = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(0.0, 2.0),
        ];
        let total = polyline_length_km(&points);
        let direct = distance_km(&points[0], &points[2]);
        // Along the equator the two-segment path equals the direct distance
        assert!(approx_eq(total, direct, 1e-9));
        assert!(approx_eq(total, 222.4, 1.0));
    }
}
