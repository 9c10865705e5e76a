//! # Route Construction
//!
//! Builds interpolated polylines and [`Route`] aggregates between two cities.
//!
//! ## Algorithm Notes
//!
//! Polylines interpolate latitude and longitude independently and linearly
//! between the endpoints. This is an approximation, not a geodesic: for long
//! routes the polyline drifts off the true great circle. It is kept because
//! it is cheap, deterministic, and the rest of the engine (progress
//! percentages, destination buckets) is calibrated against this exact model.
//! The route's `total_distance` is always the great-circle distance between
//! the endpoints, never the summed polyline segments.

use crate::geo_utils::distance_km;
use crate::{City, Coordinate, EngineError};

/// Default spacing between interpolated polyline points, in kilometers.
pub const DEFAULT_STEP_KM: f64 = 10.0;

/// A journey route between two cities.
///
/// Immutable after construction. Invariants upheld by [`build_route`]:
/// `polyline` starts at the start city's coordinate, ends at the end city's
/// coordinate, and `total_distance` is the great-circle distance between the
/// two (the summed polyline segment lengths are an interpolation
/// approximation used only for position lookup).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Route {
    /// Where the journey begins
    pub start_city: City,
    /// Where the journey ends
    pub end_city: City,
    /// Interpolated points from start to end, inclusive of both
    pub polyline: Vec<Coordinate>,
    /// Great-circle distance between the endpoints, in kilometers
    pub total_distance: f64,
}

/// Build an interpolated polyline between two coordinates.
///
/// Produces `max(2, ceil(distance / step_km)) + 1` points, inclusive of both
/// endpoints, by linear interpolation of latitude and longitude (see the
/// module notes on why this is not a geodesic). Identical endpoints yield a
/// 3-point polyline of the same coordinate.
///
/// # Errors
///
/// Fails with [`EngineError`] if either coordinate is invalid or `step_km`
/// is not a positive finite number.
///
/// # Example
///
/// ```rust
/// use journey_engine::{Coordinate, build_polyline};
///
/// let a = Coordinate::new(0.0, 0.0);
/// let b = Coordinate::new(0.0, 1.0); // ~111 km east
///
/// let polyline = build_polyline(&a, &b, 10.0).unwrap();
/// assert_eq!(polyline.first(), Some(&a));
/// assert_eq!(polyline.last(), Some(&b));
/// assert_eq!(polyline.len(), 13); // ceil(111.2 / 10) = 12 intervals
/// ```
pub fn build_polyline(
    a: &Coordinate,
    b: &Coordinate,
    step_km: f64,
) -> Result<Vec<Coordinate>, EngineError> {
    a.validate("polyline start")?;
    b.validate("polyline end")?;
    if !step_km.is_finite() || step_km <= 0.0 {
        return Err(EngineError::InvalidArgument {
            name: "step_km",
            value: step_km,
        });
    }

    let total = distance_km(a, b);
    let intervals = ((total / step_km).ceil() as usize).max(2);

    let mut polyline = Vec::with_capacity(intervals + 1);
    for i in 0..intervals {
        let fraction = i as f64 / intervals as f64;
        polyline.push(Coordinate::new(
            a.latitude + (b.latitude - a.latitude) * fraction,
            a.longitude + (b.longitude - a.longitude) * fraction,
        ));
    }
    // Push the endpoint itself rather than interpolating at fraction 1.0, so
    // the last point equals `b` exactly.
    polyline.push(*b);

    Ok(polyline)
}

/// Build a [`Route`] between two cities with the default polyline step.
///
/// # Errors
///
/// Fails with [`EngineError::InvalidCoordinate`] if either city has an
/// invalid coordinate.
///
/// # Example
///
/// ```rust
/// use journey_engine::{City, Coordinate, build_route};
///
/// let start = City::new("London", Coordinate::new(51.5074, -0.1278));
/// let end = City::new("Paris", Coordinate::new(48.8566, 2.3522));
///
/// let route = build_route(&start, &end).unwrap();
/// assert_eq!(route.polyline[0], start.coordinate);
/// assert_eq!(*route.polyline.last().unwrap(), end.coordinate);
/// ```
pub fn build_route(start: &City, end: &City) -> Result<Route, EngineError> {
    build_route_with_step(start, end, DEFAULT_STEP_KM)
}

/// Build a [`Route`] with an explicit polyline step in kilometers.
///
/// # Errors
///
/// Fails with [`EngineError`] if either city has an invalid coordinate or
/// `step_km` is not a positive finite number.
pub fn build_route_with_step(
    start: &City,
    end: &City,
    step_km: f64,
) -> Result<Route, EngineError> {
    let polyline = build_polyline(&start.coordinate, &end.coordinate, step_km)?;
    let total_distance = distance_km(&start.coordinate, &end.coordinate);

    Ok(Route {
        start_city: start.clone(),
        end_city: end.clone(),
        polyline,
        total_distance,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
