//! # Progress Tracking
//!
//! Turns accumulated activity totals into a position on a route's polyline
//! plus remaining-distance and percentage figures.
//!
//! The position walk is segment-cumulative: it consumes great-circle segment
//! lengths one by one and interpolates linearly inside the segment where the
//! traveled distance runs out, matching the linear model the polyline was
//! built with. Percentages are computed against the route's endpoint
//! great-circle distance, not the summed polyline, so a runner is at 100%
//! exactly when they have covered the advertised route length.
//!
//! Everything here is a pure function of its inputs: recomputing with the
//! same route and activities yields the same result, and nothing is stored.

use log::trace;

use crate::geo_utils::distance_km;
use crate::path::Route;
use crate::{Coordinate, EngineError};

/// A single synced activity, as delivered by an external data collaborator.
///
/// Read-only input; the engine never stores or mutates these.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityRecord {
    /// Distance covered, in meters
    pub distance_meters: f64,
    /// Moving time, in seconds
    pub moving_time_seconds: f64,
    /// Total elevation gain, in meters
    pub elevation_gain_meters: f64,
}

impl ActivityRecord {
    /// Create an activity record.
    pub fn new(distance_meters: f64, moving_time_seconds: f64, elevation_gain_meters: f64) -> Self {
        Self {
            distance_meters,
            moving_time_seconds,
            elevation_gain_meters,
        }
    }
}

/// Aggregate totals over a set of activities.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JourneyStats {
    /// Total distance across all activities, in kilometers
    pub total_distance_km: f64,
    /// Total moving time, in seconds
    pub total_time_seconds: f64,
    /// Average pace in minutes per kilometer (0 when no distance)
    pub average_pace_min_per_km: f64,
    /// Total elevation gain, in meters
    pub total_elevation_gain_meters: f64,
}

/// An interpolated position on a route with remaining distance and progress.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionFix {
    /// Interpolated coordinate on the polyline
    pub position: Coordinate,
    /// Distance still to cover, in kilometers
    pub distance_remaining_km: f64,
    /// Progress in percent, clamped to [0, 100]
    pub progress_percentage: f64,
}

/// Full journey progress: position, distances and aggregate stats.
///
/// A pure function output with no lifecycle of its own; recomputed fresh on
/// every call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JourneyProgress {
    /// Current interpolated position on the route
    pub current_position: Coordinate,
    /// Distance covered so far, clamped to the route length, in kilometers
    pub distance_traveled_km: f64,
    /// Distance still to cover, in kilometers
    pub distance_remaining_km: f64,
    /// Progress in percent, clamped to [0, 100]
    pub progress_percentage: f64,
    /// Aggregate totals over the contributing activities
    pub stats: JourneyStats,
}

// =============================================================================
// Position Tracking
// =============================================================================

/// Locate the position `distance_traveled_km` along a route's polyline.
///
/// Walks the polyline segment by segment, accumulating great-circle segment
/// lengths, and interpolates linearly inside the segment where the traveled
/// distance runs out. Traveling at or beyond the route's `total_distance`
/// (or past the end of the polyline) clamps to the end coordinate with 0
/// remaining and 100%. A zero-length route reports 100% immediately.
/// Negative traveled distances are treated as 0.
///
/// # Errors
///
/// Fails with [`EngineError::InvalidArgument`] if `distance_traveled_km` is
/// NaN or infinite.
///
/// # Example
///
/// ```rust
/// use journey_engine::{City, Coordinate, build_route, track_position};
///
/// let start = City::new("London", Coordinate::new(51.5074, -0.1278));
/// let end = City::new("Paris", Coordinate::new(48.8566, 2.3522));
/// let route = build_route(&start, &end).unwrap();
///
/// let fix = track_position(&route, 0.0).unwrap();
/// assert_eq!(fix.position, start.coordinate);
/// assert_eq!(fix.progress_percentage, 0.0);
///
/// let done = track_position(&route, route.total_distance).unwrap();
/// assert_eq!(done.position, end.coordinate);
/// assert_eq!(done.progress_percentage, 100.0);
/// ```
pub fn track_position(route: &Route, distance_traveled_km: f64) -> Result<PositionFix, EngineError> {
    if !distance_traveled_km.is_finite() {
        return Err(EngineError::InvalidArgument {
            name: "distance_traveled_km",
            value: distance_traveled_km,
        });
    }
    route.start_city.coordinate.validate("route start")?;
    route.end_city.coordinate.validate("route end")?;

    let traveled = distance_traveled_km.max(0.0);

    let Some(&last_point) = route.polyline.last() else {
        // A route with no polyline has nowhere to be but its destination
        return Ok(at_destination(route.end_city.coordinate));
    };

    if route.total_distance <= 0.0 || traveled >= route.total_distance {
        return Ok(at_destination(last_point));
    }

    let mut remaining = traveled;
    for pair in route.polyline.windows(2) {
        let segment = distance_km(&pair[0], &pair[1]);
        if remaining <= segment {
            let fraction = if segment > 0.0 { remaining / segment } else { 0.0 };
            let position = Coordinate::new(
                pair[0].latitude + (pair[1].latitude - pair[0].latitude) * fraction,
                pair[0].longitude + (pair[1].longitude - pair[0].longitude) * fraction,
            );
            trace!(
                "position fix at {:.4}, {:.4} after {traveled} km",
                position.latitude,
                position.longitude
            );
            return Ok(PositionFix {
                position,
                distance_remaining_km: route.total_distance - traveled,
                progress_percentage: (traveled / route.total_distance * 100.0).min(100.0),
            });
        }
        remaining -= segment;
    }

    // The summed polyline is slightly shorter than the advertised distance;
    // walking off its end means the journey is done.
    Ok(at_destination(last_point))
}

fn at_destination(position: Coordinate) -> PositionFix {
    PositionFix {
        position,
        distance_remaining_km: 0.0,
        progress_percentage: 100.0,
    }
}

// =============================================================================
// Activity Aggregation
// =============================================================================

/// Aggregate activity totals into [`JourneyStats`].
///
/// Distances convert from meters to kilometers; pace is minutes per
/// kilometer and reports 0 when no distance has been covered. An empty
/// activity list yields all zeroes.
pub fn aggregate_stats(activities: &[ActivityRecord]) -> JourneyStats {
    let total_distance_km: f64 =
        activities.iter().map(|a| a.distance_meters).sum::<f64>() / 1000.0;
    let total_time_seconds: f64 = activities.iter().map(|a| a.moving_time_seconds).sum();
    let total_elevation_gain_meters: f64 =
        activities.iter().map(|a| a.elevation_gain_meters).sum();

    let average_pace_min_per_km = if total_distance_km > 0.0 {
        total_time_seconds / 60.0 / total_distance_km
    } else {
        0.0
    };

    JourneyStats {
        total_distance_km,
        total_time_seconds,
        average_pace_min_per_km,
        total_elevation_gain_meters,
    }
}

/// Compute full [`JourneyProgress`] for a route from a set of activities.
///
/// Composes [`aggregate_stats`] and [`track_position`] on the aggregated
/// distance. Pure and idempotent; the reported traveled distance is clamped
/// to the route length once the journey is complete.
///
/// # Errors
///
/// Fails with [`EngineError::InvalidCoordinate`] if the route endpoints are
/// invalid.
pub fn compute_progress(
    route: &Route,
    activities: &[ActivityRecord],
) -> Result<JourneyProgress, EngineError> {
    let stats = aggregate_stats(activities);
    let fix = track_position(route, stats.total_distance_km)?;

    Ok(JourneyProgress {
        current_position: fix.position,
        distance_traveled_km: stats.total_distance_km.clamp(0.0, route.total_distance.max(0.0)),
        distance_remaining_km: fix.distance_remaining_km,
        progress_percentage: fix.progress_percentage,
        stats,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::build_route;
    use crate::City;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn test_route() -> Route {
        let start = City::new("London", Coordinate::new(51.5074, -0.1278));
        let end = City::new("Paris", Coordinate::new(48.8566, 2.3522));
        build_route(&start, &end).unwrap()
    }

    #[test]
    fn test_position_at_start() {
        let route = test_route();
        let fix = track_position(&route, 0.0).unwrap();
        assert_eq!(fix.position, route.start_city.coordinate);
        assert_eq!(fix.progress_percentage, 0.0);
        assert_eq!(fix.distance_remaining_km, route.total_distance);
    }

    #[test]
    fn test_position_at_end() {
        let route = test_route();
        let fix = track_position(&route, route.total_distance).unwrap();
        assert_eq!(fix.position, route.end_city.coordinate);
        assert_eq!(fix.progress_percentage, 100.0);
        assert_eq!(fix.distance_remaining_km, 0.0);
    }

    #[test]
    fn test_position_beyond_end_clamps() {
        let route = test_route();
        let fix = track_position(&route, route.total_distance * 3.0).unwrap();
        assert_eq!(fix.position, route.end_city.coordinate);
        assert_eq!(fix.progress_percentage, 100.0);
        assert_eq!(fix.distance_remaining_km, 0.0);
    }

    #[test]
    fn test_position_midway_is_on_interpolation_band() {
        let route = test_route();
        let halfway = route.total_distance / 2.0;
        let fix = track_position(&route, halfway).unwrap();

        assert!(approx_eq(fix.progress_percentage, 50.0, 1e-9));
        assert!(approx_eq(fix.distance_remaining_km, halfway, 1e-9));

        // The walk is segment-cumulative, not globally proportional, so the
        // position is near (not exactly at) the linear midpoint.
        let start = route.start_city.coordinate;
        let end = route.end_city.coordinate;
        let mid_lat = (start.latitude + end.latitude) / 2.0;
        let mid_lng = (start.longitude + end.longitude) / 2.0;
        assert!(approx_eq(fix.position.latitude, mid_lat, 0.1));
        assert!(approx_eq(fix.position.longitude, mid_lng, 0.1));

        // And it must sit within the polyline's bounding box
        let min_lat = start.latitude.min(end.latitude);
        let max_lat = start.latitude.max(end.latitude);
        assert!(fix.position.latitude >= min_lat && fix.position.latitude <= max_lat);
    }

    #[test]
    fn test_position_negative_traveled_treated_as_zero() {
        let route = test_route();
        let fix = track_position(&route, -10.0).unwrap();
        assert_eq!(fix.position, route.start_city.coordinate);
        assert_eq!(fix.progress_percentage, 0.0);
    }

    #[test]
    fn test_position_rejects_non_finite_traveled() {
        let route = test_route();
        assert!(track_position(&route, f64::NAN).is_err());
        assert!(track_position(&route, f64::INFINITY).is_err());
    }

    #[test]
    fn test_zero_length_route_is_complete() {
        let here = City::new("Here", Coordinate::new(10.0, 20.0));
        let route = build_route(&here, &here).unwrap();

        let fix = track_position(&route, 0.0).unwrap();
        assert_eq!(fix.position, here.coordinate);
        assert_eq!(fix.progress_percentage, 100.0);
        assert_eq!(fix.distance_remaining_km, 0.0);
    }

    #[test]
    fn test_aggregate_stats_known_values() {
        let activities = vec![
            ActivityRecord::new(5_000.0, 1_500.0, 50.0),
            ActivityRecord::new(3_000.0, 900.0, 20.0),
        ];

        let stats = aggregate_stats(&activities);
        assert_eq!(stats.total_distance_km, 8.0);
        assert_eq!(stats.total_time_seconds, 2_400.0);
        assert_eq!(stats.average_pace_min_per_km, 5.0);
        assert_eq!(stats.total_elevation_gain_meters, 70.0);
    }

    #[test]
    fn test_aggregate_stats_empty() {
        let stats = aggregate_stats(&[]);
        assert_eq!(stats.total_distance_km, 0.0);
        assert_eq!(stats.total_time_seconds, 0.0);
        assert_eq!(stats.average_pace_min_per_km, 0.0);
        assert_eq!(stats.total_elevation_gain_meters, 0.0);
    }

    #[test]
    fn test_aggregate_stats_zero_distance_pace() {
        // Time without distance must not divide by zero
        let stats = aggregate_stats(&[ActivityRecord::new(0.0, 600.0, 0.0)]);
        assert_eq!(stats.average_pace_min_per_km, 0.0);
    }

    #[test]
    fn test_compute_progress_composes() {
        let route = test_route();
        let activities = vec![
            ActivityRecord::new(5_000.0, 1_500.0, 50.0),
            ActivityRecord::new(3_000.0, 900.0, 20.0),
        ];

        let progress = compute_progress(&route, &activities).unwrap();
        assert_eq!(progress.distance_traveled_km, 8.0);
        assert_eq!(progress.stats.total_distance_km, 8.0);
        assert!(approx_eq(
            progress.progress_percentage,
            8.0 / route.total_distance * 100.0,
            1e-9
        ));
        assert!(approx_eq(
            progress.distance_remaining_km,
            route.total_distance - 8.0,
            1e-9
        ));
    }

    #[test]
    fn test_compute_progress_is_idempotent() {
        let route = test_route();
        let activities = vec![ActivityRecord::new(12_345.0, 4_000.0, 115.0)];

        let first = compute_progress(&route, &activities).unwrap();
        let second = compute_progress(&route, &activities).unwrap();
        assert_eq!(first, second);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_journey_progress_serde_round_trip() {
        let route = test_route();
        let activities = vec![ActivityRecord::new(12_345.0, 4_000.0, 115.0)];
        let progress = compute_progress(&route, &activities).unwrap();

        let json = serde_json::to_string(&progress).unwrap();
        let back: JourneyProgress = serde_json::from_str(&json).unwrap();
        assert_eq!(back, progress);
    }

    #[test]
    fn test_compute_progress_clamps_overshoot() {
        let route = test_route();
        // Far more distance than the route is long
        let activities = vec![ActivityRecord::new(1_000_000_000.0, 86_400.0, 0.0)];

        let progress = compute_progress(&route, &activities).unwrap();
        assert_eq!(progress.distance_traveled_km, route.total_distance);
        assert_eq!(progress.distance_remaining_km, 0.0);
        assert_eq!(progress.progress_percentage, 100.0);
        assert_eq!(progress.current_position, route.end_city.coordinate);
        // Stats keep the real totals even when the journey is complete
        assert_eq!(progress.stats.total_distance_km, 1_000_000.0);
    }
}
