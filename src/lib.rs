//! # Journey Engine
//!
//! Geospatial route and progress engine for simulated great-circle journeys.
//!
//! This library converts a runner's accumulated distance into a virtual
//! journey between cities. It provides:
//! - Great-circle distance and bearing primitives (Haversine, R = 6371 km)
//! - Interpolated polyline and [`Route`] construction between two cities
//! - Diverse destination selection by distance buckets and bearing spread
//! - Position and progress tracking along a route from activity totals
//!
//! All computation is pure and synchronous: no I/O, no shared state, no
//! aliasing back into caller-owned data. Every call is safe to issue
//! concurrently.
//!
//! ## Features
//!
//! - **`serde`** - Enable `Serialize`/`Deserialize` on all public value types
//!
//! ## Quick Start
//!
//! ```rust
//! use journey_engine::{ActivityRecord, City, Coordinate, build_route, compute_progress};
//!
//! let start = City::new("London", Coordinate::new(51.5074, -0.1278));
//! let end = City::new("Paris", Coordinate::new(48.8566, 2.3522));
//!
//! let route = build_route(&start, &end).unwrap();
//! assert!(route.total_distance > 340.0 && route.total_distance < 350.0);
//!
//! let activities = vec![
//!     ActivityRecord::new(5_000.0, 1_500.0, 50.0),
//!     ActivityRecord::new(3_000.0, 900.0, 20.0),
//! ];
//!
//! let progress = compute_progress(&route, &activities).unwrap();
//! assert_eq!(progress.distance_traveled_km, 8.0);
//! assert!(progress.progress_percentage > 0.0);
//! ```

use thiserror::Error;

// Great-circle primitives (distance, bearing, polyline length)
pub mod geo_utils;

// Route construction (interpolated polylines between cities)
pub mod path;
pub use path::{build_polyline, build_route, build_route_with_step, Route, DEFAULT_STEP_KM};

// Diverse destination selection
pub mod selection;
pub use selection::{candidates_within, select_diverse, CandidateCity};

// Position and progress tracking
pub mod progress;
pub use progress::{
    aggregate_stats, compute_progress, track_position, ActivityRecord, JourneyProgress,
    JourneyStats, PositionFix,
};

// ============================================================================
// Core Types
// ============================================================================

/// A geographic coordinate with latitude and longitude in degrees.
///
/// # Example
/// ```
/// use journey_engine::Coordinate;
/// let point = Coordinate::new(51.5074, -0.1278); // London
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Create a new coordinate.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Check if the coordinate has valid values.
    ///
    /// Valid means finite, latitude in [-90, 90] and longitude in [-180, 180].
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Fail fast on invalid coordinates at an engine entry point.
    pub(crate) fn validate(&self, context: &'static str) -> Result<(), EngineError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(EngineError::InvalidCoordinate {
                context,
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

impl From<Coordinate> for geo::Point {
    fn from(c: Coordinate) -> Self {
        geo::Point::new(c.longitude, c.latitude)
    }
}

impl From<geo::Point> for Coordinate {
    fn from(p: geo::Point) -> Self {
        Coordinate::new(p.y(), p.x())
    }
}

/// A named coordinate with optional administrative metadata.
///
/// Produced by an external geocoding collaborator; the engine treats the
/// metadata as opaque and never mutates it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    /// Display name of the city
    pub name: String,
    /// Geographic location
    pub coordinate: Coordinate,
    /// Country name, if known
    pub country: Option<String>,
    /// State or region name, if known
    pub state: Option<String>,
}

impl City {
    /// Create a city with no administrative metadata.
    pub fn new(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinate,
            country: None,
            state: None,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Contract-violation errors raised by the engine's entry points.
///
/// Degenerate-but-valid inputs (identical coordinates, empty candidate lists,
/// zero route length) never error; they produce well-defined boundary
/// results instead. Only programmer errors reach this type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A coordinate was non-finite or outside the valid lat/lng ranges.
    #[error("invalid coordinate ({latitude}, {longitude}) in {context}")]
    InvalidCoordinate {
        context: &'static str,
        latitude: f64,
        longitude: f64,
    },

    /// A scalar argument violated its documented range.
    #[error("invalid value {value} for `{name}`")]
    InvalidArgument { name: &'static str, value: f64 },
}

// ============================================================================
// Tests
// ============================================================================
