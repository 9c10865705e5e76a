//! # Diverse Destination Selection
//!
//! Picks a small set of destination cities that spans both varied distances
//! and varied compass directions from an origin, so the presented options
//! never cluster at the same range or in the same direction.
//!
//! ## Algorithm
//!
//! Two-phase greedy, fully deterministic:
//!
//! 1. **Distance buckets** - partition `[0, max_distance]` into `count`
//!    equal-width buckets and claim, per bucket in order, the
//!    closest-to-origin unclaimed candidate whose distance falls inside it.
//!    Empty buckets are skipped without substitution.
//! 2. **Bearing diversity** - while picks remain, claim the unclaimed
//!    candidate whose bearing from the origin is maximally different (by
//!    circular distance) from every already-claimed bearing.
//!
//! Both phases break ties by input order: bucket edges are inclusive on both
//! ends and a boundary candidate goes to whichever bucket is processed
//! first; equal bearing separations keep the first-seen candidate.

use log::debug;

use crate::geo_utils::{bearing_separation, distance_km, initial_bearing};
use crate::{City, Coordinate, EngineError};

/// A city annotated with its great-circle distance from a journey origin.
///
/// The selection input. Distances are precomputed (see
/// [`candidates_within`]); bearings are derived transiently during selection
/// and never leave this module.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CandidateCity {
    /// The candidate destination
    pub city: City,
    /// Great-circle distance from the origin, in kilometers
    pub distance_from_origin: f64,
}

/// Annotate cities with their distance from `origin` and keep those within
/// `max_distance_km`, sorted by ascending distance.
///
/// The origin itself (distance exactly 0) is excluded so a journey can never
/// be offered to the city it starts from.
///
/// # Errors
///
/// Fails with [`EngineError::InvalidCoordinate`] if the origin or any city
/// coordinate is invalid.
pub fn candidates_within(
    origin: &Coordinate,
    cities: &[City],
    max_distance_km: f64,
) -> Result<Vec<CandidateCity>, EngineError> {
    origin.validate("candidate origin")?;
    for city in cities {
        city.coordinate.validate("candidate city")?;
    }

    let mut candidates: Vec<CandidateCity> = cities
        .iter()
        .map(|city| CandidateCity {
            city: city.clone(),
            distance_from_origin: distance_km(origin, &city.coordinate),
        })
        .filter(|c| c.distance_from_origin > 0.0 && c.distance_from_origin <= max_distance_km)
        .collect();

    candidates.sort_by(|a, b| a.distance_from_origin.total_cmp(&b.distance_from_origin));
    Ok(candidates)
}

/// Select up to `count` diverse candidates from `candidates`.
///
/// See the module docs for the two-phase bucket/bearing algorithm. Returns
/// the picks in the order they were claimed. When `candidates` has `count`
/// entries or fewer, they are returned unchanged in input order. `count` of
/// 0 or an empty candidate list yields an empty selection.
///
/// # Errors
///
/// Fails with [`EngineError::InvalidCoordinate`] if the origin or any
/// candidate coordinate is invalid.
///
/// # Example
///
/// ```rust
/// use journey_engine::{CandidateCity, City, Coordinate, select_diverse};
///
/// let origin = Coordinate::new(0.0, 0.0);
/// let candidates: Vec<CandidateCity> = [50.0, 400.0, 800.0, 410.0, 60.0]
///     .iter()
///     .enumerate()
///     .map(|(i, &d)| CandidateCity {
///         city: City::new(format!("city-{i}"), Coordinate::new(1.0 + i as f64, 0.0)),
///         distance_from_origin: d,
///     })
///     .collect();
///
/// let picks = select_diverse(&origin, &candidates, 3).unwrap();
/// assert_eq!(picks.len(), 3);
/// // One pick per distance bucket: [0-266], [266-533], [533-800]
/// assert_eq!(picks[0].distance_from_origin, 50.0);
/// assert_eq!(picks[1].distance_from_origin, 400.0);
/// assert_eq!(picks[2].distance_from_origin, 800.0);
/// ```
pub fn select_diverse(
    origin: &Coordinate,
    candidates: &[CandidateCity],
    count: usize,
) -> Result<Vec<CandidateCity>, EngineError> {
    origin.validate("selection origin")?;
    for candidate in candidates {
        candidate.city.coordinate.validate("selection candidate")?;
    }

    if count == 0 || candidates.is_empty() {
        return Ok(Vec::new());
    }
    if candidates.len() <= count {
        return Ok(candidates.to_vec());
    }

    let bearings: Vec<f64> = candidates
        .iter()
        .map(|c| initial_bearing(origin, &c.city.coordinate))
        .collect();
    let max_distance = candidates
        .iter()
        .map(|c| c.distance_from_origin)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut claimed = vec![false; candidates.len()];
    let mut order: Vec<usize> = Vec::with_capacity(count);

    claim_distance_buckets(candidates, max_distance, count, &mut claimed, &mut order);
    let from_buckets = order.len();
    fill_by_bearing_diversity(&bearings, count, &mut claimed, &mut order);

    debug!(
        "selected {} of {} candidates ({} via distance buckets, {} via bearing diversity)",
        order.len(),
        candidates.len(),
        from_buckets,
        order.len() - from_buckets
    );

    Ok(order.into_iter().map(|i| candidates[i].clone()).collect())
}

// =============================================================================
// Selection Phases
// =============================================================================

/// Phase 1: claim the closest unclaimed candidate in each equal-width
/// distance bucket over `[0, max_distance]`, in bucket order.
///
/// Bucket edges are inclusive on both ends, so a candidate sitting exactly
/// on a boundary is claimed by the first bucket processed. Buckets with no
/// qualifying candidate are skipped.
fn claim_distance_buckets(
    candidates: &[CandidateCity],
    max_distance: f64,
    count: usize,
    claimed: &mut [bool],
    order: &mut Vec<usize>,
) {
    for bucket in 0..count {
        // Edges are fractions of max_distance so the final upper bound is
        // exactly max_distance; accumulating a width instead can round the
        // last edge below the maximum and drop the farthest candidate.
        let lower = max_distance * (bucket as f64 / count as f64);
        let upper = max_distance * ((bucket + 1) as f64 / count as f64);

        let mut best: Option<usize> = None;
        for (idx, candidate) in candidates.iter().enumerate() {
            if claimed[idx] {
                continue;
            }
            let d = candidate.distance_from_origin;
            if d < lower || d > upper {
                continue;
            }
            // Strictly-closer keeps the first-seen candidate on ties
            if best.map_or(true, |b| d < candidates[b].distance_from_origin) {
                best = Some(idx);
            }
        }

        if let Some(idx) = best {
            claimed[idx] = true;
            order.push(idx);
        }
    }
}

/// Phase 2: greedily claim the unclaimed candidate whose bearing maximizes
/// the minimum circular separation from all claimed bearings.
///
/// Ties keep the first-seen candidate. With nothing claimed yet every
/// candidate scores the same, so the first remaining candidate wins.
fn fill_by_bearing_diversity(
    bearings: &[f64],
    count: usize,
    claimed: &mut [bool],
    order: &mut Vec<usize>,
) {
    while order.len() < count {
        let mut best: Option<(usize, f64)> = None;

        for (idx, &bearing) in bearings.iter().enumerate() {
            if claimed[idx] {
                continue;
            }
            let separation = if order.is_empty() {
                180.0
            } else {
                order
                    .iter()
                    .map(|&picked| bearing_separation(bearing, bearings[picked]))
                    .fold(f64::INFINITY, f64::min)
            };

            if best.map_or(true, |(_, s)| separation > s) {
                best = Some((idx, separation));
            }
        }

        match best {
            Some((idx, _)) => {
                claimed[idx] = true;
                order.push(idx);
            }
            None => break,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
