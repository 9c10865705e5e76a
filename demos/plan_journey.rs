//! End-to-end example: pick diverse destinations from London, build a route
//! to one of them, and track progress from a set of running activities.
//!
//! Run with: cargo run --example plan_journey

use journey_engine::{
    build_route, candidates_within, compute_progress, select_diverse, ActivityRecord, City,
    Coordinate,
};

fn main() {
    let origin = City::new("London", Coordinate::new(51.5074, -0.1278));

    // Cities a geocoding collaborator might hand us
    let cities = vec![
        City::new("Paris", Coordinate::new(48.8566, 2.3522)),
        City::new("Amsterdam", Coordinate::new(52.3676, 4.9041)),
        City::new("Edinburgh", Coordinate::new(55.9533, -3.1883)),
        City::new("Dublin", Coordinate::new(53.3498, -6.2603)),
        City::new("Berlin", Coordinate::new(52.5200, 13.4050)),
        City::new("Madrid", Coordinate::new(40.4168, -3.7038)),
        City::new("Rome", Coordinate::new(41.9028, 12.4964)),
        City::new("Oslo", Coordinate::new(59.9139, 10.7522)),
    ];

    // Annotate with distances and keep everything within 2000 km
    let candidates = candidates_within(&origin.coordinate, &cities, 2000.0).unwrap();
    println!("{} candidate cities within 2000 km of London", candidates.len());

    // Pick four diverse destinations (distance buckets + bearing spread)
    let picks = select_diverse(&origin.coordinate, &candidates, 4).unwrap();
    println!("\nSuggested destinations:");
    for pick in &picks {
        println!("  {:12} {:.0} km", pick.city.name, pick.distance_from_origin);
    }

    // Build a route to the furthest suggestion
    let destination = &picks.last().unwrap().city;
    let route = build_route(&origin, destination).unwrap();
    println!(
        "\nRoute {} -> {}: {:.0} km, {} polyline points",
        route.start_city.name,
        route.end_city.name,
        route.total_distance,
        route.polyline.len()
    );

    // A month of running
    let activities = vec![
        ActivityRecord::new(10_000.0, 3_000.0, 80.0),
        ActivityRecord::new(21_097.0, 6_600.0, 150.0),
        ActivityRecord::new(5_000.0, 1_400.0, 30.0),
        ActivityRecord::new(12_500.0, 3_900.0, 95.0),
    ];

    let progress = compute_progress(&route, &activities).unwrap();
    println!("\nJourney progress:");
    println!("  traveled:  {:.1} km", progress.distance_traveled_km);
    println!("  remaining: {:.1} km", progress.distance_remaining_km);
    println!("  progress:  {:.1}%", progress.progress_percentage);
    println!(
        "  position:  {:.4}, {:.4}",
        progress.current_position.latitude, progress.current_position.longitude
    );
    println!(
        "  pace:      {:.2} min/km over {:.1} km",
        progress.stats.average_pace_min_per_km, progress.stats.total_distance_km
    );
}
