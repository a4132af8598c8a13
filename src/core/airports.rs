//! Default airport set the viewer tracks when none is supplied.

use crate::core::geo::{LatLng, Location};

/// The static target set. The returned list is treated as immutable for the
/// lifetime of a viewer.
pub fn target_airports() -> Vec<Location> {
    vec![
        Location::new("KJFK", "John F. Kennedy International Airport", LatLng::new(40.6398, -73.7789))
            .with_iata("JFK")
            .with_place("New York", "United States"),
        Location::new("KBOS", "Logan International Airport", LatLng::new(42.3643, -71.0052))
            .with_iata("BOS")
            .with_place("Boston", "United States"),
        Location::new("EGLL", "London Heathrow Airport", LatLng::new(51.4706, -0.4619))
            .with_iata("LHR")
            .with_place("London", "United Kingdom"),
        Location::new("LFPG", "Charles de Gaulle International Airport", LatLng::new(49.0128, 2.55))
            .with_iata("CDG")
            .with_place("Paris", "France"),
        Location::new("EDDF", "Frankfurt am Main Airport", LatLng::new(50.0333, 8.5706))
            .with_iata("FRA")
            .with_place("Frankfurt", "Germany"),
    ]
}
