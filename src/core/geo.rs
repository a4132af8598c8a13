use serde::{Deserialize, Serialize};

/// Represents a geographical coordinate with latitude and longitude
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    /// Creates a new LatLng coordinate
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validates that the coordinates are finite and within valid ranges
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Unit vector on the sphere for this coordinate
    pub(crate) fn to_unit_vector(self) -> [f64; 3] {
        let lat = self.lat.to_radians();
        let lng = self.lng.to_radians();
        [lat.cos() * lng.cos(), lat.cos() * lng.sin(), lat.sin()]
    }

    pub(crate) fn from_vector([x, y, z]: [f64; 3]) -> Self {
        let hyp = (x * x + y * y).sqrt();
        Self::new(z.atan2(hyp).to_degrees(), y.atan2(x).to_degrees())
    }
}

impl Default for LatLng {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl From<LatLng> for geo::Point<f64> {
    fn from(coord: LatLng) -> Self {
        geo::Point::new(coord.lng, coord.lat)
    }
}

impl From<geo::Point<f64>> for LatLng {
    fn from(point: geo::Point<f64>) -> Self {
        LatLng::new(point.y(), point.x())
    }
}

/// Represents a bounding box of geographical coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self::new(LatLng::new(south, west), LatLng::new(north, east))
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &LatLng) -> bool {
        point.lat >= self.south_west.lat
            && point.lat <= self.north_east.lat
            && point.lng >= self.south_west.lng
            && point.lng <= self.north_east.lng
    }

    /// Gets the midpoint of the rectangle.
    ///
    /// This is *not* what the orchestrator centers on; see
    /// [`compute_center`](crate::core::geometry::compute_center).
    pub fn midpoint(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    /// Gets the span of the bounds
    pub fn span(&self) -> LatLng {
        LatLng::new(
            self.north_east.lat - self.south_west.lat,
            self.north_east.lng - self.south_west.lng,
        )
    }

    /// Returns these bounds moved so that their midpoint sits on `center`
    pub fn recentered(&self, center: LatLng) -> LatLngBounds {
        let half = self.span();
        LatLngBounds::from_coords(
            center.lat - half.lat / 2.0,
            center.lng - half.lng / 2.0,
            center.lat + half.lat / 2.0,
            center.lng + half.lng / 2.0,
        )
    }

    /// Plain structured form handed to the engine
    pub fn to_literal(&self) -> BoundsLiteral {
        BoundsLiteral {
            north: self.north_east.lat,
            east: self.north_east.lng,
            south: self.south_west.lat,
            west: self.south_west.lng,
        }
    }
}

/// The `{north, east, south, west}` shape map providers use for bounds in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BoundsLiteral {
    pub north: f64,
    pub east: f64,
    pub south: f64,
    pub west: f64,
}

impl From<BoundsLiteral> for LatLngBounds {
    fn from(literal: BoundsLiteral) -> Self {
        LatLngBounds::from_coords(literal.south, literal.west, literal.north, literal.east)
    }
}

impl From<LatLngBounds> for BoundsLiteral {
    fn from(bounds: LatLngBounds) -> Self {
        bounds.to_literal()
    }
}

/// A named place the engine tracks flights for.
///
/// Locations are airports: the codes identify them to the engine, the
/// coordinate places them on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub icao: String,
    #[serde(default)]
    pub iata: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    pub coord: LatLng,
}

impl Location {
    pub fn new(icao: impl Into<String>, name: impl Into<String>, coord: LatLng) -> Self {
        Self {
            icao: icao.into(),
            iata: String::new(),
            name: name.into(),
            city: String::new(),
            country: String::new(),
            coord,
        }
    }

    pub fn with_iata(mut self, iata: impl Into<String>) -> Self {
        self.iata = iata.into();
        self
    }

    pub fn with_place(mut self, city: impl Into<String>, country: impl Into<String>) -> Self {
        self.city = city.into();
        self.country = country.into();
        self
    }
}

/// Collects the coordinates of a location set, preserving order
pub fn coords_of(locations: &[Location]) -> Vec<LatLng> {
    locations.iter().map(|location| location.coord).collect()
}
