//! The flight-tracking engine seam.
//!
//! The engine is an opaque, pre-built collaborator. The orchestrator only
//! ever constructs it once, asks it to `prepare`, `start`s it and feeds it
//! viewport `update`s.

use crate::core::geo::{BoundsLiteral, LatLng, Location};
use crate::core::geometry::CenterAlgorithm;
use crate::provider::Surface;
use crate::Result;
use futures::future::LocalBoxFuture;

/// Pending reply of [`FlightEngine::prepare`]: the resolved coordinates,
/// serialized as a JSON array of `{lat, lng}` objects.
pub type PrepareFuture = LocalBoxFuture<'static, Result<String>>;

/// A running engine instance
pub trait FlightEngine {
    /// Resolves the coordinates the engine will actually track for
    /// `locations`. These may differ from the input (normalized, enriched).
    fn prepare(&mut self, locations: &[Location]) -> PrepareFuture;

    /// Starts the engine's own animation/update loop. Fire-and-forget.
    fn start(&mut self);

    /// Tells the engine which rectangle is currently visible
    fn update(&mut self, bounds: &BoundsLiteral);
}

/// The engine's module: its constructor plus the centroid algorithm it uses
/// internally, which the map must agree with.
pub trait EngineModule: CenterAlgorithm {
    type Engine: FlightEngine;

    /// Creates the engine drawing into `canvas`. Failures are reported as
    /// [`ViewportError::EngineInit`](crate::ViewportError::EngineInit).
    fn construct(&self, canvas: &Surface) -> Result<Self::Engine>;
}

/// Parses the serialized reply of [`FlightEngine::prepare`]
pub fn parse_resolved(response: &str) -> Result<Vec<LatLng>> {
    Ok(serde_json::from_str(response)?)
}
