//! Prelude module for common flightmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use flightmap::prelude::*;`

pub use crate::core::{
    airports::target_airports,
    config::{LoaderOptions, MapOptions, MapOptionsPatch, ViewerConfig},
    geo::{BoundsLiteral, LatLng, LatLngBounds, Location},
    geometry::{compute_bounds, compute_center, CenterAlgorithm, GeographicMidpoint, PlanarCentroid},
    style::{MapTheme, MapTypeStyle},
};

pub use crate::engine::{parse_resolved, EngineModule, FlightEngine, PrepareFuture};

pub use crate::input::{event_channel, EventDispatcher, EventStream, MapEvent};

pub use crate::orchestrator::{ViewportOrchestrator, ViewportState};

pub use crate::provider::{
    headless::{HeadlessDocument, HeadlessLoader, HeadlessMap, HeadlessMapHandle},
    Document, MapBootstrapper, MapInstance, MapProvider, ProviderLoader, Surface,
};

pub use crate::app::launch;

#[cfg(any(feature = "tokio-runtime", all(feature = "wasm", target_arch = "wasm32")))]
pub use crate::{app::spawn_viewer, runtime::spawn_local};

#[cfg(feature = "wasm")]
pub use crate::web::{GoogleMapsLoader, WebDocument};

pub use crate::{Result, ViewportError};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
