//! # flightmap
//!
//! Keeps an interactive map viewport in sync with a flight-tracking engine.
//!
//! The crate bootstraps a map from a provider library, fits it to a static
//! set of airport [`Location`]s, starts the engine once the map has settled
//! and then forwards every viewport change to it. Map provider and engine
//! are both reached through traits, so the same orchestration runs in the
//! browser (feature `wasm`) and headless.

pub mod app;
pub mod core;
pub mod engine;
pub mod input;
pub mod orchestrator;
pub mod prelude;
pub mod provider;
pub mod runtime;
#[cfg(feature = "wasm")]
pub mod web;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{MapOptions, MapOptionsPatch, ViewerConfig},
    geo::{BoundsLiteral, LatLng, LatLngBounds, Location},
    geometry::{compute_bounds, compute_center, CenterAlgorithm},
};

pub use engine::{EngineModule, FlightEngine, PrepareFuture};
pub use input::{EventDispatcher, MapEvent};
pub use orchestrator::{ViewportOrchestrator, ViewportState};
pub use provider::{Document, MapBootstrapper, MapInstance, MapProvider, ProviderLoader, Surface};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum ViewportError {
    #[error("Empty coordinate set")]
    EmptyInput,

    #[error("Missing display surface: {0}")]
    MissingElement(String),

    #[error("Map provider failed to load: {0}")]
    ProviderLoad(String),

    #[error("Engine failed to initialize: {0}")]
    EngineInit(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = ViewportError;

/// Installs the logger for the current platform. Safe to call more than once.
pub fn init_logging() {
    #[cfg(all(feature = "wasm", target_arch = "wasm32"))]
    {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Debug);
    }

    #[cfg(all(feature = "debug", not(target_arch = "wasm32")))]
    {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
            .try_init();
    }
}
