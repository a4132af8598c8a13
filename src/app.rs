//! Top-level entry points: run the whole viewer, reporting startup failures
//! instead of propagating them.

use crate::core::config::ViewerConfig;
use crate::core::geo::Location;
use crate::engine::EngineModule;
use crate::orchestrator::ViewportOrchestrator;
use crate::provider::{Document, ProviderLoader};

/// Starts the viewer and processes map events for as long as the map lives.
///
/// A failed startup is logged and the function returns; the map and engine
/// simply never become ready. Nothing is retried.
pub async fn launch<L, X, D>(
    config: ViewerConfig,
    loader: L,
    module: X,
    document: &D,
    locations: Vec<Location>,
) where
    L: ProviderLoader,
    X: EngineModule,
    D: Document + ?Sized,
{
    let mut orchestrator = ViewportOrchestrator::new(config, loader, module, locations);
    if let Err(e) = orchestrator.start(document).await {
        log::error!("Viewer failed to start: {e}");
        return;
    }
    orchestrator.run().await;
}

/// Schedules [`launch`] on the current thread's executor.
#[cfg(any(feature = "tokio-runtime", all(feature = "wasm", target_arch = "wasm32")))]
pub fn spawn_viewer<L, X, D>(
    config: ViewerConfig,
    loader: L,
    module: X,
    document: D,
    locations: Vec<Location>,
) where
    L: ProviderLoader + 'static,
    X: EngineModule + 'static,
    D: Document + 'static,
{
    crate::runtime::spawn_local(async move {
        launch(config, loader, module, &document, locations).await;
    });
}
