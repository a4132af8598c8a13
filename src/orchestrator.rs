//! Viewport orchestrator: startup protocol and runtime state machine.
//!
//! ```text
//! Uninitialized --start()--------------------> MapReady
//! MapReady      --first zoom_changed---------> EngineStarting   (construct + prepare)
//! EngineStarting--prepare resolved-----------> EngineActive     (re-fit, re-center, start)
//! EngineActive  --bounds_changed-------------> EngineActive     (update)
//! ```
//!
//! Map events arrive through an [`EventStream`] and are handled one at a time.
//! The engine handle and its resolved coordinates only exist inside the
//! state they belong to, so `update` cannot reach an engine that has not
//! been prepared.

use crate::core::config::ViewerConfig;
use crate::core::geo::{coords_of, LatLng, Location};
use crate::core::geometry::compute_center;
use crate::engine::{parse_resolved, EngineModule, FlightEngine, PrepareFuture};
use crate::input::{event_channel, EventDispatcher, EventStream, MapEvent};
use crate::provider::{Document, MapBootstrapper, MapInstance, MapProvider, ProviderLoader, Surface};
use crate::{Result, ViewportError};
use futures::future::Fuse;
use futures::{FutureExt, StreamExt};
use std::rc::Rc;

/// Externally visible lifecycle of the orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportState {
    Uninitialized,
    MapReady,
    EngineStarting,
    EngineActive,
}

impl std::fmt::Display for ViewportState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ViewportState::Uninitialized => "uninitialized",
            ViewportState::MapReady => "map-ready",
            ViewportState::EngineStarting => "engine-starting",
            ViewportState::EngineActive => "engine-active",
        };
        f.write_str(name)
    }
}

type ProviderOf<L> = <L as ProviderLoader>::Provider;
type MapOf<L> = <ProviderOf<L> as MapProvider>::Map;

/// What exists once the map is up
struct Session<P, M> {
    provider: Rc<P>,
    map: M,
    canvas: Surface,
}

enum Stage<P, M, E> {
    Uninitialized,
    MapReady(Session<P, M>),
    /// `None` when construction failed; the stage is never left again.
    EngineStarting(Session<P, M>, Option<E>),
    EngineActive {
        session: Session<P, M>,
        engine: E,
        resolved: Vec<LatLng>,
    },
}

impl<P, M, E> Stage<P, M, E> {
    fn state(&self) -> ViewportState {
        match self {
            Stage::Uninitialized => ViewportState::Uninitialized,
            Stage::MapReady(_) => ViewportState::MapReady,
            Stage::EngineStarting(..) => ViewportState::EngineStarting,
            Stage::EngineActive { .. } => ViewportState::EngineActive,
        }
    }
}

/// Keeps a map viewport in sync with a flight-tracking engine.
pub struct ViewportOrchestrator<L: ProviderLoader, X: EngineModule> {
    config: ViewerConfig,
    bootstrapper: MapBootstrapper<L>,
    module: X,
    locations: Vec<Location>,
    dispatcher: EventDispatcher,
    events: Option<EventStream>,
    stage: Stage<ProviderOf<L>, MapOf<L>, X::Engine>,
}

impl<L: ProviderLoader, X: EngineModule> ViewportOrchestrator<L, X> {
    pub fn new(config: ViewerConfig, loader: L, module: X, locations: Vec<Location>) -> Self {
        let (dispatcher, events) = event_channel();
        let bootstrapper = MapBootstrapper::new(loader, config.loader.clone());

        Self {
            config,
            bootstrapper,
            module,
            locations,
            dispatcher,
            events: Some(events),
            stage: Stage::Uninitialized,
        }
    }

    pub fn state(&self) -> ViewportState {
        self.stage.state()
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// Coordinates resolved by the engine, once it is active
    pub fn resolved_coords(&self) -> Option<&[LatLng]> {
        match &self.stage {
            Stage::EngineActive { resolved, .. } => Some(resolved),
            _ => None,
        }
    }

    pub fn map(&self) -> Option<&MapOf<L>> {
        match &self.stage {
            Stage::Uninitialized => None,
            Stage::MapReady(session)
            | Stage::EngineStarting(session, _)
            | Stage::EngineActive { session, .. } => Some(&session.map),
        }
    }

    pub fn engine(&self) -> Option<&X::Engine> {
        match &self.stage {
            Stage::EngineStarting(_, engine) => engine.as_ref(),
            Stage::EngineActive { engine, .. } => Some(engine),
            _ => None,
        }
    }

    /// A sender feeding the orchestrator's event queue
    pub fn dispatcher(&self) -> EventDispatcher {
        self.dispatcher.clone()
    }

    /// Takes the event queue for callers driving the loop themselves.
    /// [`run`](Self::run) does nothing afterwards.
    pub fn take_events(&mut self) -> Option<EventStream> {
        self.events.take()
    }

    /// Bootstraps the map, subscribes to its events and fits it to the
    /// static locations.
    pub async fn start<D: Document + ?Sized>(&mut self, document: &D) -> Result<()> {
        if !matches!(self.stage, Stage::Uninitialized) {
            log::warn!("Viewer already started ({})", self.state());
            return Ok(());
        }

        let map_surface = document.element(&self.config.map_element_id);
        let canvas = document
            .element(&self.config.canvas_element_id)
            .filter(|surface| surface.attached)
            .ok_or_else(|| {
                ViewportError::MissingElement(format!(
                    "no element #{} for flight info",
                    self.config.canvas_element_id
                ))
            })?;

        let coords = coords_of(&self.locations);
        let center = compute_center(&coords, &self.module)?;
        let mut options = self.config.map_options.clone();
        options.center.get_or_insert(center);

        let (provider, mut map) = self
            .bootstrapper
            .bootstrap(&self.config.api_key, map_surface.as_ref(), options)
            .await?;

        for event in MapEvent::ALL {
            map.add_listener(event, self.dispatcher.clone());
        }

        let bounds = provider.bounds_of(&coords)?;
        map.fit_bounds(&bounds, self.config.fit_padding);
        map.set_center(center);

        self.stage = Stage::MapReady(Session {
            provider,
            map,
            canvas,
        });
        log::info!(
            "Map ready, fitted to {} locations around ({:.4}, {:.4})",
            self.locations.len(),
            center.lat,
            center.lng
        );
        Ok(())
    }

    /// Handles one map event. Returns the engine's pending `prepare` reply
    /// when the event started the engine; feed its output to
    /// [`complete_prepare`](Self::complete_prepare).
    pub fn handle_event(&mut self, event: MapEvent) -> Result<Option<PrepareFuture>> {
        log::debug!("(Event) \"{event}\" in {}", self.state());
        match event {
            MapEvent::ZoomChanged => self.on_zoom_changed(),
            MapEvent::BoundsChanged => {
                self.on_bounds_changed();
                Ok(None)
            }
        }
    }

    fn on_zoom_changed(&mut self) -> Result<Option<PrepareFuture>> {
        let session = match std::mem::replace(&mut self.stage, Stage::Uninitialized) {
            Stage::MapReady(session) => session,
            other => {
                self.stage = other;
                return Ok(None);
            }
        };

        log::info!("Zoom settled, instantiating engine on #{}", session.canvas.id);
        match self.module.construct(&session.canvas) {
            Ok(mut engine) => {
                let prepare = engine.prepare(&self.locations);
                self.stage = Stage::EngineStarting(session, Some(engine));
                Ok(Some(prepare))
            }
            Err(e) => {
                self.stage = Stage::EngineStarting(session, None);
                Err(engine_init(e))
            }
        }
    }

    fn on_bounds_changed(&mut self) {
        let Stage::EngineActive {
            session, engine, ..
        } = &mut self.stage
        else {
            return;
        };

        match session.map.bounds() {
            Some(bounds) => {
                log::debug!("Running update()");
                engine.update(&bounds.to_literal());
            }
            None => log::debug!("Map has no visible bounds yet, update skipped"),
        }
    }

    /// Finishes the engine start once `prepare` has replied: re-fits the map
    /// to the resolved coordinates and starts the engine loop.
    pub fn complete_prepare(&mut self, response: Result<String>) -> Result<()> {
        let state = self.state();
        let Stage::EngineStarting(session, Some(engine)) = &mut self.stage else {
            log::warn!("prepare() resolved in {state}, ignored");
            return Ok(());
        };

        let resolved = parse_resolved(&response.map_err(engine_init)?)?;
        let bounds = session.provider.bounds_of(&resolved)?;
        let center = compute_center(&resolved, &self.module)?;

        session.map.fit_bounds(&bounds, self.config.fit_padding);
        session.map.set_center(center);
        engine.start();
        let tracked = resolved.len();

        if let Stage::EngineStarting(session, Some(engine)) =
            std::mem::replace(&mut self.stage, Stage::Uninitialized)
        {
            self.stage = Stage::EngineActive {
                session,
                engine,
                resolved,
            };
        }
        log::info!("Engine active, tracking {tracked} coordinates");
        Ok(())
    }

    /// Processes map events for the lifetime of the viewer.
    ///
    /// Events keep flowing while `prepare` is pending. Handler failures are
    /// logged and leave the state machine where it stopped.
    pub async fn run(&mut self) {
        let Some(mut events) = self.events.take() else {
            log::warn!("Event queue already taken, nothing to run");
            return;
        };
        let mut preparing: Fuse<PrepareFuture> = Fuse::terminated();

        loop {
            futures::select! {
                event = events.select_next_some() => match self.handle_event(event) {
                    Ok(Some(prepare)) => preparing = prepare.fuse(),
                    Ok(None) => {}
                    Err(e) => log::error!("\"{event}\" handler failed: {e}"),
                },
                response = preparing => {
                    if let Err(e) = self.complete_prepare(response) {
                        log::error!("Engine failed to start: {e}");
                    }
                }
                complete => break,
            }
        }
    }
}

fn engine_init(error: ViewportError) -> ViewportError {
    match error {
        ViewportError::EngineInit(_) => error,
        other => ViewportError::EngineInit(other.to_string()),
    }
}
