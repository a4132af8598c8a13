//! In-memory provider for tests, demos and server-side dry runs.
//!
//! The headless map behaves like an interactive one as far as the
//! orchestrator can tell: fits change the zoom and emit `zoom_changed`,
//! every viewport move emits `bounds_changed`. Everything the provider is
//! asked to do is written to a shared [`HeadlessRecord`].

use crate::core::config::{LoaderOptions, MapOptions};
use crate::core::geo::{LatLng, LatLngBounds};
use crate::input::{EventDispatcher, MapEvent};
use crate::prelude::HashMap;
use crate::provider::{Document, MapInstance, MapProvider, ProviderLoader, Surface};
use crate::{Result, ViewportError};
use async_trait::async_trait;
use std::cell::RefCell;
use std::rc::Rc;

const MAX_ZOOM: f64 = 21.0;

/// Calls observed by the headless provider
#[derive(Debug, Default)]
pub struct HeadlessRecord {
    pub loads: usize,
    pub maps_created: Vec<(String, MapOptions)>,
    pub fits: Vec<(LatLngBounds, u32)>,
    pub centers: Vec<LatLng>,
    pub subscriptions: Vec<MapEvent>,
}

pub type SharedRecord = Rc<RefCell<HeadlessRecord>>;

/// Loader that "fetches" the headless provider
#[derive(Debug, Default)]
pub struct HeadlessLoader {
    record: SharedRecord,
    fail_with: Option<String>,
}

impl HeadlessLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// A loader whose every load attempt fails with `reason`
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            fail_with: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn record(&self) -> SharedRecord {
        self.record.clone()
    }
}

#[async_trait(?Send)]
impl ProviderLoader for HeadlessLoader {
    type Provider = HeadlessProvider;

    async fn load(&self, _api_key: &str, options: &LoaderOptions) -> Result<HeadlessProvider> {
        self.record.borrow_mut().loads += 1;
        if let Some(reason) = &self.fail_with {
            return Err(ViewportError::ProviderLoad(reason.clone()));
        }
        log::debug!("Headless provider loaded (version {})", options.version);

        Ok(HeadlessProvider {
            record: self.record.clone(),
        })
    }
}

#[derive(Debug)]
pub struct HeadlessProvider {
    record: SharedRecord,
}

impl MapProvider for HeadlessProvider {
    type Map = HeadlessMap;

    fn create_map(&self, surface: &Surface, options: &MapOptions) -> Result<HeadlessMap> {
        self.record
            .borrow_mut()
            .maps_created
            .push((surface.id.clone(), options.clone()));

        let center = options.center.unwrap_or_default();
        let view = HeadlessView {
            center,
            zoom: options.zoom,
            bounds: view_bounds(center, options.zoom),
            listeners: HashMap::default(),
        };

        Ok(HeadlessMap {
            view: Rc::new(RefCell::new(view)),
            record: self.record.clone(),
        })
    }
}

#[derive(Debug)]
struct HeadlessView {
    center: LatLng,
    zoom: f64,
    bounds: LatLngBounds,
    listeners: HashMap<MapEvent, Vec<EventDispatcher>>,
}

impl HeadlessView {
    fn emit(&self, event: MapEvent) {
        for dispatcher in self.listeners.get(&event).into_iter().flatten() {
            dispatcher.dispatch(event);
        }
    }

    fn move_to(&mut self, center: LatLng, zoom: f64) {
        let zoom_changed = zoom != self.zoom;
        self.center = center;
        self.zoom = zoom;
        self.bounds = view_bounds(center, zoom);

        if zoom_changed {
            self.emit(MapEvent::ZoomChanged);
        }
        self.emit(MapEvent::BoundsChanged);
    }
}

/// A map instance living in memory
#[derive(Debug)]
pub struct HeadlessMap {
    view: Rc<RefCell<HeadlessView>>,
    record: SharedRecord,
}

impl HeadlessMap {
    /// A handle that simulates user interaction after the map has been handed
    /// to its owner
    pub fn handle(&self) -> HeadlessMapHandle {
        HeadlessMapHandle {
            view: self.view.clone(),
        }
    }
}

impl MapInstance for HeadlessMap {
    fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: u32) {
        self.record.borrow_mut().fits.push((*bounds, padding));

        let mut view = self.view.borrow_mut();
        let zoom = fit_zoom(bounds);
        let zoom_changed = zoom != view.zoom;
        view.zoom = zoom;
        view.center = bounds.midpoint();
        view.bounds = *bounds;

        if zoom_changed {
            view.emit(MapEvent::ZoomChanged);
        }
        view.emit(MapEvent::BoundsChanged);
    }

    fn set_center(&mut self, center: LatLng) {
        self.record.borrow_mut().centers.push(center);

        let mut view = self.view.borrow_mut();
        if view.center == center {
            return;
        }
        view.center = center;
        view.bounds = view.bounds.recentered(center);
        view.emit(MapEvent::BoundsChanged);
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        Some(self.view.borrow().bounds)
    }

    fn add_listener(&mut self, event: MapEvent, dispatcher: EventDispatcher) {
        self.record.borrow_mut().subscriptions.push(event);
        self.view
            .borrow_mut()
            .listeners
            .entry(event)
            .or_default()
            .push(dispatcher);
    }
}

/// Drives a [`HeadlessMap`] the way a user would
#[derive(Debug, Clone)]
pub struct HeadlessMapHandle {
    view: Rc<RefCell<HeadlessView>>,
}

impl HeadlessMapHandle {
    pub fn pan_to(&self, center: LatLng) {
        let zoom = self.zoom();
        self.view.borrow_mut().move_to(center, zoom);
    }

    pub fn zoom_to(&self, zoom: f64) {
        let center = self.center();
        self.view
            .borrow_mut()
            .move_to(center, zoom.clamp(0.0, MAX_ZOOM));
    }

    /// Emits `event` without changing the view
    pub fn fire(&self, event: MapEvent) {
        self.view.borrow().emit(event);
    }

    pub fn center(&self) -> LatLng {
        self.view.borrow().center
    }

    pub fn zoom(&self) -> f64 {
        self.view.borrow().zoom
    }

    pub fn bounds(&self) -> LatLngBounds {
        self.view.borrow().bounds
    }
}

/// Surfaces keyed by element id
#[derive(Debug, Clone, Default)]
pub struct HeadlessDocument {
    elements: HashMap<String, Surface>,
}

impl HeadlessDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document with the given attached elements
    pub fn with_elements<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut document = Self::new();
        for id in ids {
            document.insert(Surface::attached(id));
        }
        document
    }

    pub fn insert(&mut self, surface: Surface) {
        self.elements.insert(surface.id.clone(), surface);
    }
}

impl Document for HeadlessDocument {
    fn element(&self, id: &str) -> Option<Surface> {
        self.elements.get(id).cloned()
    }
}

/// Largest integer zoom at which `bounds` still fits a world-sized viewport
fn fit_zoom(bounds: &LatLngBounds) -> f64 {
    let span = bounds.span();
    let widest = span.lng.abs().max(span.lat.abs() * 2.0).max(1e-9);
    (360.0 / widest).log2().floor().clamp(0.0, MAX_ZOOM)
}

/// Visible rectangle of a world-sized viewport at `zoom`
fn view_bounds(center: LatLng, zoom: f64) -> LatLngBounds {
    let lng_half = 180.0 / 2f64.powf(zoom);
    let lat_half = lng_half / 2.0;
    LatLngBounds::from_coords(
        (center.lat - lat_half).max(-90.0),
        center.lng - lng_half,
        (center.lat + lat_half).min(90.0),
        center.lng + lng_half,
    )
}
