//! The map provider seam.
//!
//! A provider is reached in two steps: a [`ProviderLoader`] fetches the
//! client library (asynchronously, once), yielding a [`MapProvider`] that
//! constructs [`MapInstance`]s bound to page [`Surface`]s.

pub mod bootstrap;
pub mod headless;

use crate::core::config::{LoaderOptions, MapOptions};
use crate::core::geo::{LatLng, LatLngBounds};
use crate::core::geometry;
use crate::input::{EventDispatcher, MapEvent};
use crate::Result;
use async_trait::async_trait;

pub use bootstrap::MapBootstrapper;

/// A page element something draws into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Surface {
    pub id: String,
    /// Whether the element is attached to the live document
    pub attached: bool,
}

impl Surface {
    pub fn attached(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attached: true,
        }
    }

    pub fn detached(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attached: false,
        }
    }
}

/// Looks up display surfaces by element id
pub trait Document {
    fn element(&self, id: &str) -> Option<Surface>;
}

impl<T: Document + ?Sized> Document for &T {
    fn element(&self, id: &str) -> Option<Surface> {
        (**self).element(id)
    }
}

/// Loads a provider's client library.
#[async_trait(?Send)]
pub trait ProviderLoader {
    type Provider: MapProvider;

    /// Fetches the library. Failures are reported as
    /// [`ViewportError::ProviderLoad`](crate::ViewportError::ProviderLoad).
    async fn load(&self, api_key: &str, options: &LoaderOptions) -> Result<Self::Provider>;
}

/// A loaded provider library
pub trait MapProvider {
    type Map: MapInstance;

    /// Constructs a map drawing into `surface`
    fn create_map(&self, surface: &Surface, options: &MapOptions) -> Result<Self::Map>;

    /// Bounds of `coords` as the provider computes them. Providers without a
    /// native bounds type use the plain extrema.
    fn bounds_of(&self, coords: &[LatLng]) -> Result<LatLngBounds> {
        geometry::compute_bounds(coords)
    }
}

/// A live interactive map
pub trait MapInstance {
    /// Requests that `bounds` fill the viewport. Providers apply this
    /// asynchronously and report completion through `zoom_changed`.
    fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: u32);

    fn set_center(&mut self, center: LatLng);

    /// Currently visible rectangle, `None` until the map has rendered
    fn bounds(&self) -> Option<LatLngBounds>;

    /// Forwards every future occurrence of `event` to `dispatcher`
    fn add_listener(&mut self, event: MapEvent, dispatcher: EventDispatcher);
}
