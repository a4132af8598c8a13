//! Browser bindings: the page document and the Google Maps JS provider.
//!
//! Values cross the JS boundary as JSON so the provider sees exactly the
//! shapes [`MapOptions`], [`LatLng`] and [`BoundsLiteral`] serialize to.

use crate::core::config::{LoaderOptions, MapOptions};
use crate::core::geo::{BoundsLiteral, LatLng, LatLngBounds};
use crate::input::{EventDispatcher, MapEvent};
use crate::provider::{Document, MapInstance, MapProvider, ProviderLoader, Surface};
use crate::{Result, ViewportError};
use async_trait::async_trait;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

#[wasm_bindgen(module = "@googlemaps/js-api-loader")]
extern "C" {
    type Loader;

    #[wasm_bindgen(constructor)]
    fn new(options: &JsValue) -> Loader;

    #[wasm_bindgen(method)]
    fn load(this: &Loader) -> js_sys::Promise;
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["google", "maps"], js_name = Map)]
    type GoogleMap;

    #[wasm_bindgen(constructor, js_namespace = ["google", "maps"], js_class = "Map")]
    fn new(element: &web_sys::Element, options: &JsValue) -> GoogleMap;

    #[wasm_bindgen(method, js_name = fitBounds)]
    fn fit_bounds(this: &GoogleMap, bounds: &JsValue, padding: u32);

    #[wasm_bindgen(method, js_name = setCenter)]
    fn set_center(this: &GoogleMap, center: &JsValue);

    #[wasm_bindgen(method, js_name = getBounds)]
    fn get_bounds(this: &GoogleMap) -> JsValue;

    #[wasm_bindgen(method, js_name = addListener)]
    fn add_listener(this: &GoogleMap, event: &str, handler: &js_sys::Function) -> JsValue;
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue> {
    let json = serde_json::to_string(value)?;
    js_sys::JSON::parse(&json).map_err(|e| ViewportError::Config(format!("{e:?}")))
}

fn html_document() -> Option<web_sys::Document> {
    web_sys::window()?.document()
}

/// The live page
#[derive(Debug, Clone, Copy, Default)]
pub struct WebDocument;

impl Document for WebDocument {
    fn element(&self, id: &str) -> Option<Surface> {
        let element = html_document()?.get_element_by_id(id)?;
        Some(Surface {
            id: id.to_string(),
            attached: element.is_connected(),
        })
    }
}

/// Loads the Maps JavaScript API through `@googlemaps/js-api-loader`
#[derive(Debug, Clone, Copy, Default)]
pub struct GoogleMapsLoader;

#[async_trait(?Send)]
impl ProviderLoader for GoogleMapsLoader {
    type Provider = GoogleMaps;

    async fn load(&self, api_key: &str, options: &LoaderOptions) -> Result<GoogleMaps> {
        let loader_options = to_js(&serde_json::json!({
            "apiKey": api_key,
            "version": options.version,
        }))?;
        JsFuture::from(Loader::new(&loader_options).load())
            .await
            .map_err(|e| ViewportError::ProviderLoad(format!("{e:?}")))?;
        Ok(GoogleMaps)
    }
}

/// The loaded `google.maps` namespace
#[derive(Debug)]
pub struct GoogleMaps;

impl MapProvider for GoogleMaps {
    type Map = GoogleMapInstance;

    fn create_map(&self, surface: &Surface, options: &MapOptions) -> Result<GoogleMapInstance> {
        let element = html_document()
            .and_then(|document| document.get_element_by_id(&surface.id))
            .ok_or_else(|| ViewportError::MissingElement(format!("#{}", surface.id)))?;

        Ok(GoogleMapInstance {
            map: GoogleMap::new(&element, &to_js(options)?),
            listeners: Vec::new(),
        })
    }
}

/// A `google.maps.Map` plus the closures registered on it. The closures
/// live as long as the map does.
pub struct GoogleMapInstance {
    map: GoogleMap,
    listeners: Vec<Closure<dyn FnMut()>>,
}

impl MapInstance for GoogleMapInstance {
    fn fit_bounds(&mut self, bounds: &LatLngBounds, padding: u32) {
        match to_js(&bounds.to_literal()) {
            Ok(literal) => self.map.fit_bounds(&literal, padding),
            Err(e) => log::error!("fitBounds skipped: {e}"),
        }
    }

    fn set_center(&mut self, center: LatLng) {
        match to_js(&center) {
            Ok(literal) => self.map.set_center(&literal),
            Err(e) => log::error!("setCenter skipped: {e}"),
        }
    }

    fn bounds(&self) -> Option<LatLngBounds> {
        let bounds = self.map.get_bounds();
        if bounds.is_undefined() || bounds.is_null() {
            return None;
        }
        // LatLngBounds#toJSON yields the literal shape
        let json = js_sys::JSON::stringify(&bounds).ok()?.as_string()?;
        serde_json::from_str::<BoundsLiteral>(&json)
            .map(LatLngBounds::from)
            .ok()
    }

    fn add_listener(&mut self, event: MapEvent, dispatcher: EventDispatcher) {
        let closure = Closure::<dyn FnMut()>::new(move || {
            dispatcher.dispatch(event);
        });
        self.map
            .add_listener(event.name(), closure.as_ref().unchecked_ref());
        self.listeners.push(closure);
    }
}
