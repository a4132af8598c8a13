//! Configuration for the viewer: provider credentials, page element ids and
//! map construction options.
//!
//! Map options follow the provider's convention: a fixed set of defaults
//! ([`MapOptions::default`]) that callers override key by key with a
//! [`MapOptionsPatch`]. Keys the crate does not model are carried through
//! untouched in `extra`.

use crate::core::constants::{
    API_KEY_ENV, DEFAULT_CANVAS_ELEMENT_ID, DEFAULT_LOADER_VERSION, DEFAULT_MAP_ELEMENT_ID,
    DEFAULT_ZOOM_LEVEL, FIT_BOUNDS_PADDING,
};
use crate::core::geo::LatLng;
use crate::core::style::{MapTheme, MapTypeStyle};
use crate::{Result, ViewportError};
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value};

/// Options a map instance is constructed with, in the provider's JSON shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<LatLng>,
    pub zoom: f64,
    pub styles: Vec<MapTypeStyle>,
    #[serde(rename = "disableDefaultUI")]
    pub disable_default_ui: bool,
    #[serde(flatten)]
    pub extra: JsonMap<String, Value>,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            center: None,
            zoom: DEFAULT_ZOOM_LEVEL,
            styles: MapTheme::Night.styles(),
            disable_default_ui: true,
            extra: JsonMap::new(),
        }
    }
}

impl MapOptions {
    /// Applies caller overrides on top of `self`. Every key present in the
    /// patch wins; absent keys keep their current value.
    pub fn merge(mut self, patch: MapOptionsPatch) -> Self {
        if let Some(center) = patch.center {
            self.center = Some(center);
        }
        if let Some(zoom) = patch.zoom {
            self.zoom = zoom;
        }
        if let Some(styles) = patch.styles {
            self.styles = styles;
        }
        if let Some(disable_default_ui) = patch.disable_default_ui {
            self.disable_default_ui = disable_default_ui;
        }
        self.extra.extend(patch.extra);
        self
    }
}

/// Caller-supplied overrides for [`MapOptions`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapOptionsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<LatLng>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub styles: Option<Vec<MapTypeStyle>>,
    #[serde(
        default,
        rename = "disableDefaultUI",
        skip_serializing_if = "Option::is_none"
    )]
    pub disable_default_ui: Option<bool>,
    #[serde(flatten)]
    pub extra: JsonMap<String, Value>,
}

impl MapOptionsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn center(mut self, center: LatLng) -> Self {
        self.center = Some(center);
        self
    }

    pub fn zoom(mut self, zoom: f64) -> Self {
        self.zoom = Some(zoom);
        self
    }

    pub fn theme(mut self, theme: MapTheme) -> Self {
        self.styles = Some(theme.styles());
        self
    }

    pub fn disable_default_ui(mut self, disable: bool) -> Self {
        self.disable_default_ui = Some(disable);
        self
    }

    /// Sets a provider option the crate does not model
    pub fn option(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Options forwarded to the provider's library loader
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderOptions {
    pub version: String,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            version: DEFAULT_LOADER_VERSION.to_string(),
        }
    }
}

/// Everything the viewer needs to start up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub api_key: String,
    pub loader: LoaderOptions,
    pub map_element_id: String,
    pub canvas_element_id: String,
    pub fit_padding: u32,
    pub map_options: MapOptionsPatch,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            loader: LoaderOptions::default(),
            map_element_id: DEFAULT_MAP_ELEMENT_ID.to_string(),
            canvas_element_id: DEFAULT_CANVAS_ELEMENT_ID.to_string(),
            fit_padding: FIT_BOUNDS_PADDING,
            map_options: MapOptionsPatch::default(),
        }
    }
}

impl ViewerConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Defaults with the API key taken from `GOOGLE_API_KEY`
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|e| ViewportError::Config(format!("{API_KEY_ENV}: {e}")))?;
        Ok(Self::new(api_key))
    }

    /// Parses a JSON document; missing keys fall back to defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ViewportError::Config(e.to_string()))
    }

    pub fn with_map_options(mut self, patch: MapOptionsPatch) -> Self {
        self.map_options = patch;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = MapOptions::default();
        assert_eq!(options.zoom, 9.0);
        assert!(options.disable_default_ui);
        assert_eq!(options.styles, MapTheme::Night.styles());
        assert!(options.center.is_none());
    }

    #[test]
    fn test_merge_caller_wins_key_by_key() {
        let patch = MapOptionsPatch::new()
            .center(LatLng::new(46.0, -37.0))
            .zoom(3.0)
            .option("gestureHandling", serde_json::json!("greedy"));
        let merged = MapOptions::default().merge(patch);

        assert_eq!(merged.center, Some(LatLng::new(46.0, -37.0)));
        assert_eq!(merged.zoom, 3.0);
        // untouched keys keep their defaults
        assert!(merged.disable_default_ui);
        assert_eq!(merged.styles, MapTheme::Night.styles());
        assert_eq!(merged.extra["gestureHandling"], "greedy");
    }

    #[test]
    fn test_merged_options_serialize_in_provider_shape() {
        let merged = MapOptions::default().merge(
            MapOptionsPatch::new()
                .theme(MapTheme::Standard)
                .disable_default_ui(false)
                .option("mapTypeId", serde_json::json!("terrain")),
        );
        let json = serde_json::to_value(&merged).unwrap();

        assert_eq!(json["zoom"], 9.0);
        assert_eq!(json["disableDefaultUI"], false);
        assert_eq!(json["styles"], serde_json::json!([]));
        assert_eq!(json["mapTypeId"], "terrain");
        assert!(json.get("center").is_none());
    }

    #[test]
    fn test_patch_parses_extra_keys() {
        let patch: MapOptionsPatch =
            serde_json::from_str(r#"{"zoom": 4, "tilt": 45, "disableDefaultUI": false}"#).unwrap();
        assert_eq!(patch.zoom, Some(4.0));
        assert_eq!(patch.disable_default_ui, Some(false));
        assert_eq!(patch.extra["tilt"], 45);
    }

    #[test]
    fn test_viewer_config_from_json_fills_defaults() {
        let config = ViewerConfig::from_json(r#"{"api_key": "abc"}"#).unwrap();
        assert_eq!(config.api_key, "abc");
        assert_eq!(config.loader.version, "weekly");
        assert_eq!(config.map_element_id, "googlemap");
        assert_eq!(config.canvas_element_id, "flight");
        assert_eq!(config.fit_padding, 0);
    }

    #[test]
    fn test_viewer_config_with_map_options() {
        let config = ViewerConfig::new("abc")
            .with_map_options(MapOptionsPatch::new().zoom(4.0).theme(MapTheme::Standard));

        assert_eq!(config.api_key, "abc");
        assert_eq!(config.map_options.zoom, Some(4.0));

        let merged = MapOptions::default().merge(config.map_options);
        assert_eq!(merged.zoom, 4.0);
        assert!(merged.styles.is_empty());
        assert!(merged.disable_default_ui);
    }

    #[test]
    fn test_viewer_config_rejects_malformed_json() {
        assert!(matches!(
            ViewerConfig::from_json("{"),
            Err(ViewportError::Config(_))
        ));
    }
}
