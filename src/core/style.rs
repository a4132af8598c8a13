use serde::{Deserialize, Serialize};

/// One entry of a provider style list: which features to restyle and how.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapTypeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_type: Option<String>,
    pub stylers: Vec<Styler>,
}

/// A single style rule. Only colors are used by the built-in themes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Styler {
    pub color: String,
}

impl MapTypeStyle {
    fn element(element_type: &str, color: &str) -> Self {
        Self {
            feature_type: None,
            element_type: Some(element_type.to_string()),
            stylers: vec![Styler {
                color: color.to_string(),
            }],
        }
    }

    fn feature(feature_type: &str, element_type: &str, color: &str) -> Self {
        Self {
            feature_type: Some(feature_type.to_string()),
            ..Self::element(element_type, color)
        }
    }
}

/// Built-in map themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapTheme {
    /// Provider default look
    Standard,
    /// Dark theme the flight canvas is drawn over
    #[default]
    Night,
}

impl MapTheme {
    pub fn styles(self) -> Vec<MapTypeStyle> {
        match self {
            MapTheme::Standard => Vec::new(),
            MapTheme::Night => night_mode_styles(),
        }
    }
}

fn night_mode_styles() -> Vec<MapTypeStyle> {
    vec![
        MapTypeStyle::element("geometry", "#242f3e"),
        MapTypeStyle::element("labels.text.stroke", "#242f3e"),
        MapTypeStyle::element("labels.text.fill", "#746855"),
        MapTypeStyle::feature("administrative.locality", "labels.text.fill", "#d59563"),
        MapTypeStyle::feature("poi", "labels.text.fill", "#d59563"),
        MapTypeStyle::feature("poi.park", "geometry", "#263c3f"),
        MapTypeStyle::feature("poi.park", "labels.text.fill", "#6b9a76"),
        MapTypeStyle::feature("road", "geometry", "#38414e"),
        MapTypeStyle::feature("road", "geometry.stroke", "#212a37"),
        MapTypeStyle::feature("road", "labels.text.fill", "#9ca5b3"),
        MapTypeStyle::feature("road.highway", "geometry", "#746855"),
        MapTypeStyle::feature("road.highway", "geometry.stroke", "#1f2835"),
        MapTypeStyle::feature("road.highway", "labels.text.fill", "#f3d19c"),
        MapTypeStyle::feature("transit", "geometry", "#2f3948"),
        MapTypeStyle::feature("transit.station", "labels.text.fill", "#d59563"),
        MapTypeStyle::feature("water", "geometry", "#17263c"),
        MapTypeStyle::feature("water", "labels.text.fill", "#515c6d"),
        MapTypeStyle::feature("water", "labels.text.stroke", "#17263c"),
    ]
}
