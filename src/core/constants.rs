//! Startup constants shared by the bootstrapper and the orchestrator.

/// Zoom used for the initial map before the first fit.
pub const DEFAULT_ZOOM_LEVEL: f64 = 9.0;

/// Pixel padding passed to every fit-to-bounds call.
pub const FIT_BOUNDS_PADDING: u32 = 0;

/// Provider event signalling that a requested zoom has been applied.
pub const ZOOM_CHANGED: &str = "zoom_changed";

/// Provider event fired whenever the visible rectangle changes.
pub const BOUNDS_CHANGED: &str = "bounds_changed";

/// Release channel requested from the provider's library loader.
pub const DEFAULT_LOADER_VERSION: &str = "weekly";

/// Element hosting the interactive map.
pub const DEFAULT_MAP_ELEMENT_ID: &str = "googlemap";

/// Canvas the engine draws flights on.
pub const DEFAULT_CANVAS_ELEMENT_ID: &str = "flight";

/// Environment variable holding the provider API key.
pub const API_KEY_ENV: &str = "GOOGLE_API_KEY";
