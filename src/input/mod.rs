pub mod events;

// Re-export the essential types
pub use events::{event_channel, EventDispatcher, EventStream, MapEvent};
