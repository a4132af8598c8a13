use crate::core::constants::{BOUNDS_CHANGED, ZOOM_CHANGED};
use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use serde::{Deserialize, Serialize};

/// Map events the orchestrator subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapEvent {
    /// The provider finished applying a zoom change
    ZoomChanged,
    /// The visible rectangle changed (pan, zoom, resize, fit)
    BoundsChanged,
}

impl MapEvent {
    /// Every event the orchestrator listens for, in subscription order
    pub const ALL: [MapEvent; 2] = [MapEvent::ZoomChanged, MapEvent::BoundsChanged];

    /// Provider-side event name
    pub fn name(self) -> &'static str {
        match self {
            MapEvent::ZoomChanged => ZOOM_CHANGED,
            MapEvent::BoundsChanged => BOUNDS_CHANGED,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            ZOOM_CHANGED => Some(MapEvent::ZoomChanged),
            BOUNDS_CHANGED => Some(MapEvent::BoundsChanged),
            _ => None,
        }
    }
}

impl std::fmt::Display for MapEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Sending half handed to map listeners. Cloning is cheap; every clone feeds
/// the same queue.
#[derive(Debug, Clone)]
pub struct EventDispatcher {
    tx: UnboundedSender<MapEvent>,
}

impl EventDispatcher {
    /// Queues an event. Returns false once the receiving side is gone.
    pub fn dispatch(&self, event: MapEvent) -> bool {
        self.tx.unbounded_send(event).is_ok()
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Receiving half, drained by the orchestrator's event loop
pub type EventStream = UnboundedReceiver<MapEvent>;

/// Creates the queue map events travel through. Events are delivered in the
/// order they were dispatched and handled one at a time.
pub fn event_channel() -> (EventDispatcher, EventStream) {
    let (tx, rx) = mpsc::unbounded();
    (EventDispatcher { tx }, rx)
}
