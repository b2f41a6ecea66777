//! Input-event subscriptions and the event vocabulary.
//!
//! Handlers are registered with the engine exactly once for the widget's
//! lifetime; which cluster (if any) is expanded is consulted inside the
//! single dispatch path, never by re-registering per click.

use engine::{EventKind, LayerId, MapEngine, ScreenPoint};

use crate::layers::INTERACTIVE_LAYERS;

/// Events forwarded by the host from the engine's input system.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Click {
        point: ScreenPoint,
    },
    ZoomChanged {
        zoom: f64,
    },
    MouseEnter {
        layer: LayerId,
    },
    MouseLeave {
        layer: LayerId,
    },
    Resize,
    FacetToggled {
        dimension: String,
        value: String,
        selected: bool,
    },
}

#[derive(Debug, Default)]
pub struct EventRouter {
    bound: bool,
}

impl EventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Subscribes to every input event the widget consumes. Idempotent:
    /// repeated binds (or cluster clicks) never accumulate handlers.
    pub fn bind<E: MapEngine>(&mut self, engine: &mut E) {
        if self.bound {
            return;
        }
        engine.subscribe(None, EventKind::Click);
        engine.subscribe(None, EventKind::Zoom);
        engine.subscribe(None, EventKind::Resize);
        for layer in INTERACTIVE_LAYERS {
            engine.subscribe(Some(layer), EventKind::Click);
            engine.subscribe(Some(layer), EventKind::MouseEnter);
            engine.subscribe(Some(layer), EventKind::MouseLeave);
        }
        self.bound = true;
    }
}
