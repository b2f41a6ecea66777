//! One-time base style bootstrap.
//!
//! The base layout properties are process-global from the engine's point of
//! view, so installation happens once per widget construction path and is
//! guarded against repeats.

use engine::{MapEngine, PaintValue};

use crate::layers::{LAYER_EXPANDED, LAYER_POINTS};

#[derive(Debug, Default)]
pub struct StyleBootstrap {
    installed: bool,
}

impl StyleBootstrap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn installed(&self) -> bool {
        self.installed
    }

    /// Installs the base layout once. Returns `true` only on the call that
    /// actually installed.
    pub fn install<E: MapEngine>(&mut self, engine: &mut E) -> bool {
        if self.installed {
            return false;
        }
        for layer in [LAYER_POINTS, LAYER_EXPANDED] {
            engine.set_layout_property(layer, "icon-allow-overlap", PaintValue::Flag(true));
        }
        self.installed = true;
        true
    }
}
