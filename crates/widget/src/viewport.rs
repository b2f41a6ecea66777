//! Debounced re-fit of the map to a configured viewport.

use engine::MapEngine;
use geo::{Time, ViewportBounds};

use crate::diag::DiagnosticLog;

/// Trailing-edge debounce window for resize events (seconds).
pub const RESIZE_DEBOUNCE_S: f64 = 0.3;

/// Padding passed to fit-to-bounds (pixels).
pub const FIT_PADDING_PX: f64 = 40.0;

/// Trailing-edge debouncer: each trigger pushes the deadline out, and the
/// action fires once when a poll observes the deadline passed.
#[derive(Debug, Clone, PartialEq)]
pub struct Debouncer {
    delay_s: f64,
    deadline: Option<Time>,
}

impl Debouncer {
    pub fn new(delay_s: f64) -> Self {
        Self {
            delay_s,
            deadline: None,
        }
    }

    pub fn trigger(&mut self, now: Time) {
        self.deadline = Some(now.plus(self.delay_s));
    }

    /// Returns `true` once per armed deadline, when `now` has reached it.
    pub fn fire(&mut self, now: Time) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }
}

/// Re-fits the map to the configured bounds on load and (debounced) on
/// resize. A no-op when no bounds were configured; fit failures are
/// swallowed into the diagnostic log.
#[derive(Debug)]
pub struct ViewportSync {
    bounds: Option<ViewportBounds>,
    debounce: Debouncer,
}

impl ViewportSync {
    pub fn new(bounds: Option<ViewportBounds>) -> Self {
        Self {
            bounds,
            debounce: Debouncer::new(RESIZE_DEBOUNCE_S),
        }
    }

    pub fn on_load<E: MapEngine>(&mut self, engine: &mut E, diag: &mut DiagnosticLog) {
        self.fit(engine, diag);
    }

    pub fn on_resize(&mut self, now: Time) {
        if self.bounds.is_some() {
            self.debounce.trigger(now);
        }
    }

    pub fn poll<E: MapEngine>(&mut self, engine: &mut E, diag: &mut DiagnosticLog, now: Time) {
        if self.debounce.fire(now) {
            self.fit(engine, diag);
        }
    }

    fn fit<E: MapEngine>(&mut self, engine: &mut E, diag: &mut DiagnosticLog) {
        let Some(bounds) = self.bounds else {
            return;
        };
        if let Err(err) = engine.fit_bounds(bounds, FIT_PADDING_PX) {
            diag.emit("viewport", format!("fit to bounds failed: {err}"));
        }
    }
}
