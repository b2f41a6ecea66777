//! Diagnostic event channel.
//!
//! Contained failures never propagate to the host page; this ordered record
//! is the only way they are observable.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEvent {
    pub kind: &'static str,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct DiagnosticLog {
    events: Vec<DiagnosticEvent>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, kind: &'static str, message: impl Into<String>) {
        self.events.push(DiagnosticEvent {
            kind,
            message: message.into(),
        });
    }

    pub fn events(&self) -> &[DiagnosticEvent] {
        &self.events
    }

    pub fn drain(&mut self) -> Vec<DiagnosticEvent> {
        std::mem::take(&mut self.events)
    }
}
