//! Structured diagnostics for the analysis run.
//!
//! Every component reports problems through a [`Diagnostics`] value instead of
//! returning errors to the orchestrator: nothing in this tool is fatal, a missing
//! chart must never block the rest of the report. Each event is echoed to stdout
//! as a `[INFO]` / `[WARN]` / `[ERROR]` line when emitted and kept in memory so
//! tests can assert on events instead of parsing console text.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "[INFO]"),
            Severity::Warn => write!(f, "[WARN]"),
            Severity::Error => write!(f, "[ERROR]"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

/// Collecting sink for diagnostic events.
#[derive(Debug, Default)]
pub struct Diagnostics {
    pub events: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.emit(Severity::Info, message.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.emit(Severity::Warn, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.emit(Severity::Error, message.into());
    }

    pub fn error_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| e.severity == Severity::Error)
            .count()
    }

    fn emit(&mut self, severity: Severity, message: String) {
        println!("{} {}", severity, message);
        self.events.push(Diagnostic { severity, message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn events_are_recorded_in_emission_order() {
        let mut diag = Diagnostics::new();
        diag.info("starting");
        diag.warn("input missing");
        diag.error("parse failed");

        let severities: Vec<Severity> = diag.events.iter().map(|e| e.severity).collect();
        assert_eq!(severities, vec![Severity::Info, Severity::Warn, Severity::Error]);
        assert_eq!(diag.error_count(), 1);
        assert_eq!(diag.events[1].message, "input missing");
    }

    #[test]
    fn severity_prefixes_match_console_format() {
        assert_eq!(Severity::Info.to_string(), "[INFO]");
        assert_eq!(Severity::Warn.to_string(), "[WARN]");
        assert_eq!(Severity::Error.to_string(), "[ERROR]");
    }
}
