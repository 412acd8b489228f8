//! Per-unit diagnostic accumulation.

use rustc_hash::FxHashSet;

use crate::diagnostic::Diagnostic;
use crate::kind::{DiagnosticKind, SeverityClass};
use crate::severity::Severity;

/// Collects diagnostics for one unit traversal. Tracks which once-per-unit
/// warnings (spec §7: `type-inference-unavailable` degrades "recoverable
/// warning on first use per unit") have already fired so repeats are
/// suppressed.
#[derive(Default)]
pub struct DiagnosticQueue {
    diagnostics: Vec<Diagnostic>,
    warned_once: FxHashSet<DiagnosticKind>,
    unit_fatal: bool,
}

impl DiagnosticQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        if diagnostic.kind.severity_class() == SeverityClass::UnitFatal {
            self.unit_fatal = true;
        }
        self.diagnostics.push(diagnostic);
    }

    /// Push a once-per-unit warning; returns `false` if this `kind` has
    /// already warned in this unit, without recording a second diagnostic.
    pub fn warn_once(&mut self, kind: DiagnosticKind, message: impl Into<String>) -> bool {
        if !self.warned_once.insert(kind) {
            return false;
        }
        self.push(Diagnostic::new(Severity::Warning, kind, message));
        true
    }

    #[must_use]
    pub fn is_unit_fatal(&self) -> bool {
        self.unit_fatal
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
