use xform_ir::Span;

use crate::kind::DiagnosticKind;
use crate::severity::Severity;

/// A suggested fix, attached to a diagnostic when the plugin that raised it
/// knows how to repair the source (spec §7: "optional fix suggestion").
#[derive(Clone, Debug)]
pub struct Suggestion {
    pub message: String,
    pub replacement: Option<String>,
}

#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    pub position: Option<Span>,
    pub fix: Option<Suggestion>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(severity: Severity, kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            kind,
            message: message.into(),
            position: None,
            fix: None,
        }
    }

    #[must_use]
    pub fn error(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, kind, message)
    }

    #[must_use]
    pub fn warning(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, kind, message)
    }

    #[must_use]
    pub fn at(mut self, position: Span) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn with_fix(mut self, fix: Suggestion) -> Self {
        self.fix = Some(fix);
        self
    }
}
