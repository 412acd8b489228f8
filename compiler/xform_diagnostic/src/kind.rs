//! The failure taxonomy from spec §7, realized as a closed enum rather than
//! free-form strings so the pipeline can match on severity class instead of
//! parsing messages.

use std::fmt;

/// How a diagnostic's kind affects traversal (spec §4.9 / §7).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SeverityClass {
    /// Aborts the whole session before any unit is processed.
    Fatal,
    /// Aborts the current unit; the driver continues with other units.
    UnitFatal,
    /// Attached as a diagnostic; traversal continues.
    Recoverable,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DiagnosticKind {
    InvalidConfiguration,
    PluginDuplicate,
    DependencyCycle,
    ArgumentArity,
    LiftingRequired,
    ErrorReturnSlotMissing,
    LambdaExplicitTypeRequired,
    TypeInferenceUnavailable,
}

impl DiagnosticKind {
    #[must_use]
    pub fn severity_class(self) -> SeverityClass {
        use DiagnosticKind::{
            ArgumentArity, DependencyCycle, ErrorReturnSlotMissing, InvalidConfiguration,
            LambdaExplicitTypeRequired, LiftingRequired, PluginDuplicate, TypeInferenceUnavailable,
        };
        match self {
            InvalidConfiguration | PluginDuplicate | DependencyCycle => SeverityClass::Fatal,
            ErrorReturnSlotMissing => SeverityClass::UnitFatal,
            ArgumentArity | LiftingRequired | LambdaExplicitTypeRequired
            | TypeInferenceUnavailable => SeverityClass::Recoverable,
        }
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            DiagnosticKind::InvalidConfiguration => "invalid-configuration",
            DiagnosticKind::PluginDuplicate => "plugin-duplicate",
            DiagnosticKind::DependencyCycle => "dependency-cycle",
            DiagnosticKind::ArgumentArity => "argument-arity",
            DiagnosticKind::LiftingRequired => "lifting-required",
            DiagnosticKind::ErrorReturnSlotMissing => "error-return-slot-missing",
            DiagnosticKind::LambdaExplicitTypeRequired => "lambda-explicit-type-required",
            DiagnosticKind::TypeInferenceUnavailable => "type-inference-unavailable",
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
