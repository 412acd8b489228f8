//! Terminal rendering of diagnostics, modeled on the teacher's
//! `TerminalEmitter` but trimmed to what a transformation core needs: no
//! color/SARIF/JSON backends, since the printer is an external collaborator
//! (spec §6) — this just gives embedding tests and drivers something
//! human-readable for free.

use std::fmt::Write as _;

use xform_ir::FileSet;

use crate::diagnostic::Diagnostic;

#[must_use]
pub fn render(diagnostics: &[Diagnostic], file_set: &FileSet) -> String {
    let mut out = String::new();
    for diag in diagnostics {
        match diag.position {
            Some(span) => {
                let (file, line, col) = file_set.locate(span);
                let _ = writeln!(
                    out,
                    "{}: {} [{}] ({file}:{line}:{col})",
                    diag.severity, diag.message, diag.kind
                );
            }
            None => {
                let _ = writeln!(out, "{}: {} [{}]", diag.severity, diag.message, diag.kind);
            }
        }
        if let Some(fix) = &diag.fix {
            let _ = writeln!(out, "  help: {}", fix.message);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::DiagnosticKind;
    use xform_ir::Span;

    #[test]
    fn renders_position_and_message() {
        let fs = FileSet::build("a.go", "line1\nline2");
        let diag =
            Diagnostic::error(DiagnosticKind::ErrorReturnSlotMissing, "no error return slot")
                .at(Span::new(6, 10));
        let rendered = render(&[diag], &fs);
        assert!(rendered.contains("a.go:2:1"));
        assert!(rendered.contains("no error return slot"));
        assert!(rendered.contains("error-return-slot-missing"));
    }
}
