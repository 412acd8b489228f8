//! Error-message formatter (spec §4.2): builds a call to the host's
//! formatted-error constructor (`fmt.Errorf`-shaped) wrapping an error
//! value with an annotated message.

use xform_ir::{ExprArena, ExprId, ExprKind, ImportSet, Interner, Name, Span};

/// The import path the generated call requires.
pub const IMPORT_PATH: &str = "\"fmt\"";

/// Escape untrusted message text for embedding in a host string literal.
///
/// Rules are applied in this exact order — backslash first, so later rules'
/// freshly inserted backslashes are never re-escaped:
/// `\` → `\\`, `"` → `\"`, `\n` → `\n`, `\t` → `\t`, `\r` → `\r`,
/// form feed → `\f`.
#[must_use]
pub fn escape(message: &str) -> String {
    message
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\t', "\\t")
        .replace('\r', "\\r")
        .replace('\u{0C}', "\\f")
}

/// Build `fmt.Errorf("{escaped message}: %w", err_var)`.
pub fn wrap(
    arena: &mut ExprArena,
    interner: &mut Interner,
    err_var: Name,
    message: &str,
    span: Span,
) -> ExprId {
    let literal = format!("{}: %w", escape(message));
    let fmt_pkg = interner.intern("fmt");
    let errorf = interner.intern("Errorf");

    let fmt_ident = arena.push(ExprKind::Ident(fmt_pkg), span);
    let func = arena.push(
        ExprKind::Selector {
            expr: fmt_ident,
            field: errorf,
        },
        span,
    );
    let format_str = arena.push(ExprKind::StringLit(literal), span);
    let err_ident = arena.push(ExprKind::Ident(err_var), span);

    arena.push(
        ExprKind::Call {
            func,
            args: vec![format_str, err_ident],
        },
        span,
    )
}

/// Declare that the formatted-error module must be imported (spec §4.2).
pub fn require_import(imports: &mut ImportSet) {
    imports.ensure(IMPORT_PATH);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backslash_rule_runs_first() {
        // A literal backslash immediately followed by a real newline byte —
        // escaping in the wrong order would re-escape the backslash the
        // newline rule inserts and corrupt the round trip.
        let input = format!("{}{}", '\\', '\n');
        let escaped = escape(&input);
        assert_eq!(escaped.len(), 4);
        assert_eq!(escaped, "\\\\\\n");
    }

    #[test]
    fn escape_round_trips_through_decoding() {
        let input = "he said \"hi\"\nok";
        let escaped = escape(input);
        let decoded = decode_for_test(&escaped);
        assert_eq!(decoded, input);
    }

    /// A tiny decoder mirroring Go/Rust string-literal escape rules, used
    /// only to assert the round-trip property in tests.
    fn decode_for_test(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '\\' {
                match chars.next() {
                    Some('\\') => out.push('\\'),
                    Some('"') => out.push('"'),
                    Some('n') => out.push('\n'),
                    Some('t') => out.push('\t'),
                    Some('r') => out.push('\r'),
                    Some('f') => out.push('\u{0C}'),
                    Some(other) => out.push(other),
                    None => {}
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn wrap_produces_fmt_errorf_call_with_w_suffix() {
        let mut arena = ExprArena::new();
        let mut interner = Interner::new();
        let err = interner.intern("__err0");
        let call = wrap(
            &mut arena,
            &mut interner,
            err,
            "he said \"hi\"\nok",
            Span::DUMMY,
        );
        match arena.kind(call) {
            ExprKind::Call { args, .. } => {
                assert_eq!(args.len(), 2);
                match arena.kind(args[0]) {
                    ExprKind::StringLit(s) => {
                        assert_eq!(s, "he said \\\"hi\\\"\\nok: %w");
                    }
                    other => panic!("expected string literal, got {other:?}"),
                }
            }
            other => panic!("expected call, got {other:?}"),
        }
    }

    #[test]
    fn require_import_adds_fmt_exactly_once() {
        let mut imports = ImportSet::new();
        require_import(&mut imports);
        require_import(&mut imports);
        assert_eq!(imports.groups(), &[vec![IMPORT_PATH.to_string()]]);
    }
}
