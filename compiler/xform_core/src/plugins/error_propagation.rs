//! Error-propagation lowering (spec §4.6): `expr?` / `expr!` / `try expr`
//! into a temporary binding, a conditional early return, and a rebind.
//!
//! Phase 1 scope (spec §4.6, §9): only the statement-context case is
//! lowered — a propagation expression that *is* the whole right-hand side
//! of an assignment, or the whole of a statement. A propagation expression
//! anywhere else is reported `lifting-required` rather than guessed at; a
//! real statement-lift pass is future work (§9 design note).

use xform_diagnostic::{Diagnostic, DiagnosticKind};
use xform_ir::{
    AssignOp, BasicKind, BinaryOp, Block, Decl, ExprArena, ExprId, ExprKind, FileUnit, Interner,
    Span, Stmt, Type,
};

use crate::context::{PluginContext, UnitState};
use crate::plugin::Plugin;

pub struct ErrorPropagationPlugin;

impl Plugin for ErrorPropagationPlugin {
    fn name(&self) -> &'static str {
        "error-propagation"
    }

    fn process_unit(
        &self,
        unit: &mut FileUnit,
        ctx: &PluginContext<'_>,
        state: &mut UnitState,
    ) -> Result<(), Diagnostic> {
        if !ctx.config.error_propagation_enabled {
            return Ok(());
        }
        for decl in &mut unit.decls {
            if let Decl::Func(f) = decl {
                let mut cx = LowerCx {
                    results: &f.results,
                    arena: &mut unit.exprs,
                    state: &mut *state,
                };
                lower_block(&mut f.body, &mut cx)?;
            }
        }
        Ok(())
    }
}

fn is_error_type(ty: &Type, interner: &Interner) -> bool {
    matches!(ty, Type::Named(name) if interner.resolve(*name) == "error")
}

/// Zero value for a declared return type (spec §4.6, §9). Pointer and
/// function types always have a correct `nil`; named/qualified/unknown
/// types degrade to `nil` with a recoverable warning since the core has no
/// field-level type information to know whether `nil` is actually valid
/// there (the §9 open question on non-pointer/non-interface zero values).
fn zero_value(ty: &Type, arena: &mut ExprArena, span: Span, state: &mut UnitState) -> ExprId {
    match ty {
        Type::Basic(BasicKind::Int | BasicKind::Byte) => arena.push(ExprKind::IntLit(0), span),
        Type::Basic(BasicKind::Float) => arena.push(ExprKind::FloatLit(0.0), span),
        Type::Basic(BasicKind::String) => arena.push(ExprKind::StringLit(String::new()), span),
        Type::Basic(BasicKind::Rune) => arena.push(ExprKind::CharLit('\0'), span),
        Type::Basic(BasicKind::Bool) => arena.push(ExprKind::BoolLit(false), span),
        Type::Struct(fields) => arena.push(
            ExprKind::CompositeLit {
                ty: Some(Type::Struct(fields.clone())),
                fields: Vec::new(),
            },
            span,
        ),
        Type::Pointer(_) | Type::Function { .. } => arena.push(ExprKind::NilLit, span),
        Type::Named(_) | Type::Qualified { .. } | Type::Unknown => {
            state.diagnostics.warn_once(
                DiagnosticKind::TypeInferenceUnavailable,
                "degraded zero value: nil is only correct here if the return type is a pointer or interface",
            );
            arena.push(ExprKind::NilLit, span)
        }
    }
}

fn direct_exprs(stmt: &Stmt) -> Vec<ExprId> {
    match stmt {
        Stmt::Expr(id) => vec![*id],
        Stmt::Assign { lhs, rhs, .. } => lhs.iter().chain(rhs).copied().collect(),
        Stmt::Return { results, .. } => results.clone(),
        Stmt::If { cond, .. } => vec![*cond],
        Stmt::Block(_) => Vec::new(),
    }
}

/// Recursively search `id`'s subtree (not descending into nested function
/// literals, a separate scope) for an `ErrorPropagation` node.
fn find_error_propagation(arena: &ExprArena, id: ExprId) -> Option<ExprId> {
    match arena.kind(id) {
        ExprKind::ErrorPropagation { .. } => Some(id),
        ExprKind::Call { func, args } => find_error_propagation(arena, *func)
            .or_else(|| args.iter().find_map(|a| find_error_propagation(arena, *a))),
        ExprKind::Selector { expr, .. } | ExprKind::Unary { expr, .. } => {
            find_error_propagation(arena, *expr)
        }
        ExprKind::Binary { lhs, rhs, .. } => {
            find_error_propagation(arena, *lhs).or_else(|| find_error_propagation(arena, *rhs))
        }
        ExprKind::CompositeLit { fields, .. } => fields
            .iter()
            .find_map(|f| find_error_propagation(arena, f.value)),
        _ => None,
    }
}

/// Bundles the pieces every statement-rewrite step needs, so the recursive
/// walk doesn't thread four separate parameters through each call.
struct LowerCx<'a, 'u> {
    results: &'a [Type],
    arena: &'a mut ExprArena,
    state: &'a mut UnitState<'u>,
}

fn lower_block(block: &mut Block, cx: &mut LowerCx) -> Result<(), Diagnostic> {
    let mut out = Block::with_capacity(block.len());
    for stmt in block.drain(..) {
        match stmt {
            Stmt::If {
                cond,
                mut then_block,
                mut else_block,
                span,
            } => {
                if let Some(found) = find_error_propagation(cx.arena, cond) {
                    cx.state.diagnostics.push(Diagnostic::warning(
                        DiagnosticKind::LiftingRequired,
                        "error-propagation expression is nested in expression context and cannot be lowered without a statement-lift pass",
                    ).at(cx.arena.span(found)));
                }
                lower_block(&mut then_block, cx)?;
                if let Some(eb) = else_block.as_mut() {
                    lower_block(eb, cx)?;
                }
                out.push(Stmt::If {
                    cond,
                    then_block,
                    else_block,
                    span,
                });
            }
            Stmt::Block(mut inner) => {
                lower_block(&mut inner, cx)?;
                out.push(Stmt::Block(inner));
            }
            Stmt::Assign { lhs, rhs, op, span } if is_direct_propagation(cx.arena, &rhs) => {
                let tmp_ident = bind_and_check(rhs[0], span, cx, &mut out)?;
                out.push(Stmt::Assign {
                    lhs,
                    rhs: vec![tmp_ident],
                    op,
                    span,
                });
            }
            Stmt::Expr(id) if matches!(cx.arena.kind(id), ExprKind::ErrorPropagation { .. }) => {
                let span = cx.arena.span(id);
                bind_and_check(id, span, cx, &mut out)?;
            }
            other => {
                for id in direct_exprs(&other) {
                    if let Some(found) = find_error_propagation(cx.arena, id) {
                        cx.state.diagnostics.push(Diagnostic::warning(
                            DiagnosticKind::LiftingRequired,
                            "error-propagation expression is nested in expression context and cannot be lowered without a statement-lift pass",
                        ).at(cx.arena.span(found)));
                    }
                }
                out.push(other);
            }
        }
    }
    *block = out;
    Ok(())
}

fn is_direct_propagation(arena: &ExprArena, rhs: &[ExprId]) -> bool {
    rhs.len() == 1 && matches!(arena.kind(rhs[0]), ExprKind::ErrorPropagation { .. })
}

/// Emits `__tmpK, __errK := inner; if __errK != nil { return zeros, __errK }`
/// for the propagation node at `prop_id` (an `ErrorPropagation` expr, either
/// bare or the sole right-hand side of an assignment) and returns the
/// identifier of `__tmpK`, the expression the caller should bind its own
/// left-hand side to.
fn bind_and_check(
    prop_id: ExprId,
    span: Span,
    cx: &mut LowerCx,
    out: &mut Block,
) -> Result<ExprId, Diagnostic> {
    let inner = match cx.arena.kind(prop_id) {
        ExprKind::ErrorPropagation { expr, .. } => *expr,
        _ => unreachable!("caller matched ErrorPropagation"),
    };

    let err_ok = cx
        .results
        .last()
        .is_some_and(|t| is_error_type(t, cx.state.interner));
    if !err_ok {
        return Err(Diagnostic::error(
            DiagnosticKind::ErrorReturnSlotMissing,
            "enclosing function has no trailing error return slot to propagate into",
        )
        .at(span));
    }

    let tmp = cx.state.names.next_temp();
    let err = cx.state.names.next_err();
    let tmp_name = cx.state.interner.intern(&tmp);
    let err_name = cx.state.interner.intern(&err);

    let tmp_bind = cx.arena.push(ExprKind::Ident(tmp_name), span);
    let err_bind = cx.arena.push(ExprKind::Ident(err_name), span);
    out.push(Stmt::Assign {
        lhs: vec![tmp_bind, err_bind],
        rhs: vec![inner],
        op: AssignOp::Define,
        span,
    });

    let err_cond = cx.arena.push(ExprKind::Ident(err_name), span);
    let nil_lit = cx.arena.push(ExprKind::NilLit, span);
    let cond = cx.arena.push(
        ExprKind::Binary {
            op: BinaryOp::NotEq,
            lhs: err_cond,
            rhs: nil_lit,
        },
        span,
    );

    let mut return_results: Vec<ExprId> = cx.results[..cx.results.len() - 1]
        .to_vec()
        .iter()
        .map(|ty| zero_value(ty, cx.arena, span, cx.state))
        .collect();
    return_results.push(cx.arena.push(ExprKind::Ident(err_name), span));

    out.push(Stmt::If {
        cond,
        then_block: vec![Stmt::Return {
            results: return_results,
            span,
        }],
        else_block: None,
        span,
    });

    Ok(cx.arena.push(ExprKind::Ident(tmp_name), span))
}
