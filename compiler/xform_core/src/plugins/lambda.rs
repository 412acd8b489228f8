//! Lambda lowering and parameter-type inference (spec §4.7): two plugins,
//! inference registered as a dependency of lowering so it always runs
//! first on a unit.

use xform_diagnostic::{Diagnostic, DiagnosticKind};
use xform_ir::{ExprArena, ExprId, ExprKind, FileUnit, Stmt};
use xform_types::Func;

use crate::context::{PluginContext, UnitState};
use crate::plugin::{NodeVariant, Outcome, Plugin};

/// Walks every call site looking for lambda arguments with untyped
/// parameters and fills them in from the callee's declared signature.
pub struct LambdaInferencePlugin;

impl Plugin for LambdaInferencePlugin {
    fn name(&self) -> &'static str {
        "lambda-inference"
    }

    fn process_unit(
        &self,
        unit: &mut FileUnit,
        ctx: &PluginContext<'_>,
        state: &mut UnitState,
    ) -> Result<(), Diagnostic> {
        let mut i: u32 = 0;
        while (i as usize) < unit.exprs.len() {
            let id = ExprId(i);
            if let ExprKind::Call { func, args } = unit.exprs.kind(id).clone() {
                for (index, arg) in args.iter().enumerate() {
                    infer_lambda_arg(*arg, func, index, args.len(), &mut unit.exprs, ctx, state);
                }
            }
            i += 1;
        }
        Ok(())
    }
}

fn infer_lambda_arg(
    arg: ExprId,
    func: ExprId,
    index: usize,
    arity: usize,
    arena: &mut ExprArena,
    ctx: &PluginContext<'_>,
    state: &mut UnitState,
) {
    let lambda_param_count = match arena.kind(arg) {
        ExprKind::Lambda { params, .. } if params.iter().any(|p| p.ty.is_none()) => params.len(),
        _ => return,
    };
    let span = arena.span(arg);

    let callee = resolve_callee(func, arena, ctx);
    let matched = callee.filter(|f| f.params.len() == arity).and_then(|f| {
        f.params.get(index).and_then(|p| match p {
            xform_ir::Type::Function { params, .. } if params.len() == lambda_param_count => {
                Some(params.clone())
            }
            _ => None,
        })
    });

    match matched {
        Some(param_types) => {
            if let ExprKind::Lambda { params, .. } = &mut arena.get_mut(arg).kind {
                for (param, ty) in params.iter_mut().zip(param_types) {
                    if param.ty.is_none() {
                        param.ty = Some(ty);
                    }
                }
            }
        }
        None => {
            state.diagnostics.push(
                Diagnostic::warning(
                    DiagnosticKind::LambdaExplicitTypeRequired,
                    "could not resolve the callee signature to infer this lambda's parameter types; \
                     write them explicitly",
                )
                .at(span),
            );
        }
    }
}

fn resolve_callee(func: ExprId, arena: &ExprArena, ctx: &PluginContext<'_>) -> Option<Func> {
    match arena.kind(func) {
        ExprKind::Selector { expr, field } => {
            let recv_ty = ctx.types.infer(arena, *expr);
            ctx.types.lookup_method(&recv_ty, *field)
        }
        ExprKind::Ident(name) => {
            let object = ctx.types.object_of(*name)?;
            match object.ty {
                xform_ir::Type::Function { params, results } => Some(Func { params, results }),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Rewrites `Lambda` nodes into host `FuncLit`s. The body is always a
/// single expression wrapped in a `return` — block-bodied lambdas are an
/// explicit open question (spec §9) this core does not implement, since the
/// AST's `Lambda` variant itself only carries an expression body.
pub struct LambdaLoweringPlugin;

impl Plugin for LambdaLoweringPlugin {
    fn name(&self) -> &'static str {
        "lambda-lowering"
    }

    fn dependencies(&self) -> &'static [&'static str] {
        &["lambda-inference"]
    }

    fn interests(&self) -> &'static [NodeVariant] {
        &[NodeVariant::LambdaExpr]
    }

    fn transform(
        &self,
        id: ExprId,
        unit: &mut FileUnit,
        ctx: &PluginContext<'_>,
        _state: &mut UnitState,
    ) -> Result<Outcome, Diagnostic> {
        let (params, body, span) = match unit.exprs.kind(id) {
            ExprKind::Lambda { params, body, .. } => {
                (params.clone(), *body, unit.exprs.span(id))
            }
            _ => return Ok(Outcome::Unchanged),
        };
        let result_ty = ctx.types.infer(&unit.exprs, body);
        unit.exprs.replace(
            id,
            ExprKind::FuncLit {
                params,
                results: vec![result_ty],
                body: vec![Stmt::Return {
                    results: vec![body],
                    span,
                }],
            },
        );
        Ok(Outcome::Replaced(id))
    }
}
