//! `Option<T>` monomorphization (spec §4.8): turns `Some(v)` constructor
//! calls into tagged-record literals, emitting the record/tag/constant/
//! method declarations for each distinct `T` exactly once per unit.

use xform_diagnostic::{Diagnostic, DiagnosticKind};
use xform_ir::{
    BasicKind, BinaryOp, ConstDecl, ConstExpr, ConstSpec, Decl, ExprArena, ExprId, ExprKind,
    FieldInit, FuncDecl, Interner, Name, Param, Span, Stmt, StructField, Type, TypeDecl, UnaryOp,
};
use xform_types::TypeInferenceService;

use crate::context::{PluginContext, UnitState};
use crate::plugin::{NodeVariant, Outcome, Plugin};

pub struct OptionMonoPlugin;

impl Plugin for OptionMonoPlugin {
    fn name(&self) -> &'static str {
        "option-monomorphization"
    }

    fn interests(&self) -> &'static [NodeVariant] {
        &[NodeVariant::Call]
    }

    fn transform(
        &self,
        id: ExprId,
        unit: &mut xform_ir::FileUnit,
        ctx: &PluginContext<'_>,
        state: &mut UnitState,
    ) -> Result<Outcome, Diagnostic> {
        if !ctx.config.option_type_enabled {
            return Ok(Outcome::Unchanged);
        }

        let (func, args, span) = match unit.exprs.kind(id) {
            ExprKind::Call { func, args } => (*func, args.clone(), unit.exprs.span(id)),
            _ => return Ok(Outcome::Unchanged),
        };
        let is_some_ctor = matches!(
            unit.exprs.kind(func),
            ExprKind::Ident(name) if state.interner.resolve(*name) == "Some"
        );
        if !is_some_ctor {
            return Ok(Outcome::Unchanged);
        }

        if args.len() != 1 {
            state.diagnostics.push(
                Diagnostic::warning(
                    DiagnosticKind::ArgumentArity,
                    format!("Some expects exactly one argument, found {}", args.len()),
                )
                .at(span),
            );
            return Ok(Outcome::Unchanged);
        }
        let value = args[0];

        let mut ty = ctx.types.infer(&unit.exprs, value);
        if ty.is_unknown() {
            state.diagnostics.warn_once(
                DiagnosticKind::TypeInferenceUnavailable,
                "could not infer the type of a Some(...) argument; monomorphizing as placeholder \"T\"",
            );
            ty = Type::Named(state.interner.intern("T"));
        }

        let type_name = TypeInferenceService::type_to_name(&ty, state.interner);
        let option_name = format!("Option_{}", sanitize(&type_name));

        if state.mono_cache.claim(&option_name) {
            tracing::debug!(option = %option_name, "emitting Option monomorphization");
            let decls =
                build_declarations(&option_name, &ty, state.interner, &mut unit.exprs, span);
            unit.splice_front(decls);
        }

        let option_ty_name = state.interner.intern(&option_name);
        let tag_const = state.interner.intern(&format!("{option_name}Tag_Some"));
        let tag_field = state.interner.intern("tag");
        let payload_field = state.interner.intern("some_0");

        let arena = &mut unit.exprs;
        let tag_value = arena.push(ExprKind::Ident(tag_const), span);
        let payload = arena.push(
            ExprKind::Unary {
                op: UnaryOp::AddrOf,
                expr: value,
            },
            span,
        );
        arena.replace(
            id,
            ExprKind::CompositeLit {
                ty: Some(Type::Named(option_ty_name)),
                fields: vec![
                    FieldInit {
                        name: Some(tag_field),
                        value: tag_value,
                    },
                    FieldInit {
                        name: Some(payload_field),
                        value: payload,
                    },
                ],
            },
        );
        Ok(Outcome::Replaced(id))
    }
}

/// `. [ ] ( ) ,` and space become `_`; `*` becomes `ptr_` (spec §4.8).
fn sanitize(name: &str) -> String {
    let mut out = String::new();
    for c in name.chars() {
        match c {
            '.' | '[' | ']' | '(' | ')' | ',' | ' ' => out.push('_'),
            '*' => out.push_str("ptr_"),
            other => out.push(other),
        }
    }
    out
}

fn build_declarations(
    option_name: &str,
    ty: &Type,
    interner: &mut Interner,
    arena: &mut ExprArena,
    span: Span,
) -> Vec<Decl> {
    let tag_type_name = interner.intern(&format!("{option_name}Tag"));
    let tag_some = interner.intern(&format!("{option_name}Tag_Some"));
    let tag_none = interner.intern(&format!("{option_name}Tag_None"));
    let option_type_name = interner.intern(option_name);
    let tag_field = interner.intern("tag");
    let payload_field = interner.intern("some_0");

    let tag_decl = Decl::Type(TypeDecl {
        name: tag_type_name,
        underlying: Type::Basic(BasicKind::Byte),
        span,
    });

    let const_decl = Decl::Const(ConstDecl {
        specs: vec![
            ConstSpec {
                name: tag_some,
                ty: Some(Type::Named(tag_type_name)),
                value: ConstExpr::Iota,
            },
            ConstSpec {
                name: tag_none,
                ty: None,
                value: ConstExpr::Iota,
            },
        ],
        span,
    });

    let record_decl = Decl::Type(TypeDecl {
        name: option_type_name,
        underlying: Type::Struct(vec![
            StructField {
                name: tag_field,
                ty: Type::Named(tag_type_name),
            },
            StructField {
                name: payload_field,
                ty: Type::pointer_to(ty.clone()),
            },
        ]),
        span,
    });

    let methods = build_methods(
        option_type_name,
        tag_field,
        payload_field,
        tag_some,
        tag_none,
        ty,
        interner,
        arena,
        span,
    );

    let mut decls = vec![tag_decl, const_decl, record_decl];
    decls.extend(methods);
    decls
}

#[allow(clippy::too_many_arguments)]
fn build_methods(
    option_type_name: Name,
    tag_field: Name,
    payload_field: Name,
    tag_some: Name,
    tag_none: Name,
    ty: &Type,
    interner: &mut Interner,
    arena: &mut ExprArena,
    span: Span,
) -> Vec<Decl> {
    let recv_name = interner.intern("o");
    let recv_ty = Type::pointer_to(Type::Named(option_type_name));
    let is_some_name = interner.intern("IsSome");
    let is_none_name = interner.intern("IsNone");
    let unwrap_name = interner.intern("Unwrap");
    let unwrap_or_name = interner.intern("UnwrapOr");
    let default_name = interner.intern("default");

    let is_some = FuncDecl {
        name: is_some_name,
        recv: Some((recv_name, recv_ty.clone())),
        params: Vec::new(),
        results: vec![Type::Basic(BasicKind::Bool)],
        body: vec![tag_compare_return(arena, recv_name, tag_field, tag_some, span)],
        span,
    };

    let is_none = FuncDecl {
        name: is_none_name,
        recv: Some((recv_name, recv_ty.clone())),
        params: Vec::new(),
        results: vec![Type::Basic(BasicKind::Bool)],
        body: vec![tag_compare_return(arena, recv_name, tag_field, tag_none, span)],
        span,
    };

    // Unwrap() T { if o.IsNone() { panic("called Unwrap on None") }; return *o.some_0 }
    let recv_ident = arena.push(ExprKind::Ident(recv_name), span);
    let is_none_selector = selector(arena, recv_ident, is_none_name, span);
    let is_none_call = arena.push(
        ExprKind::Call {
            func: is_none_selector,
            args: Vec::new(),
        },
        span,
    );
    let panic_msg = arena.push(
        ExprKind::StringLit("called Unwrap on None".to_string()),
        span,
    );
    let panic_ident = arena.push(ExprKind::Ident(interner.intern("panic")), span);
    let panic_call = arena.push(
        ExprKind::Call {
            func: panic_ident,
            args: vec![panic_msg],
        },
        span,
    );
    let recv_ident2 = arena.push(ExprKind::Ident(recv_name), span);
    let payload_selector = selector(arena, recv_ident2, payload_field, span);
    let deref = arena.push(
        ExprKind::Unary {
            op: UnaryOp::Deref,
            expr: payload_selector,
        },
        span,
    );
    let unwrap = FuncDecl {
        name: unwrap_name,
        recv: Some((recv_name, recv_ty.clone())),
        params: Vec::new(),
        results: vec![ty.clone()],
        body: vec![
            Stmt::If {
                cond: is_none_call,
                then_block: vec![Stmt::Expr(panic_call)],
                else_block: None,
                span,
            },
            Stmt::Return {
                results: vec![deref],
                span,
            },
        ],
        span,
    };

    // UnwrapOr(default T) T { if o.IsSome() { return *o.some_0 }; return default }
    let recv_ident3 = arena.push(ExprKind::Ident(recv_name), span);
    let is_some_selector = selector(arena, recv_ident3, is_some_name, span);
    let is_some_call = arena.push(
        ExprKind::Call {
            func: is_some_selector,
            args: Vec::new(),
        },
        span,
    );
    let recv_ident4 = arena.push(ExprKind::Ident(recv_name), span);
    let payload_selector2 = selector(arena, recv_ident4, payload_field, span);
    let deref2 = arena.push(
        ExprKind::Unary {
            op: UnaryOp::Deref,
            expr: payload_selector2,
        },
        span,
    );
    let default_ident = arena.push(ExprKind::Ident(default_name), span);
    let unwrap_or = FuncDecl {
        name: unwrap_or_name,
        recv: Some((recv_name, recv_ty)),
        params: vec![Param {
            name: default_name,
            ty: Some(ty.clone()),
        }],
        results: vec![ty.clone()],
        body: vec![
            Stmt::If {
                cond: is_some_call,
                then_block: vec![Stmt::Return {
                    results: vec![deref2],
                    span,
                }],
                else_block: None,
                span,
            },
            Stmt::Return {
                results: vec![default_ident],
                span,
            },
        ],
        span,
    };

    vec![
        Decl::Func(is_some),
        Decl::Func(is_none),
        Decl::Func(unwrap),
        Decl::Func(unwrap_or),
    ]
}

fn selector(arena: &mut ExprArena, expr: ExprId, field: Name, span: Span) -> ExprId {
    arena.push(ExprKind::Selector { expr, field }, span)
}

fn tag_compare_return(
    arena: &mut ExprArena,
    recv: Name,
    tag_field: Name,
    tag_const: Name,
    span: Span,
) -> Stmt {
    let recv_ident = arena.push(ExprKind::Ident(recv), span);
    let field_selector = selector(arena, recv_ident, tag_field, span);
    let constant = arena.push(ExprKind::Ident(tag_const), span);
    let cmp = arena.push(
        ExprKind::Binary {
            op: BinaryOp::Eq,
            lhs: field_selector,
            rhs: constant,
        },
        span,
    );
    Stmt::Return {
        results: vec![cmp],
        span,
    }
}
