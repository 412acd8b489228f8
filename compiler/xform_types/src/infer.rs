//! Type inference service (spec §4.4): a thin wrapper over an optional host
//! type checker that never fails — every query degrades to a nullable or
//! structural-guess fallback. Modeled on the teacher's `InferEngine`, minus
//! unification and error accumulation (spec §1 Non-goals: no full static
//! type checker).

use xform_ir::{BasicKind, ExprArena, ExprId, ExprKind, Interner, Name, Type};

use crate::host::{Func, HostTypeChecker, Object};

pub struct TypeInferenceService<'a> {
    checker: Option<&'a dyn HostTypeChecker>,
}

impl<'a> TypeInferenceService<'a> {
    #[must_use]
    pub fn new(checker: Option<&'a dyn HostTypeChecker>) -> Self {
        TypeInferenceService { checker }
    }

    #[must_use]
    pub fn without_host() -> Self {
        TypeInferenceService { checker: None }
    }

    /// `type_of` (spec §4.4): resolves via the host type checker when
    /// present; `Unknown` otherwise — never fails.
    #[must_use]
    pub fn type_of(&self, arena: &ExprArena, expr: ExprId) -> Type {
        self.checker
            .and_then(|c| c.type_of(arena, expr))
            .unwrap_or(Type::Unknown)
    }

    #[must_use]
    pub fn object_of(&self, name: Name) -> Option<Object> {
        self.checker.and_then(|c| c.object_of(name))
    }

    /// `lookup_method`: automatic dereference of pointer receivers before
    /// consulting the host checker.
    #[must_use]
    pub fn lookup_method(&self, ty: &Type, name: Name) -> Option<Func> {
        let checker = self.checker?;
        let receiver = match ty {
            Type::Pointer(inner) => inner.as_ref(),
            other => other,
        };
        checker.lookup_method(receiver, name)
    }

    /// Structural fallback (spec §4.4 `InferType`) used when no type
    /// checker is wired, or it had nothing to say.
    #[must_use]
    pub fn infer_structural(arena: &ExprArena, expr: ExprId) -> Type {
        match arena.kind(expr) {
            ExprKind::IntLit(_) => Type::Basic(BasicKind::Int),
            ExprKind::FloatLit(_) => Type::Basic(BasicKind::Float),
            ExprKind::StringLit(_) => Type::Basic(BasicKind::String),
            ExprKind::CharLit(_) => Type::Basic(BasicKind::Rune),
            ExprKind::Ident(name) => Type::Named(*name),
            ExprKind::CompositeLit { ty: Some(ty), .. } => ty.clone(),
            _ => Type::Unknown,
        }
    }

    /// The full resolution order a consumer should use: host type checker
    /// first, structural guess second, `Unknown` last.
    #[must_use]
    pub fn infer(&self, arena: &ExprArena, expr: ExprId) -> Type {
        let ty = self.type_of(arena, expr);
        if !ty.is_unknown() {
            return ty;
        }
        Self::infer_structural(arena, expr)
    }

    /// `type_to_name` (spec §4.4): stringify a type for use in a generated
    /// identifier (spec §4.7 rendering rules).
    #[must_use]
    pub fn type_to_name(ty: &Type, interner: &Interner) -> String {
        match ty {
            Type::Basic(b) => b.canonical_name().to_string(),
            Type::Named(name) => interner.resolve(*name).to_string(),
            Type::Qualified { unit, name } => {
                format!("{}.{}", interner.resolve(*unit), interner.resolve(*name))
            }
            Type::Pointer(inner) => format!("*{}", Self::type_to_name(inner, interner)),
            Type::Function { .. } => "func".to_string(),
            Type::Struct(_) => "struct".to_string(),
            Type::Unknown => "unknown".to_string(),
        }
    }
}
