//! The host type checker as an external collaborator (spec §6). A driver
//! implements this trait over its own type-checking results; the core never
//! performs type checking itself (spec §1 Non-goals).

use xform_ir::{ExprArena, ExprId, Name, Type};

/// A resolved binding for an identifier — enough for lambda parameter
/// inference to read off a callee's declared type.
#[derive(Clone, Debug)]
pub struct Object {
    pub name: Name,
    pub ty: Type,
}

/// A function signature, used both for free-function calls and for method
/// lookups on named/pointer-to-named receiver types.
#[derive(Clone, Debug)]
pub struct Func {
    pub params: Vec<Type>,
    pub results: Vec<Type>,
}

/// Wraps whatever type-checking the host compiler already did. Every method
/// may return "don't know" rather than fail — the service built on top of
/// this degrades gracefully (spec §4.4 failure mode).
pub trait HostTypeChecker {
    fn type_of(&self, arena: &ExprArena, expr: ExprId) -> Option<Type>;
    fn object_of(&self, name: Name) -> Option<Object>;
    fn lookup_method(&self, ty: &Type, name: Name) -> Option<Func>;
}
