//! Type representation.
//!
//! Deliberately shallow — the core has no static type checker (spec §1
//! Non-goals). Types exist only so monomorphization can name generated
//! declarations and lambda inference can copy parameter types.

use crate::name::Name;

/// A basic (built-in) scalar type.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BasicKind {
    Int,
    Float,
    String,
    Rune,
    Byte,
    Bool,
}

impl BasicKind {
    #[must_use]
    pub fn canonical_name(self) -> &'static str {
        match self {
            BasicKind::Int => "int",
            BasicKind::Float => "float",
            BasicKind::String => "string",
            BasicKind::Rune => "rune",
            BasicKind::Byte => "byte",
            BasicKind::Bool => "bool",
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct StructField {
    pub name: Name,
    pub ty: Type,
}

/// A type as it appears in generated or source-adjacent code.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Type {
    Basic(BasicKind),
    /// Named type declared in the unit being transformed.
    Named(Name),
    /// Named type declared in another unit, qualified by that unit's name.
    Qualified { unit: Name, name: Name },
    Pointer(Box<Type>),
    Function {
        params: Vec<Type>,
        results: Vec<Type>,
    },
    Struct(Vec<StructField>),
    /// No type information available; consumers must degrade gracefully.
    Unknown,
}

impl Type {
    #[must_use]
    pub fn pointer_to(ty: Type) -> Type {
        Type::Pointer(Box::new(ty))
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Type::Unknown)
    }
}
