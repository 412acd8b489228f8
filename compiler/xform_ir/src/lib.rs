//! Extended AST, spans, and file-unit data model for the transformation
//! core. Parsing into this representation, and printing out of it, are both
//! external collaborators (spec §6) — this crate only defines the shapes
//! they hand off across.

pub mod ast;
pub mod fileset;
pub mod name;
pub mod span;
pub mod ty;
pub mod unit;

pub use ast::{
    AssignOp, BinaryOp, Block, ConstDecl, ConstExpr, ConstSpec, Decl, EnumDecl, ErrorPropStyle,
    ExprArena, ExprId, ExprKind, ExprNode, FieldInit, FuncDecl, LambdaStyle, Param, Stmt,
    StructFieldDecl, TypeDecl, UnaryOp, VariantDecl, VariantKind,
};
pub use fileset::FileSet;
pub use name::{Interner, Name};
pub use span::Span;
pub use ty::{BasicKind, StructField, Type};
pub use unit::{FileUnit, ImportSet};
