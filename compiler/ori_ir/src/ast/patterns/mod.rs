//! Pattern Types
//!
//! Binding patterns (for let expressions) and match patterns (for match expressions).

mod binding;
mod exp;
mod seq;

pub use binding::{BindingPattern, MatchArm, MatchPattern};
pub use exp::{FunctionExp, FunctionExpKind, NamedExpr};
pub use seq::{CheckExpr, FunctionSeq, SeqBinding};
