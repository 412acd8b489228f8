//! Type inference service (spec §4.4): wraps an optional host type checker,
//! degrading to a structural guess or `Unknown` rather than failing.
//! Modeled on the teacher's `ori_types::infer::InferEngine`, with
//! unification and error accumulation removed — the core only needs enough
//! type information to name monomorphized types and fill in lambda
//! parameter types (spec §1 Non-goals).

mod host;
mod infer;

pub use host::{Func, HostTypeChecker, Object};
pub use infer::TypeInferenceService;
