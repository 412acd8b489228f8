//! Type system for Ori.
//!
//! Re-exports from `ori_types` crate to maintain DRY principles.
//! All type system functionality is defined in `ori_types`.

pub use ori_types::*;
