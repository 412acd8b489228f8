//! Ori IR - Re-exports from `ori_ir`
//!
//! This module re-exports all types from the `ori_ir` crate.
//! The `ori_ir` crate is the single source of truth for IR types.

// Re-export everything from ori_ir
pub use ori_ir::*;
