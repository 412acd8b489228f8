//! RC insertion pass for ARC IR (Section 07.2).
//!
//! Places `RcInc` and `RcDec` instructions precisely using liveness analysis
//! results. This is the Perceus algorithm: every heap-allocated value is freed
//! exactly once at its last use, and additional uses get `RcInc`.
//!
//! # Algorithm
//!
//! For each block, walk instructions **backward** with a running `live` set
//! initialized from `live_out`:
//!
//! 1. **Terminator uses**: Variables used in the terminator that are already
//!    live get `RcInc` (they survive past the terminator). New uses join `live`.
//!
//! 2. **Instruction backward pass**: For each instruction in reverse:
//!    - **Definitions**: If the defined variable is not in `live`, it's dead
//!      immediately — emit `RcDec`. Otherwise remove from `live`.
//!    - **Uses**: If a used variable is already in `live`, emit `RcInc`
//!      (multi-use). Add to `live`.
//!
//! 3. **Block/function parameters**: Any block param (or entry-block function
//!    param) not in `live` after processing the body gets `RcDec` (unused param).
//!
//! # Borrowed Parameters
//!
//! Borrowed params (from borrow inference §06.2) and variables derived from
//! them skip all RC tracking — no Inc, no Dec. When a borrowed-derived
//! variable flows into an *owned position* (stored in `Construct`, captured
//! in `PartialApply`, etc.), it gets a single `RcInc` to transfer ownership.
//!
//! # References
//!
//! - Lean 4: `src/Lean/Compiler/IR/RC.lean`
//! - Koka: Perceus paper §3.2
//! - Swift: `lib/SILOptimizer/ARC/`

use rustc_hash::FxHashSet;

use crate::ir::{ArcBlock, ArcBlockId, ArcFunction, ArcInstr, ArcTerminator, ArcValue, ArcVarId};
use crate::liveness::BlockLiveness;
use crate::ownership::Ownership;
use crate::ArcClassification;

/// Shared context for RC insertion within a single block.
///
/// Groups the parameters that would otherwise be threaded through every
/// helper function, keeping function signatures manageable.
struct RcContext<'a> {
    func: &'a ArcFunction,
    classifier: &'a dyn ArcClassification,
    /// Function parameters annotated as `Borrowed` — completely skip RC.
    borrowed_params: &'a FxHashSet<ArcVarId>,
    /// Variables derived from borrowed params — skip RC except at owned positions.
    borrows: &'a FxHashSet<ArcVarId>,
}

/// Insert `RcInc`/`RcDec` operations into an ARC IR function.
///
/// Modifies `func.blocks` in-place, inserting RC operations based on
/// liveness analysis. Borrowed parameters (from §06.2) and variables
/// derived from them skip RC tracking entirely.
///
/// # Arguments
///
/// * `func` — the ARC IR function to transform (mutated in place).
/// * `classifier` — type classifier for `needs_rc()` checks.
/// * `liveness` — precomputed liveness (from [`compute_liveness`](crate::compute_liveness)).
pub fn insert_rc_ops(
    func: &mut ArcFunction,
    classifier: &dyn ArcClassification,
    liveness: &BlockLiveness,
) {
    tracing::debug!(function = func.name.raw(), "inserting RC operations");

    // Collect borrowed function parameters.
    let borrowed_params: FxHashSet<ArcVarId> = func
        .params
        .iter()
        .filter(|p| p.ownership == Ownership::Borrowed)
        .map(|p| p.var)
        .collect();

    let entry_idx = func.entry.index();
    let num_blocks = func.blocks.len();

    // Precompute Invoke dst definitions for each normal successor.
    // See liveness.rs `collect_invoke_defs` — same concept: an Invoke's
    // dst is defined at the normal successor's entry, like a block param.
    let invoke_defs = crate::liveness::collect_invoke_defs(func);

    for block_idx in 0..num_blocks {
        // Compute the borrows set: variables *derived from* borrowed params
        // (e.g., via Project or Let alias). Does NOT include the borrowed
        // params themselves — those are handled separately with a complete
        // skip of all RC tracking.
        let borrows = compute_borrows(&func.blocks[block_idx], &borrowed_params);

        let ctx = RcContext {
            func,
            classifier,
            borrowed_params: &borrowed_params,
            borrows: &borrows,
        };

        let live_out = &liveness.live_out[block_idx];
        let mut live = live_out.clone();

        // We build new_body in reverse order and flip at the end.
        let mut new_body: Vec<ArcInstr> = Vec::new();
        // Track spans: None for inserted RC ops, original span for original instrs.
        let mut new_spans: Vec<Option<ori_ir::Span>> = Vec::new();

        let block = &func.blocks[block_idx];
        let old_spans = &func.spans[block_idx];

        // ── Step 1: Process terminator uses ──────────────────────
        //
        // The terminator's used_vars are "live at exit" of the instruction
        // stream. If a terminator var is already live (used later in a
        // successor), it needs an Inc. Otherwise it joins the live set.
        process_terminator_uses(
            &block.terminator,
            &mut live,
            &mut new_body,
            &mut new_spans,
            &ctx,
        );

        // ── Step 2: Backward body pass ───────────────────────────
        for (instr_idx, instr) in block.body.iter().enumerate().rev() {
            let span = if instr_idx < old_spans.len() {
                old_spans[instr_idx]
            } else {
                None
            };

            // Definition: if dst is RC'd, non-borrowed, and not live → dead def, emit Dec.
            if let Some(dst) = instr.defined_var() {
                if needs_rc_trackable(dst, &ctx) && !live.remove(&dst) {
                    // Dead definition — value is created but never used.
                    new_body.push(ArcInstr::RcDec { var: dst });
                    new_spans.push(None);
                }
            }

            // Push the instruction itself.
            new_body.push(instr.clone());
            new_spans.push(span);

            // Uses: for each used var, if it's already live → multi-use, emit Inc.
            // Use the owned-position-aware logic for borrowed-derived vars.
            process_instruction_uses(instr, &mut live, &mut new_body, &mut new_spans, &ctx);
        }

        // ── Step 3: Block parameters ─────────────────────────────
        //
        // Any block param that is RC'd, not borrowed, and not in the live
        // set at this point was never used in the block body → Dec it.
        for &(param_var, _ty) in block.params.iter().rev() {
            if needs_rc_trackable(param_var, &ctx) && !live.remove(&param_var) {
                new_body.push(ArcInstr::RcDec { var: param_var });
                new_spans.push(None);
            }
        }

        // ── Step 3.5: Invoke dst definitions ─────────────────────
        //
        // An Invoke's `dst` is defined at the normal successor's entry,
        // acting like a block parameter. If the dst is RC'd and not in
        // the live set, it was never used → Dec it.
        let block_id = func.blocks[block_idx].id;
        if let Some(dsts) = invoke_defs.get(&block_id) {
            for &dst in dsts.iter().rev() {
                if needs_rc_trackable(dst, &ctx) && !live.remove(&dst) {
                    new_body.push(ArcInstr::RcDec { var: dst });
                    new_spans.push(None);
                }
            }
        }

        // ── Step 4: Entry block function params ──────────────────
        //
        // Owned function params that are not in `live` after processing
        // the entry block body need a Dec (unused param).
        if block_idx == entry_idx {
            for param in func.params.iter().rev() {
                if param.ownership == Ownership::Owned
                    && classifier.needs_rc(param.ty)
                    && !live.remove(&param.var)
                {
                    new_body.push(ArcInstr::RcDec { var: param.var });
                    new_spans.push(None);
                }
            }
        }

        // ── Reverse to get correct order ─────────────────────────
        new_body.reverse();
        new_spans.reverse();

        func.blocks[block_idx].body = new_body;
        func.spans[block_idx] = new_spans;
    }

    // ── Step 5: Edge cleanup ────────────────────────────────────
    //
    // After per-block RC insertion, handle "stranded" variables that are
    // live at a predecessor's exit but not needed by a successor.
    // See `insert_edge_cleanup` for details.
    insert_edge_cleanup(func, classifier, liveness, &borrowed_params);
}

/// Process terminator uses for RC insertion.
///
/// Each variable used in the terminator: if it needs RC, is not borrowed,
/// and is already in the live set → emit `RcInc`. Add to live set.
///
/// For `Return`, the returned variable is treated as an owned position
/// for borrowed-derived vars (transfer to caller requires Inc).
fn process_terminator_uses(
    terminator: &ArcTerminator,
    live: &mut FxHashSet<ArcVarId>,
    new_body: &mut Vec<ArcInstr>,
    new_spans: &mut Vec<Option<ori_ir::Span>>,
    ctx: &RcContext<'_>,
) {
    // Determine which terminator positions are "owned" for borrowed-derived vars.
    let is_return = matches!(terminator, ArcTerminator::Return { .. });

    for var in terminator.used_vars() {
        if !ctx.classifier.needs_rc(ctx.func.var_type(var)) {
            continue;
        }

        // Borrowed params: completely skip all RC tracking.
        if ctx.borrowed_params.contains(&var) {
            if is_return {
                // Returning a borrowed param transfers ownership to caller.
                // Must Inc even for a borrowed param.
                new_body.push(ArcInstr::RcInc { var, count: 1 });
                new_spans.push(None);
            }
            continue;
        }

        // Borrowed-derived vars: Inc only in owned positions.
        if ctx.borrows.contains(&var) {
            if is_return {
                new_body.push(ArcInstr::RcInc { var, count: 1 });
                new_spans.push(None);
            }
            continue;
        }

        // Normal (non-borrowed) var.
        if live.contains(&var) {
            new_body.push(ArcInstr::RcInc { var, count: 1 });
            new_spans.push(None);
        }
        live.insert(var);
    }
}

/// Process uses of a single instruction for RC insertion.
///
/// For each used variable:
/// - If it's a borrowed param → skip entirely.
/// - If it's a borrowed-derived var in a non-owned position → skip.
/// - If it's a borrowed-derived var in an owned position → emit `RcInc`.
/// - If it's a normal var already in `live` → emit `RcInc` (multi-use).
/// - Add to `live` (unless borrowed).
///
/// "Owned positions" are instruction slots where the value will be stored
/// on the heap: `Construct` args, `PartialApply` args, `Apply`/`ApplyIndirect`
/// args (conservative for unknown callees).
fn process_instruction_uses(
    instr: &ArcInstr,
    live: &mut FxHashSet<ArcVarId>,
    new_body: &mut Vec<ArcInstr>,
    new_spans: &mut Vec<Option<ori_ir::Span>>,
    ctx: &RcContext<'_>,
) {
    // Collect unique vars and count occurrences to handle duplicate args.
    // For example, `Apply { args: [x, x] }` should emit exactly 1 Inc
    // (x appears twice, but one use is "free" and the second is Inc).
    let used = instr.used_vars();
    let mut seen = FxHashSet::default();

    // Determine which positions are "owned" for borrowed-derived vars.
    let owned_positions = compute_owned_positions(instr);

    for (pos, &var) in used.iter().enumerate() {
        if !ctx.classifier.needs_rc(ctx.func.var_type(var)) {
            continue;
        }

        // Borrowed params: completely skip all RC tracking.
        // No Inc, no Dec, not added to live set.
        if ctx.borrowed_params.contains(&var) {
            continue;
        }

        // Borrowed-derived vars: only emit Inc if in an owned position.
        if ctx.borrows.contains(&var) {
            if owned_positions.contains(&pos) {
                new_body.push(ArcInstr::RcInc { var, count: 1 });
                new_spans.push(None);
            }
            continue;
        }

        // Normal (non-borrowed) var.
        if !seen.insert(var) {
            // Duplicate arg in the same instruction — already handled below.
            // The first occurrence either adds to live or emits Inc.
            // The second occurrence always needs Inc.
            new_body.push(ArcInstr::RcInc { var, count: 1 });
            new_spans.push(None);
            continue;
        }

        if live.contains(&var) {
            // Already live → multi-use, emit Inc.
            new_body.push(ArcInstr::RcInc { var, count: 1 });
            new_spans.push(None);
        }
        live.insert(var);
    }
}

/// Compute which argument positions in an instruction are "owned" —
/// where a borrowed-derived variable would need an `RcInc` to transfer
/// ownership to the heap.
///
/// Returns a set of indices into `instr.used_vars()`.
fn compute_owned_positions(instr: &ArcInstr) -> FxHashSet<usize> {
    let mut owned = FxHashSet::default();
    match instr {
        // Construct, PartialApply, Apply: all args stored or consumed.
        ArcInstr::Construct { args, .. }
        | ArcInstr::PartialApply { args, .. }
        | ArcInstr::Apply { args, .. } => {
            for i in 0..args.len() {
                owned.insert(i);
            }
        }
        // ApplyIndirect: closure + all args are owned (unknown callee).
        ArcInstr::ApplyIndirect { args, .. } => {
            // Position 0 is the closure, positions 1..=args.len() are args.
            for i in 0..=args.len() {
                owned.insert(i);
            }
        }
        // Project, Let(Var), Let(Literal), Let(PrimOp), etc. — read-only.
        _ => {}
    }
    owned
}

/// Compute the "borrows" set for a block — variables *derived from*
/// borrowed parameters via projections or aliasing.
///
/// This set does NOT include the borrowed params themselves (those are
/// handled separately with a complete skip of all RC tracking). It only
/// contains vars that inherit borrowed status through `Project` or
/// `Let { value: Var(_) }`.
///
/// Follows Lean 4's `LiveVars.borrows` pattern.
fn compute_borrows(block: &ArcBlock, borrowed_params: &FxHashSet<ArcVarId>) -> FxHashSet<ArcVarId> {
    // Start with an empty set — borrowed params are NOT included.
    // We track a "source is borrowed" set that includes both borrowed params
    // and derived vars, but only derived vars go into the output.
    let mut all_borrowed = borrowed_params.clone();
    let mut derived = FxHashSet::default();

    for instr in &block.body {
        match instr {
            ArcInstr::Project { dst, value, .. } if all_borrowed.contains(value) => {
                all_borrowed.insert(*dst);
                derived.insert(*dst);
            }
            ArcInstr::Let {
                dst,
                value: ArcValue::Var(v),
                ..
            } if all_borrowed.contains(v) => {
                all_borrowed.insert(*dst);
                derived.insert(*dst);
            }
            _ => {}
        }
    }

    derived
}

/// Check if a variable needs standard RC tracking (not borrowed, needs RC).
///
/// Returns `false` for borrowed params, borrowed-derived vars, and scalars.
/// These vars are either completely skipped (borrowed params) or handled
/// with the owned-position logic (derived vars).
#[inline]
fn needs_rc_trackable(var: ArcVarId, ctx: &RcContext<'_>) -> bool {
    !ctx.borrowed_params.contains(&var)
        && !ctx.borrows.contains(&var)
        && ctx.classifier.needs_rc(ctx.func.var_type(var))
}

// ── Edge cleanup ──────────────────────────────────────────────────────
//
// After per-block RC insertion, variables that are live at a
// predecessor's exit but not live at a successor's entry need `RcDec`
// at the successor. This happens when a branch splits control flow and
// each path needs a different subset of the live variables.
//
// For example:
//   block_0: construct v0(str), v1(str); branch → b1, b2
//   block_1: return v0      ← v1 is live_out[b0] but not live_in[b1]
//   block_2: apply f(v0, v1)
//
// The gap `live_out[pred] - live_in[succ]` must be Dec'd.
//
// References:
//   - Lean 4: `addDecForDeadParams` in `src/Lean/Compiler/IR/RC.lean`
//   - Appel: "Modern Compiler Implementation" §10.2

/// Insert `RcDec` at block boundaries for variables that are live at a
/// predecessor's exit but not needed by a successor ("edge gap").
///
/// For single-predecessor blocks: inserts Decs at the block's start.
/// For multi-predecessor blocks with identical gaps: inserts at block start.
/// For multi-predecessor blocks with differing gaps: creates trampoline
/// blocks (edge splitting) to hold per-edge cleanup.
fn insert_edge_cleanup(
    func: &mut ArcFunction,
    classifier: &dyn ArcClassification,
    liveness: &BlockLiveness,
    borrowed_params: &FxHashSet<ArcVarId>,
) {
    let num_blocks = func.blocks.len();
    let predecessors = compute_predecessors(func);
    let global_borrows = compute_global_borrows(func, borrowed_params);

    // Collect edits before applying (to avoid index invalidation).
    // (block_idx, vars_to_dec) for blocks where Decs go at the start.
    let mut block_decs: Vec<(usize, Vec<ArcVarId>)> = Vec::new();
    // (pred_idx, succ_block_id, vars_to_dec) for edges that need splitting.
    let mut edge_splits: Vec<(usize, ArcBlockId, Vec<ArcVarId>)> = Vec::new();

    for (block_idx, preds) in predecessors.iter().enumerate().take(num_blocks) {
        if preds.is_empty() {
            continue;
        }

        let live_in_b = &liveness.live_in[block_idx];

        // Compute per-predecessor gaps, filtering out borrowed vars.
        let gaps: Vec<(usize, Vec<ArcVarId>)> = preds
            .iter()
            .map(|&pred_idx| {
                let mut gap: Vec<ArcVarId> = liveness.live_out[pred_idx]
                    .iter()
                    .copied()
                    .filter(|v| {
                        !live_in_b.contains(v)
                            && !borrowed_params.contains(v)
                            && !global_borrows.contains(v)
                            && classifier.needs_rc(func.var_type(*v))
                    })
                    .collect();
                gap.sort_by_key(|v| v.index()); // deterministic order
                (pred_idx, gap)
            })
            .collect();

        // Skip if all gaps are empty.
        if gaps.iter().all(|(_, g)| g.is_empty()) {
            continue;
        }

        if preds.len() == 1 {
            // Single predecessor: insert Decs at block start.
            let (_, ref gap) = gaps[0];
            if !gap.is_empty() {
                block_decs.push((block_idx, gap.clone()));
            }
        } else {
            // Multiple predecessors: check if all gaps are identical.
            let all_identical = gaps.windows(2).all(|w| w[0].1 == w[1].1);

            if all_identical {
                // All predecessors have the exact same gap → insert at block start.
                if !gaps[0].1.is_empty() {
                    block_decs.push((block_idx, gaps[0].1.clone()));
                }
            } else {
                // Different gaps per predecessor → edge split each non-empty gap.
                for &(pred_idx, ref gap) in &gaps {
                    if !gap.is_empty() {
                        edge_splits.push((pred_idx, func.blocks[block_idx].id, gap.clone()));
                    }
                }
            }
        }
    }

    // Apply block-start Decs (prepend to block body).
    for (block_idx, vars) in &block_decs {
        let decs: Vec<ArcInstr> = vars.iter().map(|&v| ArcInstr::RcDec { var: v }).collect();
        let dec_spans: Vec<Option<ori_ir::Span>> = vec![None; decs.len()];

        let mut new_body = decs;
        new_body.append(&mut func.blocks[*block_idx].body);
        func.blocks[*block_idx].body = new_body;

        let mut new_spans = dec_spans;
        new_spans.append(&mut func.spans[*block_idx]);
        func.spans[*block_idx] = new_spans;
    }

    // Apply edge splits: create trampoline blocks with Dec instructions.
    for &(pred_idx, succ_block_id, ref vars) in &edge_splits {
        let trampoline_id = func.next_block_id();
        let trampoline_body: Vec<ArcInstr> =
            vars.iter().map(|&v| ArcInstr::RcDec { var: v }).collect();

        func.push_block(ArcBlock {
            id: trampoline_id,
            params: vec![],
            body: trampoline_body,
            terminator: ArcTerminator::Jump {
                target: succ_block_id,
                args: vec![],
            },
        });

        redirect_edges(
            &mut func.blocks[pred_idx].terminator,
            succ_block_id,
            trampoline_id,
        );
    }

    if !block_decs.is_empty() || !edge_splits.is_empty() {
        tracing::debug!(
            block_decs = block_decs.len(),
            edge_splits = edge_splits.len(),
            "edge cleanup applied"
        );
    }
}

/// Compute the predecessor list for each block (deduplicated).
///
/// Returns a vector indexed by block index, where each entry is the
/// list of distinct predecessor block indices.
pub(crate) fn compute_predecessors(func: &ArcFunction) -> Vec<Vec<usize>> {
    let num_blocks = func.blocks.len();
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); num_blocks];

    for (block_idx, block) in func.blocks.iter().enumerate() {
        let mut seen = FxHashSet::default();
        for succ_id in successor_block_ids(&block.terminator) {
            let succ_idx = succ_id.index();
            if succ_idx < num_blocks && seen.insert(succ_idx) {
                predecessors[succ_idx].push(block_idx);
            }
        }
    }

    predecessors
}

/// Extract successor block IDs from a terminator.
pub(crate) fn successor_block_ids(terminator: &ArcTerminator) -> Vec<ArcBlockId> {
    match terminator {
        ArcTerminator::Return { .. } | ArcTerminator::Resume | ArcTerminator::Unreachable => {
            vec![]
        }
        ArcTerminator::Jump { target, .. } => vec![*target],
        ArcTerminator::Branch {
            then_block,
            else_block,
            ..
        } => vec![*then_block, *else_block],
        ArcTerminator::Switch { cases, default, .. } => {
            let mut targets: Vec<ArcBlockId> = cases.iter().map(|&(_, b)| b).collect();
            targets.push(*default);
            targets
        }
        ArcTerminator::Invoke { normal, unwind, .. } => vec![*normal, *unwind],
    }
}

/// Compute the global set of borrow-derived variables across all blocks.
///
/// A variable is borrow-derived if it was created by `Project` or `Let(Var)`
/// from a borrowed parameter (or transitively from another borrow-derived var)
/// in any block. These variables must not receive `RcDec` in edge cleanup
/// because they were never `RcInc`'d.
fn compute_global_borrows(
    func: &ArcFunction,
    borrowed_params: &FxHashSet<ArcVarId>,
) -> FxHashSet<ArcVarId> {
    let mut global = FxHashSet::default();
    for block in &func.blocks {
        let block_borrows = compute_borrows(block, borrowed_params);
        global.extend(block_borrows);
    }
    global
}

/// Redirect all edges in a terminator from `old_target` to `new_target`.
fn redirect_edges(terminator: &mut ArcTerminator, old_target: ArcBlockId, new_target: ArcBlockId) {
    match terminator {
        ArcTerminator::Branch {
            then_block,
            else_block,
            ..
        } => {
            if *then_block == old_target {
                *then_block = new_target;
            }
            if *else_block == old_target {
                *else_block = new_target;
            }
        }
        ArcTerminator::Switch { cases, default, .. } => {
            for (_, target) in cases.iter_mut() {
                if *target == old_target {
                    *target = new_target;
                }
            }
            if *default == old_target {
                *default = new_target;
            }
        }
        ArcTerminator::Jump { target, .. } => {
            if *target == old_target {
                *target = new_target;
            }
        }
        ArcTerminator::Invoke { normal, unwind, .. } => {
            if *normal == old_target {
                *normal = new_target;
            }
            if *unwind == old_target {
                *unwind = new_target;
            }
        }
        ArcTerminator::Return { .. } | ArcTerminator::Resume | ArcTerminator::Unreachable => {}
    }
}
