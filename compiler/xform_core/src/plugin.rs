//! The plugin contract (spec §3 / §4.5): identity, dependencies, node
//! interests, and the two entry points a plugin may implement.

use xform_diagnostic::Diagnostic;
use xform_ir::{ExprId, ExprKind, FileUnit};

use crate::context::{PluginContext, UnitState};

/// Node variants the per-node traversal dispatches on. Plugins that only
/// need a whole-unit pass (lambda parameter inference, error-propagation
/// lowering, which both need enclosing-function context) declare no
/// interests and rely solely on `process_unit`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeVariant {
    ErrorPropagationExpr,
    LambdaExpr,
    Call,
}

impl NodeVariant {
    #[must_use]
    pub fn of(kind: &ExprKind) -> Option<NodeVariant> {
        match kind {
            ExprKind::ErrorPropagation { .. } => Some(NodeVariant::ErrorPropagationExpr),
            ExprKind::Lambda { .. } => Some(NodeVariant::LambdaExpr),
            ExprKind::Call { .. } => Some(NodeVariant::Call),
            _ => None,
        }
    }
}

/// What a `transform` call did to the node it was handed.
pub enum Outcome {
    Unchanged,
    /// The node at `ExprId` now has different contents (or the id was left
    /// the same but the arena slot was rewritten); traversal continues
    /// linearly and will reach anything freshly pushed to the arena.
    Replaced(ExprId),
}

/// A transformation plugin (spec §3). Methods take `&self`: plugins are
/// long-lived singletons (spec §5) and must not carry per-unit mutable
/// state themselves — that lives in [`UnitState`], threaded explicitly.
pub trait Plugin {
    fn name(&self) -> &'static str;

    /// Names of plugins that must run before this one.
    fn dependencies(&self) -> &'static [&'static str] {
        &[]
    }

    fn interests(&self) -> &'static [NodeVariant] {
        &[]
    }

    /// Called once per unit, before either `process_unit` or `transform` is
    /// invoked for that unit (spec §4.5 "context-aware" capability).
    fn on_context(&self, _ctx: &PluginContext<'_>) {}

    /// A whole-unit pass, run once per unit in topological order before the
    /// per-node traversal. Default no-op.
    fn process_unit(
        &self,
        _unit: &mut FileUnit,
        _ctx: &PluginContext<'_>,
        _state: &mut UnitState,
    ) -> Result<(), Diagnostic> {
        Ok(())
    }

    /// Called once per matching node during the per-node traversal.
    fn transform(
        &self,
        _id: ExprId,
        _unit: &mut FileUnit,
        _ctx: &PluginContext<'_>,
        _state: &mut UnitState,
    ) -> Result<Outcome, Diagnostic> {
        Ok(Outcome::Unchanged)
    }
}
