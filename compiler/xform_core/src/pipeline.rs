//! Plugin registration, dependency ordering, and the per-unit driver loop
//! (spec §3 "Pipeline" / §4.5).

use rustc_hash::FxHashMap;

use xform_diagnostic::SessionError;
use xform_ir::FileUnit;

use crate::context::{PluginContext, UnitState};
use crate::plugin::{NodeVariant, Outcome, Plugin};

/// Accepts plugins, rejects duplicate names, and produces a [`Pipeline`]
/// with a fixed, dependency-respecting run order.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Box<dyn Plugin>>,
}

impl PluginRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, plugin: Box<dyn Plugin>) -> Result<(), SessionError> {
        if self.plugins.iter().any(|p| p.name() == plugin.name()) {
            return Err(SessionError::PluginDuplicate(plugin.name().to_string()));
        }
        self.plugins.push(plugin);
        Ok(())
    }

    /// Topologically sort by `dependencies()` (Kahn's algorithm), breaking
    /// ties by registration order so the run order is deterministic. A
    /// dependency naming a plugin that was never registered, or a cycle
    /// among registered plugins, is session-fatal.
    pub fn build(self) -> Result<Pipeline, SessionError> {
        let n = self.plugins.len();
        let index_of: FxHashMap<&str, usize> = self
            .plugins
            .iter()
            .enumerate()
            .map(|(i, p)| (p.name(), i))
            .collect();

        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut in_degree: Vec<usize> = vec![0; n];
        for (i, plugin) in self.plugins.iter().enumerate() {
            for dep_name in plugin.dependencies() {
                let dep_idx = *index_of.get(dep_name).ok_or_else(|| {
                    SessionError::InvalidConfiguration(format!(
                        "plugin {:?} depends on unregistered plugin {dep_name:?}",
                        plugin.name()
                    ))
                })?;
                dependents[dep_idx].push(i);
                in_degree[i] += 1;
            }
        }

        let mut ready: Vec<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut order = Vec::with_capacity(n);
        while !ready.is_empty() {
            let idx = ready.remove(0);
            order.push(idx);
            for &dependent in &dependents[idx] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    let pos = ready.binary_search(&dependent).unwrap_or_else(|e| e);
                    ready.insert(pos, dependent);
                }
            }
        }

        if order.len() != n {
            let stuck: Vec<&str> = (0..n)
                .filter(|i| !order.contains(i))
                .map(|i| self.plugins[i].name())
                .collect();
            return Err(SessionError::DependencyCycle(stuck.join(", ")));
        }

        let mut slots: Vec<Option<Box<dyn Plugin>>> =
            self.plugins.into_iter().map(Some).collect();
        let ordered = order.into_iter().filter_map(|i| slots[i].take()).collect();
        Ok(Pipeline { plugins: ordered })
    }
}

/// Plugins in a fixed, dependency-respecting order, ready to run against
/// units.
pub struct Pipeline {
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Run every plugin's whole-unit pass, then traverse the arena
    /// dispatching `transform` by node variant. Traversal walks by
    /// increasing `ExprId` and re-checks the arena length on every step, so
    /// nodes a transform pushes are visited in turn. Returns `false` if a
    /// unit-fatal diagnostic was raised, in which case the caller should
    /// discard this unit's output and move on to the next.
    pub fn run_unit(
        &self,
        unit: &mut FileUnit,
        ctx: &PluginContext<'_>,
        state: &mut UnitState<'_>,
    ) -> bool {
        for plugin in &self.plugins {
            plugin.on_context(ctx);
        }

        for plugin in &self.plugins {
            tracing::debug!(plugin = plugin.name(), "running whole-unit pass");
            if let Err(diag) = plugin.process_unit(unit, ctx, state) {
                tracing::warn!(plugin = plugin.name(), kind = %diag.kind, "plugin reported a diagnostic");
                state.diagnostics.push(diag);
            }
            if state.diagnostics.is_unit_fatal() {
                tracing::error!(plugin = plugin.name(), "unit-fatal diagnostic, abandoning unit");
                return false;
            }
        }

        let mut i: u32 = 0;
        while (i as usize) < unit.exprs.len() {
            let id = xform_ir::ExprId(i);
            if let Some(variant) = NodeVariant::of(unit.exprs.kind(id)) {
                for plugin in &self.plugins {
                    if !plugin.interests().contains(&variant) {
                        continue;
                    }
                    match plugin.transform(id, unit, ctx, state) {
                        Ok(Outcome::Unchanged | Outcome::Replaced(_)) => {}
                        Err(diag) => {
                            tracing::warn!(plugin = plugin.name(), kind = %diag.kind, "plugin reported a diagnostic");
                            state.diagnostics.push(diag);
                        }
                    }
                    if state.diagnostics.is_unit_fatal() {
                        tracing::error!(plugin = plugin.name(), "unit-fatal diagnostic, abandoning unit");
                        return false;
                    }
                }
            }
            i += 1;
        }

        true
    }
}
