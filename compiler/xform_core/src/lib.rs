//! Plugin-driven AST transformation pipeline: error-propagation, lambda,
//! and `Option<T>` lowering over the extended AST defined in `xform_ir`.
//! Modeled on the teacher's plugin/pass architecture, generalized from
//! single-purpose compiler passes to a registered, dependency-ordered
//! plugin set (spec §3).

mod config;
mod context;
mod error_format;
mod names;
mod pipeline;
mod plugin;
pub mod plugins;

pub use config::{Config, LambdaSyntax, RawConfig};
pub use context::{MonoCache, PluginContext, UnitState};
pub use error_format::{escape, require_import, wrap};
pub use names::NameAllocator;
pub use pipeline::{Pipeline, PluginRegistry};
pub use plugin::{NodeVariant, Outcome, Plugin};

/// Build the pipeline with the three built-in lowerings registered in their
/// required dependency order (spec §4.5: lambda parameter inference before
/// lambda lowering; the rest are independent).
pub fn default_pipeline() -> Result<Pipeline, xform_diagnostic::SessionError> {
    let mut registry = PluginRegistry::new();
    registry.register(Box::new(plugins::error_propagation::ErrorPropagationPlugin))?;
    registry.register(Box::new(plugins::lambda::LambdaInferencePlugin))?;
    registry.register(Box::new(plugins::lambda::LambdaLoweringPlugin))?;
    registry.register(Box::new(plugins::option_mono::OptionMonoPlugin))?;
    registry.build()
}
