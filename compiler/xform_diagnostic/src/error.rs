//! Session-fatal errors (spec §7): these happen before any unit traversal
//! is underway, so there's nothing to attach a [`Diagnostic`](crate::Diagnostic)
//! to — they're returned as `Err` from setup functions instead.

use thiserror::Error;

#[derive(Error, Debug, Eq, PartialEq)]
pub enum SessionError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("duplicate plugin name: {0}")]
    PluginDuplicate(String),

    #[error("dependency cycle detected among plugins: {0}")]
    DependencyCycle(String),
}
