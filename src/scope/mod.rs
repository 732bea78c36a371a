//! Scope module - couple-account visibility resolution.

mod scope_model;
mod scope_resolver;

pub use scope_model::{CoupleLink, ResolvedScope, ViewMode};
pub use scope_resolver::resolve_scope;
