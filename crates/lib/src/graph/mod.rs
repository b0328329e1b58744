//! Module dependency graph.
//!
//! The graph is owned by the host build; this crate only reads it. Modules
//! reference their dependencies by [`ModuleId`], so reference cycles are
//! representable and every traversal must guard against them.

mod types;
pub mod walk;

pub use types::{Dependency, Module, ModuleGraph, ModuleId};
pub use walk::{DependencyWalk, walk};
