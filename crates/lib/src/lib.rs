//! entrypage-lib: per-entry HTML page generation for module-bundling builds.
//!
//! The crate observes a finished build compilation and emits one HTML page for
//! every entry point whose module graph contains a page template:
//! - `Compilation`: the host build as seen by this crate (module graph, entry
//!   points with their chunks and files, output artifacts)
//! - `TemplateRegistry`: loader-context callbacks and the template records
//!   they report for modules
//! - `DependencyWalk`: depth-first traversal of an entry module's dependencies
//! - `CompilationSession`: the lifecycle hooks that tie it all together

pub mod compilation;
pub mod consts;
pub mod emit;
pub mod graph;
pub mod registry;
pub mod render;
pub mod util;
