mod entries;
mod render;

pub use entries::cmd_entries;
pub use render::cmd_render;

use std::path::Path;

use anyhow::{Context, Result};
use entrypage_lib::compilation::{Compilation, CompilationSnapshot};
use entrypage_lib::emit::{CompilationSession, EntryPagePlugin};
use entrypage_lib::registry::LoaderContext;

/// Load a snapshot and replay its module loads through `plugin`.
///
/// Each module gets its own loader context. Template records in the snapshot
/// are reported through the context of the module they belong to, the way a
/// cooperating transform would while the module's source is processed.
pub fn replay_snapshot(plugin: &EntryPagePlugin, path: &Path) -> Result<(Compilation, CompilationSession)> {
  let snapshot =
    CompilationSnapshot::load(path).with_context(|| format!("Failed to load snapshot: {}", path.display()))?;
  let (compilation, mut templates) = snapshot
    .into_parts()
    .with_context(|| format!("Invalid snapshot: {}", path.display()))?;

  let mut session = plugin.this_compilation();
  for module in compilation.graph.iter() {
    let ctx = LoaderContext::new();
    session.module_loaded(&ctx, module);

    if let Some(record) = templates.remove(&module.id) {
      session.registry().report_template(&ctx, record);
    }
  }

  Ok((compilation, session))
}
